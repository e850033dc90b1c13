//! Datadog integration resource

use async_trait::async_trait;
use meshguard_client::Client;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::crud::{self, CreatedId, Ignored, RequestErrorHandler, ResourceOperationConfig};
use crate::diag::Diagnostics;
use crate::schema::{Attribute, ResourceSchema};
use crate::state::{ReadFromState, ResourceState, StateError, WriteToState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatadogIntegration {
    pub name: String,
    pub api_key: String,
}

impl ReadFromState for DatadogIntegration {
    fn read_from_state(state: &ResourceState) -> Result<Self, StateError> {
        Ok(Self {
            name: state.require_string("name")?.to_string(),
            api_key: state.require_string("api_key")?.to_string(),
        })
    }
}

impl WriteToState for DatadogIntegration {
    fn write_to_state(&self, state: &mut ResourceState) -> Result<(), StateError> {
        state.set_string("name", &self.name);
        state.set_string("api_key", &self.api_key);
        Ok(())
    }
}

fn create_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "DatadogIntegrationCreate",
        method: Method::POST,
        url: |_, c| format!("{}/v1/integrations/datadog", c.control_plane()),
        error_handler: None,
    }
}

fn read_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "DatadogIntegrationRead",
        method: Method::GET,
        url: |s, c| {
            format!(
                "{}/v1/integrations/datadog/{}",
                c.control_plane(),
                s.id().unwrap_or_default()
            )
        },
        error_handler: Some(RequestErrorHandler::IgnoreNotFound),
    }
}

fn update_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "DatadogIntegrationUpdate",
        method: Method::PUT,
        url: |s, c| {
            format!(
                "{}/v1/integrations/datadog/{}",
                c.control_plane(),
                s.id().unwrap_or_default()
            )
        },
        error_handler: None,
    }
}

fn delete_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "DatadogIntegrationDelete",
        method: Method::DELETE,
        url: |s, c| {
            format!(
                "{}/v1/integrations/datadog/{}",
                c.control_plane(),
                s.id().unwrap_or_default()
            )
        },
        error_handler: None,
    }
}

pub struct DatadogIntegrationResource;

#[async_trait]
impl super::ManagedResource for DatadogIntegrationResource {
    fn type_name(&self) -> &'static str {
        "meshguard_datadog_integration"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(
            self.type_name(),
            vec![
                Attribute::string("name").required(),
                Attribute::string("api_key").required().sensitive(),
                Attribute::string("id").computed(),
            ],
        )
    }

    async fn create(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        crud::create_resource::<DatadogIntegration, CreatedId, DatadogIntegration>(
            client,
            state,
            &create_config(),
            &read_config(),
        )
        .await
    }

    async fn read(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        crud::read_resource::<DatadogIntegration>(client, state, &read_config()).await
    }

    async fn update(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        crud::update_resource::<DatadogIntegration, Ignored, DatadogIntegration>(
            client,
            state,
            &update_config(),
            &read_config(),
        )
        .await
    }

    async fn delete(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        crud::delete_resource(client, state, &delete_config()).await
    }
}
