//! ELK integration resource

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
pub struct ElkIntegration {
    pub name: String,
    pub kibana_url: String,
    pub es_url: String,
}

impl ReadFromState for ElkIntegration {
    fn read_from_state(state: &ResourceState) -> Result<Self, StateError> {
        Ok(Self {
            name: state.require_string("name")?.to_string(),
            kibana_url: state.require_string("kibana_url")?.to_string(),
            es_url: state.require_string("es_url")?.to_string(),
        })
    }
}

impl WriteToState for ElkIntegration {
    fn write_to_state(&self, state: &mut ResourceState) -> Result<(), StateError> {
        state.set_string("name", &self.name);
        state.set_string("kibana_url", &self.kibana_url);
        state.set_string("es_url", &self.es_url);
        Ok(())
    }
}

fn read_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "ElkIntegrationRead",
        method: Method::GET,
        url: |s, c| {
            format!(
                "{}/v1/integrations/elk/{}",
                c.control_plane(),
                s.id().unwrap_or_default()
            )
        },
        error_handler: Some(RequestErrorHandler::IgnoreNotFound),
    }
}

pub struct ElkIntegrationResource;

#[async_trait]
impl super::ManagedResource for ElkIntegrationResource {
    fn type_name(&self) -> &'static str {
        "meshguard_elk_integration"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(
            self.type_name(),
            vec![
                Attribute::string("name").required(),
                Attribute::string("kibana_url").required(),
                Attribute::string("es_url").required(),
                Attribute::string("id").computed(),
            ],
        )
    }

    async fn create(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        let create = ResourceOperationConfig {
            name: "ElkIntegrationCreate",
            method: Method::POST,
            url: |_, c| format!("{}/v1/integrations/elk", c.control_plane()),
            error_handler: None,
        };
        crud::create_resource::<ElkIntegration, CreatedId, ElkIntegration>(
            client,
            state,
            &create,
            &read_config(),
        )
        .await
    }

    async fn read(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        crud::read_resource::<ElkIntegration>(client, state, &read_config()).await
    }

    async fn update(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        let update = ResourceOperationConfig {
            name: "ElkIntegrationUpdate",
            method: Method::PUT,
            url: |s, c| {
                format!(
                    "{}/v1/integrations/elk/{}",
                    c.control_plane(),
                    s.id().unwrap_or_default()
                )
            },
            error_handler: None,
        };
        crud::update_resource::<ElkIntegration, Ignored, ElkIntegration>(
            client,
            state,
            &update,
            &read_config(),
        )
        .await
    }

    async fn delete(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        let delete = ResourceOperationConfig {
            name: "ElkIntegrationDelete",
            method: Method::DELETE,
            url: |s, c| {
                format!(
                    "{}/v1/integrations/elk/{}",
                    c.control_plane(),
                    s.id().unwrap_or_default()
                )
            },
            error_handler: None,
        };
        crud::delete_resource(client, state, &delete).await
    }
}
