//! Data access policy resource

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
pub struct Policy {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub enabled: bool,
    /// Data labels the policy applies to
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ReadFromState for Policy {
    fn read_from_state(state: &ResourceState) -> Result<Self, StateError> {
        Ok(Self {
            name: state.require_string("name")?.to_string(),
            description: state.get_string("description").unwrap_or_default().to_string(),
            enabled: state.get_bool("enabled").unwrap_or(true),
            data: state.get_string_list("data").unwrap_or_default(),
            tags: state.get_string_list("tags").unwrap_or_default(),
        })
    }
}

impl WriteToState for Policy {
    fn write_to_state(&self, state: &mut ResourceState) -> Result<(), StateError> {
        state.set_string("name", &self.name);
        state.set_string("description", &self.description);
        state.set_bool("enabled", self.enabled);
        state.set_string_list("data", self.data.clone());
        state.set_string_list("tags", self.tags.clone());
        Ok(())
    }
}

fn create_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "PolicyCreate",
        method: Method::POST,
        url: |_, c| format!("{}/v1/policies", c.control_plane()),
        error_handler: None,
    }
}

fn read_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "PolicyRead",
        method: Method::GET,
        url: |s, c| {
            format!(
                "{}/v1/policies/{}",
                c.control_plane(),
                s.id().unwrap_or_default()
            )
        },
        error_handler: Some(RequestErrorHandler::IgnoreNotFound),
    }
}

fn update_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "PolicyUpdate",
        method: Method::PUT,
        url: |s, c| {
            format!(
                "{}/v1/policies/{}",
                c.control_plane(),
                s.id().unwrap_or_default()
            )
        },
        error_handler: None,
    }
}

fn delete_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "PolicyDelete",
        method: Method::DELETE,
        url: |s, c| {
            format!(
                "{}/v1/policies/{}",
                c.control_plane(),
                s.id().unwrap_or_default()
            )
        },
        error_handler: None,
    }
}

pub struct PolicyResource;

#[async_trait]
impl super::ManagedResource for PolicyResource {
    fn type_name(&self) -> &'static str {
        "meshguard_policy"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(
            self.type_name(),
            vec![
                Attribute::string("name").required(),
                Attribute::string("description"),
                Attribute::bool("enabled"),
                Attribute::string_list("data"),
                Attribute::string_list("tags"),
                Attribute::string("id").computed(),
            ],
        )
    }

    async fn create(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        crud::create_resource::<Policy, CreatedId, Policy>(
            client,
            state,
            &create_config(),
            &read_config(),
        )
        .await
    }

    async fn read(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        crud::read_resource::<Policy>(client, state, &read_config()).await
    }

    async fn update(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        crud::update_resource::<Policy, Ignored, Policy>(
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
