//! Sidecar resource
//!
//! A sidecar is the data-plane proxy deployed in front of repositories.

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
pub struct Sidecar {
    pub name: String,
    pub deployment_method: String,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Endpoint clients connect to; unset until the sidecar is deployed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_endpoint: Option<String>,
}

impl ReadFromState for Sidecar {
    fn read_from_state(state: &ResourceState) -> Result<Self, StateError> {
        Ok(Self {
            name: state.require_string("name")?.to_string(),
            deployment_method: state.require_string("deployment_method")?.to_string(),
            labels: state.get_string_list("labels").unwrap_or_default(),
            user_endpoint: state.get_string("user_endpoint").map(str::to_string),
        })
    }
}

impl WriteToState for Sidecar {
    fn write_to_state(&self, state: &mut ResourceState) -> Result<(), StateError> {
        state.set_string("name", &self.name);
        state.set_string("deployment_method", &self.deployment_method);
        state.set_string_list("labels", self.labels.clone());
        if let Some(endpoint) = &self.user_endpoint {
            state.set_string("user_endpoint", endpoint);
        }
        Ok(())
    }
}

fn read_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "SidecarRead",
        method: Method::GET,
        url: |s, c| {
            format!(
                "{}/v1/sidecars/{}",
                c.control_plane(),
                s.id().unwrap_or_default()
            )
        },
        error_handler: Some(RequestErrorHandler::IgnoreNotFound),
    }
}

pub struct SidecarResource;

#[async_trait]
impl super::ManagedResource for SidecarResource {
    fn type_name(&self) -> &'static str {
        "meshguard_sidecar"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(
            self.type_name(),
            vec![
                Attribute::string("name").required(),
                Attribute::string("deployment_method").required(),
                Attribute::string_list("labels"),
                Attribute::string("user_endpoint").computed(),
                Attribute::string("id").computed(),
            ],
        )
    }

    async fn create(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        let create = ResourceOperationConfig {
            name: "SidecarCreate",
            method: Method::POST,
            url: |_, c| format!("{}/v1/sidecars", c.control_plane()),
            error_handler: None,
        };
        crud::create_resource::<Sidecar, CreatedId, Sidecar>(client, state, &create, &read_config())
            .await
    }

    async fn read(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        crud::read_resource::<Sidecar>(client, state, &read_config()).await
    }

    async fn update(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        let update = ResourceOperationConfig {
            name: "SidecarUpdate",
            method: Method::PUT,
            url: |s, c| {
                format!(
                    "{}/v1/sidecars/{}",
                    c.control_plane(),
                    s.id().unwrap_or_default()
                )
            },
            error_handler: None,
        };
        crud::update_resource::<Sidecar, Ignored, Sidecar>(client, state, &update, &read_config())
            .await
    }

    async fn delete(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        let delete = ResourceOperationConfig {
            name: "SidecarDelete",
            method: Method::DELETE,
            url: |s, c| {
                format!(
                    "{}/v1/sidecars/{}",
                    c.control_plane(),
                    s.id().unwrap_or_default()
                )
            },
            error_handler: None,
        };
        crud::delete_resource(client, state, &delete).await
    }
}
