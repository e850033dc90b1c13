//! Data repository resource
//!
//! A repository is a database or data service the control plane knows about;
//! sidecars bind to repositories to proxy access to them.

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
pub struct Repository {
    pub name: String,
    #[serde(rename = "type")]
    pub repo_type: String,
    pub host: String,
    pub port: i64,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl ReadFromState for Repository {
    fn read_from_state(state: &ResourceState) -> Result<Self, StateError> {
        Ok(Self {
            name: state.require_string("name")?.to_string(),
            repo_type: state.require_string("type")?.to_string(),
            host: state.require_string("host")?.to_string(),
            port: state.require_i64("port")?,
            labels: state.get_string_list("labels").unwrap_or_default(),
        })
    }
}

impl WriteToState for Repository {
    fn write_to_state(&self, state: &mut ResourceState) -> Result<(), StateError> {
        state.set_string("name", &self.name);
        state.set_string("type", &self.repo_type);
        state.set_string("host", &self.host);
        state.set_i64("port", self.port);
        state.set_string_list("labels", self.labels.clone());
        Ok(())
    }
}

fn create_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "RepositoryCreate",
        method: Method::POST,
        url: |_, c| format!("{}/v1/repos", c.control_plane()),
        error_handler: None,
    }
}

fn read_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "RepositoryRead",
        method: Method::GET,
        url: |s, c| format!("{}/v1/repos/{}", c.control_plane(), s.id().unwrap_or_default()),
        error_handler: Some(RequestErrorHandler::IgnoreNotFound),
    }
}

fn update_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "RepositoryUpdate",
        method: Method::PUT,
        url: |s, c| format!("{}/v1/repos/{}", c.control_plane(), s.id().unwrap_or_default()),
        error_handler: None,
    }
}

fn delete_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "RepositoryDelete",
        method: Method::DELETE,
        url: |s, c| format!("{}/v1/repos/{}", c.control_plane(), s.id().unwrap_or_default()),
        error_handler: None,
    }
}

pub struct RepositoryResource;

#[async_trait]
impl super::ManagedResource for RepositoryResource {
    fn type_name(&self) -> &'static str {
        "meshguard_repository"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(
            self.type_name(),
            vec![
                Attribute::string("name").required(),
                Attribute::string("type").required(),
                Attribute::string("host").required(),
                Attribute::int("port").required(),
                Attribute::string_list("labels"),
                Attribute::string("id").computed(),
            ],
        )
    }

    async fn create(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        crud::create_resource::<Repository, CreatedId, Repository>(
            client,
            state,
            &create_config(),
            &read_config(),
        )
        .await
    }

    async fn read(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        crud::read_resource::<Repository>(client, state, &read_config()).await
    }

    async fn update(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        crud::update_resource::<Repository, Ignored, Repository>(
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
