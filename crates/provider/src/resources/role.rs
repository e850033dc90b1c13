//! Role resource

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
pub struct Role {
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl ReadFromState for Role {
    fn read_from_state(state: &ResourceState) -> Result<Self, StateError> {
        Ok(Self {
            name: state.require_string("name")?.to_string(),
            permissions: state.get_string_list("permissions").unwrap_or_default(),
        })
    }
}

impl WriteToState for Role {
    fn write_to_state(&self, state: &mut ResourceState) -> Result<(), StateError> {
        state.set_string("name", &self.name);
        state.set_string_list("permissions", self.permissions.clone());
        Ok(())
    }
}

fn read_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "RoleRead",
        method: Method::GET,
        url: |s, c| format!("{}/v1/roles/{}", c.control_plane(), s.id().unwrap_or_default()),
        error_handler: Some(RequestErrorHandler::IgnoreNotFound),
    }
}

pub struct RoleResource;

#[async_trait]
impl super::ManagedResource for RoleResource {
    fn type_name(&self) -> &'static str {
        "meshguard_role"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(
            self.type_name(),
            vec![
                Attribute::string("name").required(),
                Attribute::string_list("permissions"),
                Attribute::string("id").computed(),
            ],
        )
    }

    async fn create(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        let create = ResourceOperationConfig {
            name: "RoleCreate",
            method: Method::POST,
            url: |_, c| format!("{}/v1/roles", c.control_plane()),
            error_handler: None,
        };
        crud::create_resource::<Role, CreatedId, Role>(client, state, &create, &read_config())
            .await
    }

    async fn read(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        crud::read_resource::<Role>(client, state, &read_config()).await
    }

    async fn update(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        let update = ResourceOperationConfig {
            name: "RoleUpdate",
            method: Method::PUT,
            url: |s, c| format!("{}/v1/roles/{}", c.control_plane(), s.id().unwrap_or_default()),
            error_handler: None,
        };
        crud::update_resource::<Role, Ignored, Role>(client, state, &update, &read_config()).await
    }

    async fn delete(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        let delete = ResourceOperationConfig {
            name: "RoleDelete",
            method: Method::DELETE,
            url: |s, c| format!("{}/v1/roles/{}", c.control_plane(), s.id().unwrap_or_default()),
            error_handler: None,
        };
        crud::delete_resource(client, state, &delete).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_roundtrip() {
        let mut state = ResourceState::new();
        state.set_string("name", "auditor");
        state.set_string_list("permissions", ["view:logs", "view:policies"]);

        let payload = Role::read_from_state(&state).unwrap();
        let mut written = ResourceState::new();
        payload.write_to_state(&mut written).unwrap();

        assert_eq!(written.get_string("name"), Some("auditor"));
        assert_eq!(
            written.get_string_list("permissions"),
            Some(vec!["view:logs".to_string(), "view:policies".to_string()])
        );
    }
}
