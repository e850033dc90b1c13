//! Role lookup data source

use async_trait::async_trait;
use meshguard_client::Client;
use reqwest::Method;
use serde::Deserialize;

use crate::crud::{self, ResourceOperationConfig};
use crate::diag::Diagnostics;
use crate::resources::role::Role;
use crate::schema::{Attribute, ResourceSchema};
use crate::state::{ResourceState, StateError, WriteToState};

#[derive(Debug, Deserialize)]
pub struct RoleRecord {
    pub id: String,
    #[serde(flatten)]
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct RoleList {
    #[serde(default)]
    pub roles: Vec<RoleRecord>,
}

impl WriteToState for RoleList {
    fn write_to_state(&self, state: &mut ResourceState) -> Result<(), StateError> {
        let record = self
            .roles
            .first()
            .ok_or_else(|| StateError::UnexpectedResponse("query matched no roles".to_string()))?;
        record.role.write_to_state(state)?;
        state.set_id(&record.id);
        Ok(())
    }
}

fn query_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "RoleDataSourceRead",
        method: Method::GET,
        url: |s, c| {
            format!(
                "{}/v1/roles?name={}",
                c.control_plane(),
                s.get_string("name").unwrap_or_default()
            )
        },
        error_handler: None,
    }
}

pub struct RoleDataSource;

#[async_trait]
impl super::DataSource for RoleDataSource {
    fn type_name(&self) -> &'static str {
        "meshguard_role"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(
            self.type_name(),
            vec![
                Attribute::string("name").required(),
                Attribute::string_list("permissions").computed(),
                Attribute::string("id").computed(),
            ],
        )
    }

    async fn read(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        crud::read_resource::<RoleList>(client, state, &query_config()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_lands_in_state() {
        let list: RoleList = serde_json::from_value(serde_json::json!({
            "roles": [{"id": "role-7", "name": "auditor", "permissions": ["view:logs"]}]
        }))
        .unwrap();

        let mut state = ResourceState::new();
        list.write_to_state(&mut state).unwrap();

        assert_eq!(state.id(), Some("role-7"));
        assert_eq!(state.get_string("name"), Some("auditor"));
        assert_eq!(
            state.get_string_list("permissions"),
            Some(vec!["view:logs".to_string()])
        );
    }
}
