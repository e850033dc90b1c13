//! Repository lookup data source

use async_trait::async_trait;
use meshguard_client::Client;
use reqwest::Method;
use serde::Deserialize;

use crate::crud::{self, ResourceOperationConfig};
use crate::diag::Diagnostics;
use crate::resources::repository::Repository;
use crate::schema::{Attribute, ResourceSchema};
use crate::state::{ResourceState, StateError, WriteToState};

#[derive(Debug, Deserialize)]
pub struct RepositoryRecord {
    pub id: String,
    #[serde(flatten)]
    pub repo: Repository,
}

/// Response of `GET /v1/repos?name=`; the server filters by exact name.
#[derive(Debug, Deserialize)]
pub struct RepositoryList {
    #[serde(default)]
    pub repos: Vec<RepositoryRecord>,
}

impl WriteToState for RepositoryList {
    fn write_to_state(&self, state: &mut ResourceState) -> Result<(), StateError> {
        let record = self.repos.first().ok_or_else(|| {
            StateError::UnexpectedResponse("query matched no repositories".to_string())
        })?;
        record.repo.write_to_state(state)?;
        state.set_id(&record.id);
        Ok(())
    }
}

fn query_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "RepositoryDataSourceRead",
        method: Method::GET,
        url: |s, c| {
            format!(
                "{}/v1/repos?name={}",
                c.control_plane(),
                s.get_string("name").unwrap_or_default()
            )
        },
        error_handler: None,
    }
}

pub struct RepositoryDataSource;

#[async_trait]
impl super::DataSource for RepositoryDataSource {
    fn type_name(&self) -> &'static str {
        "meshguard_repository"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(
            self.type_name(),
            vec![
                Attribute::string("name").required(),
                Attribute::string("type").computed(),
                Attribute::string("host").computed(),
                Attribute::int("port").computed(),
                Attribute::string_list("labels").computed(),
                Attribute::string("id").computed(),
            ],
        )
    }

    async fn read(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        crud::read_resource::<RepositoryList>(client, state, &query_config()).await
    }
}
