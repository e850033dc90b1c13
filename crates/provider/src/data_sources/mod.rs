//! Data source definitions
//!
//! Data sources are read-only lookups against the control plane; they share
//! the read dispatcher with managed resources.

pub mod repository;
pub mod role;

use async_trait::async_trait;
use meshguard_client::Client;

use crate::diag::Diagnostics;
use crate::schema::ResourceSchema;
use crate::state::ResourceState;

/// A read-only Terraform data source
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Terraform type name, e.g. `meshguard_repository`
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> ResourceSchema;

    async fn read(&self, client: &Client, state: &mut ResourceState) -> Diagnostics;
}
