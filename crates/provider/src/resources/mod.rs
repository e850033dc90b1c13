//! Resource definitions
//!
//! Each module pairs a typed API payload with the operation configs wiring
//! it into the CRUD dispatchers.

pub mod datadog;
pub mod elk;
pub mod policy;
pub mod repository;
pub mod role;
pub mod saml;
pub mod sidecar;

use async_trait::async_trait;
use meshguard_client::Client;

use crate::diag::Diagnostics;
use crate::schema::ResourceSchema;
use crate::state::ResourceState;

/// A managed Terraform resource backed by the control plane
#[async_trait]
pub trait ManagedResource: Send + Sync {
    /// Terraform type name, e.g. `meshguard_repository`
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> ResourceSchema;

    async fn create(&self, client: &Client, state: &mut ResourceState) -> Diagnostics;

    async fn read(&self, client: &Client, state: &mut ResourceState) -> Diagnostics;

    async fn update(&self, client: &Client, state: &mut ResourceState) -> Diagnostics;

    async fn delete(&self, client: &Client, state: &mut ResourceState) -> Diagnostics;
}
