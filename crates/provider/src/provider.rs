//! Provider configuration and operation dispatch
//!
//! The plugin host configures the provider once, then invokes CRUD callbacks
//! per resource block. Dispatch is by Terraform type name; every callback
//! gets its own `ResourceState`, and the only shared object is the control
//! plane client.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use meshguard_client::{Client, ClientConfig};

use crate::data_sources::{self, DataSource};
use crate::diag::Diagnostics;
use crate::resources::{self, ManagedResource};
use crate::state::ResourceState;

pub const CONTROL_PLANE_ENV: &str = "MESHGUARD_CONTROL_PLANE";
pub const API_TOKEN_ENV: &str = "MESHGUARD_API_TOKEN";

/// Provider block configuration, with environment fallback for both fields
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub control_plane: Option<String>,
    pub api_token: Option<String>,
}

impl ProviderConfig {
    fn with_env_fallback(mut self) -> Self {
        if self.control_plane.is_none() {
            self.control_plane = std::env::var(CONTROL_PLANE_ENV).ok();
        }
        if self.api_token.is_none() {
            self.api_token = std::env::var(API_TOKEN_ENV).ok();
        }
        self
    }
}

/// Look up a managed resource by Terraform type name.
pub fn resource(type_name: &str) -> Option<Box<dyn ManagedResource>> {
    match type_name {
        "meshguard_datadog_integration" => {
            Some(Box::new(resources::datadog::DatadogIntegrationResource))
        }
        "meshguard_elk_integration" => Some(Box::new(resources::elk::ElkIntegrationResource)),
        "meshguard_saml_integration" => Some(Box::new(resources::saml::SamlIntegrationResource)),
        "meshguard_repository" => Some(Box::new(resources::repository::RepositoryResource)),
        "meshguard_sidecar" => Some(Box::new(resources::sidecar::SidecarResource)),
        "meshguard_policy" => Some(Box::new(resources::policy::PolicyResource)),
        "meshguard_role" => Some(Box::new(resources::role::RoleResource)),
        _ => None,
    }
}

/// Look up a data source by Terraform type name.
pub fn data_source(type_name: &str) -> Option<Box<dyn DataSource>> {
    match type_name {
        "meshguard_repository" => Some(Box::new(data_sources::repository::RepositoryDataSource)),
        "meshguard_role" => Some(Box::new(data_sources::role::RoleDataSource)),
        _ => None,
    }
}

fn unknown_type(kind: &str, type_name: &str) -> Diagnostics {
    Diagnostics::error(
        format!("unknown {} type", kind),
        format!("{:?} is not a {} type of this provider", type_name, kind),
    )
}

/// Meshguard Terraform provider
pub struct MeshguardProvider {
    client: Arc<RwLock<Option<Client>>>,
}

impl MeshguardProvider {
    pub fn new() -> Self {
        Self {
            client: Arc::new(RwLock::new(None)),
        }
    }

    /// Build and store the control plane client from the provider block.
    pub async fn configure(&self, config: ProviderConfig) -> Diagnostics {
        let config = config.with_env_fallback();

        let control_plane = match config.control_plane {
            Some(v) => v,
            None => {
                return Diagnostics::error(
                    "missing provider configuration",
                    format!("control_plane is required (or set {})", CONTROL_PLANE_ENV),
                )
            }
        };
        let api_token = match config.api_token {
            Some(v) => v,
            None => {
                return Diagnostics::error(
                    "missing provider configuration",
                    format!("api_token is required (or set {})", API_TOKEN_ENV),
                )
            }
        };

        match Client::new(ClientConfig {
            control_plane: control_plane.clone(),
            api_token,
        }) {
            Ok(client) => {
                info!(%control_plane, "provider configured");
                *self.client.write().await = Some(client);
                Diagnostics::new()
            }
            Err(e) => Diagnostics::error("failed to configure provider", e),
        }
    }

    async fn client(&self) -> Result<Client, Diagnostics> {
        self.client.read().await.clone().ok_or_else(|| {
            Diagnostics::error(
                "provider not configured",
                "configure must run before any resource operation",
            )
        })
    }

    /// Validate a resource or data-source config against its declared schema
    /// without touching the control plane.
    pub fn validate(&self, type_name: &str, state: &ResourceState) -> Diagnostics {
        if let Some(r) = resource(type_name) {
            return r.schema().validate(state);
        }
        if let Some(d) = data_source(type_name) {
            return d.schema().validate(state);
        }
        unknown_type("resource or data source", type_name)
    }

    pub async fn create(&self, type_name: &str, state: &mut ResourceState) -> Diagnostics {
        let Some(resource) = resource(type_name) else {
            return unknown_type("resource", type_name);
        };
        let mut diags = resource.schema().validate(state);
        if diags.has_errors() {
            return diags;
        }
        let client = match self.client().await {
            Ok(c) => c,
            Err(d) => return d,
        };
        info!(%type_name, "creating resource");
        diags.extend(resource.create(&client, state).await);
        diags
    }

    pub async fn read(&self, type_name: &str, state: &mut ResourceState) -> Diagnostics {
        let Some(resource) = resource(type_name) else {
            return unknown_type("resource", type_name);
        };
        let client = match self.client().await {
            Ok(c) => c,
            Err(d) => return d,
        };
        resource.read(&client, state).await
    }

    pub async fn update(&self, type_name: &str, state: &mut ResourceState) -> Diagnostics {
        let Some(resource) = resource(type_name) else {
            return unknown_type("resource", type_name);
        };
        let mut diags = resource.schema().validate(state);
        if diags.has_errors() {
            return diags;
        }
        let client = match self.client().await {
            Ok(c) => c,
            Err(d) => return d,
        };
        info!(%type_name, "updating resource");
        diags.extend(resource.update(&client, state).await);
        diags
    }

    pub async fn delete(&self, type_name: &str, state: &mut ResourceState) -> Diagnostics {
        let Some(resource) = resource(type_name) else {
            return unknown_type("resource", type_name);
        };
        let client = match self.client().await {
            Ok(c) => c,
            Err(d) => return d,
        };
        info!(%type_name, "deleting resource");
        resource.delete(&client, state).await
    }

    pub async fn read_data_source(&self, type_name: &str, state: &mut ResourceState) -> Diagnostics {
        let Some(source) = data_source(type_name) else {
            return unknown_type("data source", type_name);
        };
        let mut diags = source.schema().validate(state);
        if diags.has_errors() {
            return diags;
        }
        let client = match self.client().await {
            Ok(c) => c,
            Err(d) => return d,
        };
        diags.extend(source.read(&client, state).await);
        diags
    }

    /// Import an existing resource: seed a state with only the ID, then run
    /// the resource's read to fill the rest.
    pub async fn import(&self, type_name: &str, id: &str) -> (ResourceState, Diagnostics) {
        let mut state = ResourceState::new();
        state.set_id(id);
        info!(%type_name, %id, "importing resource");
        let diags = self.read(type_name, &mut state).await;
        (state, diags)
    }
}

impl Default for MeshguardProvider {
    fn default() -> Self {
        Self::new()
    }
}
