//! SAML SSO integration resource

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
pub struct SamlIntegration {
    pub display_name: String,
    pub idp_metadata_url: String,
    #[serde(default)]
    pub disable_idp_initiated_login: bool,
}

impl ReadFromState for SamlIntegration {
    fn read_from_state(state: &ResourceState) -> Result<Self, StateError> {
        Ok(Self {
            display_name: state.require_string("display_name")?.to_string(),
            idp_metadata_url: state.require_string("idp_metadata_url")?.to_string(),
            disable_idp_initiated_login: state
                .get_bool("disable_idp_initiated_login")
                .unwrap_or(false),
        })
    }
}

impl WriteToState for SamlIntegration {
    fn write_to_state(&self, state: &mut ResourceState) -> Result<(), StateError> {
        state.set_string("display_name", &self.display_name);
        state.set_string("idp_metadata_url", &self.idp_metadata_url);
        state.set_bool(
            "disable_idp_initiated_login",
            self.disable_idp_initiated_login,
        );
        Ok(())
    }
}

fn read_config() -> ResourceOperationConfig {
    ResourceOperationConfig {
        name: "SamlIntegrationRead",
        method: Method::GET,
        url: |s, c| {
            format!(
                "{}/v1/integrations/saml/{}",
                c.control_plane(),
                s.id().unwrap_or_default()
            )
        },
        error_handler: Some(RequestErrorHandler::IgnoreNotFound),
    }
}

pub struct SamlIntegrationResource;

#[async_trait]
impl super::ManagedResource for SamlIntegrationResource {
    fn type_name(&self) -> &'static str {
        "meshguard_saml_integration"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(
            self.type_name(),
            vec![
                Attribute::string("display_name").required(),
                Attribute::string("idp_metadata_url").required(),
                Attribute::bool("disable_idp_initiated_login"),
                Attribute::string("id").computed(),
            ],
        )
    }

    async fn create(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        let create = ResourceOperationConfig {
            name: "SamlIntegrationCreate",
            method: Method::POST,
            url: |_, c| format!("{}/v1/integrations/saml", c.control_plane()),
            error_handler: None,
        };
        crud::create_resource::<SamlIntegration, CreatedId, SamlIntegration>(
            client,
            state,
            &create,
            &read_config(),
        )
        .await
    }

    async fn read(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        crud::read_resource::<SamlIntegration>(client, state, &read_config()).await
    }

    async fn update(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        let update = ResourceOperationConfig {
            name: "SamlIntegrationUpdate",
            method: Method::PUT,
            url: |s, c| {
                format!(
                    "{}/v1/integrations/saml/{}",
                    c.control_plane(),
                    s.id().unwrap_or_default()
                )
            },
            error_handler: None,
        };
        crud::update_resource::<SamlIntegration, Ignored, SamlIntegration>(
            client,
            state,
            &update,
            &read_config(),
        )
        .await
    }

    async fn delete(&self, client: &Client, state: &mut ResourceState) -> Diagnostics {
        let delete = ResourceOperationConfig {
            name: "SamlIntegrationDelete",
            method: Method::DELETE,
            url: |s, c| {
                format!(
                    "{}/v1/integrations/saml/{}",
                    c.control_plane(),
                    s.id().unwrap_or_default()
                )
            },
            error_handler: None,
        };
        crud::delete_resource(client, state, &delete).await
    }
}
