//! Authenticated JSON client for the Meshguard control plane

use reqwest::Method;
use serde::Serialize;
use tracing::{debug, error};
use url::Url;

use crate::error::Error;

const USER_AGENT: &str = concat!("terraform-provider-meshguard/", env!("CARGO_PKG_VERSION"));

/// Maximum length of response body carried into logs and error messages,
/// to avoid leaking credentials echoed back by the API.
const MAX_LOG_BODY_LENGTH: usize = 200;

fn sanitize_for_log(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .collect();

    if cleaned.len() > MAX_LOG_BODY_LENGTH {
        format!(
            "{}... [truncated, {} bytes total]",
            &cleaned[..MAX_LOG_BODY_LENGTH],
            body.len()
        )
    } else {
        cleaned
    }
}

/// Connection settings for the control plane
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the control plane, e.g. `https://mesh.example.com`
    pub control_plane: String,
    /// Bearer token for API authentication
    pub api_token: String,
}

/// Client wrapper for control plane communication
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    control_plane: String,
    api_token: String,
}

impl Client {
    /// Validate the configuration and build a client.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let parsed = Url::parse(&config.control_plane)
            .map_err(|e| Error::InvalidConfig(format!("control plane URL: {}", e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "control plane URL must be http or https, got {:?}",
                parsed.scheme()
            )));
        }
        if config.api_token.is_empty() {
            return Err(Error::InvalidConfig("api token is empty".to_string()));
        }

        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            control_plane: config.control_plane.trim_end_matches('/').to_string(),
            api_token: config.api_token,
        })
    }

    /// Base URL of the control plane, without a trailing slash.
    ///
    /// Operation URL builders append their own `/v1/...` paths.
    pub fn control_plane(&self) -> &str {
        &self.control_plane
    }

    /// Issue one authenticated request and return the raw response body.
    ///
    /// Non-2xx responses become [`Error::Api`] carrying the status code so
    /// callers can apply per-status policies (e.g. treating 404 as drift).
    pub async fn do_request<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<Vec<u8>, Error>
    where
        B: Serialize + ?Sized,
    {
        debug!(%method, %url, "control plane request");

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&self.api_token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = sanitize_for_log(&bytes);
            error!(status = status.as_u16(), %url, body = %message, "control plane error");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{bearer_token, body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> Client {
        Client::new(ClientConfig {
            control_plane: server.uri(),
            api_token: "test-token".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn rejects_invalid_control_plane_url() {
        let err = Client::new(ClientConfig {
            control_plane: "not a url".to_string(),
            api_token: "t".to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn rejects_empty_token() {
        let err = Client::new(ClientConfig {
            control_plane: "https://mesh.example.com".to_string(),
            api_token: String::new(),
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn trims_trailing_slash() {
        let client = Client::new(ClientConfig {
            control_plane: "https://mesh.example.com/".to_string(),
            api_token: "t".to_string(),
        })
        .unwrap();
        assert_eq!(client.control_plane(), "https://mesh.example.com");
    }

    #[tokio::test]
    async fn sends_bearer_auth_and_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/repos"))
            .and(bearer_token("test-token"))
            .and(body_json(json!({"name": "orders"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "r-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let url = format!("{}/v1/repos", client.control_plane());
        let body = client
            .do_request(Method::POST, &url, Some(&json!({"name": "orders"})))
            .await
            .unwrap();
        assert_eq!(body, br#"{"id":"r-1"}"#.to_vec());
    }

    #[tokio::test]
    async fn maps_404_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/repos/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let url = format!("{}/v1/repos/missing", client.control_plane());
        let err = client
            .do_request(Method::GET, &url, None::<&()>)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn truncates_long_error_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/repos/big"))
            .respond_with(ResponseTemplate::new(500).set_body_string("x".repeat(5000)))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let url = format!("{}/v1/repos/big", client.control_plane());
        let err = client
            .do_request(Method::GET, &url, None::<&()>)
            .await
            .unwrap_err();
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 500);
                assert!(message.len() < 300, "message not truncated: {}", message.len());
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }
}
