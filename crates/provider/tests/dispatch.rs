//! Integration tests for the CRUD dispatchers against a mocked control plane
//!
//! Each test configures the provider against a wiremock server and asserts
//! both the resulting state and the exact requests that went over the wire.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use meshguard_provider::provider::{MeshguardProvider, ProviderConfig};
use meshguard_provider::state::{int_value, string_value, ResourceState};

async fn configured_provider(server: &MockServer) -> MeshguardProvider {
    let provider = MeshguardProvider::new();
    let diags = provider
        .configure(ProviderConfig {
            control_plane: Some(server.uri()),
            api_token: Some("test-token".to_string()),
        })
        .await;
    assert!(diags.is_empty(), "configure failed: {:?}", diags);
    provider
}

fn requests(server_requests: Option<Vec<Request>>) -> Vec<(String, String)> {
    server_requests
        .expect("request recording enabled")
        .iter()
        .map(|r| (r.method.to_string(), r.url.path().to_string()))
        .collect()
}

#[tokio::test]
async fn create_issues_post_then_refreshing_get() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/integrations/datadog"))
        .and(body_json(json!({"name": "datadog-1", "apiKey": "key-123"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "abc"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/integrations/datadog/abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "datadog-1", "apiKey": "key-123"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = configured_provider(&server).await;
    let mut state = ResourceState::from_attrs([
        ("name", string_value("datadog-1")),
        ("api_key", string_value("key-123")),
    ]);

    let diags = provider
        .create("meshguard_datadog_integration", &mut state)
        .await;
    assert!(diags.is_empty(), "create failed: {:?}", diags);
    assert_eq!(state.id(), Some("abc"));
    assert_eq!(state.get_string("name"), Some("datadog-1"));

    // Read-after-write: exactly POST then GET, in that order.
    let seen = requests(server.received_requests().await);
    assert_eq!(
        seen,
        vec![
            ("POST".to_string(), "/v1/integrations/datadog".to_string()),
            ("GET".to_string(), "/v1/integrations/datadog/abc".to_string()),
        ]
    );
}

#[tokio::test]
async fn read_with_ignore_not_found_clears_id_on_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/repos/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("repo not found"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = configured_provider(&server).await;
    let mut state = ResourceState::from_attrs([("id", string_value("gone"))]);

    let diags = provider.read("meshguard_repository", &mut state).await;
    assert!(diags.is_empty(), "404 must surface as drift, got {:?}", diags);
    assert_eq!(state.id(), None);
}

#[tokio::test]
async fn read_propagates_other_api_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/repos/r-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let provider = configured_provider(&server).await;
    let mut state = ResourceState::from_attrs([("id", string_value("r-1"))]);

    let diags = provider.read("meshguard_repository", &mut state).await;
    assert!(diags.has_errors());
    // A hard error must not wipe the ID; only confirmed absence does.
    assert_eq!(state.id(), Some("r-1"));
}

#[tokio::test]
async fn delete_issues_exactly_one_bodyless_call() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/repos/r-9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let provider = configured_provider(&server).await;
    let mut state = ResourceState::from_attrs([("id", string_value("r-9"))]);

    let diags = provider.delete("meshguard_repository", &mut state).await;
    assert!(diags.is_empty(), "delete failed: {:?}", diags);

    let recorded = server.received_requests().await.unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].method.to_string(), "DELETE");
    assert!(recorded[0].body.is_empty(), "delete must carry no body");
}

#[tokio::test]
async fn update_always_delegates_to_read() {
    let server = MockServer::start().await;

    // Update response carries no body; the follow-up read is the source of
    // truth for refreshed state.
    Mock::given(method("PUT"))
        .and(path("/v1/policies/p-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/policies/p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "mask-pii",
            "description": "normalized by server",
            "enabled": true,
            "data": ["EMAIL"],
            "tags": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = configured_provider(&server).await;
    let mut state = ResourceState::from_attrs([
        ("id", string_value("p-1")),
        ("name", string_value("mask-pii")),
        ("description", string_value("local description")),
    ]);

    let diags = provider.update("meshguard_policy", &mut state).await;
    assert!(diags.is_empty(), "update failed: {:?}", diags);
    assert_eq!(state.get_string("description"), Some("normalized by server"));

    let seen = requests(server.received_requests().await);
    assert_eq!(
        seen,
        vec![
            ("PUT".to_string(), "/v1/policies/p-1".to_string()),
            ("GET".to_string(), "/v1/policies/p-1".to_string()),
        ]
    );
}

#[tokio::test]
async fn create_stops_before_any_request_on_invalid_config() {
    let server = MockServer::start().await;
    let provider = configured_provider(&server).await;

    // Missing required api_key: schema validation must fail locally.
    let mut state = ResourceState::from_attrs([("name", string_value("datadog-1"))]);
    let diags = provider
        .create("meshguard_datadog_integration", &mut state)
        .await;
    assert!(diags.has_errors());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn import_seeds_id_and_reads() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/repos/r-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "orders",
            "type": "postgresql",
            "host": "orders.internal",
            "port": 5432,
            "labels": ["pii"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = configured_provider(&server).await;
    let (state, diags) = provider.import("meshguard_repository", "r-42").await;
    assert!(diags.is_empty(), "import failed: {:?}", diags);
    assert_eq!(state.id(), Some("r-42"));
    assert_eq!(state.get_string("host"), Some("orders.internal"));
    assert_eq!(state.get_i64("port"), Some(5432));
}

#[tokio::test]
async fn data_source_looks_up_by_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/repos"))
        .and(query_param("name", "orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "repos": [{
                "id": "r-1",
                "name": "orders",
                "type": "postgresql",
                "host": "orders.internal",
                "port": 5432,
                "labels": []
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = configured_provider(&server).await;
    let mut state = ResourceState::from_attrs([("name", string_value("orders"))]);

    let diags = provider
        .read_data_source("meshguard_repository", &mut state)
        .await;
    assert!(diags.is_empty(), "data source read failed: {:?}", diags);
    assert_eq!(state.id(), Some("r-1"));
    assert_eq!(state.get_string("type"), Some("postgresql"));
}

#[tokio::test]
async fn create_surfaces_api_errors_as_diagnostics() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/repos"))
        .respond_with(ResponseTemplate::new(409).set_body_string("name already in use"))
        .mount(&server)
        .await;

    let provider = configured_provider(&server).await;
    let mut state = ResourceState::from_attrs([
        ("name", string_value("orders")),
        ("type", string_value("postgresql")),
        ("host", string_value("orders.internal")),
        ("port", int_value(5432)),
    ]);

    let diags = provider.create("meshguard_repository", &mut state).await;
    assert!(diags.has_errors());
    let diag = diags.iter().next().unwrap();
    assert_eq!(diag.summary, "RepositoryCreate failed");
    assert!(diag.detail.contains("409"), "detail: {}", diag.detail);
    // Failed create never triggers the refreshing read.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
