//! Integration tests for the GraphQL request executor.
//!
//! These tests run the executor against a mock server and verify the request
//! it sends and how it unwraps the response envelope.

use monday_api::clients::graphql::{GraphqlClient, GraphqlError};
use monday_api::clients::{HttpError, AUTHENTICATION_HINT, RATE_LIMIT_HINT};
use monday_api::{ApiToken, ApiUrl, ApiVersion, MondayConfig};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a config pointing at the mock server.
fn create_test_config(server: &MockServer) -> MondayConfig {
    MondayConfig::builder()
        .api_token(ApiToken::new("test-token").unwrap())
        .api_url(ApiUrl::new(format!("{}/v2", server.uri())).unwrap())
        .api_version(ApiVersion::V2025_04)
        .build()
        .unwrap()
}

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_graphql_client_uses_config_version() {
    let config = MondayConfig::builder()
        .api_token(ApiToken::new("test-token").unwrap())
        .api_version(ApiVersion::V2024_10)
        .build()
        .unwrap();

    let client = GraphqlClient::new(&config);
    assert_eq!(client.api_version(), &ApiVersion::V2024_10);
}

#[test]
fn test_graphql_client_with_version_override() {
    let config = MondayConfig::builder()
        .api_token(ApiToken::new("test-token").unwrap())
        .build()
        .unwrap();

    let client = GraphqlClient::with_version(&config, ApiVersion::V2025_01);
    assert_eq!(client.api_version(), &ApiVersion::V2025_01);
    assert_eq!(
        client.http_client().default_headers().get("API-Version"),
        Some(&"2025-01".to_string())
    );
}

// ============================================================================
// Request Tests
// ============================================================================

#[tokio::test]
async fn test_query_posts_body_with_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2"))
        .and(header("Authorization", "test-token"))
        .and(header("API-Version", "2025-04"))
        .and(header("Content-Type", "application/json"))
        .and(body_partial_json(json!({
            "query": "query { me { id } }",
            "variables": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "me": { "id": "1" } },
            "account_id": 55
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GraphqlClient::new(&create_test_config(&server));
    let data = client.query("query { me { id } }", None).await.unwrap();

    assert_eq!(data, json!({ "me": { "id": "1" } }));
}

#[tokio::test]
async fn test_query_forwards_variables() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "ids": ["9"] } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "boards": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GraphqlClient::new(&create_test_config(&server));
    let data = client
        .query(
            "query ($ids: [ID!]) { boards(ids: $ids) { id } }",
            Some(json!({ "ids": ["9"] })),
        )
        .await
        .unwrap();

    assert_eq!(data["boards"], json!([]));
}

// ============================================================================
// Envelope Tests
// ============================================================================

#[tokio::test]
async fn test_errors_take_priority_over_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "boards": [{ "id": "1" }] },
            "errors": [
                { "message": "Column not found", "extensions": { "code": "InvalidColumnIdException" } },
                { "message": "Second problem" }
            ]
        })))
        .mount(&server)
        .await;

    let client = GraphqlClient::new(&create_test_config(&server));
    let error = client.query("query { boards { id } }", None).await.unwrap_err();

    match error {
        GraphqlError::Remote(remote) => {
            assert_eq!(remote.messages, vec!["Column not found", "Second problem"]);
            assert_eq!(remote.codes, vec!["InvalidColumnIdException"]);
            assert_eq!(
                remote.to_string(),
                "GraphQL errors: Column not found; Second problem"
            );
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_flat_monday_error_is_remote() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error_message": "User unauthorized to perform action",
            "error_code": "UserUnauthorizedException",
            "status_code": 403
        })))
        .mount(&server)
        .await;

    let client = GraphqlClient::new(&create_test_config(&server));
    let error = client.query("query { me { id } }", None).await.unwrap_err();

    assert!(matches!(
        error,
        GraphqlError::Remote(ref remote)
            if remote.messages == ["User unauthorized to perform action"]
    ));
}

#[tokio::test]
async fn test_missing_data_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "account_id": 1 })))
        .mount(&server)
        .await;

    let client = GraphqlClient::new(&create_test_config(&server));
    let error = client.query("query { me { id } }", None).await.unwrap_err();

    assert!(matches!(error, GraphqlError::MissingData));
}

#[tokio::test]
async fn test_query_as_decodes_data() {
    #[derive(serde::Deserialize)]
    struct Me {
        me: Person,
    }

    #[derive(serde::Deserialize)]
    struct Person {
        name: String,
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "me": { "name": "Ann" } }
        })))
        .mount(&server)
        .await;

    let client = GraphqlClient::new(&create_test_config(&server));
    let me: Me = client.query_as("query { me { name } }", None).await.unwrap();
    assert_eq!(me.me.name, "Ann");

    let wrong: Result<Vec<u8>, _> = client.query_as("query { me { name } }", None).await;
    assert!(matches!(wrong, Err(GraphqlError::Decode(_))));
}

// ============================================================================
// Transport Error Tests
// ============================================================================

#[tokio::test]
async fn test_unauthorized_response_carries_authentication_hint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{ "message": "Not Authenticated" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GraphqlClient::new(&create_test_config(&server));
    let error = client.query("query { me { id } }", None).await.unwrap_err();

    let GraphqlError::Http(HttpError::Response(response)) = error else {
        panic!("expected HTTP response error");
    };
    assert!(response.is_authentication_failure());
    assert_eq!(response.message, "Not Authenticated");
    assert_eq!(response.hint.as_deref(), Some(AUTHENTICATION_HINT));
}

#[tokio::test]
async fn test_rate_limited_response_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "30")
                .set_body_json(json!({ "error_message": "Rate Limit Exceeded" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = GraphqlClient::new(&create_test_config(&server));
    let error = client.query("query { me { id } }", None).await.unwrap_err();

    let GraphqlError::Http(HttpError::Response(response)) = error else {
        panic!("expected HTTP response error");
    };
    assert!(response.is_rate_limited());
    let hint = response.hint.unwrap();
    assert!(hint.starts_with(RATE_LIMIT_HINT));
    assert!(hint.contains("retry after 30 seconds"));
}

#[tokio::test]
async fn test_server_error_has_no_hint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = GraphqlClient::new(&create_test_config(&server));
    let error = client.query("query { me { id } }", None).await.unwrap_err();

    let GraphqlError::Http(HttpError::Response(response)) = error else {
        panic!("expected HTTP response error");
    };
    assert_eq!(response.code, 500);
    assert_eq!(response.message, "upstream exploded");
    assert!(response.hint.is_none());
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    let config = MondayConfig::builder()
        .api_token(ApiToken::new("test-token").unwrap())
        .api_url(ApiUrl::new("http://127.0.0.1:1/v2").unwrap())
        .build()
        .unwrap();

    let client = GraphqlClient::new(&config);
    let error = client.query("query { me { id } }", None).await.unwrap_err();

    assert!(matches!(error, GraphqlError::Http(HttpError::Network(_))));
}
