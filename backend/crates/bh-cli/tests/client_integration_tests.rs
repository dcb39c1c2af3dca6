//! Integration tests for the CLI client using wiremock mock server

use bh_cli::{Client, ClientError};

use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[tokio::test]
async fn status_returns_server_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/server/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "server": {
                "phase": "online",
                "address": "mc.example.net:25565",
                "last_transition_at": "2026-08-01T12:00:00+00:00"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri());
    let result = client.status().await.unwrap();

    assert_eq!(result["server"]["phase"], "online");
    assert_eq!(result["server"]["address"], "mc.example.net:25565");
}

#[tokio::test]
async fn start_returns_transitional_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/server/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "server": {
                "phase": "starting",
                "active_run": {
                    "id": "run-1",
                    "kind": "start",
                    "started_at": "2026-08-01T12:00:00+00:00"
                },
                "last_transition_at": "2026-08-01T12:00:00+00:00"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri());
    let result = client.start().await.unwrap();

    assert_eq!(result["server"]["phase"], "starting");
    assert_eq!(result["server"]["active_run"]["id"], "run-1");
}

#[tokio::test]
async fn conflict_surfaces_as_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/server/stop"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": {
                "code": "CONFLICT",
                "message": "cannot stop while starting"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri());
    let err = client.stop().await.unwrap_err();

    match err {
        ClientError::Api { code, message, .. } => {
            assert_eq!(code, "CONFLICT");
            assert!(message.contains("cannot stop"));
        }
        other => panic!("expected Api error, got {}", other),
    }
}

#[tokio::test]
async fn engine_outage_surfaces_as_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/server/start"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": {
                "code": "ENGINE_UNAVAILABLE",
                "message": "connection refused"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri());
    let err = client.start().await.unwrap_err();

    assert!(err.to_string().contains("ENGINE_UNAVAILABLE"));
}

#[tokio::test]
async fn unreachable_server_is_an_http_error() {
    let client = Client::new("http://127.0.0.1:9");
    let err = client.status().await.unwrap_err();

    assert!(matches!(err, ClientError::Http { .. }));
}
