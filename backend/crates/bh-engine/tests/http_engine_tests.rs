//! Integration tests for the HTTP engine adapter using wiremock

use bh_config::EngineConfig;
use bh_core::{ResourceDescriptor, RunKind, RunStatus};
use bh_engine::{EngineError, HttpWorkflowEngine, WorkflowEngine};

use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, method, path},
};

fn engine_for(server: &MockServer) -> HttpWorkflowEngine {
    let config = EngineConfig {
        base_url: server.uri(),
        request_timeout_secs: 2,
    };
    HttpWorkflowEngine::new(&config).unwrap()
}

#[tokio::test]
async fn start_run_returns_engine_run_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/runs"))
        .and(body_string_contains("\"kind\":\"start\""))
        .and(body_string_contains("request_id"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "run_id": "run-0001"
        })))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let run_id = engine.start_run(RunKind::Start).await.unwrap();

    assert_eq!(run_id, "run-0001");
}

#[tokio::test]
async fn start_run_conflict_maps_to_conflict_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/runs"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": {
                "code": "RUN_ACTIVE",
                "message": "a run is already active"
            }
        })))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let err = engine.start_run(RunKind::Stop).await.unwrap_err();

    assert!(matches!(err, EngineError::Conflict { .. }));
    assert!(err.to_string().contains("already active"));
}

#[tokio::test]
async fn start_run_server_error_maps_to_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/runs"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let err = engine.start_run(RunKind::Start).await.unwrap_err();

    assert!(matches!(err, EngineError::Unavailable { .. }));
}

#[tokio::test]
async fn unreachable_engine_maps_to_unavailable() {
    let config = EngineConfig {
        // Nothing listens here
        base_url: "http://127.0.0.1:9".into(),
        request_timeout_secs: 1,
    };
    let engine = HttpWorkflowEngine::new(&config).unwrap();

    let err = engine.start_run(RunKind::Start).await.unwrap_err();

    assert!(matches!(err, EngineError::Unavailable { .. }));
}

#[tokio::test]
async fn run_status_parses_known_statuses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/runs/run-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "succeeded"
        })))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let status = engine.run_status("run-7").await.unwrap();

    assert_eq!(status, RunStatus::Succeeded);
}

#[tokio::test]
async fn run_status_not_found_is_unknown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/runs/run-8"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let status = engine.run_status("run-8").await.unwrap();

    assert_eq!(status, RunStatus::Unknown);
}

#[tokio::test]
async fn run_status_unrecognized_string_is_unknown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/runs/run-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "almost_done"
        })))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let status = engine.run_status("run-9").await.unwrap();

    assert_eq!(status, RunStatus::Unknown);
}

#[tokio::test]
async fn describe_resource_present_carries_address() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/resource"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "present",
            "address": "mc.example.net:25565"
        })))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let resource = engine.describe_resource().await.unwrap();

    assert_eq!(
        resource,
        ResourceDescriptor::Present {
            address: "mc.example.net:25565".into()
        }
    );
}

#[tokio::test]
async fn describe_resource_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/resource"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "absent"
        })))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let resource = engine.describe_resource().await.unwrap();

    assert_eq!(resource, ResourceDescriptor::Absent);
}

#[tokio::test]
async fn describe_resource_present_without_address_is_unknown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/resource"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "present"
        })))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let resource = engine.describe_resource().await.unwrap();

    assert_eq!(resource, ResourceDescriptor::Unknown);
}
