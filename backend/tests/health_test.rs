//! Integration tests for health check endpoints

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_endpoint() {
    let app = common::TestApp::new();

    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("healthy"));
}

#[tokio::test]
async fn test_liveness_endpoint() {
    let app = common::TestApp::new();

    let response = app.get("/health/live").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("alive"));
}

#[tokio::test]
async fn test_readiness_endpoint() {
    let app = common::TestApp::new();

    let response = app.get("/health/ready").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["checks"]["credential_store"]["status"], "healthy");
}

#[tokio::test]
async fn test_head_health_is_open() {
    let app = common::TestApp::new();

    for path in ["/health", "/health/live", "/health/ready"] {
        let response = app.send("HEAD", path, None, None).await;
        assert_eq!(response.status, StatusCode::OK, "path: {}", path);
    }
}

#[tokio::test]
async fn test_health_ignores_bad_tokens() {
    let app = common::TestApp::new();

    let response = app.get_auth("/health", "Bearer not.a.token").await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_root_path_is_denied() {
    let app = common::TestApp::new();

    let response = app.get("/api-docs").await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.json()["error"]["code"], "FORBIDDEN");
}
