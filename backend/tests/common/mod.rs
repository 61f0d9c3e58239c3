//! Common test utilities for integration tests
//!
//! The application runs against an in-memory credential store and a
//! manual clock, so token expiry can be exercised without sleeping.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use chrono::Duration;
use secrecy::SecretString;
use serde_json::json;
use shopgate_backend::{
    auth::{ManualClock, RoutePolicy},
    config::AppConfig,
    repositories::{CredentialStore, InMemoryCredentialStore},
    routes,
    state::AppState,
};
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_VALIDITY_SECS: i64 = 864_000;

/// Response pieces a test cares about
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }

    /// Value of the Authorization header, if the response carries one
    pub fn bearer(&self) -> Option<String> {
        self.headers
            .get("Authorization")
            .map(|value| value.to_str().unwrap().to_string())
    }
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    /// Create a new test application with an empty in-memory store
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryCredentialStore::new()))
    }

    pub fn with_store(store: Arc<dyn CredentialStore>) -> Self {
        let clock = Arc::new(ManualClock::starting_now());
        let state = AppState::with_parts(store, test_config(), RoutePolicy::standard(), clock.clone())
            .expect("Failed to build test state");
        let app = routes::create_router(state.clone());

        Self { app, state, clock }
    }

    /// Move the token clock forward
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<String>,
        bearer: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(bearer) = bearer {
            builder = builder.header("Authorization", bearer);
        }
        let body = match body {
            Some(body) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(body)
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> TestResponse {
        self.send("GET", path, None, None).await
    }

    /// Make a GET request carrying a full `Authorization` header value
    pub async fn get_auth(&self, path: &str, bearer: &str) -> TestResponse {
        self.send("GET", path, None, Some(bearer)).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> TestResponse {
        self.send("POST", path, Some(body.to_string()), None).await
    }

    /// Enroll a user through the public endpoint
    pub async fn enroll(&self, username: &str, password: &str) -> TestResponse {
        let body = json!({
            "username": username,
            "password": password,
            "confirmPassword": password,
        });
        self.post("/api/user/create", &body.to_string()).await
    }

    /// Log in through the public endpoint
    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        let body = json!({
            "username": username,
            "password": password,
        });
        self.post("/login", &body.to_string()).await
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.secret = SecretString::new("test-secret-key-for-testing-only-32chars".to_string());
    config.auth.token_validity_secs = TEST_VALIDITY_SECS;
    config
}
