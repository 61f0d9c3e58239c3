//! Route definitions for the Shopgate API
//!
//! This module organizes all API routes and applies middleware. Every
//! route, including the fallback, sits behind [`security_filter`], which
//! applies the route policy before any handler runs.

use crate::auth::security_filter;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod health;
mod login;
mod user;


pub use login::login_routes;
pub use user::user_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config().server.request_timeout_secs);
    let token_header = state.bearer().header_name().clone();

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .merge(login::login_routes())
        .nest("/api", api_routes())
        .fallback(not_found)
        // The filter chain: wraps every route above and the fallback
        .layer(middleware::from_fn_with_state(state.clone(), security_filter))
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, token_header.clone()])
                .expose_headers([token_header]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes (all require a token except enrollment)
fn api_routes() -> Router<AppState> {
    Router::new().nest("/user", user::user_routes())
}

async fn not_found() -> ApiError {
    ApiError::NotFound("No such route".to_string())
}
