//! Login and logout routes
//!
//! Login answers with an empty body; the token travels in the configured
//! response header (`Authorization: Bearer <token>` by default). Logout is
//! a no-op: sessions are stateless, so the client simply discards its token.

use crate::error::{ApiError, ApiResult};
use crate::services::LoginService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use shopgate_shared::LoginRequest;

/// Create login/logout routes
pub fn login_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", get(logout).post(logout))
}

/// Login with username and password
///
/// POST /login
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = payload.map_err(|_| {
        ApiError::BadRequest("Expected a JSON body with username and password".to_string())
    })?;

    let issued =
        LoginService::login(state.credentials(), state.jwt(), &req.username, &req.password).await?;

    let header_value = state.bearer().header_value(&issued.token)?;
    let mut response = StatusCode::OK.into_response();
    response
        .headers_mut()
        .insert(state.bearer().header_name().clone(), header_value);

    Ok(response)
}

/// Logout
///
/// GET|POST /logout
async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}
