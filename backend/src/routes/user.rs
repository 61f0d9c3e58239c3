//! User routes
//!
//! `POST /api/user/create` is the enrollment endpoint and the only route
//! under `/api` reachable without a token. Everything else here runs after
//! the security filter has attached a principal.

use crate::auth::AuthenticatedPrincipal;
use crate::error::{ApiError, ApiResult};
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use shopgate_shared::{CreateUserRequest, PrincipalResponse, UserResponse};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_user))
        .route("/me", get(current_user))
        .route("/id/:id", get(find_by_id))
        .route("/:username", get(find_by_username))
}

/// Enroll a new user
///
/// POST /api/user/create
async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Json(req) = payload.map_err(|_| {
        ApiError::BadRequest(
            "Expected a JSON body with username, password and confirmPassword".to_string(),
        )
    })?;

    let user = UserService::enroll(state.credentials(), req).await?;
    Ok(Json(user))
}

/// The caller's own identity, as resolved from the token
///
/// GET /api/user/me
async fn current_user(principal: AuthenticatedPrincipal) -> Json<PrincipalResponse> {
    Json(PrincipalResponse {
        username: principal.username,
    })
}

/// GET /api/user/:username
async fn find_by_username(
    State(state): State<AppState>,
    _principal: AuthenticatedPrincipal,
    Path(username): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::find_by_username(state.credentials(), &username).await?;
    Ok(Json(user))
}

/// GET /api/user/id/:id
async fn find_by_id(
    State(state): State<AppState>,
    _principal: AuthenticatedPrincipal,
    Path(id): Path<i64>,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::find_by_id(state.credentials(), id).await?;
    Ok(Json(user))
}
