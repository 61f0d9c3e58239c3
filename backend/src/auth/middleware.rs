//! Authentication middleware
//!
//! [`security_filter`] is the single entry point every request passes
//! through. It asks the [`RoutePolicy`](super::RoutePolicy) what the route
//! needs and, for protected routes, verifies the bearer token and attaches
//! an [`AuthenticatedPrincipal`] to the request before any handler runs.
//!
//! # Performance
//!
//! Uses pre-computed JWT keys from AppState; verification never touches
//! the network or disk.

use crate::error::ApiError;
use crate::state::AppState;
use anyhow::{Context, Result};
use axum::{
    extract::{FromRef, Request, State},
    http::{request::Parts, HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use super::error::AuthError;
use super::jwt::JwtService;
use super::policy::Access;

/// Identity resolved from a verified token
///
/// Lives in the request extensions for exactly one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub username: String,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthenticatedPrincipal
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present if the security filter verified a token for this request
        parts
            .extensions
            .get::<AuthenticatedPrincipal>()
            .cloned()
            .ok_or_else(|| AuthError::Unauthenticated.into())
    }
}

/// Where the token travels: header name plus the prefix before the token
#[derive(Debug, Clone)]
pub struct BearerScheme {
    header: HeaderName,
    prefix: Arc<str>,
}

impl BearerScheme {
    pub fn new(header_name: &str, prefix: &str) -> Result<Self> {
        let header = HeaderName::from_bytes(header_name.as_bytes())
            .with_context(|| format!("Invalid token header name: {:?}", header_name))?;
        Ok(Self {
            header,
            prefix: Arc::from(prefix),
        })
    }

    pub fn header_name(&self) -> &HeaderName {
        &self.header
    }

    /// Pull the raw token out of request headers
    pub fn extract<'a>(&self, headers: &'a HeaderMap) -> Result<&'a str, AuthError> {
        headers
            .get(&self.header)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix(&*self.prefix))
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::Unauthenticated)
    }

    /// Header value carrying `token` back to the client
    pub fn header_value(&self, token: &str) -> Result<HeaderValue> {
        HeaderValue::from_str(&format!("{}{}", self.prefix, token))
            .context("Token is not a valid header value")
    }
}

/// Resolve the caller's principal from request headers
pub fn resolve_principal(
    headers: &HeaderMap,
    scheme: &BearerScheme,
    jwt: &JwtService,
) -> Result<AuthenticatedPrincipal, AuthError> {
    let token = scheme.extract(headers).map_err(|e| {
        debug!("No bearer token on protected route");
        e
    })?;

    let claims = jwt.decode(token).map_err(|e| {
        debug!(reason = %e, "Token rejected");
        AuthError::from(e)
    })?;

    Ok(AuthenticatedPrincipal {
        username: claims.sub,
    })
}

/// Verify the token and attach the principal, then continue the chain
pub async fn authenticate(
    state: &AppState,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = resolve_principal(request.headers(), state.bearer(), state.jwt())?;

    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// Outermost application layer: route policy, then token verification
pub async fn security_filter(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let access = state
        .policy()
        .decide(request.method(), request.uri().path());

    match access {
        Access::Permit => Ok(next.run(request).await),
        Access::Authenticated => authenticate(&state, request, next).await,
        Access::Deny => {
            debug!(
                method = %request.method(),
                path = %request.uri().path(),
                "Request denied by route policy"
            );
            Err(AuthError::AccessDenied.into())
        }
    }
}
