//! Authentication module
//!
//! Stateless token authentication: argon2 password verification at login,
//! HS512-signed JWTs afterwards, and a route policy deciding which requests
//! need one.

mod clock;
mod error;
mod jwt;
mod middleware;
mod password;
mod policy;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AuthError, TokenError};
pub use jwt::{Claims, IssuedToken, JwtService};
pub use middleware::{
    authenticate, resolve_principal, security_filter, AuthenticatedPrincipal, BearerScheme,
};
pub use password::PasswordService;
pub use policy::{Access, PathPattern, RoutePolicy, RoutePolicyBuilder, RouteRule};
