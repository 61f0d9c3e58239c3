//! Business logic services
//!
//! Services coordinate between the credential store, the password
//! verifier and the token codec.

pub mod login;
pub mod user;

pub use login::LoginService;
pub use user::UserService;
