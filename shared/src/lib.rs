//! Shopgate Shared Library
//!
//! Request/response types and input validation shared between the
//! backend and any client of the Shopgate API.

pub mod errors;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
