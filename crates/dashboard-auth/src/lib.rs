//! Dashboard Gateway Authentication
//!
//! Validates the bearer tokens issued by the dashboard's account service
//! and exposes the caller as an `AuthUser` request extension.

pub mod error;
pub mod jwt;
pub mod middleware;

pub use error::AuthError;
pub use jwt::{Claims, JwtManager};
pub use middleware::{auth_middleware, AuthUser};
