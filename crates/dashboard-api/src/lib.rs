//! Dashboard Gateway REST API
//!
//! This crate provides the Axum-based HTTP API in front of the dashboard
//! proxy: the three authenticated widget endpoints plus health and metrics.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, MetricsHandle};
