//! Dashboard Gateway Core Business Logic
//!
//! This crate provides the proxy layer behind the dashboard widgets:
//! the TTL cache, the per-user rate limiter, cache key derivation and the
//! `DashboardService` that composes them with the upstream adapters.

pub mod cache;
pub mod config;
pub mod error;
pub mod maintenance;
pub mod query;
pub mod rate_limit;
pub mod response;
pub mod service;

pub use cache::{CacheStats, CacheStore, MemoryCache};
pub use config::{CacheTtls, Endpoint, RateLimitPolicy};
pub use error::CoreError;
pub use maintenance::spawn_maintenance_task;
pub use query::{GitHubQuery, NewsQuery, WeatherQuery};
pub use rate_limit::{FixedWindowLimiter, RateLimitDecision, RateLimiter};
pub use response::{DegradedWeather, NewsResponse, NewsUnavailable, WeatherResponse};
pub use service::{DashboardService, Upstreams};
