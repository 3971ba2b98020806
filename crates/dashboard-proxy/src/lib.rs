//! Dashboard Gateway Upstream Adapters
//!
//! This crate provides the clients for the third-party data sources behind
//! the dashboard widgets (GitHub, OpenWeatherMap, NewsAPI), normalizing each
//! upstream response into a fixed-shape model.

pub mod client;
pub mod error;
pub mod github;
pub mod models;
pub mod news;
pub mod weather;

#[cfg(test)]
mod test_support;

pub use client::{build_http_client, DEFAULT_TIMEOUT};
pub use error::ProxyError;
pub use github::{GitHubClient, GitHubClientConfig};
pub use models::{Article, ArticleSource, GitHubStats, NewsDigest, WeatherReport, NO_BIO_PLACEHOLDER};
pub use news::{NewsClient, NewsClientConfig, NEWS_PAGE_SIZE};
pub use weather::{WeatherClient, WeatherClientConfig};
