//! Proxy error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    /// Transport failure: timeout, DNS, refused connection, truncated body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream not found: {0}")]
    NotFound(String),

    #[error("Upstream unauthorized")]
    Unauthorized,

    #[error("Upstream rate limit exceeded")]
    RateLimited,

    #[error("Upstream returned error: {status}")]
    UpstreamError { status: u16 },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),
}

impl ProxyError {
    /// Whether the upstream could not be reached at all
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ProxyError::Http(_))
    }
}
