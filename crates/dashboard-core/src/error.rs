//! Core error types

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// The caller exhausted their own quota; nothing was fetched
    #[error("Request was throttled. Expected available in {} seconds.", whole_seconds(.retry_after))]
    RateLimited { retry_after: Duration },

    #[error("{0}")]
    NotFound(String),

    /// The upstream refused us for quota reasons
    #[error("{0}")]
    UpstreamRateLimited(String),

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("{0}")]
    Connectivity(String),

    #[error("{0}")]
    InvalidResponse(String),
}

/// Seconds until retry, rounded up and never zero
pub fn whole_seconds(duration: &Duration) -> u64 {
    let secs = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
    secs.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_message_rounds_up() {
        let err = CoreError::RateLimited {
            retry_after: Duration::from_millis(40_200),
        };
        assert_eq!(
            err.to_string(),
            "Request was throttled. Expected available in 41 seconds."
        );
    }

    #[test]
    fn test_whole_seconds_never_zero() {
        assert_eq!(whole_seconds(&Duration::ZERO), 1);
        assert_eq!(whole_seconds(&Duration::from_secs(60)), 60);
    }
}
