//! Per-identity request throttling

mod fixed_window;

pub use fixed_window::FixedWindowLimiter;

use async_trait::async_trait;
use std::time::Duration;

/// Outcome of a rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Admitted; `remaining` more requests fit in the current window
    Allowed { remaining: u32 },
    /// Rejected until the window rolls over
    Limited { retry_after: Duration },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Admission control keyed by identity.
///
/// A check that admits a request consumes one unit of the identity's quota;
/// a rejected check consumes nothing.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Check and, if admitted, count a request for `identity`
    async fn check(&self, identity: &str) -> RateLimitDecision;

    /// Shorthand for `check(identity).is_allowed()`
    async fn allow(&self, identity: &str) -> bool {
        self.check(identity).await.is_allowed()
    }

    /// Forget identities whose window has lapsed, returning how many
    async fn purge_idle(&self) -> usize;
}
