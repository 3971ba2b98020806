//! Fixed-window rate limiter

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::time::Instant;
use tracing::{debug, info};

use super::{RateLimitDecision, RateLimiter};
use crate::config::RateLimitPolicy;

/// Rate limit entry, tracks requests per identity
struct Window {
    count: u32,
    started_at: Instant,
}

/// Counts admissions per identity in a window that opens on the identity's
/// first request and resets once `policy.window` has elapsed.
///
/// Check-and-increment happens under one lock, so concurrent requests from
/// the same identity cannot both take the last slot.
pub struct FixedWindowLimiter {
    policy: RateLimitPolicy,
    windows: Mutex<HashMap<String, Window>>,
}

impl FixedWindowLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        info!(
            "Rate limit: {} requests per {} seconds",
            policy.max_requests,
            policy.window.as_secs()
        );

        Self {
            policy,
            windows: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RateLimiter for FixedWindowLimiter {
    async fn check(&self, identity: &str) -> RateLimitDecision {
        let now = Instant::now();
        let mut windows = self.windows.lock();

        let window = windows.entry(identity.to_string()).or_insert(Window {
            count: 0,
            started_at: now,
        });

        // Window expired? Reset it
        let elapsed = now.duration_since(window.started_at);
        if elapsed >= self.policy.window {
            window.count = 0;
            window.started_at = now;
        }

        if window.count < self.policy.max_requests {
            window.count += 1;
            return RateLimitDecision::Allowed {
                remaining: self.policy.max_requests - window.count,
            };
        }

        let retry_after = self.policy.window.saturating_sub(now.duration_since(window.started_at));
        debug!("Rate limit hit for {}, retry in {:?}", identity, retry_after);
        RateLimitDecision::Limited { retry_after }
    }

    async fn purge_idle(&self) -> usize {
        let now = Instant::now();
        let mut windows = self.windows.lock();
        let before = windows.len();
        windows.retain(|_, window| now.duration_since(window.started_at) < self.policy.window);
        before - windows.len()
    }
}
