//! Background sweep of expired cache entries and lapsed rate windows

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;
use crate::rate_limit::RateLimiter;

/// Spawn a background maintenance task.
///
/// Expired entries are already invisible to readers; this only bounds memory.
pub fn spawn_maintenance_task(
    cache: Arc<dyn CacheStore>,
    limiter: Arc<dyn RateLimiter>,
    every: Duration,
) -> JoinHandle<()> {
    info!(
        "Starting background maintenance task (interval: {} seconds)",
        every.as_secs()
    );

    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Skip the first tick (which fires immediately)
        ticker.tick().await;

        loop {
            ticker.tick().await;
            debug!("Running scheduled maintenance");

            let expired = cache.purge_expired().await;
            let idle = limiter.purge_idle().await;
            if expired > 0 || idle > 0 {
                info!(
                    "Scheduled maintenance: {} expired cache entries removed, {} idle rate windows dropped",
                    expired, idle
                );
            }
        }
    })
}
