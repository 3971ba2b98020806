//! Dashboard service: throttle, cache and fetch for each widget endpoint

use dashboard_proxy::{GitHubClient, GitHubStats, NewsClient, NewsDigest, ProxyError, WeatherClient, WeatherReport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::cache::{keys, CacheStore};
use crate::config::{CacheTtls, Endpoint};
use crate::error::CoreError;
use crate::query::{GitHubQuery, NewsQuery, WeatherQuery};
use crate::rate_limit::{RateLimitDecision, RateLimiter};
use crate::response::{DegradedWeather, NewsResponse, NewsUnavailable, WeatherResponse};

/// Upstream adapters available to the service.
///
/// Weather and news are `None` when their credential is not configured;
/// those endpoints then answer with a placeholder instead of calling out.
pub struct Upstreams {
    pub github: GitHubClient,
    pub weather: Option<WeatherClient>,
    pub news: Option<NewsClient>,
}

/// Proxy orchestrator shared by all request handlers
pub struct DashboardService {
    cache: Arc<dyn CacheStore>,
    limiter: Arc<dyn RateLimiter>,
    upstreams: Upstreams,
    ttls: CacheTtls,
}

impl DashboardService {
    /// Create a new dashboard service
    pub fn new(
        cache: Arc<dyn CacheStore>,
        limiter: Arc<dyn RateLimiter>,
        upstreams: Upstreams,
        ttls: CacheTtls,
    ) -> Self {
        info!(
            "Dashboard service ready (weather: {}, news: {}, ttl github/weather/news: {:?}/{:?}/{:?})",
            if upstreams.weather.is_some() { "enabled" } else { "placeholder" },
            if upstreams.news.is_some() { "enabled" } else { "placeholder" },
            ttls.github,
            ttls.weather,
            ttls.news,
        );

        Self {
            cache,
            limiter,
            upstreams,
            ttls,
        }
    }

    // ==================== GitHub ====================

    /// GitHub profile stats. Upstream failures surface as errors.
    pub async fn github_stats(
        &self,
        identity: &str,
        query: &GitHubQuery,
    ) -> Result<GitHubStats, CoreError> {
        self.admit(Endpoint::GitHub, identity).await?;

        let username = query.username();
        let key = keys::github_key(username);

        if let Some(stats) = self.cached::<GitHubStats>(&key).await {
            debug!("Returning cached GitHub data for {}", username);
            record(Endpoint::GitHub, "cache_hit");
            return Ok(stats);
        }

        match self.upstreams.github.fetch_user(username).await {
            Ok(stats) => {
                self.store(&key, &stats, self.ttls.for_endpoint(Endpoint::GitHub)).await;
                record(Endpoint::GitHub, "fetched");
                Ok(stats)
            }
            Err(e) => {
                warn!(
                    "GitHub API request failed for user {} (requested by {}): {}",
                    username, identity, e
                );
                record(Endpoint::GitHub, "error");
                Err(github_error(e, username))
            }
        }
    }

    // ==================== Weather ====================

    /// Current weather. Never fails except for throttling.
    pub async fn weather_current(
        &self,
        identity: &str,
        query: &WeatherQuery,
    ) -> Result<WeatherResponse, CoreError> {
        self.admit(Endpoint::Weather, identity).await?;

        let city = query.city();
        let key = keys::weather_key(city);

        if query.bypass_cache() {
            debug!("Bypassing weather cache for {}", city);
        } else if let Some(report) = self.cached::<WeatherReport>(&key).await {
            debug!("Returning cached weather data for {}", city);
            record(Endpoint::Weather, "cache_hit");
            return Ok(WeatherResponse::Report(report));
        }

        let Some(client) = &self.upstreams.weather else {
            record(Endpoint::Weather, "unconfigured");
            return Ok(WeatherResponse::Degraded(DegradedWeather::unconfigured(city)));
        };

        match client.current(city).await {
            Ok(report) => {
                self.store(&key, &report, self.ttls.for_endpoint(Endpoint::Weather)).await;
                record(Endpoint::Weather, "fetched");
                Ok(WeatherResponse::Report(report))
            }
            Err(e) => {
                warn!(
                    "Weather API request failed for city {} (requested by {}): {}",
                    city, identity, e
                );
                record(Endpoint::Weather, "degraded");
                Ok(WeatherResponse::Degraded(DegradedWeather::from_error(city, &e)))
            }
        }
    }

    // ==================== News ====================

    /// Top headlines. Never fails except for throttling.
    pub async fn news_headlines(
        &self,
        identity: &str,
        query: &NewsQuery,
    ) -> Result<NewsResponse, CoreError> {
        self.admit(Endpoint::News, identity).await?;

        let category = query.category();
        let country = query.country();
        let key = keys::news_key(category, country);

        if let Some(digest) = self.cached::<NewsDigest>(&key).await {
            debug!("Returning cached news data for {}/{}", category, country);
            record(Endpoint::News, "cache_hit");
            return Ok(NewsResponse::Headlines(digest));
        }

        let Some(client) = &self.upstreams.news else {
            record(Endpoint::News, "unconfigured");
            return Ok(NewsResponse::Unavailable(NewsUnavailable::unconfigured()));
        };

        match client.top_headlines(category, country).await {
            Ok(digest) => {
                self.store(&key, &digest, self.ttls.for_endpoint(Endpoint::News)).await;
                record(Endpoint::News, "fetched");
                Ok(NewsResponse::Headlines(digest))
            }
            Err(e) => {
                warn!(
                    "News API request failed for {}/{} (requested by {}): {}",
                    category, country, identity, e
                );
                record(Endpoint::News, "degraded");
                Ok(NewsResponse::Unavailable(NewsUnavailable::from_error(&e)))
            }
        }
    }

    // ==================== Helpers ====================

    /// Count the request against the identity's quota for this endpoint
    async fn admit(&self, endpoint: Endpoint, identity: &str) -> Result<(), CoreError> {
        let bucket = keys::rate_limit_key(endpoint, identity);

        match self.limiter.check(&bucket).await {
            RateLimitDecision::Allowed { .. } => Ok(()),
            RateLimitDecision::Limited { retry_after } => {
                warn!("Rate limit exceeded for {} on {} endpoint", identity, endpoint);
                record(endpoint, "rate_limited");
                Err(CoreError::RateLimited { retry_after })
            }
        }
    }

    /// Read a typed payload from the cache; an undecodable entry counts as a miss
    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.cache.get(key).await?;
        match serde_json::from_value(value) {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!("Ignoring undecodable cache entry {}: {}", key, e);
                None
            }
        }
    }

    async fn store<T: Serialize>(&self, key: &str, payload: &T, ttl: Duration) {
        match serde_json::to_value(payload) {
            Ok(value) => {
                self.cache.set(key, value, ttl).await;
                debug!("Cached {} for {:?}", key, ttl);
            }
            Err(e) => warn!("Failed to serialize {} for caching: {}", key, e),
        }
    }
}

fn record(endpoint: Endpoint, outcome: &'static str) {
    metrics::counter!(
        "dashboard_proxy_requests_total",
        "endpoint" => endpoint.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}

/// GitHub keeps its failure taxonomy visible to the caller
fn github_error(error: ProxyError, username: &str) -> CoreError {
    match error {
        ProxyError::NotFound(_) => {
            CoreError::NotFound(format!("GitHub user \"{}\" not found", username))
        }
        ProxyError::RateLimited => CoreError::UpstreamRateLimited(
            "GitHub API rate limit exceeded. Try again later.".to_string(),
        ),
        ProxyError::UpstreamError { status } => CoreError::Upstream {
            status,
            message: format!("GitHub API error: {}", status),
        },
        ProxyError::Http(_) => {
            CoreError::Connectivity("Failed to connect to GitHub API".to_string())
        }
        ProxyError::Unauthorized | ProxyError::InvalidResponse(_) | ProxyError::InvalidUrl(_) => {
            CoreError::InvalidResponse("Unexpected response from GitHub API".to_string())
        }
    }
}
