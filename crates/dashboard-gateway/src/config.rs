//! Configuration loading and management

use anyhow::{Context, Result};
use dashboard_core::{CacheTtls, RateLimitPolicy};
use dashboard_proxy::{GitHubClientConfig, NewsClientConfig, WeatherClientConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub upstreams: UpstreamsConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

/// Bearer token validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
        }
    }
}

/// One third-party API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL; the client's public endpoint when unset
    #[serde(default)]
    pub url: Option<String>,
    /// Token or API key
    #[serde(default, alias = "token")]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UpstreamConfig {
    /// Configured credential; blank counts as absent
    pub fn credential(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }

    /// Configured base URL; blank counts as absent
    pub fn base_url(&self) -> Option<&str> {
        non_blank(self.url.as_deref())
    }

    /// Timeout clamped to [1, 60] seconds, with a warning if adjusted
    pub fn validated_timeout(&self) -> Duration {
        let secs = if self.timeout_secs < MIN_TIMEOUT_SECS {
            warn!(
                "timeout_secs {} is below minimum {}, using minimum",
                self.timeout_secs, MIN_TIMEOUT_SECS
            );
            MIN_TIMEOUT_SECS
        } else if self.timeout_secs > MAX_TIMEOUT_SECS {
            warn!(
                "timeout_secs {} exceeds maximum {}, using maximum",
                self.timeout_secs, MAX_TIMEOUT_SECS
            );
            MAX_TIMEOUT_SECS
        } else {
            self.timeout_secs
        };
        Duration::from_secs(secs)
    }
}

/// The three upstream APIs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamsConfig {
    #[serde(default)]
    pub github: UpstreamConfig,
    #[serde(default)]
    pub weather: UpstreamConfig,
    #[serde(default)]
    pub news: UpstreamConfig,
}

impl UpstreamsConfig {
    pub fn github_client_config(&self) -> GitHubClientConfig {
        let mut config = GitHubClientConfig {
            token: self.github.credential().map(str::to_string),
            timeout: self.github.validated_timeout(),
            ..GitHubClientConfig::default()
        };
        if let Some(url) = self.github.base_url() {
            config.base_url = url.to_string();
        }
        config
    }

    /// `None` when no API key is configured
    pub fn weather_client_config(&self) -> Option<WeatherClientConfig> {
        let mut config = WeatherClientConfig::new(self.weather.credential()?);
        config.timeout = self.weather.validated_timeout();
        if let Some(url) = self.weather.base_url() {
            config.base_url = url.to_string();
        }
        Some(config)
    }

    /// `None` when no API key is configured
    pub fn news_client_config(&self) -> Option<NewsClientConfig> {
        let mut config = NewsClientConfig::new(self.news.credential()?);
        config.timeout = self.news.validated_timeout();
        if let Some(url) = self.news.base_url() {
            config.base_url = url.to_string();
        }
        Some(config)
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_github_ttl_secs")]
    pub github_ttl_secs: u64,
    #[serde(default = "default_weather_ttl_secs")]
    pub weather_ttl_secs: u64,
    #[serde(default = "default_news_ttl_secs")]
    pub news_ttl_secs: u64,
    /// Unbounded when unset; `0` disables caching
    #[serde(default)]
    pub max_entries: Option<usize>,
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            github_ttl_secs: default_github_ttl_secs(),
            weather_ttl_secs: default_weather_ttl_secs(),
            news_ttl_secs: default_news_ttl_secs(),
            max_entries: None,
            cleanup_interval_secs: default_cleanup_interval_secs(),
        }
    }
}

impl CacheConfig {
    pub fn ttls(&self) -> CacheTtls {
        CacheTtls {
            github: Duration::from_secs(self.github_ttl_secs),
            weather: Duration::from_secs(self.weather_ttl_secs),
            news: Duration::from_secs(self.news_ttl_secs),
        }
    }

    /// Maintenance interval, at least one second
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs.max(1))
    }
}

/// Per-identity request ceiling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

impl RateLimitConfig {
    pub fn policy(&self) -> RateLimitPolicy {
        RateLimitPolicy {
            max_requests: self.max_requests,
            window: Duration::from_secs(self.window_secs.max(1)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Prometheus exposition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub github_token: Option<String>,
    pub weather_api_key: Option<String>,
    pub news_api_key: Option<String>,
    pub jwt_secret: Option<String>,
}

// Default value functions
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_github_ttl_secs() -> u64 {
    300
}

fn default_weather_ttl_secs() -> u64 {
    60
}

fn default_news_ttl_secs() -> u64 {
    900
}

fn default_cleanup_interval_secs() -> u64 {
    300
}

fn default_max_requests() -> u32 {
    10
}

fn default_window_secs() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &str) -> Result<Self> {
        let config_path = Path::new(path);

        // Check if config file exists
        if !config_path.exists() {
            info!("Config file not found at {}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }

    /// Apply command line / environment values over the file contents.
    /// Blank values leave the file setting in place.
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(token) = non_blank(overrides.github_token.as_deref()) {
            self.upstreams.github.api_key = Some(token.to_string());
        }
        if let Some(key) = non_blank(overrides.weather_api_key.as_deref()) {
            self.upstreams.weather.api_key = Some(key.to_string());
        }
        if let Some(key) = non_blank(overrides.news_api_key.as_deref()) {
            self.upstreams.news.api_key = Some(key.to_string());
        }
        if let Some(secret) = non_blank(overrides.jwt_secret.as_deref()) {
            self.auth.jwt_secret = secret.to_string();
        }
    }
}
