//! Endpoint policies: which endpoint, how long to cache, how hard to throttle

use std::fmt;
use std::time::Duration;

/// A proxied upstream endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GitHub,
    Weather,
    News,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::GitHub => "github",
            Endpoint::Weather => "weather",
            Endpoint::News => "news",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How long a successful upstream payload stays fresh, per endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    pub github: Duration,
    pub weather: Duration,
    pub news: Duration,
}

impl CacheTtls {
    pub fn for_endpoint(&self, endpoint: Endpoint) -> Duration {
        match endpoint {
            Endpoint::GitHub => self.github,
            Endpoint::Weather => self.weather,
            Endpoint::News => self.news,
        }
    }
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            github: Duration::from_secs(300),
            weather: Duration::from_secs(60),
            news: Duration::from_secs(900),
        }
    }
}

/// Request ceiling per identity per window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}
