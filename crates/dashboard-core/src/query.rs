//! Widget query parameters and their defaults
//!
//! Absent and empty parameters both fall back to the default.

use serde::Deserialize;

pub const DEFAULT_GITHUB_USERNAME: &str = "github";
pub const DEFAULT_CITY: &str = "London";
pub const DEFAULT_NEWS_CATEGORY: &str = "general";
pub const DEFAULT_NEWS_COUNTRY: &str = "us";

fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => default,
    }
}

/// `GET /github/stats/?username=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubQuery {
    pub username: Option<String>,
}

impl GitHubQuery {
    pub fn username(&self) -> &str {
        or_default(&self.username, DEFAULT_GITHUB_USERNAME)
    }
}

/// `GET /weather/current/?city=&refresh=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
    pub refresh: Option<String>,
}

impl WeatherQuery {
    pub fn city(&self) -> &str {
        or_default(&self.city, DEFAULT_CITY)
    }

    /// Whether to skip the cache read for this request.
    ///
    /// Absent means no. Any other value means yes, except blank, `0`,
    /// `false`, `no` and `off` (case-insensitive), which read as an explicit
    /// "don't refresh". The fresh result is still written to the cache.
    pub fn bypass_cache(&self) -> bool {
        match self.refresh.as_deref().map(str::trim) {
            None => false,
            Some(value) => !matches!(
                value.to_ascii_lowercase().as_str(),
                "" | "0" | "false" | "no" | "off"
            ),
        }
    }
}

/// `GET /news/headlines/?category=&country=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsQuery {
    pub category: Option<String>,
    pub country: Option<String>,
}

impl NewsQuery {
    pub fn category(&self) -> &str {
        or_default(&self.category, DEFAULT_NEWS_CATEGORY)
    }

    pub fn country(&self) -> &str {
        or_default(&self.country, DEFAULT_NEWS_COUNTRY)
    }
}
