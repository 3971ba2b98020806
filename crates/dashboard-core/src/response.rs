//! Endpoint response shapes, including the degraded variants
//!
//! Weather and news never fail at the HTTP level: every upstream problem
//! becomes a payload with a `message` the widget can show.

use dashboard_proxy::{Article, NewsDigest, ProxyError, WeatherReport};
use serde::{Deserialize, Serialize};

/// Placeholder temperature shown when no real observation is available
pub const PLACEHOLDER_TEMPERATURE: i64 = 22;
/// Placeholder humidity shown when no real observation is available
pub const PLACEHOLDER_HUMIDITY: u32 = 65;

/// `GET /weather/current/` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeatherResponse {
    Report(WeatherReport),
    Degraded(DegradedWeather),
}

/// Stand-in weather payload carrying the reason real data is missing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegradedWeather {
    pub location: String,
    pub temperature: i64,
    pub condition: String,
    pub humidity: u32,
    pub message: String,
}

impl DegradedWeather {
    fn new(city: &str, condition: &str, message: String) -> Self {
        Self {
            location: city.to_string(),
            temperature: PLACEHOLDER_TEMPERATURE,
            condition: condition.to_string(),
            humidity: PLACEHOLDER_HUMIDITY,
            message,
        }
    }

    /// No OpenWeatherMap key configured
    pub fn unconfigured(city: &str) -> Self {
        Self::new(city, "Sunny", "Weather API key not configured".to_string())
    }

    /// The upstream call failed
    pub fn from_error(city: &str, error: &ProxyError) -> Self {
        match error {
            ProxyError::Unauthorized => {
                Self::new(city, "API Error", "Invalid weather API key".to_string())
            }
            ProxyError::NotFound(_) => {
                Self::new(city, "Not Found", format!("City \"{}\" not found", city))
            }
            ProxyError::UpstreamError { status } => {
                Self::new(city, "API Error", format!("Weather API error: {}", status))
            }
            ProxyError::Http(_) => Self::new(
                city,
                "Connection Error",
                "Failed to connect to weather service".to_string(),
            ),
            ProxyError::RateLimited | ProxyError::InvalidResponse(_) | ProxyError::InvalidUrl(_) => {
                Self::new(
                    city,
                    "API Error",
                    "Unexpected response from weather service".to_string(),
                )
            }
        }
    }
}

/// `GET /news/headlines/` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NewsResponse {
    Headlines(NewsDigest),
    Unavailable(NewsUnavailable),
}

/// Empty headline list carrying the reason real data is missing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsUnavailable {
    pub articles: Vec<Article>,
    pub message: String,
    pub success: bool,
}

impl NewsUnavailable {
    fn new(message: String) -> Self {
        Self {
            articles: Vec::new(),
            message,
            success: false,
        }
    }

    /// No NewsAPI key configured
    pub fn unconfigured() -> Self {
        Self::new("News API key not configured".to_string())
    }

    /// The upstream call failed
    pub fn from_error(error: &ProxyError) -> Self {
        match error {
            ProxyError::Unauthorized => Self::new("Invalid News API key".to_string()),
            ProxyError::UpstreamError { status } => Self::new(format!("News API error: {}", status)),
            ProxyError::Http(_) => Self::new("Failed to connect to news service".to_string()),
            ProxyError::NotFound(_)
            | ProxyError::RateLimited
            | ProxyError::InvalidResponse(_)
            | ProxyError::InvalidUrl(_) => {
                Self::new("Unexpected response from news service".to_string())
            }
        }
    }
}
