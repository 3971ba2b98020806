//! Normalized upstream payloads
//!
//! These are the stable shapes handed to widgets, independent of whatever
//! the upstream returned. They are also what gets cached.

use serde::{Deserialize, Serialize};

/// Substituted when a GitHub profile has no bio
pub const NO_BIO_PLACEHOLDER: &str = "No bio available";

/// GitHub profile summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubStats {
    pub username: String,
    pub avatar_url: String,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    pub public_gists: u64,
    pub html_url: String,
    pub bio: String,
}

/// Current conditions for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// `"{city}, {country code}"`
    pub location: String,
    /// Degrees Celsius, rounded
    pub temperature: i64,
    /// Title-cased description, e.g. "Light Rain"
    pub condition: String,
    pub humidity: u32,
    /// Meters per second
    pub wind_speed: f64,
    /// hPa
    pub pressure: u32,
    pub icon: String,
    pub success: bool,
}

/// Top headlines for a category/country pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsDigest {
    pub articles: Vec<Article>,
    #[serde(rename = "totalResults")]
    pub total_results: u64,
    pub category: String,
    pub country: String,
    pub success: bool,
}

/// A single headline as NewsAPI describes it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: Option<ArticleSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}
