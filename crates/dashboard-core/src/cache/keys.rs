//! Cache and rate-limit key derivation
//!
//! One pure function per endpoint so that equivalent queries always land on
//! the same entry.

use std::borrow::Cow;

use crate::config::Endpoint;

/// Percent-escape `%` and `_` so a component never contains the separator
fn escape_component(value: &str) -> Cow<'_, str> {
    if value.contains(['%', '_']) {
        Cow::Owned(value.replace('%', "%25").replace('_', "%5F"))
    } else {
        Cow::Borrowed(value)
    }
}

/// `github_user_{username}`
pub fn github_key(username: &str) -> String {
    format!("github_user_{}", username)
}

/// `weather_{city}`, lower-cased with spaces replaced by underscores
pub fn weather_key(city: &str) -> String {
    format!("weather_{}", city.to_lowercase().replace(' ', "_"))
}

/// `news_{category}_{country}`, with `_` and `%` escaped in each component
pub fn news_key(category: &str, country: &str) -> String {
    format!(
        "news_{}_{}",
        escape_component(category),
        escape_component(country)
    )
}

/// Per-endpoint throttle bucket for an identity
pub fn rate_limit_key(endpoint: Endpoint, identity: &str) -> String {
    format!("{}:{}", endpoint.as_str(), identity)
}
