//! OpenWeatherMap current-conditions client

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::client::{join_segments, read_json, DEFAULT_TIMEOUT};
use crate::error::ProxyError;
use crate::models::WeatherReport;

/// Weather client configuration
#[derive(Clone, Debug)]
pub struct WeatherClientConfig {
    /// Base URL of the OpenWeatherMap API
    pub base_url: String,
    /// OpenWeatherMap `appid`
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl WeatherClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.openweathermap.org".to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    name: String,
    sys: Sys,
    main: Main,
    weather: Vec<Condition>,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct Sys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: f64,
    humidity: u32,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

impl TryFrom<CurrentWeather> for WeatherReport {
    type Error = ProxyError;

    fn try_from(current: CurrentWeather) -> Result<Self, Self::Error> {
        let condition = current
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| ProxyError::InvalidResponse("no weather conditions".to_string()))?;

        Ok(Self {
            location: format!("{}, {}", current.name, current.sys.country),
            temperature: current.main.temp.round_ties_even() as i64,
            condition: title_case(&condition.description),
            humidity: current.main.humidity,
            wind_speed: current.wind.speed,
            pressure: current.main.pressure,
            icon: condition.icon,
            success: true,
        })
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// OpenWeatherMap API client
pub struct WeatherClient {
    config: WeatherClientConfig,
    client: Client,
}

impl WeatherClient {
    /// Create a new weather client on top of a shared HTTP client
    pub fn new(config: WeatherClientConfig, client: Client) -> Self {
        info!("Created weather client for {}", config.base_url);
        Self { config, client }
    }

    /// Fetch current conditions for a city, metric units, English text
    pub async fn current(&self, city: &str) -> Result<WeatherReport, ProxyError> {
        let url = join_segments(&self.config.base_url, &["data", "2.5", "weather"])?;

        debug!("Fetching weather for {} from {}", city, url);

        let response = self
            .client
            .get(url)
            .query(&[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
                ("lang", "en"),
            ])
            .timeout(self.config.timeout)
            .send()
            .await?;
        let status = response.status();

        debug!("Weather API response status: {}", status);

        match status {
            StatusCode::OK => {
                let current: CurrentWeather = read_json(response).await?;
                current.try_into()
            }
            StatusCode::UNAUTHORIZED => Err(ProxyError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ProxyError::NotFound(city.to_string())),
            _ => Err(ProxyError::UpstreamError {
                status: status.as_u16(),
            }),
        }
    }
}
