//! NewsAPI top-headlines client

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::client::{join_segments, read_json, DEFAULT_TIMEOUT};
use crate::error::ProxyError;
use crate::models::{Article, NewsDigest};

/// Most headlines a digest carries
pub const NEWS_PAGE_SIZE: usize = 5;

/// News client configuration
#[derive(Clone, Debug)]
pub struct NewsClientConfig {
    /// Base URL of NewsAPI
    pub base_url: String,
    /// NewsAPI `apiKey`
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl NewsClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://newsapi.org".to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TopHeadlines {
    #[serde(default)]
    total_results: u64,
    #[serde(default)]
    articles: Vec<Article>,
}

/// NewsAPI client
pub struct NewsClient {
    config: NewsClientConfig,
    client: Client,
}

impl NewsClient {
    /// Create a new news client on top of a shared HTTP client
    pub fn new(config: NewsClientConfig, client: Client) -> Self {
        info!("Created news client for {}", config.base_url);
        Self { config, client }
    }

    /// Fetch the top headlines for a category in a country
    pub async fn top_headlines(
        &self,
        category: &str,
        country: &str,
    ) -> Result<NewsDigest, ProxyError> {
        let url = join_segments(&self.config.base_url, &["v2", "top-headlines"])?;

        debug!("Fetching headlines for {}/{} from {}", category, country, url);

        let page_size = NEWS_PAGE_SIZE.to_string();
        let response = self
            .client
            .get(url)
            .query(&[
                ("category", category),
                ("country", country),
                ("apiKey", self.config.api_key.as_str()),
                ("pageSize", page_size.as_str()),
            ])
            .timeout(self.config.timeout)
            .send()
            .await?;
        let status = response.status();

        debug!("News API response status: {}", status);

        match status {
            StatusCode::OK => {
                let mut headlines: TopHeadlines = read_json(response).await?;
                headlines.articles.truncate(NEWS_PAGE_SIZE);

                Ok(NewsDigest {
                    articles: headlines.articles,
                    total_results: headlines.total_results,
                    category: category.to_string(),
                    country: country.to_string(),
                    success: true,
                })
            }
            StatusCode::UNAUTHORIZED => Err(ProxyError::Unauthorized),
            _ => Err(ProxyError::UpstreamError {
                status: status.as_u16(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{closed_port_url, spawn_upstream};
    use axum::extract::Query;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    fn client_for(base_url: String) -> NewsClient {
        NewsClient::new(
            NewsClientConfig {
                base_url,
                api_key: "news-key".to_string(),
                timeout: Duration::from_secs(2),
            },
            crate::build_http_client().unwrap(),
        )
    }

    #[tokio::test]
    async fn test_top_headlines_caps_articles() {
        let app = Router::new().route(
            "/v2/top-headlines",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("pageSize").map(String::as_str), Some("5"));
                assert_eq!(params.get("apiKey").map(String::as_str), Some("news-key"));
                let articles: Vec<_> = (0..8)
                    .map(|i| json!({
                        "source": { "id": null, "name": "Wire" },
                        "title": format!("Story {}", i),
                        "url": format!("https://news.example/{}", i)
                    }))
                    .collect();
                Json(json!({
                    "status": "ok",
                    "totalResults": 38,
                    "articles": articles,
                    "category": params.get("category"),
                }))
            }),
        );
        let client = client_for(spawn_upstream(app).await);

        let digest = client.top_headlines("technology", "gb").await.unwrap();

        assert_eq!(digest.articles.len(), NEWS_PAGE_SIZE);
        assert_eq!(digest.articles[0].title.as_deref(), Some("Story 0"));
        assert_eq!(
            digest.articles[0].source.as_ref().and_then(|s| s.name.as_deref()),
            Some("Wire")
        );
        assert_eq!(digest.total_results, 38);
        assert_eq!(digest.category, "technology");
        assert_eq!(digest.country, "gb");
        assert!(digest.success);
    }

    #[tokio::test]
    async fn test_missing_fields_default() {
        let app = Router::new().route("/v2/top-headlines", get(|| async { Json(json!({ "status": "ok" })) }));
        let client = client_for(spawn_upstream(app).await);

        let digest = client.top_headlines("general", "us").await.unwrap();

        assert!(digest.articles.is_empty());
        assert_eq!(digest.total_results, 0);
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let app = Router::new().route(
            "/v2/top-headlines",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                match params.get("country").map(String::as_str) {
                    Some("xx") => AxumStatus::UNAUTHORIZED,
                    _ => AxumStatus::INTERNAL_SERVER_ERROR,
                }
            }),
        );
        let client = client_for(spawn_upstream(app).await);

        assert!(matches!(
            client.top_headlines("general", "xx").await,
            Err(ProxyError::Unauthorized)
        ));
        assert!(matches!(
            client.top_headlines("general", "us").await,
            Err(ProxyError::UpstreamError { status: 500 })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_connectivity_error() {
        let client = client_for(closed_port_url().await);

        assert!(client.top_headlines("general", "us").await.unwrap_err().is_connectivity());
    }
}
