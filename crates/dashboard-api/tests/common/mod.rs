#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use dashboard_api::{AppState, MetricsHandle, create_router};
use dashboard_auth::JwtManager;
use dashboard_core::{
    CacheTtls, DashboardService, FixedWindowLimiter, MemoryCache, RateLimitPolicy, Upstreams,
};
use dashboard_proxy::{
    GitHubClient, GitHubClientConfig, NewsClient, NewsClientConfig, WeatherClient,
    WeatherClientConfig, build_http_client,
};
use std::sync::Arc;
use std::time::Duration;

pub const SECRET: &str = "integration-secret";

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

/// Serve `app` on an ephemeral port and return its base URL
pub async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{}", addr)
}

pub struct TestApp {
    pub base_url: String,
    pub weather_key: Option<String>,
    pub news_key: Option<String>,
    pub max_requests: u32,
    pub metrics: Option<Arc<MetricsHandle>>,
}

impl TestApp {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            weather_key: None,
            news_key: None,
            max_requests: 10,
            metrics: None,
        }
    }

    pub fn build(self) -> Router {
        let http = build_http_client().expect("http client");
        let timeout = Duration::from_secs(2);

        let upstreams = Upstreams {
            github: GitHubClient::new(
                GitHubClientConfig {
                    base_url: self.base_url.clone(),
                    token: None,
                    timeout,
                },
                http.clone(),
            ),
            weather: self.weather_key.map(|api_key| {
                WeatherClient::new(
                    WeatherClientConfig {
                        base_url: self.base_url.clone(),
                        api_key,
                        timeout,
                    },
                    http.clone(),
                )
            }),
            news: self.news_key.map(|api_key| {
                NewsClient::new(
                    NewsClientConfig {
                        base_url: self.base_url.clone(),
                        api_key,
                        timeout,
                    },
                    http.clone(),
                )
            }),
        };

        let dashboard = Arc::new(DashboardService::new(
            Arc::new(MemoryCache::default()),
            Arc::new(FixedWindowLimiter::new(RateLimitPolicy {
                max_requests: self.max_requests,
                window: Duration::from_secs(60),
            })),
            upstreams,
            CacheTtls::default(),
        ));
        let jwt = Arc::new(JwtManager::new(SECRET, 1));

        create_router(AppState::new(dashboard, jwt), self.metrics)
    }
}

pub fn token_for(user_id: &str) -> String {
    JwtManager::new(SECRET, 1)
        .generate_token(user_id, "tester")
        .expect("token")
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("request")
}
