//! GitHub user lookup client

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::client::{join_segments, read_json, DEFAULT_TIMEOUT};
use crate::error::ProxyError;
use crate::models::{GitHubStats, NO_BIO_PLACEHOLDER};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// GitHub client configuration
#[derive(Clone, Debug)]
pub struct GitHubClientConfig {
    /// Base URL of the GitHub REST API
    pub base_url: String,
    /// Personal access token; requests are anonymous without one
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for GitHubClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Subset of `GET /users/{username}` we care about
#[derive(Debug, Deserialize)]
struct GitHubUser {
    login: String,
    avatar_url: String,
    followers: u64,
    following: u64,
    public_repos: u64,
    public_gists: u64,
    html_url: String,
    #[serde(default)]
    bio: Option<String>,
}

impl From<GitHubUser> for GitHubStats {
    fn from(user: GitHubUser) -> Self {
        Self {
            username: user.login,
            avatar_url: user.avatar_url,
            followers: user.followers,
            following: user.following,
            public_repos: user.public_repos,
            public_gists: user.public_gists,
            html_url: user.html_url,
            bio: user
                .bio
                .filter(|bio| !bio.is_empty())
                .unwrap_or_else(|| NO_BIO_PLACEHOLDER.to_string()),
        }
    }
}

/// GitHub REST API client
pub struct GitHubClient {
    config: GitHubClientConfig,
    client: Client,
}

impl GitHubClient {
    /// Create a new GitHub client on top of a shared HTTP client
    pub fn new(config: GitHubClientConfig, client: Client) -> Self {
        info!(
            "Created GitHub client for {} ({})",
            config.base_url,
            if config.token.is_some() { "authenticated" } else { "anonymous" }
        );

        Self { config, client }
    }

    /// Fetch and normalize a user's public profile
    pub async fn fetch_user(&self, username: &str) -> Result<GitHubStats, ProxyError> {
        let url = join_segments(&self.config.base_url, &["users", username])?;

        debug!("Fetching GitHub user: {}", url);

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .timeout(self.config.timeout);

        if let Some(token) = &self.config.token {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let response = request.send().await?;
        let status = response.status();

        debug!("GitHub API response status: {}", status);

        match status {
            StatusCode::OK => {
                let user: GitHubUser = read_json(response).await?;
                Ok(user.into())
            }
            // GitHub answers 403 once the hourly quota is spent
            StatusCode::FORBIDDEN => Err(ProxyError::RateLimited),
            StatusCode::NOT_FOUND => Err(ProxyError::NotFound(username.to_string())),
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
    use axum::extract::Path;
    use axum::http::HeaderMap;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    fn profile(login: &str, bio: Value) -> Value {
        json!({
            "login": login,
            "id": 1024025,
            "avatar_url": format!("https://avatars.githubusercontent.com/u/1024025?v=4&u={}", login),
            "html_url": format!("https://github.com/{}", login),
            "followers": 250000,
            "following": 0,
            "public_repos": 8,
            "public_gists": 0,
            "bio": bio,
            "name": "Linus Torvalds"
        })
    }

    fn client_for(base_url: String, token: Option<&str>) -> GitHubClient {
        GitHubClient::new(
            GitHubClientConfig {
                base_url,
                token: token.map(str::to_string),
                timeout: Duration::from_secs(2),
            },
            crate::build_http_client().unwrap(),
        )
    }

    #[tokio::test]
    async fn test_fetch_user_maps_profile() {
        let app = Router::new().route(
            "/users/{username}",
            get(|Path(username): Path<String>| async move { Json(profile(&username, json!(null))) }),
        );
        let base_url = spawn_upstream(app).await;

        let stats = client_for(base_url, None).fetch_user("torvalds").await.unwrap();

        assert_eq!(
            stats,
            GitHubStats {
                username: "torvalds".to_string(),
                avatar_url: "https://avatars.githubusercontent.com/u/1024025?v=4&u=torvalds".to_string(),
                followers: 250000,
                following: 0,
                public_repos: 8,
                public_gists: 0,
                html_url: "https://github.com/torvalds".to_string(),
                bio: NO_BIO_PLACEHOLDER.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_user_keeps_bio_and_substitutes_empty() {
        let app = Router::new().route(
            "/users/{username}",
            get(|Path(username): Path<String>| async move {
                let bio = if username == "empty" { json!("") } else { json!("Kernel hacker") };
                Json(profile(&username, bio))
            }),
        );
        let client = client_for(spawn_upstream(app).await, None);

        assert_eq!(client.fetch_user("torvalds").await.unwrap().bio, "Kernel hacker");
        assert_eq!(client.fetch_user("empty").await.unwrap().bio, NO_BIO_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_headers_and_optional_token() {
        let seen: Arc<Mutex<Vec<(Option<String>, Option<String>)>>> = Arc::default();
        let recorder = seen.clone();
        let app = Router::new().route(
            "/users/{username}",
            get(move |Path(username): Path<String>, headers: HeaderMap| {
                let recorder = recorder.clone();
                async move {
                    let header = |name: &str| {
                        headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
                    };
                    recorder
                        .lock()
                        .unwrap()
                        .push((header("accept"), header("authorization")));
                    Json(profile(&username, json!("bio")))
                }
            }),
        );
        let base_url = spawn_upstream(app).await;

        client_for(base_url.clone(), None).fetch_user("octocat").await.unwrap();
        client_for(base_url, Some("s3cret")).fetch_user("octocat").await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], (Some(GITHUB_ACCEPT.to_string()), None));
        assert_eq!(seen[1], (Some(GITHUB_ACCEPT.to_string()), Some("token s3cret".to_string())));
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let app = Router::new().route(
            "/users/{username}",
            get(|Path(username): Path<String>| async move {
                match username.as_str() {
                    "limited" => axum::http::StatusCode::FORBIDDEN,
                    "ghost" => axum::http::StatusCode::NOT_FOUND,
                    _ => axum::http::StatusCode::BAD_GATEWAY,
                }
            }),
        );
        let client = client_for(spawn_upstream(app).await, None);

        assert!(matches!(
            client.fetch_user("limited").await,
            Err(ProxyError::RateLimited)
        ));
        assert!(matches!(
            client.fetch_user("ghost").await,
            Err(ProxyError::NotFound(name)) if name == "ghost"
        ));
        assert!(matches!(
            client.fetch_user("other").await,
            Err(ProxyError::UpstreamError { status: 502 })
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let app = Router::new().route("/users/{username}", get(|| async { "<html>oops</html>" }));
        let client = client_for(spawn_upstream(app).await, None);

        assert!(matches!(
            client.fetch_user("torvalds").await,
            Err(ProxyError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_connectivity_error() {
        let client = client_for(closed_port_url().await, None);

        let err = client.fetch_user("torvalds").await.unwrap_err();
        assert!(err.is_connectivity());
    }
}
