//! Widget data endpoints
//!
//! Each handler throttles per caller, consults the shared cache and only
//! then reaches the upstream API.

use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    middleware,
    routing::get,
};
use dashboard_auth::{AuthUser, JwtManager, auth_middleware};
use dashboard_core::{GitHubQuery, NewsQuery, NewsResponse, WeatherQuery, WeatherResponse};
use dashboard_proxy::GitHubStats;
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /github/stats/?username=
async fn github_stats(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<GitHubQuery>,
) -> Result<Json<GitHubStats>, ApiError> {
    debug!("GitHub stats for {} requested by {}", query.username(), user.username);
    let stats = state.dashboard.github_stats(&user.id, &query).await?;
    Ok(Json(stats))
}

/// GET /weather/current/?city=&refresh=
async fn weather_current(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherResponse>, ApiError> {
    debug!("Weather for {} requested by {}", query.city(), user.username);
    let weather = state.dashboard.weather_current(&user.id, &query).await?;
    Ok(Json(weather))
}

/// GET /news/headlines/?category=&country=
async fn news_headlines(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<NewsResponse>, ApiError> {
    debug!(
        "Headlines for {}/{} requested by {}",
        query.category(),
        query.country(),
        user.username
    );
    let news = state.dashboard.news_headlines(&user.id, &query).await?;
    Ok(Json(news))
}

/// Create widget routes, all behind the bearer-token check
pub fn routes(jwt: Arc<JwtManager>) -> Router<AppState> {
    Router::new()
        .route("/github/stats/", get(github_stats))
        .route("/github/stats", get(github_stats))
        .route("/weather/current/", get(weather_current))
        .route("/weather/current", get(weather_current))
        .route("/news/headlines/", get(news_headlines))
        .route("/news/headlines", get(news_headlines))
        .route_layer(middleware::from_fn_with_state(jwt, auth_middleware))
}
