//! Dashboard Gateway - caching, rate-limited proxy for dashboard widget APIs

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;

use config::{Config, DEFAULT_JWT_SECRET, Overrides};
use dashboard_api::{AppState, create_router};
use dashboard_auth::JwtManager;
use dashboard_core::{
    CacheStore, DashboardService, FixedWindowLimiter, MemoryCache, RateLimiter, Upstreams,
    spawn_maintenance_task,
};
use dashboard_proxy::{GitHubClient, NewsClient, WeatherClient, build_http_client};

/// Dashboard Gateway - caching proxy for GitHub, weather and news widgets
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Bind address
    #[arg(long, env = "DASHBOARD_GATEWAY_BIND")]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "DASHBOARD_GATEWAY_PORT")]
    port: Option<u16>,

    /// GitHub personal access token
    #[arg(long, env = "GITHUB_API_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    weather_api_key: Option<String>,

    /// NewsAPI key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    news_api_key: Option<String>,

    /// Secret used to verify bearer tokens
    #[arg(long, env = "DASHBOARD_JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;
    config.apply_overrides(Overrides {
        github_token: args.github_token,
        weather_api_key: args.weather_api_key,
        news_api_key: args.news_api_key,
        jwt_secret: args.jwt_secret,
    });

    // Initialize logging
    init_logging(&config.logging.level, &config.logging.format);

    info!("Starting Dashboard Gateway v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.jwt_secret == DEFAULT_JWT_SECRET {
        warn!("Using the default JWT secret; set DASHBOARD_JWT_SECRET in production");
    }

    // Install the Prometheus recorder before anything records
    let metrics_handle = if config.metrics.enabled {
        let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        Some(Arc::new(handle))
    } else {
        None
    };

    // Initialize upstream clients
    let http = build_http_client()?;
    let upstreams = Upstreams {
        github: GitHubClient::new(config.upstreams.github_client_config(), http.clone()),
        weather: config
            .upstreams
            .weather_client_config()
            .map(|c| WeatherClient::new(c, http.clone())),
        news: config
            .upstreams
            .news_client_config()
            .map(|c| NewsClient::new(c, http.clone())),
    };

    // Initialize cache and rate limiter
    let cache: Arc<dyn CacheStore> = Arc::new(MemoryCache::new(config.cache.max_entries));
    let limiter: Arc<dyn RateLimiter> =
        Arc::new(FixedWindowLimiter::new(config.rate_limit.policy()));

    let dashboard = Arc::new(DashboardService::new(
        cache.clone(),
        limiter.clone(),
        upstreams,
        config.cache.ttls(),
    ));

    let maintenance = spawn_maintenance_task(cache, limiter, config.cache.cleanup_interval());

    // Initialize JWT manager
    let jwt = Arc::new(JwtManager::new(&config.auth.jwt_secret, 24));

    // Create router
    let app = create_router(AppState::new(dashboard, jwt), metrics_handle)
        .layer(TraceLayer::new_for_http());

    // Determine bind address
    let bind_addr = args.bind.unwrap_or(config.server.bind_address);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind_addr, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind_addr, port))?;

    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    maintenance.abort();
    info!("Server stopped");
    Ok(())
}

/// Initialize logging
fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if format.eq_ignore_ascii_case("json") {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    info!("Shutdown signal received");
}
