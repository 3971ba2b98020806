//! Application state

use dashboard_auth::JwtManager;
use dashboard_core::DashboardService;
use std::sync::Arc;

/// Handle used to render the Prometheus exposition
pub type MetricsHandle = metrics_exporter_prometheus::PrometheusHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<DashboardService>,
    pub jwt: Arc<JwtManager>,
}

impl AppState {
    pub fn new(dashboard: Arc<DashboardService>, jwt: Arc<JwtManager>) -> Self {
        Self { dashboard, jwt }
    }
}
