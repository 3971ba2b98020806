//! API error types

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use dashboard_core::CoreError;
use dashboard_core::error::whole_seconds;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Auth error: {0}")]
    Auth(#[from] dashboard_auth::AuthError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let core = match self {
            ApiError::Auth(e) => return e.into_response(),
            ApiError::Core(e) => e,
        };

        let status = match &core {
            CoreError::RateLimited { .. } | CoreError::UpstreamRateLimited(_) => {
                StatusCode::TOO_MANY_REQUESTS
            }
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            // Pass upstream error statuses through; anything else is a bad gateway
            CoreError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            CoreError::Connectivity(_) | CoreError::InvalidResponse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = axum::Json(json!({
            "error": core.to_string()
        }));

        let mut response = (status, body).into_response();
        if let CoreError::RateLimited { retry_after } = &core {
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from(whole_seconds(retry_after)),
            );
        }
        response
    }
}
