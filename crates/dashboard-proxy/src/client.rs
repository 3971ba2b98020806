//! Shared HTTP plumbing for the upstream adapters

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ProxyError;

/// Upper bound on any single upstream call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("dashboard-gateway/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by all adapters.
///
/// Timeouts are applied per request so each adapter can carry its own.
pub fn build_http_client() -> Result<Client, ProxyError> {
    Ok(Client::builder().user_agent(USER_AGENT).build()?)
}

/// Join path segments onto a base URL, percent-encoding each segment
pub(crate) fn join_segments(base: &str, segments: &[&str]) -> Result<Url, ProxyError> {
    let mut url = Url::parse(base).map_err(|e| ProxyError::InvalidUrl(format!("{}: {}", base, e)))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| ProxyError::InvalidUrl(format!("{}: cannot be a base", base)))?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}

/// Read a successful response body and decode it.
///
/// Body read failures are transport errors; decode failures mean the
/// upstream changed shape on us.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ProxyError> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ProxyError::InvalidResponse(e.to_string()))
}
