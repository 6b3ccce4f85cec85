use log::{debug, warn};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// api.weather.gov rejects requests without a User-Agent.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Nothing found at {0}")]
    NotFound(String),

    #[error("Network request failed for {0}")]
    Unreachable(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    UnhandledStatus { url: String, status: StatusCode },
}

impl FetchError {
    /// Discovery scans use this to tell "no such feed" apart from real failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_))
    }
}

/// Fetches raw feed payloads over HTTP.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self { client })
    }

    /// Downloads `url` and returns the response body.
    ///
    /// # Errors
    ///
    /// * [`FetchError::NotFound`] on a 404.
    /// * [`FetchError::UnhandledStatus`] on any other non-2xx status.
    /// * [`FetchError::Unreachable`] when the request or body download fails, including timeouts.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Unreachable(url.to_string(), e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Nothing found at {}", url);
            return Err(FetchError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            warn!("Received non-OK response {} from {}", status, url);
            return Err(FetchError::UnhandledStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Unreachable(url.to_string(), e))?;
        Ok(body.to_vec())
    }
}
