use crate::providers::feed::FeedError;
use crate::providers::fetch::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("Failed to parse JSON payload from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected payload from {url}: expected '{expected}', found '{found}'")]
    UnexpectedPayload {
        url: String,
        expected: String,
        found: String,
    },
}

impl StationError {
    /// True when the upstream resource doesn't exist, as opposed to being unreachable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StationError::Fetch(e) if e.is_not_found())
    }
}
