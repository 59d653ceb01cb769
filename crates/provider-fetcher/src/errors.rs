use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures in the tool pipeline. Only `NotFound` is allowed to escape the
/// dispatcher; everything else is rendered into the tool output string so the
/// remote agent loop can keep going.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Tool execution failed: {0}")]
    ExecutionError(String),
}

pub type ToolResult<T> = Result<T, ToolError>;

/// A single proxy fetch that did not produce markup. Never retried.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to fetch {url}: status {status}")]
    Status { status: u16, url: String },

    #[error("request timed out while fetching {url}")]
    Timeout { url: String },

    #[error("too many redirects while fetching {url}")]
    TooManyRedirects { url: String },

    #[error("error while fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Provider search outcome, kept as two distinct kinds internally even though
/// the JSON payload returned to the model collapses them.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("no provider listings found at {url}")]
    NoListings { url: String },
}
