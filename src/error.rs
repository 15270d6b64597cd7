//! Error types for card set lookups
//!
//! Remote failures are surfaced as typed errors. Cache failures never reach
//! this module: the disk cache degrades to empty on load and to a no-op on flush.

use thiserror::Error;

use crate::catalog::SetId;

/// Low-level cause shared by both remote stages
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON shape
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The resolved location could not be turned into a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Resolving the data location for a set failed
#[derive(Debug, Error)]
#[error("Failed to fetch set information for set {set_id} from {url}: {source}")]
pub struct LookupError {
    pub set_id: SetId,
    pub url: String,
    #[source]
    pub source: TransportError,
}

/// Fetching the set data from a resolved location failed
#[derive(Debug, Error)]
#[error("Failed to fetch set data from {url}: {source}")]
pub struct FetchError {
    pub url: String,
    #[source]
    pub source: TransportError,
}

/// Errors returned by [`crate::client::CardSetClient`]
#[derive(Debug, Error)]
pub enum CardSetError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The HTTP client could not be built from the configuration
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
