//! Downloads set data from a resolved location

use reqwest::Client;
use tracing::debug;

use super::{get_json, CardSet, SetLocation};
use crate::error::FetchError;

#[derive(Debug, Clone)]
pub struct DataFetcher {
    http_client: Client,
}

impl DataFetcher {
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }

    /// Fetches the set contents at `location`
    ///
    /// The result carries no expiration; the caller stamps it from the location.
    pub async fn fetch_data(&self, location: &SetLocation) -> Result<CardSet, FetchError> {
        let url = location.full_url().map_err(|source| FetchError {
            url: location.full_url_string(),
            source: source.into(),
        })?;
        debug!(%url, "fetching set data");

        get_json(&self.http_client, url.as_str())
            .await
            .map_err(|source| FetchError {
                url: url.to_string(),
                source,
            })
    }
}
