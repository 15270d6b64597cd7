//! Resolves a set identifier to the location of its data

use reqwest::Client;
use tracing::debug;

use super::{get_json, SetId, SetLocation};
use crate::error::LookupError;

/// Base URL of the public card set catalog
pub const DEFAULT_API_BASE_URL: &str = "https://playartifact.com";

/// Client for the catalog's set information endpoint
#[derive(Debug, Clone)]
pub struct LocationResolver {
    http_client: Client,
    base_url: String,
}

impl LocationResolver {
    pub fn new(http_client: Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Set information URL, with the identifier zero-padded to two digits
    pub fn location_url(&self, set_id: SetId) -> String {
        format!("{}/cardset/{:02}", self.base_url.trim_end_matches('/'), set_id)
    }

    /// Fetches the current data location for a set
    ///
    /// # Returns
    /// * `Ok(SetLocation)` - Where the set data lives and when that expires
    /// * `Err(LookupError)` - If the request fails or the body is not a location
    pub async fn resolve_location(&self, set_id: SetId) -> Result<SetLocation, LookupError> {
        let url = self.location_url(set_id);
        debug!(set_id, %url, "resolving set location");

        get_json(&self.http_client, &url)
            .await
            .map_err(|source| LookupError {
                set_id,
                url,
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_url_pads_single_digit_ids() {
        let resolver = LocationResolver::new(Client::new(), DEFAULT_API_BASE_URL);
        assert_eq!(resolver.location_url(0), "https://playartifact.com/cardset/00");
        assert_eq!(resolver.location_url(7), "https://playartifact.com/cardset/07");
    }

    #[test]
    fn test_location_url_keeps_wide_ids() {
        let resolver = LocationResolver::new(Client::new(), "http://localhost:1234/");
        assert_eq!(resolver.location_url(123), "http://localhost:1234/cardset/123");
    }
}
