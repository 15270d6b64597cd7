//! Client configuration

use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::DEFAULT_API_BASE_URL;

/// File name of the cache inside the system temporary directory
pub const CACHE_FILE_NAME: &str = "cardset_data_cache.json";

/// Configuration for [`crate::client::CardSetClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the set information endpoint
    pub api_base_url: String,
    /// File backing the disk cache
    pub cache_path: PathBuf,
    /// Per-request timeout; `None` keeps the HTTP client's default
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_path: default_cache_path(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn with_cache_path(mut self, cache_path: impl Into<PathBuf>) -> Self {
        self.cache_path = cache_path.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builds the HTTP client described by this configuration
    pub fn build_http_client(&self) -> reqwest::Result<Client> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

/// Cache file location in the system temporary directory
pub fn default_cache_path() -> PathBuf {
    std::env::temp_dir().join(CACHE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "https://playartifact.com");
        assert!(config.cache_path.starts_with(std::env::temp_dir()));
        assert!(config.cache_path.ends_with(CACHE_FILE_NAME));
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::default()
            .with_api_base_url("http://127.0.0.1:9000")
            .with_cache_path("/tmp/other.json")
            .with_request_timeout(Duration::from_secs(5));

        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.cache_path, PathBuf::from("/tmp/other.json"));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
        assert!(config.build_http_client().is_ok());
    }
}
