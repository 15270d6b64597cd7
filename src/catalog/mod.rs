//! Card set catalog data model and remote clients
//!
//! A set is looked up in two stages: the [`LocationResolver`] asks the catalog
//! where the set's data currently lives, then the [`DataFetcher`] downloads it.

pub mod fetcher;
pub mod location;

pub use fetcher::DataFetcher;
pub use location::{LocationResolver, DEFAULT_API_BASE_URL};

use chrono::{serde::ts_seconds, DateTime, Utc};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use crate::error::TransportError;

/// Numeric identifier of a card set, assigned by the catalog
pub type SetId = u32;

/// Opaque set contents as returned by the data endpoint
///
/// Decoding into cards is left to callers; this crate only stores and returns it.
pub type CardSet = serde_json::Value;

/// Where a set's data currently lives and when that pointer goes stale
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SetLocation {
    /// Optional host prefix that `url` is relative to
    #[serde(default, alias = "cdnRoot")]
    pub cdn_root: Option<String>,
    /// Path of the data file, or the absolute URL when `cdn_root` is absent
    pub url: String,
    /// Expiration of this location, sent as unix seconds
    #[serde(with = "ts_seconds", alias = "expireTime")]
    pub expire_time: DateTime<Utc>,
}

impl SetLocation {
    /// Joins `cdn_root` and `url` with a single `/` between them
    pub fn full_url_string(&self) -> String {
        match &self.cdn_root {
            Some(root) => format!(
                "{}/{}",
                root.trim_end_matches('/'),
                self.url.trim_start_matches('/')
            ),
            None => self.url.clone(),
        }
    }

    /// The fully-qualified URL of the set data
    pub fn full_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.full_url_string())
    }
}

/// A fetched set stamped with its expiration, as stored in the disk cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetData {
    /// The set contents
    pub payload: CardSet,
    /// Entry is valid only while strictly before this instant
    pub expire_time_utc: DateTime<Utc>,
}

impl SetData {
    pub fn new(payload: CardSet, expire_time_utc: DateTime<Utc>) -> Self {
        Self {
            payload,
            expire_time_utc,
        }
    }

    /// Whether the entry can still be served at `now`
    ///
    /// An entry expiring exactly at `now` is already stale.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_time_utc > now
    }
}

/// Issues a GET and parses the body as JSON
///
/// Non-success statuses are reported as HTTP errors rather than parsed.
async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, TransportError> {
    let response = client.get(url).send().await?.error_for_status()?;
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    #[test]
    fn test_parse_location_with_cdn_root() {
        let json = r#"{
            "cdn_root": "https://steamcdn-a.akamaihd.net/",
            "url": "/apps/583950/resource/card_set_0.BB8732855C64ACE2696DCF5E25DEDD98D134DD2A.json",
            "expire_time": 1540000000
        }"#;

        let location: SetLocation = serde_json::from_str(json).expect("Failed to parse location");

        assert_eq!(
            location.full_url_string(),
            "https://steamcdn-a.akamaihd.net/apps/583950/resource/card_set_0.BB8732855C64ACE2696DCF5E25DEDD98D134DD2A.json"
        );
        assert_eq!(location.expire_time.timestamp(), 1540000000);
    }

    #[test]
    fn test_parse_location_with_absolute_url_and_camel_case() {
        let json = r#"{"url": "https://cdn/7.json", "expireTime": 1700000000}"#;

        let location: SetLocation = serde_json::from_str(json).expect("Failed to parse location");

        assert!(location.cdn_root.is_none());
        assert_eq!(location.full_url().unwrap().as_str(), "https://cdn/7.json");
        assert_eq!(
            location.expire_time,
            Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap()
        );
    }

    #[test]
    fn test_parse_location_missing_url_fails() {
        let result: Result<SetLocation, _> = serde_json::from_str(r#"{"expire_time": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_relative_url_without_root_is_invalid() {
        let location = SetLocation {
            cdn_root: None,
            url: "/apps/card_set_1.json".to_string(),
            expire_time: Utc::now(),
        };

        assert!(location.full_url().is_err());
    }

    #[test]
    fn test_set_data_serializes_with_camel_case_fields() {
        let data = SetData::new(
            json!({"cards": []}),
            Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap(),
        );

        let value = serde_json::to_value(&data).unwrap();

        assert_eq!(value["payload"], json!({"cards": []}));
        assert_eq!(value["expireTimeUtc"], json!("2023-11-14T22:13:20Z"));
    }

    #[test]
    fn test_freshness_is_strict() {
        let now = Utc::now();
        let data = |offset: Duration| SetData::new(json!(null), now + offset);

        assert!(data(Duration::hours(1)).is_fresh_at(now));
        assert!(!data(Duration::zero()).is_fresh_at(now));
        assert!(!data(Duration::seconds(-1)).is_fresh_at(now));
    }
}
