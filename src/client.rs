//! Fetch-through card set client
//!
//! `CardSetClient` serves sets from the disk cache while their entries are fresh
//! and otherwise performs the two-stage catalog lookup, storing the result back
//! into the cache. The cache is loaded on first use and flushed by [`CardSetClient::release`].

use chrono::Utc;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::debug;

use crate::cache::DiskCache;
use crate::catalog::{CardSet, DataFetcher, LocationResolver, SetData, SetId};
use crate::config::ClientConfig;
use crate::error::CardSetError;

type SetCache = DiskCache<SetId, SetData>;

/// Client for retrieving card sets through a persistent cache
///
/// Dropping the client without calling [`release`](Self::release) discards
/// every cache update made since it was created.
#[derive(Debug)]
pub struct CardSetClient {
    resolver: LocationResolver,
    fetcher: DataFetcher,
    cache_path: PathBuf,
    /// Loaded at most once, on the first cache access
    cache: OnceLock<Mutex<SetCache>>,
}

impl CardSetClient {
    /// Creates a client, building its HTTP client from `config`
    pub fn new(config: ClientConfig) -> Result<Self, CardSetError> {
        let http_client = config
            .build_http_client()
            .map_err(CardSetError::HttpClient)?;
        Ok(Self::with_http_client(http_client, config))
    }

    /// Creates a client that issues requests through `http_client`
    ///
    /// `config.request_timeout` is ignored; configure it on `http_client` instead.
    pub fn with_http_client(http_client: Client, config: ClientConfig) -> Self {
        Self {
            resolver: LocationResolver::new(http_client.clone(), config.api_base_url),
            fetcher: DataFetcher::new(http_client),
            cache_path: config.cache_path,
            cache: OnceLock::new(),
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    fn cache(&self) -> MutexGuard<'_, SetCache> {
        self.cache
            .get_or_init(|| {
                debug!(path = %self.cache_path.display(), "loading cache");
                Mutex::new(DiskCache::acquire(&self.cache_path))
            })
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the contents of a set
    ///
    /// # Arguments
    /// * `set_id` - The set to look up
    /// * `force_fetch` - Skip the cache and always query the catalog
    ///
    /// # Behavior
    /// - Serves the cached payload if its entry expires strictly after now
    /// - Otherwise resolves the set location, fetches the data, stamps it with
    ///   the location's expiration and stores it in the cache
    /// - Remote failures are returned as-is and leave the cache untouched
    pub async fn get_card_set(
        &self,
        set_id: SetId,
        force_fetch: bool,
    ) -> Result<CardSet, CardSetError> {
        if !force_fetch {
            let now = Utc::now();
            let cached = {
                let cache = self.cache();
                cache
                    .get(&set_id)
                    .filter(|entry| entry.is_fresh_at(now))
                    .map(|entry| entry.payload.clone())
            };
            if let Some(payload) = cached {
                debug!(set_id, "cache hit");
                return Ok(payload);
            }
            debug!(set_id, "cache miss or expired");
        } else {
            debug!(set_id, "forced fetch");
        }

        let data = self.fetch_set_data(set_id).await?;
        let payload = data.payload.clone();
        self.cache().set(set_id, data);
        Ok(payload)
    }

    /// Performs the two-stage catalog lookup without touching the cache
    pub async fn fetch_set_data(&self, set_id: SetId) -> Result<SetData, CardSetError> {
        let location = self.resolver.resolve_location(set_id).await?;
        let payload = self.fetcher.fetch_data(&location).await?;
        Ok(SetData::new(payload, location.expire_time))
    }

    /// Returns the cached entry for a set, fresh or not, without network access
    pub fn cached_entry(&self, set_id: SetId) -> Option<SetData> {
        self.cache().get(&set_id).cloned()
    }

    /// Drops the cached entry for a set, returning whether one existed
    pub fn invalidate(&self, set_id: SetId) -> bool {
        self.cache().remove(&set_id).is_some()
    }

    pub fn clear_cache(&self) {
        self.cache().clear();
    }

    /// Flushes the cache to disk and consumes the client
    ///
    /// If the cache was never loaded there is nothing to flush and the cache
    /// file is left as it is.
    pub fn release(self) {
        match self.cache.into_inner() {
            Some(cache) => cache
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner)
                .release(),
            None => debug!("cache never loaded, skipping flush"),
        }
    }
}
