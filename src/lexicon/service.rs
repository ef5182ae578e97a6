use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::ServerConfig;

use super::cache::LexiconCache;
use super::fetch::{fetch_lexicon, FetchError, LexiconEntry};

/// Result of a `get_lexicon` tool call.
#[derive(Debug, Clone, Serialize)]
pub struct GetLexiconOutput {
    pub entries: Vec<LexiconEntry>,
    pub source: String,
    pub cached: bool,
}

/// Shared access path to the lexicon.
///
/// Owns the cache, the HTTP client, the source URL, and the TTL. Both
/// public operations run the same two-step pipeline: `ensure_fresh`
/// (fetch if forced, empty, or stale) followed by a cache snapshot.
/// The `cached` flag reports whether *this* call fetched, not whether
/// the final cache state happens to be fresh.
///
/// Concurrent cache-miss calls each fetch independently; there is no
/// single-flight coalescing. At interactive call volume the duplicate
/// fetches are harmless, but this is the known scalability limit of the
/// design.
pub struct LexiconService {
    client: reqwest::Client,
    source_url: String,
    ttl: Duration,
    cache: LexiconCache,
}

impl LexiconService {
    /// Build a service from configuration. The tool timeout becomes the
    /// whole-request deadline on the HTTP client.
    pub fn new(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.tool_timeout)
            .build()?;

        Ok(Self {
            client,
            source_url: config.lexicon_url.clone(),
            ttl: config.lexicon_ttl,
            cache: LexiconCache::new(),
        })
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Fetch and overwrite the cache when `force` is set, the cache has
    /// never been populated, or the cached fetch has outlived the TTL.
    ///
    /// Returns whether a fetch occurred. A failed fetch propagates the
    /// error and leaves prior cache contents untouched.
    async fn ensure_fresh(&self, force: bool) -> Result<bool, FetchError> {
        if !force && !self.cache.is_empty() && self.cache.is_fresh(Instant::now(), self.ttl) {
            return Ok(false);
        }

        let entries = fetch_lexicon(&self.client, &self.source_url).await?;
        self.cache.store(entries, Instant::now());
        Ok(true)
    }

    /// Direct query path (the `get_lexicon` tool).
    ///
    /// `refresh` bypasses the cache entirely: the fetch always happens
    /// and the result reports `cached: false`.
    pub async fn get(&self, refresh: bool) -> Result<GetLexiconOutput, FetchError> {
        let did_fetch = self.ensure_fresh(refresh).await?;
        let (entries, _) = self.cache.snapshot();

        Ok(GetLexiconOutput {
            entries,
            source: self.source_url.clone(),
            cached: !did_fetch,
        })
    }

    /// Resource-read path. Serves current cache contents, fetching first
    /// if the cache is empty or stale. Fetch failures propagate; stale
    /// data is never served silently.
    pub async fn read(&self) -> Result<Vec<LexiconEntry>, FetchError> {
        self.ensure_fresh(false).await?;
        let (entries, _) = self.cache.snapshot();
        Ok(entries)
    }
}
