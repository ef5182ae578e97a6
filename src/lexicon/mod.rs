//! Lexicon retrieval and caching.
//!
//! The lexicon is a published YAML document listing Gemara terms. It is
//! fetched on demand and held in a process-wide cache with a 24-hour TTL
//! (configurable). Reads never block on the network unless the cache is
//! empty or stale.

pub mod cache;
pub mod fetch;
pub mod service;

pub use cache::LexiconCache;
pub use fetch::{fetch_lexicon, FetchError, LexiconEntry};
pub use service::{GetLexiconOutput, LexiconService};
