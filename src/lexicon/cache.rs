use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use super::fetch::LexiconEntry;

/// Process-wide lexicon cache.
///
/// A single mutex-guarded cell holding the most recently fetched entry
/// list together with its fetch timestamp. The two fields always change
/// under the same lock acquisition, so a reader never observes entries
/// from one fetch paired with the timestamp of another.
///
/// `store` is the only mutator. Reads never trigger fetches; freshness
/// decisions and fetch-triggering live in [`super::LexiconService`].
#[derive(Debug, Default)]
pub struct LexiconCache {
    slot: Mutex<Slot>,
}

#[derive(Debug, Default)]
struct Slot {
    entries: Vec<LexiconEntry>,
    fetched_at: Option<Instant>,
}

impl LexiconCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents and fetch time. Never blocks on the network.
    pub fn snapshot(&self) -> (Vec<LexiconEntry>, Option<Instant>) {
        let slot = self.lock();
        (slot.entries.clone(), slot.fetched_at)
    }

    /// Replace both fields together.
    pub fn store(&self, entries: Vec<LexiconEntry>, now: Instant) {
        let mut slot = self.lock();
        slot.entries = entries;
        slot.fetched_at = Some(now);
    }

    /// Whether the cache holds a fetch younger than `ttl` as of `now`.
    ///
    /// A never-populated cache is not fresh. The boundary is exclusive:
    /// an entry exactly `ttl` old is stale.
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        let slot = self.lock();
        match slot.fetched_at {
            Some(fetched_at) => now.saturating_duration_since(fetched_at) < ttl,
            None => false,
        }
    }

    /// Whether the cache holds no entries (never populated, or the last
    /// fetch returned an empty document).
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
