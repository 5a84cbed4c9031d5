//! Cache Store Module
//!
//! Hash-keyed table of cached responses. Callers are expected to hold the
//! cache lock around every call.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Keyed table mapping request locators to stored payloads.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup and removal counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Put ==
    /// Inserts or replaces the entry for `key`, stamped with `now`.
    pub fn put(&mut self, key: String, value: Bytes, now: Instant) {
        self.entries.insert(key, CacheEntry::new(value, now));
    }

    // == Get ==
    /// Returns the stored payload for `key`, if any.
    ///
    /// TTL is not checked here: an entry stays visible until the sweeper
    /// removes it.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Remove Expired ==
    /// Removes every entry whose age at `now` is at least `ttl`.
    ///
    /// Returns the number of entries removed.
    pub fn remove_expired(&mut self, now: Instant, ttl: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now, ttl));

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
