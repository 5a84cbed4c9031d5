//! Cache Entry Module
//!
//! Defines the structure for individual cached responses.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

// == Cache Entry ==
/// A single cached payload together with its insertion time.
///
/// Entries are never mutated: a second `put` for the same key replaces the
/// whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The raw payload, opaque to the cache
    pub value: Bytes,
    /// Instant the entry was inserted
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with `now`.
    pub fn new(value: Bytes, now: Instant) -> Self {
        Self {
            value,
            created_at: now,
        }
    }

    // == Age ==
    /// Time elapsed since insertion, saturating at zero.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks if the entry is due for removal.
    ///
    /// Boundary condition: an entry whose age equals the TTL exactly is
    /// expired.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) >= ttl
    }
}
