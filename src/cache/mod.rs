//! Cache Module
//!
//! In-memory response cache with TTL expiration by a background sweeper.

mod clock;
mod entry;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use shared::{Cache, MAX_SWEEP_INTERVAL, MIN_SWEEP_INTERVAL};
pub use stats::CacheStats;
pub use store::CacheStore;
