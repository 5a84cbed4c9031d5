//! Expiration Sweeper Task
//!
//! Background task that periodically removes cache entries older than the TTL.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::{CacheStore, Clock, MAX_SWEEP_INTERVAL, MIN_SWEEP_INTERVAL};

/// Spawns the sweeper for one cache.
///
/// Every `sweep_interval` the task locks the store and drops entries whose
/// age is at least `ttl`. It holds only a weak pointer to the store and
/// exits on the first tick after the store is gone, or as soon as
/// `shutdown` changes or its sender is dropped. The task never takes the
/// lock after observing shutdown.
///
/// An entry can therefore stay visible for up to `ttl + sweep_interval`
/// after insertion.
///
/// # Arguments
/// * `store` - weak reference to the cache table
/// * `clock` - time source shared with the cache
/// * `ttl` - age at which an entry is removed
/// * `sweep_interval` - period between sweeps, clamped to
///   `MIN_SWEEP_INTERVAL..=MAX_SWEEP_INTERVAL`
/// * `shutdown` - receiver side of the cache's shutdown signal
pub fn spawn_sweeper(
    store: Weak<Mutex<CacheStore>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    sweep_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let sweep_interval = sweep_interval.clamp(MIN_SWEEP_INTERVAL, MAX_SWEEP_INTERVAL);

    tokio::spawn(async move {
        debug!(
            "Starting cache sweeper: ttl={:?}, interval={:?}",
            ttl, sweep_interval
        );

        let Some(start) = Instant::now().checked_add(sweep_interval) else {
            warn!("Sweep interval {:?} out of range, expiry disabled", sweep_interval);
            let _ = shutdown.changed().await;
            return;
        };
        let mut ticker = interval_at(start, sweep_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.changed() => {
                    debug!("Cache sweeper received shutdown signal");
                    break;
                }
                _ = ticker.tick() => {}
            }

            let Some(store) = store.upgrade() else {
                debug!("Cache dropped, sweeper exiting");
                break;
            };

            let removed = {
                let mut guard = store.lock().await;
                guard.remove_expired(clock.now(), ttl)
            };

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}
