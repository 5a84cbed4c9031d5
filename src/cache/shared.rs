//! Shared Cache Module
//!
//! The handle callers use: one store, one lock, one sweeper.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore, Clock, SystemClock};
use crate::config::Config;
use crate::tasks::spawn_sweeper;

/// Shortest sweep period accepted; zero would spin the sweeper.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Longest sweep period accepted; the timer cannot schedule past it.
pub const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

// == Cache ==
/// Time-bounded response cache shared between request issuers.
///
/// Cloning is cheap and yields another handle to the same table. `get`,
/// `put` and each sweep are serialized through a single mutex.
///
/// `get` does not check age itself. Entries are removed by a background
/// sweeper, so a value may be served for up to `ttl + sweep_interval` after
/// it was stored.
///
/// The sweeper stops when [`Cache::shutdown`] is called or the last handle
/// is dropped, which closes the shutdown channel.
#[derive(Debug, Clone)]
pub struct Cache {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    store: Arc<Mutex<CacheStore>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    sweep_interval: Duration,
    shutdown: watch::Sender<bool>,
    sweeper: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl Cache {
    // == Constructors ==
    /// Creates an empty cache that sweeps once per `ttl`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(ttl: Duration) -> Self {
        Self::with_sweep_interval(ttl, ttl)
    }

    /// Creates an empty cache with an independent sweep period.
    pub fn with_sweep_interval(ttl: Duration, sweep_interval: Duration) -> Self {
        Self::with_clock(ttl, sweep_interval, Arc::new(SystemClock))
    }

    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(ttl: Duration, sweep_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        let sweep_interval = sweep_interval.clamp(MIN_SWEEP_INTERVAL, MAX_SWEEP_INTERVAL);
        let store = Arc::new(Mutex::new(CacheStore::new()));
        let (shutdown, shutdown_rx) = watch::channel(false);

        let sweeper = spawn_sweeper(
            Arc::downgrade(&store),
            clock.clone(),
            ttl,
            sweep_interval,
            shutdown_rx,
        );

        Self {
            inner: Arc::new(Inner {
                store,
                clock,
                ttl,
                sweep_interval,
                shutdown,
                sweeper: std::sync::Mutex::new(Some(sweeper)),
            }),
        }
    }

    /// Creates a cache using the TTL and sweep period from the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_sweep_interval(config.cache_ttl(), config.sweep_interval())
    }

    // == Put ==
    /// Stores `value` under `key`, replacing any previous entry.
    pub async fn put(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        let key = key.into();
        let value = value.into();

        // Stamp after acquiring the lock so a later writer never carries an
        // older timestamp than the entry it replaces.
        let mut store = self.inner.store.lock().await;
        store.put(key, value, self.inner.clock.now());
    }

    // == Get ==
    /// Returns the cached payload for `key`, or `None` on a miss.
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        let value = self.inner.store.lock().await.get(key);
        debug!(key, hit = value.is_some(), "cache lookup");
        value
    }

    /// Number of entries currently stored, including any awaiting a sweep.
    pub async fn len(&self) -> usize {
        self.inner.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.store.lock().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.store.lock().await.stats()
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    pub fn sweep_interval(&self) -> Duration {
        self.inner.sweep_interval
    }

    // == Shutdown ==
    /// Stops the sweeper and waits for it to exit.
    ///
    /// Entries already stored stay readable through remaining handles but
    /// are no longer expired.
    pub async fn shutdown(&self) {
        let _ = self.inner.shutdown.send(true);

        let handle = self
            .inner
            .sweeper
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        if let Some(handle) = handle {
            match handle.await {
                Ok(()) => debug!("Cache sweeper stopped"),
                Err(e) => warn!("Cache sweeper terminated abnormally: {}", e),
            }
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    const TTL: Duration = Duration::from_millis(50);

    #[tokio::test(start_paused = true)]
    async fn test_miss_then_hit() {
        let cache = Cache::new(TTL);

        assert_eq!(cache.get("k").await, None);

        cache.put("k", vec![1u8, 2, 3]).await;
        assert_eq!(cache.get("k").await, Some(Bytes::from(vec![1u8, 2, 3])));
    }

    #[tokio::test(start_paused = true)]
    async fn test_replacement_scenario() {
        let cache = Cache::new(TTL);

        cache.put("x", vec![0xAAu8]).await;
        cache.put("x", vec![0xBBu8]).await;

        assert_eq!(cache.get("x").await, Some(Bytes::from(vec![0xBBu8])));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_scenario() {
        let cache = Cache::new(TTL);
        cache.put("a", vec![0x01u8]).await;

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(cache.get("a").await, Some(Bytes::from(vec![0x01u8])));

        // Sweep fires at 50ms.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(cache.get("a").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entry_visible_until_sweep() {
        let cache = Cache::with_sweep_interval(TTL, Duration::from_secs(1));
        cache.put("a", vec![0x01u8]).await;

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(cache.get("a").await, Some(Bytes::from(vec![0x01u8])));

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(cache.get("a").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiring_one_key_keeps_others() {
        let cache = Cache::with_sweep_interval(TTL, Duration::from_millis(10));
        cache.put("k1", "first").await;

        tokio::time::sleep(Duration::from_millis(30)).await;
        cache.put("k2", "second").await;

        // The 50ms sweep drops k1 (age 50ms) and keeps k2 (age 20ms).
        tokio::time::sleep(Duration::from_millis(25)).await;
        assert_eq!(cache.get("k1").await, None);
        assert_eq!(cache.get("k2").await, Some(Bytes::from_static(b"second")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_clock_drives_expiry() {
        let clock = Arc::new(ManualClock::new());
        let cache = Cache::with_clock(TTL, Duration::from_millis(10), clock.clone());
        cache.put("k", "v").await;

        // Timer ticks pass but the injected clock has not moved.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(cache.get("k").await, Some(Bytes::from_static(b"v")));

        clock.advance(TTL);
        tokio::time::sleep(Duration::from_millis(15)).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stats_track_lookups_and_sweeps() {
        let cache = Cache::new(TTL);
        cache.put("a", "1").await;
        cache.get("a").await;
        cache.get("b").await;

        tokio::time::sleep(Duration::from_millis(60)).await;

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.hit_rate(), 0.5);
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_expiry() {
        let cache = Cache::new(TTL);
        cache.put("a", "1").await;

        cache.shutdown().await;
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(cache.get("a").await, Some(Bytes::from_static(b"1")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_twice_is_harmless() {
        let cache = Cache::new(TTL);
        cache.shutdown().await;
        cache.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_ttl_keeps_sweeper_alive() {
        let cache = Cache::new(Duration::MAX);
        assert_eq!(cache.ttl(), Duration::MAX);
        assert_eq!(cache.sweep_interval(), MAX_SWEEP_INTERVAL);

        cache.put("k", "v").await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        let handle = cache.inner.sweeper.lock().unwrap().take().unwrap();
        assert!(!handle.is_finished(), "Sweeper should still be running");

        cache.inner.shutdown.send(true).unwrap();
        handle.await.expect("Sweeper should exit without panicking");
        assert_eq!(cache.get("k").await, Some(Bytes::from_static(b"v")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_stamps_time_after_lock() {
        let clock = Arc::new(ManualClock::new());
        let cache = Cache::with_clock(TTL, Duration::from_millis(10), clock.clone());

        // Hold the lock while time moves, then let the put through.
        let guard = cache.inner.store.lock().await;
        let writer = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.put("k", "late").await })
        };
        tokio::task::yield_now().await;
        clock.advance(Duration::from_millis(40));
        drop(guard);
        writer.await.unwrap();

        // Stamped at +40ms, so a sweep at +60ms sees age 20ms.
        clock.advance(Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(15)).await;
        assert_eq!(cache.get("k").await, Some(Bytes::from_static(b"late")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_sweep_interval_is_clamped() {
        let cache = Cache::with_sweep_interval(TTL, Duration::ZERO);
        assert_eq!(cache.sweep_interval(), MIN_SWEEP_INTERVAL);
        assert_eq!(cache.ttl(), TTL);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_on_distinct_keys() {
        let cache = Cache::with_sweep_interval(Duration::from_secs(60), Duration::from_millis(1));

        let mut handles = Vec::new();
        for worker in 0..8 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..50 {
                    let key = format!("w{}-k{}", worker, i);
                    let value = format!("value-{}-{}", worker, i);
                    cache.put(key.clone(), value.clone()).await;
                    assert_eq!(cache.get(&key).await, Some(Bytes::from(value)));
                    tokio::task::yield_now().await;
                }
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.len().await, 8 * 50);
    }
}
