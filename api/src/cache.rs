//! Time-boxed in-memory cache for upstream responses.
//!
//! Entries live for the lifetime of the process. A read only hits when the
//! entry is strictly younger than the TTL; stale entries are left in place and
//! replaced by the next `put` for the same key.

use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// One hour, matching the upstream trial tier's refresh cadence.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub fetched_at: Instant,
    pub payload: Value,
}

impl CacheEntry {
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }
}

/// Keyed response cache. The lock is only held for a map lookup or insert,
/// never across an upstream call, so concurrent misses for the same key both
/// fetch and the last writer wins.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl, entries: Mutex::new(HashMap::new()) }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.get_at(key, Instant::now())
    }

    pub fn put(&self, key: impl Into<String>, payload: Value) {
        self.put_at(key.into(), payload, Instant::now());
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<Value> {
        let entries = self.lock();
        let entry = entries.get(key)?;
        if entry.is_fresh(now, self.ttl) {
            Some(entry.payload.clone())
        } else {
            debug!("cache entry for {key} is stale");
            None
        }
    }

    fn put_at(&self, key: String, payload: Value, fetched_at: Instant) {
        self.lock().insert(key, CacheEntry { fetched_at, payload });
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
