use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

#[derive(Clone)]
pub struct CacheEntry {
    pub data: Value,
    pub expires_at: Instant,
}

impl CacheEntry {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Default)]
struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// In-memory key/value store where every entry carries its own expiry.
///
/// Clones share the same underlying map, so one store can be handed to
/// several services. Expired entries are purged lazily on lookup.
#[derive(Clone, Default)]
pub struct CacheStore {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
    metrics: Arc<CacheMetrics>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Entries are replaced whole, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let mut cache = self.lock();
        let now = Instant::now();

        let expired = match cache.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                debug!("Cache hit for {}", key);
                self.metrics.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.data.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!("Cache entry expired for {}", key);
            cache.remove(key);
        } else {
            debug!("Cache miss for {}", key);
        }
        self.metrics.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub fn set(&self, key: impl Into<String>, data: Value, ttl: Duration) {
        let entry = CacheEntry {
            data,
            expires_at: Instant::now() + ttl,
        };
        self.lock().insert(key.into(), entry);
    }

    /// Drops every entry and returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut cache = self.lock();
        let removed = cache.len();
        cache.clear();
        info!("Cache cleared ({} entries)", removed);
        removed
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.lock().len();
        let hits = self.metrics.hits.load(Ordering::Relaxed);
        let misses = self.metrics.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        CacheStats {
            entries,
            hits,
            misses,
            hit_rate: if total == 0 {
                0.0
            } else {
                hits as f64 / total as f64
            },
        }
    }
}
