// src/cache.rs

use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Process-wide TTL cache shared across request handlers.
///
/// * Expiry is checked lazily on read; an expired entry is a plain miss
///   and stays in memory until overwritten or invalidated.
/// * `set` always overwrites with a fresh timestamp.
/// * No eviction beyond TTL-on-read: the key space is bounded by
///   (users) x (topics), not by request volume.
/// * Concurrent misses for the same key each recompute independently;
///   there is no single-flight de-duplication.
///
/// Instances are owned by the service that uses them and handed in at
/// construction time, never reached through a module-level global.
pub struct TtlCache<K, V> {
    entries: Arc<DashMap<K, CacheEntry<V>>>,
    ttl: Duration,
}

impl<K, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Returns the cached value only while it is fresh.
    pub fn get(&self, key: &K) -> Option<V> {
        let entry = self.entries.get(key)?;
        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub fn set(&self, key: K, value: V) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Removes exactly one key. Used after known mutations so the next
    /// read recomputes even inside the TTL window.
    pub fn invalidate(&self, key: &K) {
        self.entries.remove(key);
    }

    /// Removes every key matching the predicate (e.g. all scoped entries
    /// of one user).
    pub fn invalidate_where(&self, mut pred: impl FnMut(&K) -> bool) {
        self.entries.retain(|key, _| !pred(key));
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
