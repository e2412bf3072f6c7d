// src/cache/ttl.rs
use crate::cache::clock::{add_duration, Clock};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

struct CacheEntry<V> {
    expires_at: DateTime<Utc>,
    value: V,
}

/// Process-local key -> (expiry, value) store.
///
/// Expired entries are only dropped when a read finds them. There is no
/// capacity bound, so a stream of distinct keys grows the map until those
/// keys are read again after expiry.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Returns a clone of the value if it is still live, evicting it otherwise.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.lock();

        let expired = match entries.get(key) {
            None => return None,
            Some(entry) => entry.expires_at <= now,
        };

        if expired {
            entries.remove(key);
            return None;
        }

        entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let expires_at = add_duration(self.clock.now(), ttl);
        self.lock().insert(key.into(), CacheEntry { expires_at, value });
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
