//! Bounded LRU cache with time-to-live expiration.
//!
//! Capacity and TTL are supplied by the owner. Entries expire by absolute
//! age (reads do not extend their life); at capacity the least recently
//! used entry is evicted. Time is `tokio::time::Instant`, so a paused test
//! clock drives expiry.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

pub struct LruTtlCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    capacity: usize,
    ttl: Duration,
}

struct Inner<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    /// Monotonic use counter; larger means more recently used
    clock: u64,
}

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    last_used: u64,
}

impl<K, V> LruTtlCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
{
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::with_capacity(capacity),
                clock: 0,
            }),
            capacity,
            ttl,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a live value and mark it as recently used. Expired entries are dropped.
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.lock().await;
        inner.clock += 1;
        let tick = inner.clock;

        match inner.entries.get_mut(key) {
            None => return None,
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                entry.last_used = tick;
                return Some(entry.value.clone());
            }
            Some(_) => {}
        }
        inner.entries.remove(key);
        None
    }

    /// Insert a value, replacing any existing entry and resetting its age.
    pub async fn insert(&self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        let mut inner = self.inner.lock().await;
        inner.clock += 1;
        let tick = inner.clock;

        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.capacity {
            let ttl = self.ttl;
            inner.entries.retain(|_, entry| entry.inserted_at.elapsed() < ttl);
            if inner.entries.len() >= self.capacity {
                let oldest = inner
                    .entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.last_used)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    inner.entries.remove(&oldest);
                }
            }
        }

        inner.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
                last_used: tick,
            },
        );
    }

    pub async fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().await.entries.remove(key).map(|e| e.value)
    }

    pub async fn clear(&self) {
        self.inner.lock().await.entries.clear();
    }

    /// Number of entries, including expired ones not yet dropped.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize) -> LruTtlCache<String, i32> {
        LruTtlCache::new(capacity, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn insert_and_get() {
        let cache = cache(2);
        cache.insert("key".to_string(), 42).await;
        assert_eq!(cache.get(&"key".to_string()).await, Some(42));
        assert_eq!(cache.get(&"missing".to_string()).await, None);
    }

    #[tokio::test]
    async fn evicts_least_recently_used() {
        let cache = cache(2);
        cache.insert("a".to_string(), 1).await;
        cache.insert("b".to_string(), 2).await;
        // Touch "a" so "b" becomes the eviction candidate.
        assert_eq!(cache.get(&"a".to_string()).await, Some(1));
        cache.insert("c".to_string(), 3).await;

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get(&"a".to_string()).await, Some(1));
        assert_eq!(cache.get(&"b".to_string()).await, None);
        assert_eq!(cache.get(&"c".to_string()).await, Some(3));
    }

    #[tokio::test]
    async fn replacing_a_key_does_not_evict() {
        let cache = cache(2);
        cache.insert("a".to_string(), 1).await;
        cache.insert("b".to_string(), 2).await;
        cache.insert("a".to_string(), 10).await;

        assert_eq!(cache.get(&"a".to_string()).await, Some(10));
        assert_eq!(cache.get(&"b".to_string()).await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_by_age_even_when_read() {
        let cache = cache(4);
        cache.insert("key".to_string(), 42).await;

        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(cache.get(&"key".to_string()).await, Some(42));

        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(cache.get(&"key".to_string()).await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entries_make_room_before_lru_eviction() {
        let cache = cache(2);
        cache.insert("stale".to_string(), 1).await;
        tokio::time::advance(Duration::from_secs(4)).await;
        cache.insert("fresh".to_string(), 2).await;
        tokio::time::advance(Duration::from_secs(2)).await;

        // "stale" is expired, so "fresh" survives the insert.
        cache.insert("new".to_string(), 3).await;
        assert_eq!(cache.get(&"fresh".to_string()).await, Some(2));
        assert_eq!(cache.get(&"new".to_string()).await, Some(3));
    }

    #[tokio::test]
    async fn zero_capacity_caches_nothing() {
        let cache = cache(0);
        cache.insert("key".to_string(), 1).await;
        assert!(cache.is_empty().await);
    }
}
