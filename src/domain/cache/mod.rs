//! Bounded, recency-ordered response cache.
//!
//! Maps normalized query text to a previously synthesized answer. The policy
//! is plain LRU: a `get` promotes the entry, a `put` counts as a fresh use,
//! and inserting past capacity evicts exactly the least-recently-used entry.
//! There is no TTL and no size weighting.

use std::collections::HashMap;

use tokio::sync::Mutex;

/// Default maximum number of cached answers.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Shared, process-wide answer cache.
///
/// All requests read and write through one instance; each get/put is a single
/// critical section so the recency order and the capacity bound hold under
/// concurrent access.
#[derive(Debug)]
pub struct ResponseCache {
    inner: Mutex<LruState>,
}

#[derive(Debug)]
struct LruState {
    capacity: usize,
    entries: HashMap<String, String>,
    /// Keys from least- to most-recently used.
    order: Vec<String>,
}

impl ResponseCache {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be non-zero");
        Self {
            inner: Mutex::new(LruState {
                capacity,
                entries: HashMap::with_capacity(capacity),
                order: Vec::with_capacity(capacity),
            }),
        }
    }

    /// Look up a cached answer, promoting the entry on a hit.
    ///
    /// Never fails; a miss is a normal outcome.
    pub async fn get(&self, query: &str) -> Option<String> {
        let key = normalize(query);
        let mut state = self.inner.lock().await;

        let value = state.entries.get(&key).cloned()?;
        state.promote(&key);
        Some(value)
    }

    /// Store an answer, replacing any existing entry for the same key and
    /// evicting the least-recently-used entry when over capacity.
    pub async fn put(&self, query: &str, answer: &str) {
        let key = normalize(query);
        let mut state = self.inner.lock().await;

        if state.entries.insert(key.clone(), answer.to_string()).is_some() {
            state.promote(&key);
            return;
        }

        state.order.push(key);
        if state.order.len() > state.capacity {
            let evicted = state.order.remove(0);
            state.entries.remove(&evicted);
            tracing::debug!(key = %evicted, "evicted least-recently-used cache entry");
        }
    }

    /// Current number of cached entries.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl LruState {
    /// Move an existing key to the most-recently-used position.
    fn promote(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            let key = self.order.remove(pos);
            self.order.push(key);
        }
    }
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}
