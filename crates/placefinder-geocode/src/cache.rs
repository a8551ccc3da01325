//! Time-bounded memo cache.
//!
//! A mutex-guarded map from key to `(value, inserted_at)`. Expiry is lazy:
//! an entry older than the TTL is dropped the next time it is read, and
//! every insert sweeps out whatever else has expired. The lock
//! is never held across an `.await`, so two concurrent misses on the same key
//! may both compute; the last insert wins. That only costs a duplicate
//! upstream call.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, (V, Instant)>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached value for `key`, if present and younger than the TTL.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some((value, inserted_at)) if inserted_at.elapsed() < self.ttl => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store `value`, evicting every expired entry first so keys that are
    /// never read again do not accumulate.
    pub fn insert(&self, key: K, value: V) {
        let ttl = self.ttl;
        let mut entries = self.lock();
        entries.retain(|_, (_, inserted_at)| inserted_at.elapsed() < ttl);
        entries.insert(key, (value, Instant::now()));
    }

    /// Return the live cached value, or run `compute`, store its output, and
    /// return it.
    pub async fn get_or_compute<F, Fut>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        let value = compute().await;
        self.insert(key, value.clone());
        value
    }

    /// Like [`TtlCache::get_or_compute`], but only `Ok` outputs are stored.
    ///
    /// # Errors
    ///
    /// Returns whatever error `compute` returns; nothing is cached in that case.
    pub async fn get_or_try_compute<F, Fut, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }
        let value = compute().await?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, (V, Instant)>> {
        // Entries are plain data; a panic mid-insert cannot leave them torn.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
