use crate::{
    db::{BatchOp, DbAccess, DbWriteBatch},
    errors::StoreResult,
};
use parking_lot::{Mutex, RwLock};
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Bounded cache evicting the least recently used entry once full.
/// A zero capacity disables caching.
pub struct LruCache<K: Hash + Eq, V> {
    cache: Option<Mutex<lru::LruCache<K, V>>>,
}

impl<K: Hash + Eq, V: Clone> LruCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self { cache: NonZeroUsize::new(capacity).map(|capacity| Mutex::new(lru::LruCache::new(capacity))) }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.cache.as_ref()?.lock().get(key).cloned()
    }

    pub fn insert(&self, key: K, value: V) {
        if let Some(cache) = &self.cache {
            cache.lock().put(key, value);
        }
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.cache.as_ref()?.lock().pop(key)
    }

    pub fn len(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.lock().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

type CacheKey = (&'static str, Vec<u8>);

/// Write-through cache in front of a committed backend. Reads fill the cache;
/// committed batches update it, so it never serves a stale value.
pub struct CachedDbAccess {
    inner: Arc<dyn DbAccess>,
    cache: LruCache<CacheKey, Vec<u8>>,
    // Held for reading while a miss fills the cache and for writing while a batch commits
    fill_lock: RwLock<()>,
}

impl CachedDbAccess {
    pub fn new(inner: Arc<dyn DbAccess>, capacity: usize) -> Self {
        Self { inner, cache: LruCache::new(capacity), fill_lock: RwLock::new(()) }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl DbAccess for CachedDbAccess {
    fn get(&self, store: &'static str, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        let cache_key = (store, key.to_vec());
        if let Some(value) = self.cache.get(&cache_key) {
            return Ok(Some(value));
        }
        let _fill = self.fill_lock.read();
        let value = self.inner.get(store, key)?;
        if let Some(value) = &value {
            self.cache.insert(cache_key, value.clone());
        }
        Ok(value)
    }

    fn write_batch(&self, batch: DbWriteBatch) -> StoreResult<()> {
        let _commit = self.fill_lock.write();
        self.inner.write_batch(batch.clone())?;
        for op in batch {
            match op {
                BatchOp::Put { store, key, value } => self.cache.insert((store, key), value),
                BatchOp::Delete { store, key } => {
                    self.cache.remove(&(store, key));
                }
            }
        }
        Ok(())
    }
}
