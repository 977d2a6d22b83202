use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::models::Dataset;

use super::CacheKey;

/// Volatile in-process cache tier.
///
/// Shared between the orchestrator and whatever reports memory pressure, so
/// every operation takes `&self`. A writer that panicked while holding the
/// lock leaves a fully written map behind (all writes are single inserts or
/// a clear), so a poisoned lock is recovered rather than propagated.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<CacheKey, Dataset>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<CacheKey, Dataset>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<CacheKey, Dataset>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, key: &CacheKey) -> Option<Dataset> {
        self.read().get(key).cloned()
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn put(&self, key: &CacheKey, value: Dataset) {
        self.write().insert(key.clone(), value);
    }

    pub fn remove(&self, key: &CacheKey) -> Option<Dataset> {
        self.write().remove(key)
    }

    /// Drop every entry. Called on memory pressure.
    pub fn clear(&self) {
        let mut entries = self.write();
        debug!(entries = entries.len(), "Clearing memory cache");
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::models::Launch;

    fn launch(id: i64, name: &str) -> Launch {
        Launch {
            id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_get_missing_is_none() {
        let cache = MemoryCache::new();
        assert!(cache.get(&CacheKey::top_launches()).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_overwrites() {
        let cache = MemoryCache::new();
        let key = CacheKey::top_launches();
        cache.put(&key, vec![launch(1, "first")]);
        cache.put(&key, vec![launch(2, "second"), launch(3, "third")]);

        let stored = cache.get(&key).expect("entry should exist");
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_and_remove() {
        let cache = MemoryCache::new();
        cache.put(&CacheKey::new("a"), vec![launch(1, "a")]);
        cache.put(&CacheKey::new("b"), vec![launch(2, "b")]);

        assert!(cache.remove(&CacheKey::new("a")).is_some());
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&CacheKey::new("b")).is_none());
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(MemoryCache::new());
        let key = CacheKey::top_launches();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                let key = key.clone();
                thread::spawn(move || {
                    for n in 0..200 {
                        match (i + n) % 3 {
                            0 => cache.put(&key, vec![launch(n, "x")]),
                            1 => {
                                let _ = cache.get(&key);
                            }
                            _ => cache.clear(),
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("worker thread panicked");
        }

        // Whatever interleaving happened, the map is still usable
        cache.put(&key, vec![launch(7, "final")]);
        assert_eq!(cache.get(&key).map(|d| d[0].id), Some(7));
    }
}
