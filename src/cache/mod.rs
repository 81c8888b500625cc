//! Memoization table for derived views.
//!
//! Owned by the application state and handed to handlers, never a global.
//! The catalog revision is part of every key, so entries built from an older
//! snapshot can never be served; `invalidate` additionally frees them on reload.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use lru::LruCache;
use serde::Serialize;

use crate::models::Platform;

/// Default number of cached views.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Identity of one derived view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewKey<S> {
    pub revision_id: i64,
    pub app_id: String,
    pub platform: Platform,
    pub selection: S,
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// LRU-bounded cache of views of type `V`, keyed by `ViewKey<S>`.
pub struct ViewCache<S, V> {
    entries: Mutex<LruCache<ViewKey<S>, Arc<V>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<S: Hash + Eq, V> ViewCache<S, V> {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(
            NonZeroUsize::new(DEFAULT_CACHE_CAPACITY)
                .expect("DEFAULT_CACHE_CAPACITY must be non-zero"),
        );
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<ViewKey<S>, Arc<V>>> {
        // A panic while holding the lock leaves the LRU structurally intact.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Return the cached view for `key`, building and storing it on a miss.
    pub fn get_or_insert_with(&self, key: ViewKey<S>, build: impl FnOnce() -> V) -> Arc<V> {
        if let Some(view) = self.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(view);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let view = Arc::new(build());
        self.lock().put(key, Arc::clone(&view));
        view
    }

    /// Drop every entry.
    pub fn invalidate(&self) {
        let mut entries = self.lock();
        let dropped = entries.len();
        entries.clear();
        tracing::debug!("View cache invalidated ({} entries dropped)", dropped);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.lock().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn key(revision_id: i64, selection: &str) -> ViewKey<String> {
        ViewKey {
            revision_id,
            app_id: "app".to_string(),
            platform: Platform::Mobile,
            selection: selection.to_string(),
        }
    }

    #[test]
    fn test_hit_after_miss() {
        let cache: ViewCache<String, Vec<u32>> = ViewCache::new(4);
        let builds = Cell::new(0);

        let first = cache.get_or_insert_with(key(1, "all"), || {
            builds.set(builds.get() + 1);
            vec![1, 2, 3]
        });
        let second = cache.get_or_insert_with(key(1, "all"), || {
            builds.set(builds.get() + 1);
            vec![9]
        });

        assert_eq!(builds.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.entries), (1, 1, 1));
    }

    #[test]
    fn test_revision_is_part_of_key() {
        let cache: ViewCache<String, u32> = ViewCache::new(4);
        cache.get_or_insert_with(key(1, "all"), || 1);
        let fresh = cache.get_or_insert_with(key(2, "all"), || 2);
        assert_eq!(*fresh, 2);
    }

    #[test]
    fn test_invalidate_clears_entries() {
        let cache: ViewCache<String, u32> = ViewCache::new(4);
        cache.get_or_insert_with(key(1, "all"), || 1);
        cache.invalidate();
        assert_eq!(cache.stats().entries, 0);
        let rebuilt = cache.get_or_insert_with(key(1, "all"), || 7);
        assert_eq!(*rebuilt, 7);
    }

    #[test]
    fn test_capacity_bound_evicts_least_recent() {
        let cache: ViewCache<String, u32> = ViewCache::new(2);
        cache.get_or_insert_with(key(1, "a"), || 1);
        cache.get_or_insert_with(key(1, "b"), || 2);
        cache.get_or_insert_with(key(1, "a"), || 0);
        cache.get_or_insert_with(key(1, "c"), || 3);

        assert_eq!(cache.stats().entries, 2);
        assert_eq!(*cache.get_or_insert_with(key(1, "a"), || 0), 1);
        assert_eq!(*cache.get_or_insert_with(key(1, "b"), || 20), 20);
    }

    #[test]
    fn test_zero_capacity_falls_back_to_default() {
        let cache: ViewCache<String, u32> = ViewCache::new(0);
        assert_eq!(*cache.get_or_insert_with(key(1, "a"), || 5), 5);
    }
}
