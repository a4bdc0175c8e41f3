// Chunk: docs/chunks/word_suggestions - Bounded prefix cache

//! Bounded cache from lowercased prefix to merged candidates.
//!
//! Eviction is least-recently-used. A capacity of zero disables caching.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

/// Default number of cached prefixes.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// LRU map of prefix to candidate list.
#[derive(Debug)]
pub struct PrefixCache {
    entries: Option<LruCache<String, Arc<[String]>>>,
    hits: u64,
    misses: u64,
}

impl PrefixCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity).map(LruCache::new),
            hits: 0,
            misses: 0,
        }
    }

    /// Looks up `prefix`, marking it most recently used.
    pub fn get(&mut self, prefix: &str) -> Option<Arc<[String]>> {
        let found = self.entries.as_mut().and_then(|entries| entries.get(prefix).cloned());
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Stores `candidates` for `prefix`, evicting the least recently used
    /// entry when full.
    pub fn insert(&mut self, prefix: String, candidates: Arc<[String]>) {
        if let Some(entries) = self.entries.as_mut() {
            entries.put(prefix, candidates);
        }
    }

    pub fn clear(&mut self) {
        if let Some(entries) = self.entries.as_mut() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, LruCache::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.entries.as_ref().map_or(0, |entries| entries.cap().get())
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

impl Default for PrefixCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(words: &[&str]) -> Arc<[String]> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_hit_and_miss() {
        let mut cache = PrefixCache::new(2);
        assert!(cache.get("ap").is_none());
        cache.insert("ap".into(), list(&["apple"]));
        assert_eq!(cache.get("ap").as_deref(), Some(&["apple".to_string()][..]));
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = PrefixCache::new(2);
        cache.insert("a".into(), list(&["a1"]));
        cache.insert("b".into(), list(&["b1"]));
        cache.get("a");
        cache.insert("c".into(), list(&["c1"]));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_zero_capacity_disables_cache() {
        let mut cache = PrefixCache::new(0);
        cache.insert("a".into(), list(&["a1"]));
        assert!(cache.get("a").is_none());
        assert_eq!(cache.capacity(), 0);
    }

    #[test]
    fn test_clear() {
        let mut cache = PrefixCache::default();
        cache.insert("a".into(), list(&["a1"]));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), DEFAULT_CACHE_CAPACITY);
    }
}
