//! Resolution memoization
//!
//! An LRU memo of `(path, basepath, current_uri) -> resolved` lookups with
//! hit/miss statistics. One memo is shared per router mount and consulted by
//! the in-context resolver; the mount clears it whenever the active route
//! changes so a stale anchor can never be served.

use crate::trace_log;
use lru::LruCache;
use std::num::NonZeroUsize;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ResolveKey {
    path: String,
    basepath: String,
    current_uri: String,
}

/// Memo performance statistics.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub invalidations: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU memo for resolved link targets.
///
/// Default capacity: 256 entries.
#[derive(Debug)]
pub struct ResolveCache {
    entries: LruCache<ResolveKey, String>,
    stats: CacheStats,
}

impl ResolveCache {
    const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).expect("Cache capacity must be non-zero");
        Self {
            entries: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    /// Look up a memoized resolution.
    pub fn get(&mut self, path: &str, basepath: &str, current_uri: &str) -> Option<String> {
        let key = ResolveKey {
            path: path.to_string(),
            basepath: basepath.to_string(),
            current_uri: current_uri.to_string(),
        };
        if let Some(resolved) = self.entries.get(&key) {
            self.stats.hits += 1;
            trace_log!("resolve cache hit for '{}'", path);
            Some(resolved.clone())
        } else {
            self.stats.misses += 1;
            trace_log!("resolve cache miss for '{}'", path);
            None
        }
    }

    /// Memoize a resolution.
    pub fn put(&mut self, path: &str, basepath: &str, current_uri: &str, resolved: String) {
        let key = ResolveKey {
            path: path.to_string(),
            basepath: basepath.to_string(),
            current_uri: current_uri.to_string(),
        };
        self.entries.push(key, resolved);
    }

    /// Drop all entries. Called when the surrounding route context changes.
    pub fn clear(&mut self) {
        trace_log!("clearing resolve cache");
        self.entries.clear();
        self.stats.invalidations += 1;
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResolveCache {
    fn default() -> Self {
        Self::new()
    }
}
