//! Memoization of resolver results.
//!
//! Keys are the sorted slot contents plus the enabled modes, so permuted
//! selections share an entry. The cache is a pure optimization: entries can
//! be dropped at any time without changing results.

use ahash::AHashMap;
use crockpot_common::{GameModes, IngredientId};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use crate::resolver::MatchResult;
use crate::selection::Selection;

/// Default number of cached results.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    ingredients: Vec<IngredientId>,
    modes: GameModes,
}

impl CacheKey {
    fn new(selection: &Selection, modes: GameModes) -> Self {
        Self {
            ingredients: selection.canonical(),
            modes,
        }
    }
}

/// Cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to compute.
    pub misses: u64,
    /// Times the cache was emptied because it was full.
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of lookups that hit.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    entries: AHashMap<CacheKey, MatchResult>,
    stats: CacheStats,
}

/// Thread-safe cache of [`MatchResult`]s.
#[derive(Debug)]
pub struct MatchCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl Default for MatchCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl MatchCache {
    /// Creates a cache holding at most `capacity` results. Zero disables
    /// storage.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Returns the cached result or computes and stores it.
    ///
    /// The lock is not held while `compute` runs. Errors are not cached.
    pub fn get_or_try_insert<E>(
        &self,
        selection: &Selection,
        modes: GameModes,
        compute: impl FnOnce() -> Result<MatchResult, E>,
    ) -> Result<MatchResult, E> {
        let key = CacheKey::new(selection, modes);
        {
            let mut inner = self.inner.lock();
            if let Some(hit) = inner.entries.get(&key).cloned() {
                inner.stats.hits += 1;
                return Ok(hit);
            }
            inner.stats.misses += 1;
        }

        let result = compute()?;
        if self.capacity > 0 {
            let mut inner = self.inner.lock();
            if inner.entries.len() >= self.capacity {
                debug!("Match cache full ({} entries), clearing", inner.entries.len());
                inner.entries.clear();
                inner.stats.evictions += 1;
            }
            inner.entries.insert(key, result.clone());
        }
        Ok(result)
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats
    }

    /// Number of cached results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of cached results.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every entry. Counters are kept.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }
}
