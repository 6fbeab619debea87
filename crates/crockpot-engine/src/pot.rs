//! The crock pot facade shared by frontends.

use crockpot_common::{GameModes, RecipeId, SelectionResult};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::cache::{CacheStats, MatchCache};
use crate::catalog::Catalog;
use crate::resolver::{resolve, MatchResult};
use crate::search::{search, SearchOptions, SearchReport};
use crate::selection::{DiscoveredPool, Selection};
use crate::suggest::{suggest, Suggestion};

/// A loaded catalog plus the per-process memo cache.
///
/// Every query takes its inputs explicitly, so one `CrockPot` can be shared
/// between threads.
#[derive(Debug, Clone)]
pub struct CrockPot {
    catalog: Arc<Catalog>,
    cache: Option<Arc<MatchCache>>,
    search_options: SearchOptions,
}

impl CrockPot {
    /// Creates a pot without a cache.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            cache: None,
            search_options: SearchOptions::default(),
        }
    }

    /// Caches up to `capacity` resolver results.
    #[must_use]
    pub fn with_cache(mut self, capacity: usize) -> Self {
        self.cache = Some(Arc::new(MatchCache::new(capacity)));
        self
    }

    /// Sets the search bounds.
    #[must_use]
    pub fn with_search_options(mut self, options: SearchOptions) -> Self {
        self.search_options = options;
        self
    }

    /// The catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The search bounds.
    #[must_use]
    pub fn search_options(&self) -> &SearchOptions {
        &self.search_options
    }

    /// Resolves a selection, using the cache when enabled.
    pub fn resolve(&self, selection: &Selection, modes: GameModes) -> SelectionResult<MatchResult> {
        match &self.cache {
            Some(cache) => cache.get_or_try_insert(selection, modes, || {
                resolve(&self.catalog, selection, modes)
            }),
            None => resolve(&self.catalog, selection, modes),
        }
    }

    /// Suggests single additions that complete near-miss recipes.
    pub fn suggest(&self, selection: &Selection, modes: GameModes) -> SelectionResult<Vec<Suggestion>> {
        suggest(&self.catalog, selection, modes)
    }

    /// Finds a combination for every recipe reachable from the pool.
    pub fn search(
        &self,
        pool: &DiscoveredPool,
        modes: GameModes,
        excluded: &BTreeSet<RecipeId>,
    ) -> SelectionResult<SearchReport> {
        search(&self.catalog, pool, modes, excluded, &self.search_options)
    }

    /// Cache counters, if caching is enabled.
    #[must_use]
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| cache.stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Ingredient, Recipe};
    use crate::requirement::Requirement;
    use crockpot_common::Tag;

    fn pot() -> CrockPot {
        let catalog = Catalog::new(
            vec![
                Ingredient::new("meat", "Meat", &[Tag::Meat]),
                Ingredient::new("carrot", "Carrot", &[Tag::Veggie]),
            ],
            vec![Recipe::new("meatballs", "Meatballs", -1, Requirement::at_least(Tag::Meat, 1))],
            Recipe::new("wetgoop", "Wet Goop", i32::MIN, Requirement::any(Vec::new())),
        )
        .expect("catalog");
        CrockPot::new(Arc::new(catalog)).with_cache(16)
    }

    #[test]
    fn test_cached_resolve() {
        let pot = pot();
        let selection = Selection::from_ids(["carrot", "meat"]).expect("sel");
        let first = pot.resolve(&selection, GameModes::default()).expect("resolve");
        let second = pot.resolve(&selection, GameModes::default()).expect("resolve");
        assert_eq!(first, second);
        assert_eq!(first.winner.as_str(), "meatballs");

        let stats = pot.cache_stats().expect("cache enabled");
        assert_eq!((stats.hits, stats.misses), (1, 1));
    }

    #[test]
    fn test_pot_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CrockPot>();

        let pot = pot();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pot = pot.clone();
                std::thread::spawn(move || {
                    let selection = Selection::from_ids(["meat"]).expect("sel");
                    pot.resolve(&selection, GameModes::default())
                        .expect("resolve")
                        .winner
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread").as_str(), "meatballs");
        }
    }

    #[test]
    fn test_search_and_suggest_delegate() {
        let pot = pot();
        let pool: DiscoveredPool = ["meat"].into_iter().collect();
        let report = pot.search(&pool, GameModes::default(), &BTreeSet::new()).expect("search");
        assert!(report.combination_for("meatballs").is_some());

        let suggestions = pot
            .suggest(&Selection::from_ids(["carrot"]).expect("sel"), GameModes::default())
            .expect("suggest");
        assert_eq!(suggestions[0].target.link(), "tag:meat");
    }
}
