//! Efficient recipe search over a discovered ingredient pool.
//!
//! Enumerating every multiset of four ingredients from a pool of a hundred or
//! more is not tractable, so each recipe is built constructively instead:
//!
//! 1. The requirement is flattened into disjunctive branches, each a list of
//!    count clauses that must all hold.
//! 2. For each branch, ingredients are picked greedily until every positive
//!    clause is met, never exceeding the caps of `at_most`, `exactly` and
//!    `none` clauses.
//! 3. The pot is padded with fillers that keep the recipe winning.
//! 4. The result is verified against the full requirement and the resolver.
//!    When another recipe wins instead, the branch is rebuilt with each pick
//!    banned once, then with the picks the rival relies on banned for good,
//!    until the branch runs out of candidates.
//! 5. Recipes still missing from a small pool are looked up in a full
//!    enumeration of its multisets.
//!
//! Every scan walks ingredients in catalog declaration order, so the same
//! inputs always produce the same combinations.

use crockpot_common::{
    GameModes, IngredientId, RecipeId, SelectionError, SelectionResult, Tag,
};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::collections::BTreeSet;
use tracing::debug;

use crate::catalog::{Catalog, Ingredient, Recipe};
use crate::evaluator::{evaluate, Counts};
use crate::requirement::{Comparator, Requirement};
use crate::resolver::resolve_counts;
use crate::selection::{DiscoveredPool, POT_SLOTS};

/// Work bounds for [`search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Disjunctive branches tried per recipe.
    pub max_branches: usize,
    /// Candidates scanned per clause.
    pub max_candidates_per_clause: usize,
    /// Fill every slot when a filler keeps the recipe winning.
    pub pad_to_full_pot: bool,
    /// Pools of at most this many usable ingredients are enumerated in full
    /// for recipes the construction misses (0 = never).
    pub exhaustive_pool_limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_branches: 64,
            max_candidates_per_clause: 256,
            pad_to_full_pot: true,
            exhaustive_pool_limit: 12,
        }
    }
}

/// A recipe and a pot that produces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    /// The recipe produced.
    pub recipe: RecipeId,
    /// Up to four ingredients, repeats allowed, in catalog order.
    pub ingredients: Vec<IngredientId>,
}

/// Result of a search.
///
/// Excluded recipes keep their combinations, so excluding and including
/// again never requires another search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    reachable: Vec<Combination>,
    excluded: BTreeSet<RecipeId>,
    unreachable: Vec<RecipeId>,
}

impl SearchReport {
    /// Reachable recipes that are not excluded, in catalog order.
    pub fn covering(&self) -> impl Iterator<Item = &Combination> {
        self.reachable
            .iter()
            .filter(|c| !self.excluded.contains(&c.recipe))
    }

    /// Every reachable recipe, excluded ones included.
    #[must_use]
    pub fn reachable(&self) -> &[Combination] {
        &self.reachable
    }

    /// Reachable recipes withheld from [`Self::covering`].
    pub fn excluded(&self) -> impl Iterator<Item = &Combination> {
        self.reachable
            .iter()
            .filter(|c| self.excluded.contains(&c.recipe))
    }

    /// Enabled recipes no combination from the pool produces.
    #[must_use]
    pub fn unreachable(&self) -> &[RecipeId] {
        &self.unreachable
    }

    /// The combination found for a recipe, excluded or not.
    #[must_use]
    pub fn combination_for(&self, recipe: &str) -> Option<&[IngredientId]> {
        self.reachable
            .iter()
            .find(|c| c.recipe.as_str() == recipe)
            .map(|c| c.ingredients.as_slice())
    }

    /// Withholds a recipe. Returns `false` if it was already excluded.
    pub fn exclude(&mut self, recipe: impl Into<RecipeId>) -> bool {
        self.excluded.insert(recipe.into())
    }

    /// Restores a recipe. Returns `false` if it was not excluded.
    pub fn include(&mut self, recipe: &str) -> bool {
        self.excluded.remove(recipe)
    }

    /// Flips a recipe between excluded and included.
    pub fn toggle(&mut self, recipe: impl Into<RecipeId>) {
        let recipe = recipe.into();
        if !self.excluded.remove(&recipe) {
            self.excluded.insert(recipe);
        }
    }

    /// Checks whether a recipe is excluded.
    #[must_use]
    pub fn is_excluded(&self, recipe: &str) -> bool {
        self.excluded.contains(recipe)
    }

    /// Ingredients used by the covering combinations.
    #[must_use]
    pub fn ingredients_used(&self) -> BTreeSet<&IngredientId> {
        self.covering().flat_map(|c| c.ingredients.iter()).collect()
    }
}

/// Finds a combination for every enabled recipe reachable from `pool`.
///
/// Pool ingredients that are uncookable or belong to a disabled mode are
/// ignored. Recipes of disabled modes are left out of the report entirely.
pub fn search(
    catalog: &Catalog,
    pool: &DiscoveredPool,
    modes: GameModes,
    excluded: &BTreeSet<RecipeId>,
    options: &SearchOptions,
) -> SelectionResult<SearchReport> {
    let ingredients = catalog.ingredients();
    let mut candidates = Vec::with_capacity(pool.len());
    for id in pool.iter() {
        let index = ingredients
            .index_of(id.as_str())
            .ok_or_else(|| SelectionError::UnknownIngredient(id.clone()))?;
        if let Some(ingredient) = ingredients.by_index(index) {
            if ingredient.is_available(modes) {
                candidates.push(Candidate { index, ingredient });
            }
        }
    }
    candidates.sort_by_key(|c| c.index);

    let builder = Builder {
        catalog,
        modes,
        candidates,
        options,
        enumerated: OnceCell::new(),
    };

    let mut report = SearchReport {
        excluded: excluded.clone(),
        ..SearchReport::default()
    };
    for (_, recipe) in catalog.recipes().enabled(modes) {
        match builder.build(recipe) {
            Some(picked) => report.reachable.push(Combination {
                recipe: recipe.id.clone(),
                ingredients: picked.iter().map(|c| c.ingredient.id.clone()).collect(),
            }),
            None => {
                debug!("No combination in pool for {}", recipe.id);
                report.unreachable.push(recipe.id.clone());
            },
        }
    }

    debug!(
        "Searched {} pool ingredients: {} reachable, {} unreachable",
        pool.len(),
        report.reachable.len(),
        report.unreachable.len()
    );
    Ok(report)
}

// ============================================================================
// Clauses
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Subject<'a> {
    Tag(Tag),
    Ingredients(&'a [IngredientId]),
}

/// A count leaf of a requirement.
#[derive(Debug, Clone, Copy)]
struct Clause<'a> {
    subject: Subject<'a>,
    cmp: Comparator,
    threshold: u8,
}

impl Clause<'_> {
    fn count(&self, counts: &Counts) -> u8 {
        match self.subject {
            Subject::Tag(tag) => counts.tag(tag),
            Subject::Ingredients(ids) => counts.any_of(ids),
        }
    }

    fn matches(&self, ingredient: &Ingredient) -> bool {
        match self.subject {
            Subject::Tag(tag) => ingredient.has_tag(tag),
            Subject::Ingredients(ids) => ids.contains(&ingredient.id),
        }
    }

    fn unmet(&self, counts: &Counts) -> bool {
        self.count(counts) < self.cmp.floor(self.threshold)
    }

    fn within_cap(&self, counts: &Counts) -> bool {
        self.cmp
            .cap(self.threshold)
            .map_or(true, |cap| self.count(counts) <= cap)
    }

    /// Named ingredients first, then the larger requirements.
    fn urgency(&self) -> (bool, std::cmp::Reverse<u8>) {
        (
            matches!(self.subject, Subject::Tag(_)),
            std::cmp::Reverse(self.cmp.floor(self.threshold)),
        )
    }
}

/// Flattens a requirement into at most `limit` conjunctive branches.
fn branches(requirement: &Requirement, limit: usize) -> Vec<Vec<Clause<'_>>> {
    match requirement {
        Requirement::TagCount {
            tag,
            cmp,
            threshold,
        } => vec![vec![Clause {
            subject: Subject::Tag(*tag),
            cmp: *cmp,
            threshold: *threshold,
        }]],
        Requirement::IngredientCount {
            ingredients,
            cmp,
            threshold,
        } => vec![vec![Clause {
            subject: Subject::Ingredients(ingredients),
            cmp: *cmp,
            threshold: *threshold,
        }]],
        Requirement::Or { any } => {
            let mut out = Vec::new();
            for child in any {
                out.extend(branches(child, limit));
                if out.len() >= limit {
                    out.truncate(limit);
                    break;
                }
            }
            out
        },
        Requirement::And { all } => {
            let mut out = vec![Vec::new()];
            for child in all {
                let child_branches = branches(child, limit);
                let mut next = Vec::new();
                'product: for prefix in &out {
                    for branch in &child_branches {
                        let mut combined = prefix.clone();
                        combined.extend(branch.iter().copied());
                        next.push(combined);
                        if next.len() >= limit {
                            break 'product;
                        }
                    }
                }
                out = next;
            }
            out
        },
    }
}

// ============================================================================
// Construction
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    index: usize,
    ingredient: &'a Ingredient,
}

struct Builder<'a> {
    catalog: &'a Catalog,
    modes: GameModes,
    candidates: Vec<Candidate<'a>>,
    options: &'a SearchOptions,
    enumerated: OnceCell<AHashMap<RecipeId, Vec<Candidate<'a>>>>,
}

impl<'a> Builder<'a> {
    /// Finds a verified combination for one recipe.
    fn build(&self, recipe: &Recipe) -> Option<Vec<Candidate<'a>>> {
        for clauses in branches(&recipe.requirement, self.options.max_branches) {
            if let Some(picked) = self.build_branch(recipe, &clauses) {
                return Some(picked);
            }
        }
        self.enumerated_for(recipe)
    }

    /// Rebuilds one branch with a growing ban list until the recipe wins or
    /// the branch runs out of candidates.
    fn build_branch(&self, recipe: &Recipe, clauses: &[Clause<'_>]) -> Option<Vec<Candidate<'a>>> {
        let mut banned = BTreeSet::new();
        while banned.len() <= self.options.max_candidates_per_clause {
            let (core, padded) = self.attempt(recipe, clauses, &banned)?;
            if self.wins(recipe, &padded) {
                return Some(padded);
            }

            // Another recipe interfered. Try without each pick once.
            let mut distinct: Vec<usize> = core.iter().map(|c| c.index).collect();
            distinct.dedup();
            for index in &distinct {
                let mut trial = banned.clone();
                trial.insert(*index);
                if let Some((_, picked)) = self.attempt(recipe, clauses, &trial) {
                    if self.wins(recipe, &picked) {
                        return Some(picked);
                    }
                }
            }

            // Then ban for good whatever fed the rival, or the whole core.
            let mut culprits = self.culprits(&core);
            if culprits.is_empty() {
                culprits = distinct;
            }
            if culprits.is_empty() {
                return None;
            }
            banned.extend(culprits);
        }
        None
    }

    /// Core picks the interfering winner relies on. Ingredients it names come
    /// first; its positive tags are used only when it names none of the picks.
    fn culprits(&self, core: &[Candidate<'_>]) -> Vec<usize> {
        let winner = resolve_counts(self.catalog, &counts_of(core), self.modes).winner;
        let Some(rival) = self.catalog.recipes().get(winner.as_str()) else {
            return Vec::new();
        };

        let named = rival.requirement.referenced_ingredients();
        let mut out: Vec<usize> = core
            .iter()
            .filter(|c| named.contains(&&c.ingredient.id))
            .map(|c| c.index)
            .collect();
        if out.is_empty() {
            let tags = rival.requirement.positive_tags();
            out = core
                .iter()
                .filter(|c| tags.iter().any(|tag| c.ingredient.has_tag(*tag)))
                .map(|c| c.index)
                .collect();
        }
        out.dedup();
        debug!("Pot of {} loses to {winner}, banning {} picks", core.len(), out.len());
        out
    }

    /// Greedy construction plus padding. Returns the constructed core and the
    /// padded pot, both sorted by catalog index.
    fn attempt(
        &self,
        recipe: &Recipe,
        clauses: &[Clause<'_>],
        banned: &BTreeSet<usize>,
    ) -> Option<(Vec<Candidate<'a>>, Vec<Candidate<'a>>)> {
        let mut core = self.construct(clauses, banned)?;
        core.sort_by_key(|c| c.index);
        let mut padded = core.clone();
        self.pad(recipe, &mut padded, banned);
        padded.sort_by_key(|c| c.index);
        Some((core, padded))
    }

    fn construct(&self, clauses: &[Clause<'_>], banned: &BTreeSet<usize>) -> Option<Vec<Candidate<'a>>> {
        let mut picked: Vec<Candidate<'a>> = Vec::with_capacity(POT_SLOTS);
        loop {
            let counts = counts_of(&picked);
            let mut unmet: Vec<&Clause<'_>> = clauses.iter().filter(|c| c.unmet(&counts)).collect();
            if unmet.is_empty() {
                return Some(picked);
            }
            if picked.len() == POT_SLOTS {
                return None;
            }
            unmet.sort_by_key(|c| c.urgency());
            let target = unmet[0];

            let best = self
                .candidates
                .iter()
                .filter(|c| !banned.contains(&c.index) && target.matches(c.ingredient))
                .take(self.options.max_candidates_per_clause)
                .filter(|c| {
                    let after = counts.with(c.ingredient);
                    clauses.iter().all(|clause| clause.within_cap(&after))
                })
                .map(|c| {
                    let covered = unmet.iter().filter(|u| u.matches(c.ingredient)).count();
                    (covered, *c)
                })
                // First maximum wins ties, keeping declaration order.
                .fold(None, |best: Option<(usize, Candidate<'a>)>, (covered, c)| match best {
                    Some((top, _)) if top >= covered => best,
                    _ => Some((covered, c)),
                })?;
            picked.push(best.1);
        }
    }

    /// Adds fillers while each one keeps the recipe winning. Without
    /// `pad_to_full_pot` this only runs until the recipe first wins.
    fn pad(&self, recipe: &Recipe, picked: &mut Vec<Candidate<'a>>, banned: &BTreeSet<usize>) {
        while picked.len() < POT_SLOTS {
            if !self.options.pad_to_full_pot && self.wins(recipe, picked) {
                return;
            }
            let filler = self
                .candidates
                .iter()
                .filter(|c| !banned.contains(&c.index))
                .take(self.options.max_candidates_per_clause)
                .find(|c| {
                    let mut trial = picked.clone();
                    trial.push(**c);
                    self.wins(recipe, &trial)
                });
            match filler {
                Some(filler) => picked.push(*filler),
                None => return,
            }
        }
    }

    /// Checks that the recipe holds and is the dish the pot produces.
    fn wins(&self, recipe: &Recipe, picked: &[Candidate<'_>]) -> bool {
        let counts = counts_of(picked);
        evaluate(&recipe.requirement, &counts)
            && resolve_counts(self.catalog, &counts, self.modes).winner == recipe.id
    }

    /// Looks the recipe up in a full enumeration of the pool, when the pool
    /// is small enough.
    fn enumerated_for(&self, recipe: &Recipe) -> Option<Vec<Candidate<'a>>> {
        if self.candidates.len() > self.options.exhaustive_pool_limit {
            return None;
        }
        self.enumerated
            .get_or_init(|| self.enumerate())
            .get(&recipe.id)
            .cloned()
    }

    /// The first pot found for every dish the pool can produce. Full pots are
    /// visited first when padding is on.
    fn enumerate(&self) -> AHashMap<RecipeId, Vec<Candidate<'a>>> {
        let mut found = AHashMap::new();
        let n = self.candidates.len();
        if n == 0 {
            return found;
        }

        let mut sizes: Vec<usize> = (1..=POT_SLOTS).collect();
        if self.options.pad_to_full_pot {
            sizes.reverse();
        }
        let mut visited = 0usize;
        for size in sizes {
            let mut slots = vec![0; size];
            loop {
                let picked: Vec<Candidate<'a>> = slots.iter().map(|&i| self.candidates[i]).collect();
                let winner = resolve_counts(self.catalog, &counts_of(&picked), self.modes).winner;
                found.entry(winner).or_insert(picked);
                visited += 1;
                if !next_multiset(&mut slots, n) {
                    break;
                }
            }
        }
        debug!("Enumerated {visited} pots from {n} pool ingredients: {} dishes", found.len());
        found
    }
}

/// Advances a non-decreasing index sequence to the next multiset over `0..n`.
fn next_multiset(slots: &mut [usize], n: usize) -> bool {
    for pos in (0..slots.len()).rev() {
        if slots[pos] + 1 < n {
            let value = slots[pos] + 1;
            for slot in &mut slots[pos..] {
                *slot = value;
            }
            return true;
        }
    }
    false
}

fn counts_of(picked: &[Candidate<'_>]) -> Counts {
    Counts::from_ingredients(picked.iter().map(|c| c.ingredient))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crockpot_common::GameMode;

    fn catalog() -> Catalog {
        let ingredients = vec![
            Ingredient::new("carrot", "Carrot", &[Tag::Veggie]),
            Ingredient::new("berries", "Berries", &[Tag::Fruit]),
            Ingredient::new("meat", "Meat", &[Tag::Meat]),
            Ingredient::new("bird_egg", "Egg", &[Tag::Egg]),
            Ingredient::new("roe", "Roe", &[Tag::Fish]).with_mode(GameMode::Shipwrecked),
            Ingredient::new("roe_cooked", "Cooked Roe", &[Tag::Fish])
                .with_mode(GameMode::Shipwrecked),
            Ingredient::new("honey", "Honey", &[Tag::Sweetener]),
            Ingredient::new("twigs", "Twigs", &[Tag::Inedible]),
            Ingredient::new("petals", "Petals", &[Tag::Veggie]).uncookable(),
        ];
        let recipes = vec![
            Recipe::new(
                "baconeggs",
                "Bacon and Eggs",
                10,
                Requirement::all(vec![
                    Requirement::at_least(Tag::Egg, 1),
                    Requirement::at_least(Tag::Meat, 1),
                    Requirement::no(Tag::Veggie),
                ]),
            ),
            Recipe::new(
                "caviar",
                "Caviar",
                20,
                Requirement::all(vec![
                    Requirement::ingredients(["roe", "roe_cooked"], Comparator::Exactly, 3),
                    Requirement::at_least(Tag::Veggie, 1),
                ]),
            )
            .with_mode(GameMode::Shipwrecked),
            Recipe::new(
                "taffy",
                "Taffy",
                10,
                Requirement::all(vec![
                    Requirement::at_least(Tag::Sweetener, 3),
                    Requirement::no(Tag::Meat),
                ]),
            ),
            Recipe::new(
                "meatballs",
                "Meatballs",
                -1,
                Requirement::all(vec![
                    Requirement::at_least(Tag::Meat, 1),
                    Requirement::tag(Tag::Inedible, Comparator::None, 0),
                ]),
            ),
            Recipe::new(
                "jammy",
                "Fist Full of Jam",
                0,
                Requirement::all(vec![
                    Requirement::at_least(Tag::Fruit, 1),
                    Requirement::no(Tag::Meat),
                    Requirement::no(Tag::Veggie),
                    Requirement::no(Tag::Inedible),
                ]),
            ),
        ];
        let fallback = Recipe::new("wetgoop", "Wet Goop", i32::MIN, Requirement::any(Vec::new()));
        Catalog::new(ingredients, recipes, fallback).expect("catalog")
    }

    fn full_pool() -> DiscoveredPool {
        ["carrot", "berries", "meat", "bird_egg", "roe", "roe_cooked", "honey", "twigs"]
            .into_iter()
            .collect()
    }

    fn run(pool: &DiscoveredPool, modes: GameModes) -> SearchReport {
        search(&catalog(), pool, modes, &BTreeSet::new(), &SearchOptions::default())
            .expect("search")
    }

    #[test]
    fn test_every_combination_wins_its_recipe() {
        let catalog = catalog();
        let report = run(&full_pool(), GameModes::default());
        for combination in report.covering() {
            let selection = crate::selection::Selection::from_ids(combination.ingredients.clone())
                .expect("fits the pot");
            let result = crate::resolver::resolve(&catalog, &selection, GameModes::default())
                .expect("resolve");
            assert_eq!(result.winner, combination.recipe);
        }
        let found: Vec<&str> = report.covering().map(|c| c.recipe.as_str()).collect();
        assert_eq!(found, vec!["baconeggs", "caviar", "taffy", "meatballs", "jammy"]);
    }

    #[test]
    fn test_pads_to_full_pot() {
        let report = run(&full_pool(), GameModes::default());
        let caviar = report.combination_for("caviar").expect("caviar");
        assert_eq!(caviar.len(), POT_SLOTS);
        let taffy = report.combination_for("taffy").expect("taffy");
        assert_eq!(taffy.len(), POT_SLOTS);
    }

    #[test]
    fn test_no_padding_keeps_minimal_combination() {
        let options = SearchOptions {
            pad_to_full_pot: false,
            ..SearchOptions::default()
        };
        let report = search(&catalog(), &full_pool(), GameModes::default(), &BTreeSet::new(), &options)
            .expect("search");
        let ids: Vec<&str> = report
            .combination_for("baconeggs")
            .expect("baconeggs")
            .iter()
            .map(IngredientId::as_str)
            .collect();
        assert_eq!(ids, vec!["meat", "bird_egg"]);
    }

    #[test]
    fn test_unreachable_recipes_reported() {
        let pool: DiscoveredPool = ["meat", "twigs"].into_iter().collect();
        let report = run(&pool, GameModes::default());
        let found: Vec<&str> = report.covering().map(|c| c.recipe.as_str()).collect();
        assert_eq!(found, vec!["meatballs"]);
        let unreachable: Vec<&str> = report.unreachable().iter().map(RecipeId::as_str).collect();
        assert_eq!(unreachable, vec!["baconeggs", "caviar", "taffy", "jammy"]);
    }

    #[test]
    fn test_disabled_modes_skip_recipes_and_ingredients() {
        let report = run(&full_pool(), GameModes::preset(GameMode::Vanilla));
        assert!(report.combination_for("caviar").is_none());
        assert!(!report.unreachable().iter().any(|id| id.as_str() == "caviar"));
        assert!(!report
            .ingredients_used()
            .iter()
            .any(|id| id.as_str().starts_with("roe")));
    }

    #[test]
    fn test_uncookable_pool_entries_ignored() {
        let pool: DiscoveredPool = ["petals", "berries"].into_iter().collect();
        let report = run(&pool, GameModes::default());
        let jammy = report.combination_for("jammy").expect("jammy");
        assert!(jammy.iter().all(|id| id.as_str() == "berries"));
    }

    #[test]
    fn test_unknown_pool_entry_rejected() {
        let pool: DiscoveredPool = ["meat", "unicorn"].into_iter().collect();
        let result = search(&catalog(), &pool, GameModes::default(), &BTreeSet::new(), &SearchOptions::default());
        assert_eq!(
            result,
            Err(SelectionError::UnknownIngredient("unicorn".into()))
        );
    }

    #[test]
    fn test_exclusion_round_trip() {
        let mut report = run(&full_pool(), GameModes::default());
        let before = report.clone();

        assert!(report.exclude("taffy"));
        assert!(report.is_excluded("taffy"));
        assert!(report.covering().all(|c| c.recipe.as_str() != "taffy"));
        assert_eq!(report.excluded().count(), 1);
        assert!(report.combination_for("taffy").is_some());

        assert!(report.include("taffy"));
        assert_eq!(report, before);

        report.toggle("caviar");
        report.toggle("caviar");
        assert_eq!(report, before);
    }

    #[test]
    fn test_excluded_recipes_still_searched() {
        let excluded: BTreeSet<RecipeId> = [RecipeId::new("meatballs")].into_iter().collect();
        let report = search(&catalog(), &full_pool(), GameModes::default(), &excluded, &SearchOptions::default())
            .expect("search");
        assert!(report.combination_for("meatballs").is_some());
        assert!(report.covering().all(|c| c.recipe.as_str() != "meatballs"));
    }

    #[test]
    fn test_search_is_deterministic() {
        let a = run(&full_pool(), GameModes::default());
        let b = run(&full_pool(), GameModes::default());
        assert_eq!(a, b);
    }

    fn rival_catalog() -> Catalog {
        let ingredients = vec![
            Ingredient::new("dragonfruit", "Dragon Fruit", &[Tag::Fruit]),
            Ingredient::new("dragonfruit_cooked", "Prepared Dragon Fruit", &[Tag::Fruit]),
            Ingredient::new("cave_banana_cooked", "Cooked Banana", &[Tag::Fruit]),
        ];
        let recipes = vec![
            Recipe::new(
                "dragonpie",
                "Dragonpie",
                1,
                Requirement::ingredients(
                    ["dragonfruit", "dragonfruit_cooked"],
                    Comparator::AtLeast,
                    1,
                ),
            ),
            Recipe::new("jammy", "Fist Full of Jam", 0, Requirement::at_least(Tag::Fruit, 1)),
        ];
        let fallback = Recipe::new("wetgoop", "Wet Goop", i32::MIN, Requirement::any(Vec::new()));
        Catalog::new(ingredients, recipes, fallback).expect("catalog")
    }

    #[test]
    fn test_bans_accumulate_past_substitutes() {
        let catalog = rival_catalog();
        let pool: DiscoveredPool = ["dragonfruit", "dragonfruit_cooked", "cave_banana_cooked"]
            .into_iter()
            .collect();
        let options = SearchOptions {
            exhaustive_pool_limit: 0,
            ..SearchOptions::default()
        };
        let report = search(&catalog, &pool, GameModes::default(), &BTreeSet::new(), &options)
            .expect("search");

        let jammy: Vec<&str> = report
            .combination_for("jammy")
            .expect("jammy")
            .iter()
            .map(IngredientId::as_str)
            .collect();
        assert_eq!(jammy, vec!["cave_banana_cooked"; POT_SLOTS]);
        assert!(report.unreachable().is_empty());
    }

    #[test]
    fn test_small_pool_enumeration_finds_what_construction_misses() {
        let ingredients = vec![Ingredient::new("berries", "Berries", &[Tag::Fruit])];
        let recipes = vec![
            Recipe::new(
                "snack",
                "Snack",
                5,
                Requirement::tag(Tag::Fruit, Comparator::AtMost, 2),
            ),
            Recipe::new("jammy", "Fist Full of Jam", 0, Requirement::at_least(Tag::Fruit, 1)),
        ];
        let fallback = Recipe::new("wetgoop", "Wet Goop", i32::MIN, Requirement::any(Vec::new()));
        let catalog = Catalog::new(ingredients, recipes, fallback).expect("catalog");
        let pool: DiscoveredPool = ["berries"].into_iter().collect();
        let modes = GameModes::default();

        // A single berry or two make a snack, and padding never gets past it.
        let options = SearchOptions {
            exhaustive_pool_limit: 0,
            ..SearchOptions::default()
        };
        let constructed = search(&catalog, &pool, modes, &BTreeSet::new(), &options).expect("search");
        assert!(constructed.combination_for("jammy").is_none());
        assert!(constructed.combination_for("snack").is_some());

        let report = search(&catalog, &pool, modes, &BTreeSet::new(), &SearchOptions::default())
            .expect("search");
        let jammy = report.combination_for("jammy").expect("jammy");
        assert_eq!(jammy.len(), POT_SLOTS);
        assert!(report.unreachable().is_empty());
    }

    #[test]
    fn test_next_multiset_visits_each_once() {
        let mut slots = vec![0; 2];
        let mut seen = vec![slots.clone()];
        while next_multiset(&mut slots, 3) {
            seen.push(slots.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 1],
                vec![1, 2],
                vec![2, 2],
            ]
        );
    }

    #[test]
    fn test_branches_flatten_or_inside_and() {
        let req = Requirement::all(vec![
            Requirement::at_least(Tag::Meat, 1),
            Requirement::any(vec![
                Requirement::at_least(Tag::Dairy, 1),
                Requirement::at_least(Tag::Sweetener, 1),
            ]),
        ]);
        let flat = branches(&req, 64);
        assert_eq!(flat.len(), 2);
        assert!(flat.iter().all(|b| b.len() == 2));
        assert_eq!(branches(&req, 1).len(), 1);
        assert!(branches(&Requirement::any(Vec::new()), 64).is_empty());
    }
}
