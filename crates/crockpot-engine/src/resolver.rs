//! Resolves a pot's contents into the dish it produces.

use crockpot_common::{GameModes, RecipeId, SelectionError, SelectionResult};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Ingredient};
use crate::evaluator::{evaluate, Counts};
use crate::selection::Selection;

/// Outcome of cooking a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The dish the pot produces.
    pub winner: RecipeId,
    /// Every recipe whose requirement holds, winner first.
    pub qualifying: Vec<RecipeId>,
    /// True when nothing qualified and the fallback dish was produced.
    pub fallback: bool,
}

impl MatchResult {
    /// Checks whether a recipe qualifies.
    #[must_use]
    pub fn qualifies(&self, recipe: &str) -> bool {
        self.qualifying.iter().any(|id| id.as_str() == recipe)
    }
}

/// Looks up every occupied slot.
///
/// Unknown ids and uncookable ingredients are rejected rather than treated
/// as empty slots.
pub fn selection_ingredients<'a>(
    catalog: &'a Catalog,
    selection: &Selection,
) -> SelectionResult<Vec<&'a Ingredient>> {
    selection
        .ingredients()
        .map(|id| {
            let ingredient = catalog
                .ingredients()
                .get(id.as_str())
                .ok_or_else(|| SelectionError::UnknownIngredient(id.clone()))?;
            if ingredient.uncookable {
                return Err(SelectionError::Uncookable(id.clone()));
            }
            Ok(ingredient)
        })
        .collect()
}

/// Cooks a selection under the enabled game modes.
pub fn resolve(
    catalog: &Catalog,
    selection: &Selection,
    modes: GameModes,
) -> SelectionResult<MatchResult> {
    let counts = Counts::from_ingredients(selection_ingredients(catalog, selection)?);
    Ok(resolve_counts(catalog, &counts, modes))
}

/// Resolves pre-aggregated counts.
///
/// Qualifying recipes are ranked by descending priority. Equal priorities
/// keep catalog declaration order, so the earlier declared recipe wins.
#[must_use]
pub fn resolve_counts(catalog: &Catalog, counts: &Counts, modes: GameModes) -> MatchResult {
    let mut qualifying: Vec<(usize, i32)> = catalog
        .recipes()
        .enabled(modes)
        .filter(|(_, recipe)| evaluate(&recipe.requirement, counts))
        .map(|(index, recipe)| (index, recipe.priority))
        .collect();
    // Stable sort keeps declaration order among equal priorities.
    qualifying.sort_by(|a, b| b.1.cmp(&a.1));

    let qualifying: Vec<RecipeId> = qualifying
        .into_iter()
        .filter_map(|(index, _)| catalog.recipes().by_index(index))
        .map(|recipe| recipe.id.clone())
        .collect();

    match qualifying.first() {
        Some(winner) => MatchResult {
            winner: winner.clone(),
            qualifying,
            fallback: false,
        },
        None => MatchResult {
            winner: catalog.recipes().fallback().id.clone(),
            qualifying,
            fallback: true,
        },
    }
}
