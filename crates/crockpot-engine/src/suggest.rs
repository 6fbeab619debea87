//! Suggestions for completing near-miss recipes.
//!
//! A recipe is a near miss when it does not qualify yet but one more
//! ingredient would make it qualify. Each suggestion names either a specific
//! ingredient (when the recipe asks for particular ids) or a tag (when any
//! ingredient carrying it will do).

use crockpot_common::{GameModes, IngredientId, RecipeId, SelectionResult, Tag};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{Catalog, Ingredient, Recipe};
use crate::evaluator::{evaluate, Counts};
use crate::requirement::Requirement;
use crate::resolver::{resolve_counts, selection_ingredients};
use crate::selection::Selection;

/// What to add to the pot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SuggestionTarget {
    /// A specific ingredient.
    Ingredient(IngredientId),
    /// Any ingredient carrying a tag.
    Tag(Tag),
}

impl SuggestionTarget {
    /// Link form used by frontends: `*id` or `tag:name`.
    #[must_use]
    pub fn link(&self) -> String {
        match self {
            Self::Ingredient(id) => format!("*{id}"),
            Self::Tag(tag) => format!("tag:{tag}"),
        }
    }
}

impl fmt::Display for SuggestionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.link())
    }
}

/// One way to complete one recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Recipe that would qualify.
    pub recipe: RecipeId,
    /// What to add.
    pub target: SuggestionTarget,
}

/// Suggests single additions that complete non-qualifying recipes.
///
/// Recipes are visited by descending priority, then declaration order. A
/// full pot yields no suggestions. Only cookable ingredients available under
/// `modes` are considered as additions.
pub fn suggest(
    catalog: &Catalog,
    selection: &Selection,
    modes: GameModes,
) -> SelectionResult<Vec<Suggestion>> {
    let counts = Counts::from_ingredients(selection_ingredients(catalog, selection)?);
    if selection.is_full() {
        return Ok(Vec::new());
    }

    let current = resolve_counts(catalog, &counts, modes);
    let mut candidates: Vec<&Recipe> = catalog
        .recipes()
        .enabled(modes)
        .map(|(_, recipe)| recipe)
        .filter(|recipe| !current.qualifies(recipe.id.as_str()))
        .collect();
    candidates.sort_by(|a, b| b.priority.cmp(&a.priority));

    let mut out = Vec::new();
    for recipe in candidates {
        let completers: Vec<&Ingredient> = catalog
            .ingredients()
            .available(modes)
            .map(|(_, ingredient)| ingredient)
            .filter(|ingredient| evaluate(&recipe.requirement, &counts.with(ingredient)))
            .collect();
        if completers.is_empty() {
            continue;
        }
        for target in targets_for(&recipe.requirement, &counts, &completers) {
            out.push(Suggestion {
                recipe: recipe.id.clone(),
                target,
            });
        }
    }
    Ok(out)
}

/// Picks the distinguishing targets among the ingredients that complete a
/// recipe.
fn targets_for(
    requirement: &Requirement,
    counts: &Counts,
    completers: &[&Ingredient],
) -> Vec<SuggestionTarget> {
    let referenced = requirement.referenced_ingredients();
    let mut targets: Vec<SuggestionTarget> = referenced
        .iter()
        .filter(|id| completers.iter().any(|c| c.id == ***id))
        .map(|id| SuggestionTarget::Ingredient((*id).clone()))
        .collect();

    for tag in missing_tags(requirement, counts) {
        let carried = completers
            .iter()
            .filter(|c| !referenced.contains(&&c.id))
            .any(|c| c.has_tag(tag));
        if carried {
            targets.push(SuggestionTarget::Tag(tag));
        }
    }

    // Completed through a negative or mixed clause only; name the first
    // ingredient that works.
    if targets.is_empty() {
        if let Some(first) = completers.first() {
            targets.push(SuggestionTarget::Ingredient(first.id.clone()));
        }
    }
    targets
}

/// Tags whose positive leaves are not yet satisfied.
fn missing_tags(requirement: &Requirement, counts: &Counts) -> Vec<Tag> {
    let mut tags = Vec::new();
    requirement.visit(&mut |node| {
        if let Requirement::TagCount {
            tag,
            cmp,
            threshold,
        } = node
        {
            if cmp.floor(*threshold) > 0
                && !cmp.test(counts.tag(*tag), *threshold)
                && !tags.contains(tag)
            {
                tags.push(*tag);
            }
        }
    });
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirement::Comparator;
    use crockpot_common::SelectionError;

    fn catalog() -> Catalog {
        let ingredients = vec![
            Ingredient::new("carrot", "Carrot", &[Tag::Veggie]),
            Ingredient::new("corn", "Corn", &[Tag::Veggie]),
            Ingredient::new("roe", "Roe", &[Tag::Fish]),
            Ingredient::new("roe_cooked", "Cooked Roe", &[Tag::Fish]),
            Ingredient::new("fish", "Fish", &[Tag::Fish]),
            Ingredient::new("twigs", "Twigs", &[Tag::Inedible]),
            Ingredient::new("petals", "Petals", &[Tag::Veggie]).uncookable(),
        ];
        let recipes = vec![
            Recipe::new("ratatouille", "Ratatouille", 0, Requirement::at_least(Tag::Veggie, 2)),
            Recipe::new(
                "caviar",
                "Caviar",
                20,
                Requirement::all(vec![
                    Requirement::ingredients(["roe", "roe_cooked"], Comparator::Exactly, 3),
                    Requirement::at_least(Tag::Veggie, 1),
                ]),
            ),
        ];
        let fallback = Recipe::new("wetgoop", "Wet Goop", 0, Requirement::any(Vec::new()));
        Catalog::new(ingredients, recipes, fallback).expect("catalog")
    }

    #[test]
    fn test_one_veggie_suggests_veggie_tag() {
        let selection = Selection::from_ids(["carrot"]).expect("sel");
        let suggestions = suggest(&catalog(), &selection, GameModes::default()).expect("suggest");
        assert_eq!(
            suggestions,
            vec![Suggestion {
                recipe: "ratatouille".into(),
                target: SuggestionTarget::Tag(Tag::Veggie),
            }]
        );
    }

    #[test]
    fn test_named_ingredients_suggested_by_id() {
        let selection = Selection::from_ids(["roe", "roe", "carrot"]).expect("sel");
        let suggestions = suggest(&catalog(), &selection, GameModes::default()).expect("suggest");
        let caviar: Vec<String> = suggestions
            .iter()
            .filter(|s| s.recipe.as_str() == "caviar")
            .map(|s| s.target.link())
            .collect();
        assert_eq!(caviar, vec!["*roe", "*roe_cooked"]);
        // Caviar outranks ratatouille.
        assert_eq!(suggestions[0].recipe.as_str(), "caviar");
    }

    #[test]
    fn test_full_pot_has_no_suggestions() {
        let selection = Selection::from_ids(["carrot", "twigs", "twigs", "twigs"]).expect("sel");
        let suggestions = suggest(&catalog(), &selection, GameModes::default()).expect("suggest");
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_qualifying_recipes_not_suggested() {
        let selection = Selection::from_ids(["carrot", "corn"]).expect("sel");
        let suggestions = suggest(&catalog(), &selection, GameModes::default()).expect("suggest");
        assert!(suggestions.iter().all(|s| s.recipe.as_str() != "ratatouille"));
    }

    #[test]
    fn test_unknown_ingredient_rejected() {
        let selection = Selection::from_ids(["dragon"]).expect("sel");
        assert_eq!(
            suggest(&catalog(), &selection, GameModes::default()),
            Err(SelectionError::UnknownIngredient("dragon".into()))
        );
    }

    #[test]
    fn test_link_format() {
        assert_eq!(SuggestionTarget::Ingredient("honey".into()).link(), "*honey");
        assert_eq!(SuggestionTarget::Tag(Tag::Sweetener).to_string(), "tag:sweetener");
    }
}
