//! Ingredient and recipe catalogs.
//!
//! This module provides:
//! - Ingredient and recipe data structures
//! - Indexed, immutable catalogs kept in declaration order
//! - Cross-reference validation at construction time
//! - Lookup by id, tag, name and game mode
//!
//! Declaration order is the total order every engine component iterates in,
//! which is what keeps results deterministic.

use ahash::AHashMap;
use crockpot_common::{
    CatalogError, CatalogResult, GameMode, GameModes, IngredientId, RecipeId, Tag, TagSet,
};
use serde::{Deserialize, Serialize};

use crate::requirement::Requirement;

// ============================================================================
// Ingredients
// ============================================================================

/// An ingredient that can go into the pot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ingredient {
    /// Unique catalog key.
    pub id: IngredientId,
    /// Display name.
    pub name: String,
    /// Health restored when eaten raw.
    #[serde(default)]
    pub health: f32,
    /// Hunger restored when eaten raw.
    #[serde(default)]
    pub hunger: f32,
    /// Sanity restored when eaten raw.
    #[serde(default)]
    pub sanity: f32,
    /// Time until spoiled, in game time. `None` never perishes.
    #[serde(default)]
    pub perish: Option<u32>,
    /// Categorical tags.
    #[serde(default)]
    pub tags: TagSet,
    /// What this becomes when cooked on a fire.
    #[serde(default)]
    pub cook: Option<IngredientId>,
    /// What this becomes on a drying rack.
    #[serde(default)]
    pub dry: Option<IngredientId>,
    /// Drying time, in game time.
    #[serde(default)]
    pub dry_time: Option<u32>,
    /// Game mode this ingredient belongs to.
    #[serde(default)]
    pub mode: Option<GameMode>,
    /// Cannot be put in a crock pot at all.
    #[serde(default)]
    pub uncookable: bool,
}

impl Ingredient {
    /// Creates an ingredient with only an id, name and tags.
    #[must_use]
    pub fn new(id: impl Into<IngredientId>, name: impl Into<String>, tags: &[Tag]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            health: 0.0,
            hunger: 0.0,
            sanity: 0.0,
            perish: None,
            tags: TagSet::new(tags),
            cook: None,
            dry: None,
            dry_time: None,
            mode: None,
            uncookable: false,
        }
    }

    /// Checks if this ingredient carries a tag.
    #[must_use]
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Checks if this ingredient may go in a pot under the given modes.
    #[must_use]
    pub fn is_available(&self, modes: GameModes) -> bool {
        !self.uncookable && modes.allows(self.mode)
    }

    /// Checks if the name contains `query`, ignoring case.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }

    /// Sets the game mode.
    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Marks the ingredient as not allowed in a pot.
    #[must_use]
    pub fn uncookable(mut self) -> Self {
        self.uncookable = true;
        self
    }
}

/// Immutable ingredient catalog, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct IngredientCatalog {
    ingredients: Vec<Ingredient>,
    by_id: AHashMap<IngredientId, usize>,
    cooked: Vec<Option<usize>>,
    raw: Vec<Option<usize>>,
}

impl IngredientCatalog {
    /// Builds the catalog, validating ids and form references.
    pub fn new(ingredients: Vec<Ingredient>) -> CatalogResult<Self> {
        let mut by_id = AHashMap::with_capacity(ingredients.len());
        for (index, ingredient) in ingredients.iter().enumerate() {
            if ingredient.name.trim().is_empty() {
                return Err(CatalogError::EmptyIngredientName(ingredient.id.clone()));
            }
            if by_id.insert(ingredient.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateIngredient(ingredient.id.clone()));
            }
        }

        let mut cooked = vec![None; ingredients.len()];
        let mut raw = vec![None; ingredients.len()];
        for (index, ingredient) in ingredients.iter().enumerate() {
            if let Some(dry) = &ingredient.dry {
                if !by_id.contains_key(dry) {
                    return Err(CatalogError::UnknownForm {
                        ingredient: ingredient.id.clone(),
                        relation: "dried",
                        target: dry.clone(),
                    });
                }
            }

            // Explicit reference wins, otherwise the `<id>_cooked` convention.
            let cooked_index = match &ingredient.cook {
                Some(target) => Some(*by_id.get(target).ok_or_else(|| {
                    CatalogError::UnknownForm {
                        ingredient: ingredient.id.clone(),
                        relation: "cooked",
                        target: target.clone(),
                    }
                })?),
                None => by_id.get(&ingredient.id.cooked_variant()).copied(),
            };
            if let Some(target) = cooked_index {
                cooked[index] = Some(target);
                if raw[target].is_none() {
                    raw[target] = Some(index);
                }
            }
        }

        Ok(Self {
            ingredients,
            by_id,
            cooked,
            raw,
        })
    }

    /// Gets an ingredient by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Ingredient> {
        self.index_of(id).map(|index| &self.ingredients[index])
    }

    /// Declaration index of an ingredient.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Gets an ingredient by declaration index.
    #[must_use]
    pub fn by_index(&self, index: usize) -> Option<&Ingredient> {
        self.ingredients.get(index)
    }

    /// Iterates ingredients in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter()
    }

    /// Ingredients that may go in a pot under the given modes, with indices.
    pub fn available(&self, modes: GameModes) -> impl Iterator<Item = (usize, &Ingredient)> {
        self.ingredients
            .iter()
            .enumerate()
            .filter(move |(_, ingredient)| ingredient.is_available(modes))
    }

    /// Returns the number of ingredients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// All ingredients carrying a tag.
    #[must_use]
    pub fn with_tag(&self, tag: Tag) -> Vec<&Ingredient> {
        self.ingredients.iter().filter(|i| i.has_tag(tag)).collect()
    }

    /// Searches ingredients by name substring (case-insensitive).
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Ingredient> {
        self.ingredients
            .iter()
            .filter(|i| i.matches_search(query))
            .collect()
    }

    /// The cooked form of an ingredient.
    #[must_use]
    pub fn cooked_form(&self, id: &str) -> Option<&Ingredient> {
        let index = self.index_of(id)?;
        self.cooked[index].map(|target| &self.ingredients[target])
    }

    /// The raw form of a cooked ingredient.
    #[must_use]
    pub fn raw_form(&self, id: &str) -> Option<&Ingredient> {
        let index = self.index_of(id)?;
        self.raw[index].map(|source| &self.ingredients[source])
    }

    /// The dried form of an ingredient.
    #[must_use]
    pub fn dried_form(&self, id: &str) -> Option<&Ingredient> {
        self.get(id)?
            .dry
            .as_ref()
            .and_then(|dry| self.get(dry.as_str()))
    }

    /// Display name for an id, falling back to the id itself.
    #[must_use]
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map_or(id, |i| i.name.as_str())
    }
}

// ============================================================================
// Recipes
// ============================================================================

/// A crock pot dish and the requirement that produces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    /// Unique catalog key.
    pub id: RecipeId,
    /// Display name.
    pub name: String,
    /// Health restored.
    #[serde(default)]
    pub health: f32,
    /// Hunger restored.
    #[serde(default)]
    pub hunger: f32,
    /// Sanity restored.
    #[serde(default)]
    pub sanity: f32,
    /// Time until spoiled, in game time. `None` never perishes.
    #[serde(default)]
    pub perish: Option<u32>,
    /// Cook time multiplier.
    #[serde(default = "default_cook_time")]
    pub cook_time: f32,
    /// Higher priority wins when several recipes qualify.
    #[serde(default)]
    pub priority: i32,
    /// Game mode this recipe belongs to.
    #[serde(default)]
    pub mode: Option<GameMode>,
    /// What the pot must contain.
    pub requirement: Requirement,
}

const fn default_cook_time() -> f32 {
    1.0
}

impl Recipe {
    /// Creates a recipe with default stats.
    #[must_use]
    pub fn new(
        id: impl Into<RecipeId>,
        name: impl Into<String>,
        priority: i32,
        requirement: Requirement,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            health: 0.0,
            hunger: 0.0,
            sanity: 0.0,
            perish: None,
            cook_time: default_cook_time(),
            priority,
            mode: None,
            requirement,
        }
    }

    /// Sets the game mode.
    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Checks if the recipe exists under the given modes.
    #[must_use]
    pub fn is_enabled(&self, modes: GameModes) -> bool {
        modes.allows(self.mode)
    }

    /// Checks if the name contains `query`, ignoring case.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Immutable recipe catalog, in declaration order, plus the fallback dish.
#[derive(Debug, Clone)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
    by_id: AHashMap<RecipeId, usize>,
    fallback: Recipe,
}

impl RecipeCatalog {
    /// Builds the catalog, validating ids and requirement structure.
    ///
    /// The fallback dish is what the pot produces when nothing qualifies. Its
    /// requirement is never evaluated.
    pub fn new(recipes: Vec<Recipe>, fallback: Recipe) -> CatalogResult<Self> {
        let mut by_id = AHashMap::with_capacity(recipes.len());
        for (index, recipe) in recipes.iter().enumerate() {
            if recipe.name.trim().is_empty() {
                return Err(CatalogError::EmptyRecipeName(recipe.id.clone()));
            }
            recipe.requirement.validate(&recipe.id)?;
            if by_id.insert(recipe.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateRecipe(recipe.id.clone()));
            }
        }
        if by_id.contains_key(&fallback.id) {
            return Err(CatalogError::DuplicateRecipe(fallback.id.clone()));
        }

        Ok(Self {
            recipes,
            by_id,
            fallback,
        })
    }

    /// Gets a recipe by id. The fallback dish is found too.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        match self.index_of(id) {
            Some(index) => Some(&self.recipes[index]),
            None if self.fallback.id.as_str() == id => Some(&self.fallback),
            None => None,
        }
    }

    /// Declaration index of a recipe. The fallback dish has none.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Gets a recipe by declaration index.
    #[must_use]
    pub fn by_index(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    /// The dish produced when nothing qualifies.
    #[must_use]
    pub fn fallback(&self) -> &Recipe {
        &self.fallback
    }

    /// Iterates recipes in declaration order, without the fallback.
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    /// Recipes that exist under the given modes, with indices.
    pub fn enabled(&self, modes: GameModes) -> impl Iterator<Item = (usize, &Recipe)> {
        self.recipes
            .iter()
            .enumerate()
            .filter(move |(_, recipe)| recipe.is_enabled(modes))
    }

    /// Returns the number of recipes, without the fallback.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Returns true if there are no recipes besides the fallback.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Searches recipes by name substring (case-insensitive).
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.matches_search(query))
            .collect()
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Both catalogs, cross-checked against each other.
#[derive(Debug, Clone)]
pub struct Catalog {
    ingredients: IngredientCatalog,
    recipes: RecipeCatalog,
}

impl Catalog {
    /// Builds and validates a complete catalog.
    pub fn new(
        ingredients: Vec<Ingredient>,
        recipes: Vec<Recipe>,
        fallback: Recipe,
    ) -> CatalogResult<Self> {
        let ingredients = IngredientCatalog::new(ingredients)?;
        let recipes = RecipeCatalog::new(recipes, fallback)?;

        for recipe in recipes.iter() {
            if let Some(missing) = recipe
                .requirement
                .referenced_ingredients()
                .into_iter()
                .find(|id| ingredients.get(id.as_str()).is_none())
            {
                return Err(CatalogError::UnknownIngredient {
                    recipe: recipe.id.clone(),
                    ingredient: missing.clone(),
                });
            }
        }

        Ok(Self {
            ingredients,
            recipes,
        })
    }

    /// The ingredient catalog.
    #[must_use]
    pub fn ingredients(&self) -> &IngredientCatalog {
        &self.ingredients
    }

    /// The recipe catalog.
    #[must_use]
    pub fn recipes(&self) -> &RecipeCatalog {
        &self.recipes
    }

    /// Ingredients a recipe names explicitly.
    #[must_use]
    pub fn ingredients_for_recipe(&self, id: &str) -> Vec<&Ingredient> {
        self.recipes.get(id).map_or_else(Vec::new, |recipe| {
            recipe
                .requirement
                .referenced_ingredients()
                .into_iter()
                .filter_map(|id| self.ingredients.get(id.as_str()))
                .collect()
        })
    }
}
