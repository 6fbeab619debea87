//! Error types for the crock pot engine.

use crate::ids::{IngredientId, RecipeId};
use thiserror::Error;

/// Top-level error type for crock pot operations.
#[derive(Debug, Error)]
pub enum CrockpotError {
    /// Catalog validation errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Rejected selection or pool
    #[error("Invalid selection: {0}")]
    Selection(#[from] SelectionError),

    /// A recipe id the catalog does not know
    #[error("Unknown recipe: {0}")]
    UnknownRecipe(RecipeId),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structural problems found while building a catalog.
///
/// These are fatal at load time and never surface mid-query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two ingredients share an id
    #[error("Duplicate ingredient id: {0}")]
    DuplicateIngredient(IngredientId),

    /// Two recipes share an id
    #[error("Duplicate recipe id: {0}")]
    DuplicateRecipe(RecipeId),

    /// An ingredient has an empty display name
    #[error("Ingredient {0} has an empty name")]
    EmptyIngredientName(IngredientId),

    /// A recipe has an empty display name
    #[error("Recipe {0} has an empty name")]
    EmptyRecipeName(RecipeId),

    /// A cooked or dried form points at a missing ingredient
    #[error("Ingredient {ingredient} references unknown {relation} form {target}")]
    UnknownForm {
        /// Ingredient holding the reference
        ingredient: IngredientId,
        /// Which relation (`cooked`, `dried`)
        relation: &'static str,
        /// The missing target
        target: IngredientId,
    },

    /// A requirement names an ingredient that is not in the catalog
    #[error("Recipe {recipe} requires unknown ingredient {ingredient}")]
    UnknownIngredient {
        /// Recipe holding the requirement
        recipe: RecipeId,
        /// The missing ingredient
        ingredient: IngredientId,
    },

    /// A count leaf has a threshold that cannot be satisfied or is meaningless
    #[error("Recipe {recipe} has an invalid threshold: {detail}")]
    InvalidThreshold {
        /// Recipe holding the requirement
        recipe: RecipeId,
        /// What is wrong with it
        detail: String,
    },

    /// An `and`/`or` node without children, or an id set without ids
    #[error("Recipe {0} has an empty requirement group")]
    EmptyGroup(RecipeId),

    /// No fallback dish was defined
    #[error("Catalog has no fallback dish")]
    MissingFallback,

    /// More than one fallback dish was defined
    #[error("Catalog defines more than one fallback dish: {0}")]
    DuplicateFallback(RecipeId),
}

/// Problems with a per-query selection or discovery pool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The pot only has four slots
    #[error("Selection has {0} slots, the pot holds at most 4")]
    TooManySlots(usize),

    /// A slot references an ingredient id the catalog does not know
    #[error("Unknown ingredient: {0}")]
    UnknownIngredient(IngredientId),

    /// The ingredient exists but cannot be put in a crock pot
    #[error("Ingredient {0} cannot be added to a crock pot")]
    Uncookable(IngredientId),
}

/// Result type for catalog construction.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result type for per-query operations.
pub type SelectionResult<T> = Result<T, SelectionError>;

/// Result type alias for crock pot operations.
pub type CrockpotResult<T> = Result<T, CrockpotError>;
