//! ID types for ingredients and recipes.
//!
//! Catalog keys are plain strings (`"carrot"`, `"baconeggs"`). The newtypes
//! keep ingredient and recipe keys from being mixed up at call sites.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for an ingredient in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(String);

impl IngredientId {
    /// Creates an ingredient ID from a catalog key.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw catalog key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the conventional id of this ingredient's cooked variant.
    #[must_use]
    pub fn cooked_variant(&self) -> Self {
        Self(format!("{}_cooked", self.0))
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IngredientId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for IngredientId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for IngredientId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a recipe (a cooked dish).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    /// Creates a recipe ID from a catalog key.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw catalog key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RecipeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for RecipeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
