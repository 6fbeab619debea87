//! Recipe requirement predicates.
//!
//! A requirement is a small AST over ingredient counts:
//! - `TagCount` counts ingredients carrying a tag
//! - `IngredientCount` counts occurrences of any id in a set
//! - `And` / `Or` compose children
//!
//! Requirements are plain data, so the same value drives the resolver, the
//! suggestion engine, the efficient search and the recipe descriptions.

use crockpot_common::{CatalogError, CatalogResult, IngredientId, RecipeId, Tag};
use serde::{Deserialize, Serialize};

use crate::selection::POT_SLOTS;

/// How a count is compared against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    /// Count equals the threshold.
    Exactly,
    /// Count is at least the threshold.
    AtLeast,
    /// Count is at most the threshold.
    AtMost,
    /// Count is zero. The threshold is ignored and must be 0.
    None,
}

impl Comparator {
    /// Tests a count against a threshold.
    #[must_use]
    pub const fn test(self, count: u8, threshold: u8) -> bool {
        match self {
            Self::Exactly => count == threshold,
            Self::AtLeast => count >= threshold,
            Self::AtMost => count <= threshold,
            Self::None => count == 0,
        }
    }

    /// Smallest count that can satisfy this comparison.
    #[must_use]
    pub const fn floor(self, threshold: u8) -> u8 {
        match self {
            Self::Exactly | Self::AtLeast => threshold,
            Self::AtMost | Self::None => 0,
        }
    }

    /// Largest count that can satisfy this comparison, if bounded.
    #[must_use]
    pub const fn cap(self, threshold: u8) -> Option<u8> {
        match self {
            Self::Exactly | Self::AtMost => Some(threshold),
            Self::None => Some(0),
            Self::AtLeast => None,
        }
    }
}

/// A recipe's requirement predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Requirement {
    /// Number of ingredients carrying `tag`.
    TagCount {
        /// Counted tag
        tag: Tag,
        /// Comparison
        cmp: Comparator,
        /// Threshold
        #[serde(default)]
        threshold: u8,
    },
    /// Number of slots holding any of `ingredients`.
    IngredientCount {
        /// Accepted ingredient ids (raw/cooked substitutes and the like)
        ingredients: Vec<IngredientId>,
        /// Comparison
        cmp: Comparator,
        /// Threshold
        #[serde(default)]
        threshold: u8,
    },
    /// Every child must hold.
    And {
        /// Children
        all: Vec<Requirement>,
    },
    /// At least one child must hold.
    Or {
        /// Children
        any: Vec<Requirement>,
    },
}

impl Requirement {
    /// Creates a tag count leaf.
    #[must_use]
    pub const fn tag(tag: Tag, cmp: Comparator, threshold: u8) -> Self {
        Self::TagCount {
            tag,
            cmp,
            threshold,
        }
    }

    /// `tag >= threshold`.
    #[must_use]
    pub const fn at_least(tag: Tag, threshold: u8) -> Self {
        Self::tag(tag, Comparator::AtLeast, threshold)
    }

    /// No ingredient carrying `tag`.
    #[must_use]
    pub const fn no(tag: Tag) -> Self {
        Self::tag(tag, Comparator::None, 0)
    }

    /// Creates an ingredient count leaf.
    #[must_use]
    pub fn ingredients<I, S>(ids: I, cmp: Comparator, threshold: u8) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<IngredientId>,
    {
        Self::IngredientCount {
            ingredients: ids.into_iter().map(Into::into).collect(),
            cmp,
            threshold,
        }
    }

    /// Conjunction of children.
    #[must_use]
    pub fn all(children: Vec<Requirement>) -> Self {
        Self::And { all: children }
    }

    /// Disjunction of children.
    #[must_use]
    pub fn any(children: Vec<Requirement>) -> Self {
        Self::Or { any: children }
    }

    /// Ingredient ids named by `IngredientCount` leaves, first occurrence order.
    #[must_use]
    pub fn referenced_ingredients(&self) -> Vec<&IngredientId> {
        let mut out = Vec::new();
        self.visit(&mut |node| {
            if let Self::IngredientCount { ingredients, .. } = node {
                for id in ingredients {
                    if !out.contains(&id) {
                        out.push(id);
                    }
                }
            }
        });
        out
    }

    /// Tags that some leaf needs present (`exactly n` or `at_least n`, n > 0).
    #[must_use]
    pub fn positive_tags(&self) -> Vec<Tag> {
        let mut out = Vec::new();
        self.visit(&mut |node| {
            if let Self::TagCount {
                tag,
                cmp,
                threshold,
            } = node
            {
                if cmp.floor(*threshold) > 0 && !out.contains(tag) {
                    out.push(*tag);
                }
            }
        });
        out
    }

    /// Checks the predicate for structural problems.
    pub fn validate(&self, recipe: &RecipeId) -> CatalogResult<()> {
        match self {
            Self::TagCount { cmp, threshold, .. } => validate_threshold(recipe, *cmp, *threshold),
            Self::IngredientCount {
                ingredients,
                cmp,
                threshold,
            } => {
                if ingredients.is_empty() {
                    return Err(CatalogError::EmptyGroup(recipe.clone()));
                }
                validate_threshold(recipe, *cmp, *threshold)
            },
            Self::And { all: children } | Self::Or { any: children } => {
                if children.is_empty() {
                    return Err(CatalogError::EmptyGroup(recipe.clone()));
                }
                children.iter().try_for_each(|child| child.validate(recipe))
            },
        }
    }

    /// Visits every node, parents before children.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Requirement)) {
        f(self);
        if let Self::And { all: children } | Self::Or { any: children } = self {
            for child in children {
                child.visit(f);
            }
        }
    }
}

fn validate_threshold(recipe: &RecipeId, cmp: Comparator, threshold: u8) -> CatalogResult<()> {
    if cmp == Comparator::None && threshold != 0 {
        return Err(CatalogError::InvalidThreshold {
            recipe: recipe.clone(),
            detail: format!("'none' takes no threshold, got {threshold}"),
        });
    }
    if matches!(cmp, Comparator::AtLeast | Comparator::Exactly) && threshold == 0 {
        return Err(CatalogError::InvalidThreshold {
            recipe: recipe.clone(),
            detail: format!("{cmp:?} needs a threshold of at least 1"),
        });
    }
    if threshold as usize > POT_SLOTS {
        return Err(CatalogError::InvalidThreshold {
            recipe: recipe.clone(),
            detail: format!("{threshold} exceeds the {POT_SLOTS} pot slots"),
        });
    }
    Ok(())
}
