//! Requirement evaluation against a pot's ingredient counts.

use crockpot_common::{IngredientId, Tag};

use crate::catalog::Ingredient;
use crate::requirement::Requirement;

/// Aggregated counts for up to four ingredients.
///
/// Every ingredient increments its own id and each tag it carries. Slot
/// positions are not recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counts {
    tags: [u8; Tag::COUNT],
    ingredients: Vec<(IngredientId, u8)>,
    total: u8,
}

impl Counts {
    /// Creates empty counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a sequence of ingredients.
    pub fn from_ingredients<'a>(ingredients: impl IntoIterator<Item = &'a Ingredient>) -> Self {
        let mut counts = Self::new();
        for ingredient in ingredients {
            counts.add(ingredient);
        }
        counts
    }

    /// Adds one ingredient.
    pub fn add(&mut self, ingredient: &Ingredient) {
        for tag in ingredient.tags.iter() {
            self.tags[tag.index()] = self.tags[tag.index()].saturating_add(1);
        }
        match self.ingredients.iter_mut().find(|(id, _)| *id == ingredient.id) {
            Some((_, count)) => *count = count.saturating_add(1),
            None => self.ingredients.push((ingredient.id.clone(), 1)),
        }
        self.total = self.total.saturating_add(1);
    }

    /// Returns a copy with one more ingredient.
    #[must_use]
    pub fn with(&self, ingredient: &Ingredient) -> Self {
        let mut counts = self.clone();
        counts.add(ingredient);
        counts
    }

    /// Number of ingredients carrying `tag`.
    #[must_use]
    pub fn tag(&self, tag: Tag) -> u8 {
        self.tags[tag.index()]
    }

    /// Occurrences of one ingredient id.
    #[must_use]
    pub fn ingredient(&self, id: &str) -> u8 {
        self.ingredients
            .iter()
            .find(|(known, _)| known.as_str() == id)
            .map_or(0, |(_, count)| *count)
    }

    /// Occurrences of any id in `ids`. Repeated ids in the set count once.
    #[must_use]
    pub fn any_of(&self, ids: &[IngredientId]) -> u8 {
        self.ingredients
            .iter()
            .filter(|(id, _)| ids.contains(id))
            .map(|(_, count)| *count)
            .fold(0, u8::saturating_add)
    }

    /// Number of ingredients counted.
    #[must_use]
    pub fn total(&self) -> u8 {
        self.total
    }
}

/// Evaluates a requirement against aggregated counts.
///
/// `and` stops at the first false child, `or` at the first true one.
#[must_use]
pub fn evaluate(requirement: &Requirement, counts: &Counts) -> bool {
    match requirement {
        Requirement::TagCount {
            tag,
            cmp,
            threshold,
        } => cmp.test(counts.tag(*tag), *threshold),
        Requirement::IngredientCount {
            ingredients,
            cmp,
            threshold,
        } => cmp.test(counts.any_of(ingredients), *threshold),
        Requirement::And { all } => all.iter().all(|child| evaluate(child, counts)),
        Requirement::Or { any } => any.iter().any(|child| evaluate(child, counts)),
    }
}
