//! Query inputs: the four pot slots and the discovered ingredient pool.

use crockpot_common::{IngredientId, SelectionError, SelectionResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Number of slots in a crock pot.
pub const POT_SLOTS: usize = 4;

/// The contents of the pot's slots. Empty slots hold `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    slots: [Option<IngredientId>; POT_SLOTS],
}

impl Selection {
    /// Creates an empty pot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selection from explicit slots.
    ///
    /// Fails if more than [`POT_SLOTS`] slots are given.
    pub fn from_slots(slots: Vec<Option<IngredientId>>) -> SelectionResult<Self> {
        if slots.len() > POT_SLOTS {
            return Err(SelectionError::TooManySlots(slots.len()));
        }
        let mut selection = Self::new();
        for (slot, id) in selection.slots.iter_mut().zip(slots) {
            *slot = id;
        }
        Ok(selection)
    }

    /// Creates a selection with the given ingredients in the leading slots.
    pub fn from_ids<I, S>(ids: I) -> SelectionResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<IngredientId>,
    {
        Self::from_slots(ids.into_iter().map(|id| Some(id.into())).collect())
    }

    /// Puts an ingredient into the first empty slot.
    ///
    /// The same ingredient may occupy several slots. Returns `false` when the
    /// pot is already full.
    pub fn push(&mut self, id: impl Into<IngredientId>) -> bool {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(id.into());
                true
            },
            None => false,
        }
    }

    /// Empties one slot, returning what it held.
    pub fn remove(&mut self, slot: usize) -> Option<IngredientId> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    /// All slots in order.
    #[must_use]
    pub fn slots(&self) -> &[Option<IngredientId>] {
        &self.slots
    }

    /// Occupied slots in order.
    pub fn ingredients(&self) -> impl Iterator<Item = &IngredientId> {
        self.slots.iter().flatten()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.ingredients().count()
    }

    /// Checks whether every slot is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.occupied() == POT_SLOTS
    }

    /// Checks whether every slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied() == 0
    }

    /// Occupied ingredients sorted, independent of slot position.
    #[must_use]
    pub fn canonical(&self) -> Vec<IngredientId> {
        let mut ids: Vec<IngredientId> = self.ingredients().cloned().collect();
        ids.sort();
        ids
    }
}

/// Every ingredient the player has marked as known. No slot limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscoveredPool {
    ingredients: BTreeSet<IngredientId>,
}

impl DiscoveredPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an ingredient. Returns `false` if it was already known.
    pub fn insert(&mut self, id: impl Into<IngredientId>) -> bool {
        self.ingredients.insert(id.into())
    }

    /// Forgets an ingredient. Returns `false` if it was not known.
    pub fn remove(&mut self, id: &str) -> bool {
        self.ingredients.remove(id)
    }

    /// Adds the ingredient if unknown, removes it otherwise.
    pub fn toggle(&mut self, id: impl Into<IngredientId>) {
        let id = id.into();
        if !self.ingredients.remove(&id) {
            self.ingredients.insert(id);
        }
    }

    /// Checks whether an ingredient is known.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ingredients.contains(id)
    }

    /// Iterates known ingredients in id order.
    pub fn iter(&self) -> impl Iterator<Item = &IngredientId> {
        self.ingredients.iter()
    }

    /// Number of known ingredients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    /// Checks whether nothing is known yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        self.ingredients.clear();
    }
}

impl<S: Into<IngredientId>> FromIterator<S> for DiscoveredPool {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ingredients: iter.into_iter().map(Into::into).collect(),
        }
    }
}
