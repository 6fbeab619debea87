//! Ingredient tags.
//!
//! Tags are the categorical properties recipe requirements count over
//! (veggie, meat, fish, ...). An ingredient carries a [`TagSet`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A categorical property of an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    /// Vegetables.
    Veggie,
    /// Fruit.
    Fruit,
    /// Meat of any kind.
    Meat,
    /// Fish.
    Fish,
    /// Eggs.
    Egg,
    /// Dairy products.
    Dairy,
    /// Fats.
    Fat,
    /// Sweeteners (honey and friends).
    Sweetener,
    /// Monster food.
    Monster,
    /// Technically inedible filler (twigs).
    Inedible,
    /// Jellyfish.
    Jellyfish,
    /// Magical ingredients.
    Magic,
    /// Antihistamines.
    Antihistamine,
    /// Decorations (butterfly wings).
    Decoration,
    /// Bugs.
    Bug,
    /// Frozen ingredients (ice).
    Frozen,
}

impl Tag {
    /// Number of tags.
    pub const COUNT: usize = 16;

    /// Get all tags in declaration order.
    #[must_use]
    pub fn all() -> &'static [Tag] {
        &[
            Self::Veggie,
            Self::Fruit,
            Self::Meat,
            Self::Fish,
            Self::Egg,
            Self::Dairy,
            Self::Fat,
            Self::Sweetener,
            Self::Monster,
            Self::Inedible,
            Self::Jellyfish,
            Self::Magic,
            Self::Antihistamine,
            Self::Decoration,
            Self::Bug,
            Self::Frozen,
        ]
    }

    /// Catalog name of this tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Veggie => "veggie",
            Self::Fruit => "fruit",
            Self::Meat => "meat",
            Self::Fish => "fish",
            Self::Egg => "egg",
            Self::Dairy => "dairy",
            Self::Fat => "fat",
            Self::Sweetener => "sweetener",
            Self::Monster => "monster",
            Self::Inedible => "inedible",
            Self::Jellyfish => "jellyfish",
            Self::Magic => "magic",
            Self::Antihistamine => "antihistamine",
            Self::Decoration => "decoration",
            Self::Bug => "bug",
            Self::Frozen => "frozen",
        }
    }

    /// Position of this tag in [`Tag::all`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown tag name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown tag: {0}")]
pub struct UnknownTag(pub String);

impl FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

/// Set of tags carried by one ingredient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Tag>", into = "Vec<Tag>")]
pub struct TagSet(u32);

impl TagSet {
    /// Empty tag set.
    pub const EMPTY: Self = Self(0);

    /// Creates a tag set from a list of tags.
    #[must_use]
    pub fn new(tags: &[Tag]) -> Self {
        tags.iter().copied().collect()
    }

    /// Checks whether `tag` is in the set.
    #[must_use]
    pub const fn contains(self, tag: Tag) -> bool {
        self.0 & tag.bit() != 0
    }

    /// Adds a tag.
    pub fn insert(&mut self, tag: Tag) {
        self.0 |= tag.bit();
    }

    /// Checks if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of tags in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates tags in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Tag> {
        Tag::all().iter().copied().filter(move |tag| self.contains(*tag))
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl From<Vec<Tag>> for TagSet {
    fn from(tags: Vec<Tag>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagSet> for Vec<Tag> {
    fn from(set: TagSet) -> Self {
        set.iter().collect()
    }
}
