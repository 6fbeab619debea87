//! Game modes.
//!
//! Some ingredients and recipes only exist in a particular game or DLC. The
//! enabled modes are always passed explicitly into engine calls.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A game or expansion that gates ingredients and recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Base game.
    Vanilla,
    /// Reign of Giants.
    Giants,
    /// Shipwrecked.
    Shipwrecked,
    /// Hamlet.
    Hamlet,
    /// Don't Starve Together.
    Together,
    /// Warly's portable crock pot recipes.
    Warly,
}

impl GameMode {
    /// Get all modes.
    #[must_use]
    pub fn all() -> &'static [GameMode] {
        &[
            Self::Vanilla,
            Self::Giants,
            Self::Shipwrecked,
            Self::Hamlet,
            Self::Together,
            Self::Warly,
        ]
    }

    /// Catalog name of this mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vanilla => "vanilla",
            Self::Giants => "giants",
            Self::Shipwrecked => "shipwrecked",
            Self::Hamlet => "hamlet",
            Self::Together => "together",
            Self::Warly => "warly",
        }
    }

    /// Get display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Vanilla => "Vanilla",
            Self::Giants => "Reign of Giants",
            Self::Shipwrecked => "Shipwrecked",
            Self::Hamlet => "Hamlet",
            Self::Together => "Don't Starve Together",
            Self::Warly => "Warly",
        }
    }

    /// Modes this one builds on.
    #[must_use]
    pub fn prerequisites(self) -> &'static [GameMode] {
        match self {
            Self::Vanilla => &[],
            Self::Giants => &[Self::Vanilla],
            Self::Shipwrecked | Self::Together => &[Self::Vanilla, Self::Giants],
            Self::Hamlet | Self::Warly => &[Self::Vanilla, Self::Giants, Self::Shipwrecked],
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown game mode: {0}")]
pub struct UnknownMode(pub String);

impl FromStr for GameMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

/// Set of enabled game modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Vec<GameMode>", into = "Vec<GameMode>")]
pub struct GameModes(u8);

impl GameModes {
    /// No modes enabled.
    pub const NONE: Self = Self(0);

    /// Creates a set from a list of modes.
    #[must_use]
    pub fn new(modes: &[GameMode]) -> Self {
        modes.iter().copied().collect()
    }

    /// Every mode enabled.
    #[must_use]
    pub fn everything() -> Self {
        Self::new(GameMode::all())
    }

    /// A mode together with its prerequisites, and nothing else.
    #[must_use]
    pub fn preset(mode: GameMode) -> Self {
        let mut set = Self::new(mode.prerequisites());
        set.insert(mode);
        set
    }

    /// Checks whether a mode is enabled.
    #[must_use]
    pub const fn contains(self, mode: GameMode) -> bool {
        self.0 & mode.bit() != 0
    }

    /// Checks whether an optional mode requirement is satisfied.
    ///
    /// `None` means the entry is available everywhere.
    #[must_use]
    pub fn allows(self, required: Option<GameMode>) -> bool {
        required.map_or(true, |mode| self.contains(mode))
    }

    /// Enables a mode.
    pub fn insert(&mut self, mode: GameMode) {
        self.0 |= mode.bit();
    }

    /// Disables a mode.
    pub fn remove(&mut self, mode: GameMode) {
        self.0 &= !mode.bit();
    }

    /// Flips a single mode on or off.
    pub fn toggle(&mut self, mode: GameMode) {
        self.0 ^= mode.bit();
    }

    /// Checks if no mode is enabled.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates enabled modes.
    pub fn iter(self) -> impl Iterator<Item = GameMode> {
        GameMode::all()
            .iter()
            .copied()
            .filter(move |mode| self.contains(*mode))
    }
}

impl Default for GameModes {
    fn default() -> Self {
        Self::preset(GameMode::Hamlet)
    }
}

impl FromIterator<GameMode> for GameModes {
    fn from_iter<I: IntoIterator<Item = GameMode>>(iter: I) -> Self {
        let mut set = Self::NONE;
        for mode in iter {
            set.insert(mode);
        }
        set
    }
}

impl From<Vec<GameMode>> for GameModes {
    fn from(modes: Vec<GameMode>) -> Self {
        modes.into_iter().collect()
    }
}

impl From<GameModes> for Vec<GameMode> {
    fn from(set: GameModes) -> Self {
        set.iter().collect()
    }
}

impl fmt::Display for GameModes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(GameMode::as_str).collect();
        f.write_str(&names.join(","))
    }
}

impl FromStr for GameModes {
    type Err = UnknownMode;

    /// Parses a comma separated list such as `vanilla,giants`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(GameMode::from_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_modes() {
        let modes = GameModes::default();
        assert!(modes.contains(GameMode::Vanilla));
        assert!(modes.contains(GameMode::Giants));
        assert!(modes.contains(GameMode::Shipwrecked));
        assert!(modes.contains(GameMode::Hamlet));
        assert!(!modes.contains(GameMode::Together));
        assert!(!modes.contains(GameMode::Warly));
    }

    #[test]
    fn test_presets() {
        assert_eq!(
            GameModes::preset(GameMode::Vanilla),
            GameModes::new(&[GameMode::Vanilla])
        );
        assert_eq!(
            GameModes::preset(GameMode::Together),
            GameModes::new(&[GameMode::Vanilla, GameMode::Giants, GameMode::Together])
        );
        assert_eq!(
            GameModes::preset(GameMode::Warly),
            GameModes::new(&[
                GameMode::Vanilla,
                GameMode::Giants,
                GameMode::Shipwrecked,
                GameMode::Warly
            ])
        );
    }

    #[test]
    fn test_toggle() {
        let mut modes = GameModes::default();
        modes.toggle(GameMode::Together);
        assert!(modes.contains(GameMode::Together));
        modes.toggle(GameMode::Together);
        assert_eq!(modes, GameModes::default());
    }

    #[test]
    fn test_allows() {
        let modes = GameModes::preset(GameMode::Giants);
        assert!(modes.allows(None));
        assert!(modes.allows(Some(GameMode::Giants)));
        assert!(!modes.allows(Some(GameMode::Hamlet)));
    }

    #[test]
    fn test_parse_list() {
        let modes: GameModes = "vanilla, shipwrecked".parse().expect("parse modes");
        assert_eq!(
            modes,
            GameModes::new(&[GameMode::Vanilla, GameMode::Shipwrecked])
        );
        assert_eq!(modes.to_string(), "vanilla,shipwrecked");
        assert!("vanilla,moon".parse::<GameModes>().is_err());
    }
}
