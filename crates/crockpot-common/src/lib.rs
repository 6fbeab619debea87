//! # Crockpot Common
//!
//! Common types shared by the crock pot recipe engine and its frontends.
//!
//! This crate provides:
//! - ID types (IngredientId, RecipeId)
//! - Ingredient tags and tag sets
//! - Game modes and enabled-mode sets
//! - Schema versions for catalog files
//! - The error taxonomy
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;
pub mod mode;
pub mod tags;
pub mod version;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::mode::*;
    pub use crate::tags::*;
    pub use crate::version::*;
}

pub use prelude::*;
