//! # Crockpot Engine
//!
//! Recipe matching and suggestion engine for a four-slot crock pot.
//!
//! This crate provides:
//! - Ingredient and recipe catalogs with validation
//! - Requirement predicates as data (tag and ingredient counts, and/or)
//! - Requirement evaluation over ingredient multisets
//! - Dish resolution by priority with a deterministic tie-break
//! - Suggestions for completing near-miss recipes
//! - Constructive search for recipes reachable from a discovered pool
//! - Memoization of resolver results
//! - Catalog loading from TOML or RON assets
//! - Display helpers for frontends

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod cache;
pub mod catalog;
pub mod evaluator;
pub mod format;
pub mod loader;
pub mod pot;
pub mod requirement;
pub mod resolver;
pub mod search;
pub mod selection;
pub mod suggest;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::cache::*;
    pub use crate::catalog::*;
    pub use crate::evaluator::*;
    pub use crate::format::*;
    pub use crate::loader::*;
    pub use crate::pot::*;
    pub use crate::requirement::*;
    pub use crate::resolver::*;
    pub use crate::search::*;
    pub use crate::selection::*;
    pub use crate::suggest::*;
}

pub use prelude::*;
