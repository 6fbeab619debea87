//! CLI configuration.
//!
//! Settings for the catalog location, default game modes, the resolver cache
//! and search bounds. Loaded from and saved to a TOML file.

use crockpot_common::GameModes;
use crockpot_engine::{SearchOptions, DEFAULT_CACHE_CAPACITY, DEFAULT_CATALOG_PATH};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Configuration file name.
pub const CONFIG_FILE: &str = "crockpot.toml";

/// CLI configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrockpotConfig {
    // === Catalog ===
    /// Directory (or single file) holding the catalog
    pub catalog_dir: PathBuf,
    /// Game modes enabled when `--modes` is not given
    pub modes: GameModes,

    // === Resolver ===
    /// Cached resolver results (0 = disabled)
    pub cache_capacity: usize,

    // === Search ===
    /// Disjunctive branches tried per recipe
    pub max_branches: usize,
    /// Candidates scanned per clause
    pub max_candidates_per_clause: usize,
    /// Fill every slot of a combination when possible
    pub pad_to_full_pot: bool,
    /// Pools up to this size are enumerated in full for missed recipes
    pub exhaustive_pool_limit: usize,

    // === Logging ===
    /// Default `tracing` filter directive when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for CrockpotConfig {
    fn default() -> Self {
        let search = SearchOptions::default();
        Self {
            catalog_dir: PathBuf::from(DEFAULT_CATALOG_PATH),
            modes: GameModes::default(),

            cache_capacity: DEFAULT_CACHE_CAPACITY,

            max_branches: search.max_branches,
            max_candidates_per_clause: search.max_candidates_per_clause,
            pad_to_full_pot: search.pad_to_full_pot,
            exhaustive_pool_limit: search.exhaustive_pool_limit,

            log_filter: "crockpot=info".to_string(),
        }
    }
}

impl CrockpotConfig {
    /// Load configuration from a specific path.
    ///
    /// Returns `Ok(None)` if the file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(Some(config))
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Clamp values to sensible ranges.
    pub fn validate(&mut self) {
        self.cache_capacity = self.cache_capacity.min(1 << 20);
        self.max_branches = self.max_branches.clamp(1, 4096);
        self.max_candidates_per_clause = self.max_candidates_per_clause.clamp(1, 65_536);
        self.exhaustive_pool_limit = self.exhaustive_pool_limit.min(32);
        if self.log_filter.trim().is_empty() {
            self.log_filter = Self::default().log_filter;
        }
    }

    /// Search bounds as engine options.
    #[must_use]
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            max_branches: self.max_branches,
            max_candidates_per_clause: self.max_candidates_per_clause,
            pad_to_full_pot: self.pad_to_full_pot,
            exhaustive_pool_limit: self.exhaustive_pool_limit,
        }
    }
}
