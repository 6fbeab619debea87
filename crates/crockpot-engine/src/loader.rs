//! Catalog asset loading.
//!
//! This module provides:
//! - Loading ingredients and recipes from assets/catalog/*.toml (or *.ron)
//! - Schema version checks per file
//! - Validation of the assembled catalog
//!
//! Any malformed file fails the whole load. Nothing is skipped.

use std::fs;
use std::path::{Path, PathBuf};

use crockpot_common::{CatalogError, MalformedVersion, RecipeId, SchemaVersion};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::{Catalog, Ingredient, Recipe};
use crate::requirement::Requirement;

/// Default asset path for catalog files.
pub const DEFAULT_CATALOG_PATH: &str = "assets/catalog";

/// Errors that can occur during catalog loading.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// File or directory not found.
    #[error("Catalog path not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read file.
    #[error("Failed to read catalog file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML.
    #[error("Failed to parse catalog TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to parse RON.
    #[error("Failed to parse catalog RON: {0}")]
    RonError(#[from] ron::error::SpannedError),

    /// File extension is neither `toml` nor `ron`.
    #[error("Unsupported catalog file: {0}")]
    UnsupportedFormat(PathBuf),

    /// The `version` field could not be parsed.
    #[error(transparent)]
    MalformedVersion(#[from] MalformedVersion),

    /// The file was written for an incompatible schema.
    #[error("Catalog schema mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Version this build reads
        expected: SchemaVersion,
        /// Version declared by the file
        actual: SchemaVersion,
    },

    /// The assembled catalog is inconsistent.
    #[error("Invalid catalog: {0}")]
    Invalid(#[from] CatalogError),
}

/// Result type for catalog loading operations.
pub type CatalogLoadResult<T> = Result<T, CatalogLoadError>;

/// Serialization format of a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// TOML
    Toml,
    /// Rusty Object Notation
    Ron,
}

impl CatalogFormat {
    /// Detects the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "ron" => Some(Self::Ron),
            _ => None,
        }
    }
}

/// The dish produced when no recipe qualifies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FallbackDish {
    /// Recipe id.
    pub id: RecipeId,
    /// Display name.
    pub name: String,
    /// Health restored.
    #[serde(default)]
    pub health: f32,
    /// Hunger restored.
    #[serde(default)]
    pub hunger: f32,
    /// Sanity restored.
    #[serde(default)]
    pub sanity: f32,
    /// Time until spoiled.
    #[serde(default)]
    pub perish: Option<u32>,
    /// Cook time multiplier.
    #[serde(default = "default_cook_time")]
    pub cook_time: f32,
}

const fn default_cook_time() -> f32 {
    1.0
}

impl FallbackDish {
    /// Converts to a recipe that never qualifies on its own.
    #[must_use]
    pub fn into_recipe(self) -> Recipe {
        Recipe {
            health: self.health,
            hunger: self.hunger,
            sanity: self.sanity,
            perish: self.perish,
            cook_time: self.cook_time,
            ..Recipe::new(self.id, self.name, i32::MIN, Requirement::any(Vec::new()))
        }
    }
}

/// Contents of one catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    /// File format version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Fallback dish, defined in exactly one file.
    #[serde(default)]
    pub fallback: Option<FallbackDish>,
    /// Ingredients in this file.
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Recipes in this file.
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

fn default_version() -> String {
    SchemaVersion::CATALOG.to_string()
}

impl CatalogFile {
    /// Parses file contents.
    pub fn parse(content: &str, format: CatalogFormat) -> CatalogLoadResult<Self> {
        let file: Self = match format {
            CatalogFormat::Toml => toml::from_str(content)?,
            CatalogFormat::Ron => ron::from_str(content)?,
        };
        let actual: SchemaVersion = file.version.parse()?;
        if !SchemaVersion::CATALOG.is_compatible_with(&actual) {
            return Err(CatalogLoadError::VersionMismatch {
                expected: SchemaVersion::CATALOG,
                actual,
            });
        }
        Ok(file)
    }
}

/// Statistics for the catalog loader.
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogLoaderStats {
    /// Number of files loaded.
    pub files_loaded: u32,
    /// Number of ingredients loaded.
    pub ingredients_loaded: u32,
    /// Number of recipes loaded.
    pub recipes_loaded: u32,
}

/// Collects catalog files and assembles a [`Catalog`].
///
/// Files are read in file name order, and entries keep their order within
/// each file. That order is the catalog's declaration order.
#[derive(Debug)]
pub struct CatalogLoader {
    base_path: PathBuf,
    ingredients: Vec<Ingredient>,
    recipes: Vec<Recipe>,
    fallback: Option<FallbackDish>,
    stats: CatalogLoaderStats,
}

impl CatalogLoader {
    /// Creates a new catalog loader.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        debug!("Initializing catalog loader at: {:?}", base_path);

        Self {
            base_path,
            ingredients: Vec::new(),
            recipes: Vec::new(),
            fallback: None,
            stats: CatalogLoaderStats::default(),
        }
    }

    /// Creates a loader with default path.
    #[must_use]
    pub fn with_default_path() -> Self {
        Self::new(DEFAULT_CATALOG_PATH)
    }

    /// Returns the base path.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns loader statistics.
    #[must_use]
    pub fn stats(&self) -> &CatalogLoaderStats {
        &self.stats
    }

    /// Loads every catalog file under the base path.
    ///
    /// The base path may also be a single file.
    pub fn load_all(&mut self) -> CatalogLoadResult<()> {
        if !self.base_path.exists() {
            return Err(CatalogLoadError::NotFound(self.base_path.clone()));
        }
        if self.base_path.is_file() {
            let path = self.base_path.clone();
            return self.load_file(&path);
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&self.base_path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        for path in paths {
            if CatalogFormat::from_path(&path).is_some() {
                self.load_file(&path)?;
            } else {
                debug!("Skipping non-catalog file: {:?}", path);
            }
        }

        info!(
            "Loaded {} ingredients and {} recipes from {} files",
            self.stats.ingredients_loaded, self.stats.recipes_loaded, self.stats.files_loaded
        );
        Ok(())
    }

    /// Loads entries from a single file.
    pub fn load_file(&mut self, path: &Path) -> CatalogLoadResult<()> {
        debug!("Loading catalog file: {:?}", path);

        let format = CatalogFormat::from_path(path)
            .ok_or_else(|| CatalogLoadError::UnsupportedFormat(path.to_path_buf()))?;
        let content = fs::read_to_string(path)?;
        let file = CatalogFile::parse(&content, format)?;
        self.add_file(file)?;

        debug!("Loaded catalog file {:?}", path);
        Ok(())
    }

    /// Adds already parsed entries.
    pub fn add_file(&mut self, file: CatalogFile) -> CatalogLoadResult<()> {
        if let Some(fallback) = file.fallback {
            if self.fallback.is_some() {
                return Err(CatalogError::DuplicateFallback(fallback.id).into());
            }
            self.fallback = Some(fallback);
        }

        self.stats.files_loaded += 1;
        self.stats.ingredients_loaded += file.ingredients.len() as u32;
        self.stats.recipes_loaded += file.recipes.len() as u32;
        self.ingredients.extend(file.ingredients);
        self.recipes.extend(file.recipes);
        Ok(())
    }

    /// Validates everything loaded so far and builds the catalog.
    pub fn build(self) -> CatalogLoadResult<Catalog> {
        let fallback = self.fallback.ok_or(CatalogError::MissingFallback)?;
        let catalog = Catalog::new(self.ingredients, self.recipes, fallback.into_recipe())?;
        Ok(catalog)
    }
}

/// Loads and validates a catalog from a directory or a single file.
pub fn load_catalog(path: impl Into<PathBuf>) -> CatalogLoadResult<Catalog> {
    let mut loader = CatalogLoader::new(path);
    loader.load_all()?;
    loader.build()
}

/// Builds a catalog from in-memory file contents, in the given order.
pub fn parse_catalog(files: &[(&str, CatalogFormat)]) -> CatalogLoadResult<Catalog> {
    let mut loader = CatalogLoader::new(PathBuf::new());
    for (content, format) in files {
        loader.add_file(CatalogFile::parse(content, *format)?)?;
    }
    loader.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crockpot_common::Tag;
    use tempfile::TempDir;

    const INGREDIENTS: &str = r#"
version = "1.0.0"

[[ingredients]]
id = "carrot"
name = "Carrot"
hunger = 12.5
health = 1
perish = 7200
tags = ["veggie"]

[[ingredients]]
id = "carrot_cooked"
name = "Roasted Carrot"
hunger = 12.5
health = 3
tags = ["veggie"]
"#;

    const RECIPES: &str = r#"
[fallback]
id = "wetgoop"
name = "Wet Goop"
sanity = 0
cook_time = 0.25

[[recipes]]
id = "ratatouille"
name = "Ratatouille"
hunger = 25
priority = 0

[recipes.requirement]
type = "and"
all = [
    { type = "tag_count", tag = "veggie", cmp = "at_least", threshold = 1 },
    { type = "tag_count", tag = "meat", cmp = "none" },
]
"#;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).expect("write");
    }

    #[test]
    fn test_load_directory() {
        let dir = TempDir::new().expect("tempdir");
        write(&dir, "ingredients.toml", INGREDIENTS);
        write(&dir, "recipes.toml", RECIPES);
        write(&dir, "README.md", "not a catalog");

        let mut loader = CatalogLoader::new(dir.path());
        loader.load_all().expect("load");
        assert_eq!(loader.stats().files_loaded, 2);
        assert_eq!(loader.stats().ingredients_loaded, 2);
        assert_eq!(loader.stats().recipes_loaded, 1);

        let catalog = loader.build().expect("build");
        let carrot = catalog.ingredients().get("carrot").expect("carrot");
        assert!(carrot.has_tag(Tag::Veggie));
        assert_eq!(carrot.perish, Some(7200));
        assert_eq!(
            catalog.ingredients().cooked_form("carrot").map(|i| i.name.as_str()),
            Some("Roasted Carrot")
        );
        assert_eq!(catalog.recipes().fallback().name, "Wet Goop");
        assert!((catalog.recipes().fallback().cook_time - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_load_single_file() {
        let dir = TempDir::new().expect("tempdir");
        write(&dir, "all.toml", &format!("{INGREDIENTS}\n{RECIPES}"));
        let catalog = load_catalog(dir.path().join("all.toml")).expect("load");
        assert_eq!(catalog.recipes().len(), 1);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().expect("tempdir");
        let result = load_catalog(dir.path().join("nope"));
        assert!(matches!(result, Err(CatalogLoadError::NotFound(_))));
    }

    #[test]
    fn test_unknown_tag_fails_load() {
        let broken = INGREDIENTS.replace("\"veggie\"]\n\n", "\"spicy\"]\n\n");
        let result = parse_catalog(&[(&broken, CatalogFormat::Toml), (RECIPES, CatalogFormat::Toml)]);
        assert!(matches!(result, Err(CatalogLoadError::ParseError(_))));
    }

    #[test]
    fn test_unknown_field_fails_load() {
        let broken = INGREDIENTS.replace("hunger = 12.5\nhealth = 1", "hunger = 12.5\nflavor = 1");
        let result = parse_catalog(&[(&broken, CatalogFormat::Toml)]);
        assert!(matches!(result, Err(CatalogLoadError::ParseError(_))));
    }

    #[test]
    fn test_version_mismatch() {
        let newer = INGREDIENTS.replace("1.0.0", "2.0.0");
        let result = CatalogFile::parse(&newer, CatalogFormat::Toml);
        assert!(matches!(
            result,
            Err(CatalogLoadError::VersionMismatch { .. })
        ));

        let garbage = INGREDIENTS.replace("1.0.0", "one");
        let result = CatalogFile::parse(&garbage, CatalogFormat::Toml);
        assert!(matches!(result, Err(CatalogLoadError::MalformedVersion(_))));
    }

    #[test]
    fn test_missing_fallback() {
        let result = parse_catalog(&[(INGREDIENTS, CatalogFormat::Toml)]);
        assert!(matches!(
            result,
            Err(CatalogLoadError::Invalid(CatalogError::MissingFallback))
        ));
    }

    #[test]
    fn test_duplicate_fallback() {
        let result = parse_catalog(&[
            (INGREDIENTS, CatalogFormat::Toml),
            (RECIPES, CatalogFormat::Toml),
            (RECIPES, CatalogFormat::Toml),
        ]);
        assert!(matches!(
            result,
            Err(CatalogLoadError::Invalid(CatalogError::DuplicateFallback(_)))
        ));
    }

    #[test]
    fn test_unknown_recipe_ingredient_fails_load() {
        let recipes = RECIPES.replace(
            "{ type = \"tag_count\", tag = \"meat\", cmp = \"none\" },",
            "{ type = \"ingredient_count\", ingredients = [\"unicorn\"], cmp = \"at_least\", threshold = 1 },",
        );
        let result = parse_catalog(&[(INGREDIENTS, CatalogFormat::Toml), (&recipes, CatalogFormat::Toml)]);
        assert!(matches!(
            result,
            Err(CatalogLoadError::Invalid(CatalogError::UnknownIngredient { .. }))
        ));
    }

    #[test]
    fn test_ron_catalog() {
        let ron_content = r#"(
    version: "1.0.0",
    fallback: Some((id: "wetgoop", name: "Wet Goop")),
    ingredients: [
        (id: "berries", name: "Berries", hunger: 9.375, tags: [fruit]),
    ],
    recipes: [
        (
            id: "jammypreserves",
            name: "Fist Full of Jam",
            requirement: {"type": "tag_count", "tag": "fruit", "cmp": "at_least", "threshold": 1},
        ),
    ],
)"#;
        let dir = TempDir::new().expect("tempdir");
        write(&dir, "catalog.ron", ron_content);
        let catalog = load_catalog(dir.path()).expect("load");
        assert!(catalog.ingredients().get("berries").expect("berries").has_tag(Tag::Fruit));
        assert_eq!(catalog.recipes().len(), 1);
    }

    #[test]
    fn test_unsupported_file() {
        let dir = TempDir::new().expect("tempdir");
        write(&dir, "catalog.json", "{}");
        let mut loader = CatalogLoader::new(dir.path());
        let result = loader.load_file(&dir.path().join("catalog.json"));
        assert!(matches!(result, Err(CatalogLoadError::UnsupportedFormat(_))));
    }
}
