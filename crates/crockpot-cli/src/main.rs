//! # Crockpot
//!
//! Command line crock pot calculator.
//!
//! Commands:
//! - `cook`: what a pot produces, plus single-ingredient suggestions
//! - `discover`: a combination for every recipe reachable from a pool
//! - `recipes`: recipe table with requirement strings
//! - `ingredients`: ingredient table, filterable by tag
//! - `config`: print or save the effective configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crockpot_common::{GameModes, Tag};
use crockpot_engine::{load_catalog, CrockPot};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{CrockpotConfig, CONFIG_FILE};

#[derive(Parser)]
#[command(name = "crockpot")]
#[command(about = "Crock pot recipe calculator")]
#[command(version)]
struct Cli {
    /// Catalog file or directory (default: from config)
    #[arg(long, global = true, env = "CROCKPOT_CATALOG")]
    catalog: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true, env = "CROCKPOT_CONFIG", default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Enabled game modes, comma separated (e.g. vanilla,giants)
    #[arg(long, global = true)]
    modes: Option<GameModes>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what a pot of up to four ingredients produces
    Cook {
        /// Ingredient ids, repeats allowed
        ingredients: Vec<String>,
    },

    /// Find a combination for every recipe reachable from known ingredients
    Discover {
        /// Discovered ingredient ids
        #[arg(required_unless_present = "all")]
        ingredients: Vec<String>,

        /// Use every ingredient in the catalog
        #[arg(long)]
        all: bool,

        /// Recipe ids to leave out of the results
        #[arg(long)]
        exclude: Vec<String>,
    },

    /// List recipes
    Recipes {
        /// Filter by name
        #[arg(long)]
        search: Option<String>,
    },

    /// List ingredients
    Ingredients {
        /// Only ingredients carrying this tag
        #[arg(long)]
        tag: Option<Tag>,

        /// Filter by name
        #[arg(long)]
        search: Option<String>,
    },

    /// Print the effective configuration
    Config {
        /// Write it to the config file
        #[arg(long)]
        save: bool,
    },
}

/// Main entry point.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = CrockpotConfig::load_from(&cli.config);
    let mut config = loaded.as_ref().ok().cloned().flatten().unwrap_or_default();
    config.validate();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log_filter))?,
        )
        .init();

    info!("Crockpot {}", env!("CARGO_PKG_VERSION"));
    match loaded {
        Ok(Some(_)) => info!("Loaded config from {}", cli.config.display()),
        Ok(None) => info!("Config file not found, using defaults"),
        Err(e) => warn!("{e:#}, using defaults"),
    }

    if let Commands::Config { save } = cli.command {
        if save {
            config
                .save_to(&cli.config)
                .with_context(|| format!("Failed to save config to {}", cli.config.display()))?;
        }
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let catalog_path = cli.catalog.unwrap_or_else(|| config.catalog_dir.clone());
    let catalog = load_catalog(catalog_path.clone())
        .with_context(|| format!("Failed to load catalog from {}", catalog_path.display()))?;
    let pot = CrockPot::new(Arc::new(catalog))
        .with_cache(config.cache_capacity)
        .with_search_options(config.search_options());
    let modes = cli.modes.unwrap_or(config.modes);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = match cli.command {
        Commands::Cook { ingredients } => {
            commands::cook(&pot, &ingredients, modes, cli.json, &mut out)
        },
        Commands::Discover {
            ingredients,
            all,
            exclude,
        } => commands::discover(&pot, &ingredients, all, &exclude, modes, cli.json, &mut out),
        Commands::Recipes { search } => {
            commands::recipes(pot.catalog(), search.as_deref(), modes, cli.json, &mut out)
        },
        Commands::Ingredients { tag, search } => commands::ingredients(
            pot.catalog(),
            tag,
            search.as_deref(),
            modes,
            cli.json,
            &mut out,
        ),
        Commands::Config { .. } => Ok(()),
    };
    outcome.map_err(anyhow::Error::from)
}
