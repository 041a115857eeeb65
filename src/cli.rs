use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::database::DEFAULT_DATABASE_URL;
use crate::models::Difficulty;
use crate::scaling::RoundingTiers;

#[derive(Debug, Parser)]
#[command(name = "foodchief", version, about = "Browse, scale and manage recipes")]
pub struct Cli {
    /// SQLite database holding the recipes
    #[arg(
        long,
        global = true,
        env = "FOODCHIEF_DATABASE_URL",
        default_value = DEFAULT_DATABASE_URL
    )]
    pub database_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rescale one ingredient quantity; no database needed
    Scale {
        /// Quantity as written, e.g. "250g" or "1/2 tasse"
        quantity: String,
        /// Servings the quantity was written for
        from: u32,
        /// Servings to scale to
        to: u32,
        #[command(flatten)]
        rounding: RoundingArgs,
    },

    #[command(flatten)]
    Store(StoreCommand),
}

/// Commands that work on the recipe store
#[derive(Debug, Subcommand)]
pub enum StoreCommand {
    /// Create the database and apply migrations
    Migrate,
    /// List recipes, newest first
    List {
        /// Only recipes whose title or description contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Facile, Moyen or Difficile
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
        /// Only favorites
        #[arg(long)]
        favorites: bool,
    },
    /// Print a recipe, optionally for another number of servings
    Show {
        id: i64,
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        servings: Option<u32>,
        #[command(flatten)]
        rounding: RoundingArgs,
    },
    /// Interactive recipe view with a servings control
    View {
        id: i64,
        #[command(flatten)]
        rounding: RoundingArgs,
    },
    /// Add a recipe to favorites, or remove it
    Favorite { id: i64 },
    /// Delete a recipe
    Delete { id: i64 },
    /// Import recipes from a JSON file
    Seed { path: PathBuf },
}

#[derive(Debug, Clone, Copy, Args)]
pub struct RoundingArgs {
    /// Scaled values below this keep two decimals
    #[arg(long, default_value_t = 1.0)]
    pub small_below: f64,
    /// Scaled values below this keep one decimal; larger ones are rounded
    #[arg(long, default_value_t = 10.0)]
    pub medium_below: f64,
}

impl From<RoundingArgs> for RoundingTiers {
    fn from(args: RoundingArgs) -> Self {
        RoundingTiers {
            small_below: args.small_below,
            medium_below: args.medium_below,
            ..RoundingTiers::default()
        }
    }
}
