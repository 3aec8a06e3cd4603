//! # Price Tally CLI (`tally`)
//!
//! The `tally` binary is the primary interface for Price Tally. It provides
//! commands for database initialization, catalog browsing, cheapest-option
//! search, sheet mutations, and starting the HTTP server.
//!
//! ## Usage
//!
//! ```bash
//! tally --config ./config/tally.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tally init` | Create the SQLite database and seed the sheet header |
//! | `tally items` | List items with price counts and tags |
//! | `tally tags` | List every tag in the catalog |
//! | `tally search [item]` | Rank observations by unit price, cheapest first |
//! | `tally show` | Dump the raw sheet as a table |
//! | `tally stats` | Show database statistics |
//! | `tally add-item <name>` | Append an item row |
//! | `tally add-branch <name>` | Append a branch column |
//! | `tally set-price <item> <branch> <price>` | Record a shelf price |
//! | `tally clear-price <item> <branch>` | Remove one price observation |
//! | `tally serve` | Start the JSON HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! # Initialize the database
//! tally init --config ./config/tally.toml
//!
//! # Record the shops you compare
//! tally add-branch Aldi
//! tally add-branch Tesco
//!
//! # Track an item and a price
//! tally add-item Milk --size 1000 --denominator 100 --unit ml --tag dairy
//! tally set-price Milk Aldi 1.20
//!
//! # Find the cheapest branch
//! tally search Milk
//!
//! # Narrow by tags (AND semantics)
//! tally search --tag noodles --tag japanese
//! ```

mod config;
mod db;
mod display;
mod edit;
mod items;
mod migrate;
mod search;
mod server;
mod show;
mod sqlite_store;
mod stats;
mod tags;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Generator, Shell};
use std::path::PathBuf;

/// Price Tally CLI — a branch-aware grocery price tracker.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/tally.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "tally",
    about = "Price Tally — a branch-aware grocery price tracker with unit-price search",
    version,
    long_about = "Price Tally keeps one spreadsheet-shaped database of grocery items, the \
    branches you shop at, and the shelf prices you record there. Every price is normalized \
    to a unit price (price × denominator ÷ size), so differently sized packs compare \
    directly and the cheapest branch is always one search away."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/tally.toml`. The database path, display
    /// currency, and server bind address are read from this file.
    #[arg(long, global = true, default_value = "./config/tally.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the sheet table, then seeds
    /// the fixed header row. This command is idempotent — running it
    /// multiple times is safe.
    Init,

    /// List every item with its price count and tags.
    Items {
        /// Print the item list as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List every tag observed across the catalog.
    Tags {
        /// Print the tag list as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Rank price observations by unit price, cheapest first.
    ///
    /// With an item name, only that item's observations are ranked.
    /// Without one, the whole catalog competes, which is how you ask
    /// "what is the cheapest anything matching these tags".
    Search {
        /// Item name to search for. Omit to search every item.
        item: Option<String>,

        /// Require this tag (repeatable; all given tags must match).
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Print the ranking as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Dump the raw sheet as an aligned table.
    Show,

    /// Show database statistics and a per-branch breakdown.
    Stats,

    /// Append an item row to the sheet.
    ///
    /// The item starts with no price observations; record them with
    /// `set-price`. Size and unit describe the pack the shelf price
    /// refers to, and the denominator picks the amount unit prices are
    /// quoted per (e.g. size 1000, unit ml, denominator 100 quotes
    /// per-100ml).
    AddItem {
        /// Item name (must be non-empty).
        name: String,

        /// Pack size in `--unit` units.
        #[arg(long)]
        size: f64,

        /// Amount the unit price is quoted per.
        #[arg(long, default_value_t = 1)]
        denominator: u32,

        /// Measurement unit (e.g. ml, g, eggs).
        #[arg(long)]
        unit: String,

        /// Tag the item (repeatable).
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Append a branch column to the sheet.
    AddBranch {
        /// Branch name (must be unique).
        name: String,
    },

    /// Record the shelf price of an item at a branch.
    SetPrice {
        /// Item name.
        item: String,

        /// Branch name.
        branch: String,

        /// Shelf price (0 is allowed, for freebies).
        price: f64,
    },

    /// Remove one price observation.
    ClearPrice {
        /// Item name.
        item: String,

        /// Branch name.
        branch: String,
    },

    /// Start the JSON HTTP server.
    ///
    /// Binds to the address configured in `[server].bind` and exposes
    /// the catalog and sheet mutations over HTTP.
    Serve,

    /// Generate shell completions for the `tally` binary.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn print_completions<G: Generator>(generator: G) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(generator, &mut command, name, &mut std::io::stdout());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Commands that don't require config
    if let Commands::Completions { shell } = &cli.command {
        print_completions(*shell);
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Items { json } => {
            items::run_items(&cfg, json).await?;
        }
        Commands::Tags { json } => {
            tags::run_tags(&cfg, json).await?;
        }
        Commands::Search { item, tags, json } => {
            search::run_search(&cfg, item, tags, json).await?;
        }
        Commands::Show => {
            show::run_show(&cfg).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
        Commands::AddItem {
            name,
            size,
            denominator,
            unit,
            tags,
        } => {
            edit::run_add_item(&cfg, name, tags, size, denominator, unit).await?;
        }
        Commands::AddBranch { name } => {
            edit::run_add_branch(&cfg, name).await?;
        }
        Commands::SetPrice {
            item,
            branch,
            price,
        } => {
            edit::run_set_price(&cfg, item, branch, price).await?;
        }
        Commands::ClearPrice { item, branch } => {
            edit::run_clear_price(&cfg, item, branch).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Completions { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
