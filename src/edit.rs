//! Sheet mutation commands: add items, add branches, set and clear
//! prices.
//!
//! Every mutation validates against the loaded sheet before anything is
//! written back, so a rejected command leaves the database untouched.

use anyhow::Result;

use price_tally_core::models::NewItem;
use price_tally_core::tracker::Tracker;

use crate::config::Config;
use crate::db;
use crate::display;
use crate::sqlite_store::SqliteStore;

pub async fn run_add_item(
    config: &Config,
    name: String,
    tags: Vec<String>,
    size: f64,
    denominator: u32,
    unit: String,
) -> Result<()> {
    let pool = db::connect(config).await?;
    let tracker = Tracker::new(SqliteStore::new(pool.clone()));

    let item = NewItem {
        name,
        tags,
        size,
        denominator,
        unit,
    };
    tracker.add_item(&item).await?;

    println!("Added item: {}", item.name.trim());
    pool.close().await;
    Ok(())
}

pub async fn run_add_branch(config: &Config, name: String) -> Result<()> {
    let pool = db::connect(config).await?;
    let tracker = Tracker::new(SqliteStore::new(pool.clone()));

    tracker.add_branch(&name).await?;

    println!("Added branch: {}", name.trim());
    pool.close().await;
    Ok(())
}

pub async fn run_set_price(
    config: &Config,
    item: String,
    branch: String,
    price: f64,
) -> Result<()> {
    let pool = db::connect(config).await?;
    let tracker = Tracker::new(SqliteStore::new(pool.clone()));

    tracker.set_price(&item, &branch, Some(price)).await?;

    // Echo the unit price the new observation normalizes to
    let catalog = tracker.load().await?;
    let record = catalog
        .get(item.trim())
        .and_then(|group| group.iter().find(|r| r.branch() == branch.trim()));

    match record {
        Some(record) => println!(
            "Set {} at {}: {}",
            record.name(),
            record.branch(),
            display::format_unit_price(&config.display.currency, record)
        ),
        None => println!("Set {} at {}.", item.trim(), branch.trim()),
    }

    pool.close().await;
    Ok(())
}

pub async fn run_clear_price(config: &Config, item: String, branch: String) -> Result<()> {
    let pool = db::connect(config).await?;
    let tracker = Tracker::new(SqliteStore::new(pool.clone()));

    tracker.set_price(&item, &branch, None).await?;

    println!("Cleared {} at {}.", item.trim(), branch.trim());
    pool.close().await;
    Ok(())
}
