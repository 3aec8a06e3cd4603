//! Database statistics and health overview.
//!
//! Provides a quick summary of what's tracked: item counts, price
//! observation counts, and per-branch breakdowns. Used by `tally stats`
//! to give confidence that the sheet is growing as expected.

use anyhow::Result;
use std::collections::BTreeSet;

use price_tally_core::search;
use price_tally_core::tracker::Tracker;

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;

/// Per-branch breakdown of price observations.
struct BranchStats {
    branch: String,
    price_count: usize,
    cheapest_count: usize,
}

/// Run the stats command: load the catalog and print a summary.
pub async fn run_stats(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    let tracker = Tracker::new(SqliteStore::new(pool.clone()));
    let sheet = tracker.load_sheet().await?;
    let catalog = tracker.load().await?;

    let db_size = std::fs::metadata(&config.store.path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("Price Tally — Database Stats");
    println!("============================");
    println!();
    println!("  Database:    {}", config.store.path.display());
    println!("  Size:        {}", format_bytes(db_size));
    println!();
    println!("  Items:       {}", catalog.item_count());
    println!("  Records:     {}", catalog.record_count());
    println!("  Branches:    {}", sheet.branches().len());
    println!("  Tags:        {}", catalog.all_tags().len());

    // Per-branch breakdown
    let mut branch_stats: Vec<BranchStats> = sheet
        .branches()
        .iter()
        .map(|b| BranchStats {
            branch: b.clone(),
            price_count: 0,
            cheapest_count: 0,
        })
        .collect();

    for record in catalog.records() {
        if let Some(s) = branch_stats
            .iter_mut()
            .find(|s| s.branch == record.branch())
        {
            s.price_count += 1;
        }
    }

    // An item counts toward a branch when that branch is among its
    // cheapest observations
    for name in catalog.items() {
        let records = catalog.get(name).unwrap_or(&[]);
        let ranking = search::rank(records.iter().collect());
        let cheapest_branches: BTreeSet<&str> =
            ranking.cheapest.iter().map(|r| r.branch()).collect();
        for s in branch_stats.iter_mut() {
            if cheapest_branches.contains(s.branch.as_str()) {
                s.cheapest_count += 1;
            }
        }
    }

    if !branch_stats.is_empty() {
        println!();
        println!("  By branch:");
        println!("  {:<24} {:>6} {:>10}", "BRANCH", "PRICES", "CHEAPEST");
        println!("  {}", "-".repeat(44));

        for s in &branch_stats {
            println!(
                "  {:<24} {:>6} {:>10}",
                s.branch, s.price_count, s.cheapest_count
            );
        }
    }

    println!();

    pool.close().await;
    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
