use anyhow::Result;
use std::collections::BTreeSet;

use price_tally_core::models::PriceRecord;
use price_tally_core::tracker::Tracker;

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;

/// Run the items command: list every catalog item with its price count
/// and tags.
pub async fn run_items(config: &Config, json: bool) -> Result<()> {
    let pool = db::connect(config).await?;
    let tracker = Tracker::new(SqliteStore::new(pool.clone()));
    let catalog = tracker.load().await?;

    if json {
        let items: Vec<serde_json::Value> = catalog
            .items()
            .map(|name| {
                let records = catalog.get(name).unwrap_or(&[]);
                serde_json::json!({
                    "name": name,
                    "prices": records.len(),
                    "tags": item_tags(records),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        pool.close().await;
        return Ok(());
    }

    if catalog.is_empty() {
        println!("No items.");
        pool.close().await;
        return Ok(());
    }

    println!("{:<28} {:>6}   {}", "ITEM", "PRICES", "TAGS");
    println!("{}", "-".repeat(64));
    for name in catalog.items() {
        let records = catalog.get(name).unwrap_or(&[]);
        println!(
            "{:<28} {:>6}   {}",
            name,
            records.len(),
            item_tags(records).join(", ")
        );
    }

    pool.close().await;
    Ok(())
}

/// The deduplicated tags across one item's records, in sorted order.
fn item_tags(records: &[PriceRecord]) -> Vec<String> {
    let tags: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.tags().iter().map(String::as_str))
        .collect();
    tags.into_iter().map(str::to_string).collect()
}
