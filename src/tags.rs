use anyhow::Result;

use price_tally_core::tracker::Tracker;

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;

/// Run the tags command: list every tag observed across the catalog.
pub async fn run_tags(config: &Config, json: bool) -> Result<()> {
    let pool = db::connect(config).await?;
    let tracker = Tracker::new(SqliteStore::new(pool.clone()));
    let catalog = tracker.load().await?;

    let tags: Vec<String> = catalog.all_tags().into_iter().collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
        pool.close().await;
        return Ok(());
    }

    if tags.is_empty() {
        println!("No tags.");
        pool.close().await;
        return Ok(());
    }

    for tag in &tags {
        println!("{}", tag);
    }

    pool.close().await;
    Ok(())
}
