use anyhow::Result;

use price_tally_core::models::PriceRecord;
use price_tally_core::search;
use price_tally_core::tracker::Tracker;

use crate::config::Config;
use crate::db;
use crate::display;
use crate::sqlite_store::SqliteStore;

/// Run the search command: filter the catalog by item name and tags,
/// then print the cheapest observations ahead of the rest.
pub async fn run_search(
    config: &Config,
    item: Option<String>,
    tags: Vec<String>,
    json: bool,
) -> Result<()> {
    let pool = db::connect(config).await?;
    let tracker = Tracker::new(SqliteStore::new(pool.clone()));
    let catalog = tracker.load().await?;

    let item = item.unwrap_or_default();
    let ranking = search::search(&catalog, &item, &tags);

    if json {
        println!("{}", serde_json::to_string_pretty(&ranking)?);
        pool.close().await;
        return Ok(());
    }

    if ranking.cheapest.is_empty() {
        println!("No results.");
        pool.close().await;
        return Ok(());
    }

    let currency = &config.display.currency;

    println!("Cheapest Options");
    println!("================");
    for record in &ranking.cheapest {
        print_result(currency, record);
    }

    if !ranking.others.is_empty() {
        println!();
        println!("Other Options");
        println!("=============");
        for record in &ranking.others {
            print_result(currency, record);
        }
    }

    pool.close().await;
    Ok(())
}

fn print_result(currency: &str, record: &PriceRecord) {
    let label = format!("{} - {}", record.name(), record.branch());
    println!(
        "{:<32} {:<18} {}",
        label,
        display::format_unit_price(currency, record),
        display::format_detail(currency, record)
    );
}
