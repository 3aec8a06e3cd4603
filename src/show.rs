use anyhow::Result;

use price_tally_core::tracker::Tracker;

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;

/// Run the show command: dump the raw sheet as an aligned table.
pub async fn run_show(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    let tracker = Tracker::new(SqliteStore::new(pool.clone()));
    let sheet = tracker.load_sheet().await?;

    let rows = sheet.to_rows();
    let columns = rows.first().map(|h| h.len()).unwrap_or(0);

    // Column widths fit the widest cell
    let mut widths = vec![0usize; columns];
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    for (i, row) in rows.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", line.join("  ").trim_end());
        if i == 0 {
            let total = widths.iter().sum::<usize>() + 2 * columns.saturating_sub(1);
            println!("{}", "-".repeat(total));
        }
    }

    pool.close().await;
    Ok(())
}
