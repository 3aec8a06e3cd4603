use anyhow::Result;
use price_tally_core::sheet::Sheet;
use price_tally_core::store::SheetStore;

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    // Create sheet_rows table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sheet_rows (
            pos INTEGER PRIMARY KEY,
            cells TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    // A fresh database must load as an empty sheet, so seed the header row
    let row_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sheet_rows")
        .fetch_one(&pool)
        .await?;

    if row_count == 0 {
        let store = SqliteStore::new(pool.clone());
        store.replace_all(&Sheet::empty().to_rows()).await?;
    }

    pool.close().await;
    Ok(())
}
