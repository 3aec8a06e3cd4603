//! SQLite-backed [`SheetStore`] implementation.
//!
//! Persists the sheet as one database row per sheet row, with the cell
//! vector serialized as JSON and ordered by position.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use price_tally_core::store::SheetStore;

/// SQLite implementation of the [`SheetStore`] trait.
///
/// Wraps a [`SqlitePool`]. Reads return every row of the `sheet_rows`
/// table in position order; writes replace the whole table inside a
/// single transaction.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[allow(dead_code)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl SheetStore for SqliteStore {
    async fn read_all(&self) -> Result<Vec<Vec<String>>> {
        let rows = sqlx::query("SELECT cells FROM sheet_rows ORDER BY pos ASC")
            .fetch_all(&self.pool)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (pos, row) in rows.iter().enumerate() {
            let cells: String = row.get("cells");
            let cells: Vec<String> = serde_json::from_str(&cells)
                .with_context(|| format!("Failed to decode sheet row at position {}", pos))?;
            out.push(cells);
        }

        Ok(out)
    }

    async fn replace_all(&self, rows: &[Vec<String>]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM sheet_rows")
            .execute(&mut *tx)
            .await?;

        for (pos, row) in rows.iter().enumerate() {
            let cells = serde_json::to_string(row)?;
            sqlx::query("INSERT INTO sheet_rows (pos, cells) VALUES (?, ?)")
                .bind(pos as i64)
                .bind(&cells)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
