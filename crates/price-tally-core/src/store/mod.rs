//! Storage abstraction for the price sheet.
//!
//! The [`SheetStore`] trait is deliberately tiny: the dataset is one
//! small sheet, so the store reads and replaces it whole. There is no
//! row-level addressing, no partial update, and no retry layer; an I/O
//! failure propagates to the caller unchanged.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

/// Whole-sheet storage backend.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`read_all`](SheetStore::read_all) | Fetch every row, header first |
/// | [`replace_all`](SheetStore::replace_all) | Atomically swap in a new row set |
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Fetch the full row set, header row first.
    async fn read_all(&self) -> Result<Vec<Vec<String>>>;

    /// Replace the full row set. Readers observe either the old sheet
    /// or the new one, never a mixture.
    async fn replace_all(&self, rows: &[Vec<String>]) -> Result<()>;
}
