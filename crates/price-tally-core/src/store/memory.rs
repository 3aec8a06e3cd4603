//! In-memory [`SheetStore`] implementation for testing.
//!
//! Rows live in a `Vec` behind `std::sync::RwLock`. The store also
//! counts reads and writes, so tests can assert that a rejected
//! mutation issued a read but no write.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;

use super::SheetStore;

/// In-memory store for tests and the reference backend.
pub struct MemoryStore {
    rows: RwLock<Vec<Vec<String>>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// An empty store. Note that an empty row set has no header row; a
    /// usable sheet is seeded with [`MemoryStore::with_rows`].
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// A store holding the given rows.
    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: RwLock::new(rows),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of `read_all` calls served so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    /// Number of `replace_all` calls served so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SheetStore for MemoryStore {
    async fn read_all(&self) -> Result<Vec<Vec<String>>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(self.rows.read().unwrap().clone())
    }

    async fn replace_all(&self, rows: &[Vec<String>]) -> Result<()> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        *self.rows.write().unwrap() = rows.to_vec();
        Ok(())
    }
}
