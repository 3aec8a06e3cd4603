//! The tracker: one store client, constructed once, threaded through
//! every frontend.
//!
//! There is no ambient connection and no cache. Every operation does a
//! full read of the sheet; mutations validate against the in-memory
//! copy and only then write the full sheet back. A rejected mutation
//! therefore performs exactly one read and zero writes, and the store
//! never holds a half-applied change.
//!
//! Concurrent writers race last-writer-wins. For a single household
//! sheet that is the accepted tradeoff; the store trait leaves room for
//! a backend with stronger guarantees.

use anyhow::Result;

use crate::catalog::Catalog;
use crate::models::NewItem;
use crate::sheet::Sheet;
use crate::store::SheetStore;

/// Store client for reading the catalog and mutating the sheet.
pub struct Tracker<S> {
    store: S,
}

impl<S: SheetStore> Tracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read and parse the sheet.
    pub async fn load_sheet(&self) -> Result<Sheet> {
        let rows = self.store.read_all().await?;
        Ok(Sheet::from_rows(rows)?)
    }

    /// Read the sheet and build the record catalog.
    pub async fn load(&self) -> Result<Catalog> {
        let sheet = self.load_sheet().await?;
        Ok(Catalog::from_sheet(&sheet)?)
    }

    /// Append an item row and persist the sheet.
    pub async fn add_item(&self, item: &NewItem) -> Result<()> {
        let mut sheet = self.load_sheet().await?;
        sheet.add_item(item)?;
        self.store.replace_all(&sheet.to_rows()).await
    }

    /// Append a branch column and persist the sheet.
    pub async fn add_branch(&self, name: &str) -> Result<()> {
        let mut sheet = self.load_sheet().await?;
        sheet.add_branch(name)?;
        self.store.replace_all(&sheet.to_rows()).await
    }

    /// Write (`Some`) or clear (`None`) one price cell and persist the
    /// sheet.
    pub async fn set_price(&self, item: &str, branch: &str, price: Option<f64>) -> Result<()> {
        let mut sheet = self.load_sheet().await?;
        sheet.set_price(item, branch, price)?;
        self.store.replace_all(&sheet.to_rows()).await
    }
}
