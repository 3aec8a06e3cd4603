//! Domain error kinds for catalog loads and sheet mutations.
//!
//! Store I/O failures are not represented here; they propagate unchanged
//! as [`anyhow::Error`] from [`SheetStore`](crate::store::SheetStore)
//! implementations. Everything in [`TallyError`] is detectable before any
//! store write is issued, which is what keeps a rejected mutation from
//! leaving a half-written sheet behind.

use thiserror::Error;

/// A domain failure raised while parsing the sheet or validating a mutation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TallyError {
    /// A cell holds a value the catalog cannot use: a non-numeric size,
    /// denominator, or price, a zero or negative size, a zero denominator,
    /// or a negative price. Aborts the whole load; there is no partial
    /// catalog.
    #[error("invalid value {value:?} in column {column:?} for item {item:?}")]
    InvalidRecord {
        item: String,
        column: String,
        value: String,
    },

    /// Adding a branch whose trimmed name is already a branch column.
    #[error("branch {0:?} already exists")]
    DuplicateBranch(String),

    /// A required field was blank on a mutation.
    #[error("{0} must not be empty")]
    EmptyRequiredField(&'static str),

    /// A price mutation addressed an item with no sheet row. Queries never
    /// raise this; filtering on an absent item yields an empty result.
    #[error("no item named {0:?}")]
    ItemNotFound(String),

    /// A price mutation addressed a branch with no sheet column.
    #[error("no branch named {0:?}")]
    BranchNotFound(String),

    /// The raw row set is not a rectangular sheet: no header row, a header
    /// missing fixed columns, or a data row wider than the header.
    #[error("malformed sheet: {0}")]
    MalformedSheet(String),
}

impl TallyError {
    /// Shorthand for [`TallyError::InvalidRecord`].
    pub fn invalid(item: impl Into<String>, column: impl Into<String>, value: impl Into<String>) -> Self {
        TallyError::InvalidRecord {
            item: item.into(),
            column: column.into(),
            value: value.into(),
        }
    }
}
