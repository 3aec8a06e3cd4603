//! # Price Tally Core
//!
//! Pure domain logic for Price Tally: price records and unit-price
//! normalization, the sheet model and its mutations, the item catalog,
//! tag search and cheapest-option ranking, and the storage abstraction.
//!
//! This crate contains no tokio, sqlx, filesystem I/O, or other
//! native-only dependencies. All I/O happens in the application crate
//! behind the [`store::SheetStore`] trait.

pub mod catalog;
pub mod error;
pub mod models;
pub mod search;
pub mod sheet;
pub mod store;
pub mod tracker;
