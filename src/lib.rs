//! # Price Tally
//!
//! A branch-aware grocery price tracker with unit-price search.
//!
//! Price Tally keeps one spreadsheet-shaped database of grocery items, the
//! branches (shops) you compare, and the shelf prices you record there.
//! Every price is normalized to a unit price so differently sized packs
//! compare directly, and search always puts the cheapest observations
//! first.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌───────────┐
//! │    Sheet     │──▶│   Catalog    │──▶│  Search    │
//! │ rows+header  │   │ records/item │   │ rank+tags  │
//! └──────┬───────┘   └──────────────┘   └─────┬─────┘
//!        │                                    │
//!   ┌────┴─────┐                   ┌──────────┤
//!   ▼          ▼                   ▼          ▼
//! ┌────────┐ ┌────────┐       ┌────────┐ ┌────────┐
//! │ SQLite │ │ Memory │       │  CLI   │ │  HTTP  │
//! │ store  │ │ store  │       │(tally) │ │ (JSON) │
//! └────────┘ └────────┘       └────────┘ └────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! tally init                    # create database
//! tally add-branch Aldi         # register a shop
//! tally add-item Milk --size 1000 --denominator 100 --unit ml --tag dairy
//! tally set-price Milk Aldi 1.20
//! tally search Milk             # cheapest first
//! tally serve                   # start HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations and header seeding |
//! | [`sqlite_store`] | SQLite-backed sheet store |
//! | [`display`] | Price and unit-price formatting |
//! | [`items`] | `tally items` command |
//! | [`tags`] | `tally tags` command |
//! | [`search`] | `tally search` command |
//! | [`show`] | `tally show` command |
//! | [`stats`] | `tally stats` command |
//! | [`edit`] | Sheet mutation commands |
//! | [`server`] | JSON HTTP server |

pub mod config;
pub mod db;
pub mod display;
pub mod edit;
pub mod items;
pub mod migrate;
pub mod search;
pub mod server;
pub mod show;
pub mod sqlite_store;
pub mod stats;
pub mod tags;
