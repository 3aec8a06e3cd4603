//! Query filtering and cheapest-option ranking.
//!
//! A query has two optional parts: an item name and a set of required
//! tags. Both empty is the identity filter, so a bare query ranks the
//! whole catalog.
//!
//! # Semantics
//!
//! - A non-empty item name restricts the scan to that item's group; an
//!   unknown name yields an empty result, never an error.
//! - Tags combine with AND: a record survives only if it carries every
//!   required tag. Required tags are trimmed and deduplicated first, so
//!   `noodles, noodles` means `noodles` and blank entries are ignored.
//! - Ranking partitions by unit price: `cheapest` holds every record
//!   whose unit price equals the exact minimum (ties share the win),
//!   `others` holds the rest. Both keep the filtered order, so ranking
//!   is deterministic and idempotent on its own output.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::models::PriceRecord;

/// A ranked query result: the cheapest records and everything else.
#[derive(Debug, Clone, Serialize)]
pub struct Ranking<'a> {
    /// Records tied at the minimum unit price, in filtered order.
    pub cheapest: Vec<&'a PriceRecord>,
    /// Remaining records, in filtered order.
    pub others: Vec<&'a PriceRecord>,
}

/// Select the records matching an item name and required tags.
///
/// An empty `item` scans every group; empty `tags` keeps everything in
/// scope. Output order is catalog order.
pub fn filter<'a>(catalog: &'a Catalog, item: &str, tags: &[String]) -> Vec<&'a PriceRecord> {
    let item = item.trim();
    let required: BTreeSet<&str> = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    let required: Vec<&str> = required.into_iter().collect();

    let records: Vec<&PriceRecord> = if item.is_empty() {
        catalog.records().collect()
    } else {
        match catalog.get(item) {
            Some(group) => group.iter().collect(),
            None => return Vec::new(),
        }
    };

    records
        .into_iter()
        .filter(|r| r.has_all_tags(&required))
        .collect()
}

/// Partition records into the cheapest tier and the rest.
///
/// The minimum is the exact `f64` minimum of the unit prices; every
/// record equal to it lands in `cheapest`. An empty input produces an
/// empty ranking.
pub fn rank(records: Vec<&PriceRecord>) -> Ranking<'_> {
    let min = records
        .iter()
        .map(|r| r.unit_price())
        .fold(f64::INFINITY, f64::min);
    let (cheapest, others) = records.into_iter().partition(|r| r.unit_price() == min);
    Ranking { cheapest, others }
}

/// Filter then rank, the full query pipeline.
pub fn search<'a>(catalog: &'a Catalog, item: &str, tags: &[String]) -> Ranking<'a> {
    rank(filter(catalog, item, tags))
}
