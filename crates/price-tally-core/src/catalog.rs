//! In-memory catalog of price records, grouped by item.
//!
//! [`Catalog::from_sheet`] turns a parsed [`Sheet`] into record groups:
//! one group per distinct item name, in first-seen row order. Within a
//! group, records follow row order, then branch-column order. An item
//! row with no observed prices still gets an empty group, so freshly
//! added items are listed before their first price arrives.
//!
//! Loading is all-or-nothing. Any unparseable `Size`, `Denominator`, or
//! price cell fails the whole load with [`TallyError::InvalidRecord`]
//! naming the item, the column, and the raw cell; there is no partial
//! catalog. A blank price cell is not an error, it is an absent
//! observation. Rows with a blank item name are ignored (spreadsheets
//! accumulate filler rows).

use std::collections::BTreeSet;

use crate::error::TallyError;
use crate::models::PriceRecord;
use crate::sheet::{Sheet, BRANCH_START, COL_DENOMINATOR, COL_ITEM, COL_OPTIONS, COL_SIZE, COL_UNIT};

/// Item-grouped price records parsed from one sheet.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    groups: Vec<(String, Vec<PriceRecord>)>,
}

impl Catalog {
    /// Parse every row of the sheet into grouped records.
    pub fn from_sheet(sheet: &Sheet) -> Result<Self, TallyError> {
        let branches = sheet.branches();
        let mut groups: Vec<(String, Vec<PriceRecord>)> = Vec::new();

        for row in sheet.data_rows() {
            let name = row[COL_ITEM].trim();
            if name.is_empty() {
                continue;
            }
            let tags = split_tags(&row[COL_OPTIONS]);
            let size = parse_f64_cell(name, "Size", &row[COL_SIZE])?;
            let denominator = parse_u32_cell(name, "Denominator", &row[COL_DENOMINATOR])?;
            let unit = row[COL_UNIT].as_str();

            let group = match groups.iter().position(|(n, _)| n == name) {
                Some(i) => i,
                None => {
                    groups.push((name.to_string(), Vec::new()));
                    groups.len() - 1
                }
            };

            for (branch, cell) in branches.iter().zip(&row[BRANCH_START..]) {
                let raw = cell.trim();
                if raw.is_empty() {
                    continue;
                }
                let price = parse_f64_cell(name, branch, cell)?;
                let record = PriceRecord::new(
                    name,
                    tags.clone(),
                    size,
                    denominator,
                    unit,
                    branch.as_str(),
                    price,
                )?;
                groups[group].1.push(record);
            }
        }

        Ok(Self { groups })
    }

    /// Records for one item, or `None` if the item has no row.
    pub fn get(&self, name: &str) -> Option<&[PriceRecord]> {
        self.groups
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, records)| records.as_slice())
    }

    /// Item names in first-seen row order.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(n, _)| n.as_str())
    }

    /// Every record, in catalog order.
    pub fn records(&self) -> impl Iterator<Item = &PriceRecord> {
        self.groups.iter().flat_map(|(_, records)| records.iter())
    }

    /// The deduplicated union of every record's tags.
    pub fn all_tags(&self) -> BTreeSet<String> {
        self.records()
            .flat_map(|r| r.tags().iter().cloned())
            .collect()
    }

    pub fn item_count(&self) -> usize {
        self.groups.len()
    }

    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|(_, records)| records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Split an `Options` cell on `|`, dropping blank segments.
///
/// A blank cell yields zero tags. Older sheets sometimes carry stray
/// separators (`a||b`, trailing `|`); those produce no phantom tags.
fn split_tags(cell: &str) -> Vec<String> {
    cell.split('|')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_f64_cell(item: &str, column: &str, cell: &str) -> Result<f64, TallyError> {
    cell.trim()
        .parse::<f64>()
        .map_err(|_| TallyError::invalid(item, column, cell))
}

fn parse_u32_cell(item: &str, column: &str, cell: &str) -> Result<u32, TallyError> {
    cell.trim()
        .parse::<u32>()
        .map_err(|_| TallyError::invalid(item, column, cell))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn make_catalog(rows: Vec<Vec<String>>) -> Result<Catalog, TallyError> {
        Catalog::from_sheet(&Sheet::from_rows(rows)?)
    }

    fn sample_rows() -> Vec<Vec<String>> {
        vec![
            raw(&[
                "Grocery Item",
                "Options",
                "Size",
                "Denominator",
                "Unit",
                "Unit Price",
                "Aldi",
                "Lidl",
            ]),
            raw(&["Milk", "dairy", "1000", "100", "ml", "", "1.20", ""]),
            raw(&["Udon", "noodles|japanese", "200", "100", "g", "", "1.50", "1.30"]),
            raw(&["Milk", "dairy|organic", "500", "100", "ml", "", "", "1.00"]),
        ]
    }

    #[test]
    fn test_groups_merge_across_rows() {
        let catalog = make_catalog(sample_rows()).unwrap();
        assert_eq!(catalog.items().collect::<Vec<_>>(), ["Milk", "Udon"]);
        let milk = catalog.get("Milk").unwrap();
        assert_eq!(milk.len(), 2);
        // First-row record first, later-row record after.
        assert_eq!(milk[0].branch(), "Aldi");
        assert_eq!(milk[0].size(), 1000.0);
        assert_eq!(milk[1].branch(), "Lidl");
        assert_eq!(milk[1].size(), 500.0);
    }

    #[test]
    fn test_record_order_row_then_branch() {
        let catalog = make_catalog(sample_rows()).unwrap();
        let branches: Vec<_> = catalog.get("Udon").unwrap().iter().map(|r| r.branch()).collect();
        assert_eq!(branches, ["Aldi", "Lidl"]);
    }

    #[test]
    fn test_blank_price_cell_is_no_observation() {
        let catalog = make_catalog(sample_rows()).unwrap();
        let milk = catalog.get("Milk").unwrap();
        assert!(milk.iter().all(|r| r.price() > 0.0));
        assert_eq!(catalog.record_count(), 4);
    }

    #[test]
    fn test_item_without_observations_is_listed() {
        let mut rows = sample_rows();
        rows.push(raw(&["Bread", "", "800", "1", "g", "", "", ""]));
        let catalog = make_catalog(rows).unwrap();
        assert!(catalog.items().any(|i| i == "Bread"));
        assert_eq!(catalog.get("Bread").unwrap().len(), 0);
    }

    #[test]
    fn test_blank_name_rows_ignored() {
        let mut rows = sample_rows();
        rows.push(raw(&["", "", "", "", "", "", "", ""]));
        rows.push(raw(&["   ", "", "", "", "", "", "", ""]));
        let catalog = make_catalog(rows).unwrap();
        assert_eq!(catalog.item_count(), 2);
    }

    #[test]
    fn test_tag_splitting() {
        let catalog = make_catalog(sample_rows()).unwrap();
        let udon = &catalog.get("Udon").unwrap()[0];
        assert_eq!(udon.tags(), ["noodles", "japanese"]);
    }

    #[test]
    fn test_blank_options_yield_zero_tags() {
        let rows = vec![
            raw(&[
                "Grocery Item",
                "Options",
                "Size",
                "Denominator",
                "Unit",
                "Unit Price",
                "Aldi",
            ]),
            raw(&["Salt", "", "750", "1", "g", "", "0.65"]),
            raw(&["Pepper", "spice|| ", "100", "1", "g", "", "1.10"]),
        ];
        let catalog = make_catalog(rows).unwrap();
        assert!(catalog.get("Salt").unwrap()[0].tags().is_empty());
        // Stray separators add nothing.
        assert_eq!(catalog.get("Pepper").unwrap()[0].tags(), ["spice"]);
    }

    #[test]
    fn test_all_tags_deduplicated() {
        let catalog = make_catalog(sample_rows()).unwrap();
        let tags: Vec<_> = catalog.all_tags().into_iter().collect();
        assert_eq!(tags, ["dairy", "japanese", "noodles", "organic"]);
    }

    #[test]
    fn test_bad_size_aborts_load() {
        let mut rows = sample_rows();
        rows[1][COL_SIZE] = "a lot".to_string();
        let err = make_catalog(rows).unwrap_err();
        assert_eq!(
            err,
            TallyError::InvalidRecord {
                item: "Milk".to_string(),
                column: "Size".to_string(),
                value: "a lot".to_string(),
            }
        );
    }

    #[test]
    fn test_bad_denominator_aborts_load() {
        let mut rows = sample_rows();
        rows[2][COL_DENOMINATOR] = "1.5".to_string();
        let err = make_catalog(rows).unwrap_err();
        assert!(
            matches!(err, TallyError::InvalidRecord { ref column, .. } if column == "Denominator")
        );
    }

    #[test]
    fn test_bad_price_cell_names_the_branch() {
        let mut rows = sample_rows();
        rows[2][7] = "n/a".to_string();
        let err = make_catalog(rows).unwrap_err();
        assert_eq!(
            err,
            TallyError::InvalidRecord {
                item: "Udon".to_string(),
                column: "Lidl".to_string(),
                value: "n/a".to_string(),
            }
        );
    }

    #[test]
    fn test_negative_price_cell_aborts_load() {
        let mut rows = sample_rows();
        rows[1][6] = "-1.20".to_string();
        let err = make_catalog(rows).unwrap_err();
        assert!(matches!(err, TallyError::InvalidRecord { ref column, .. } if column == "Aldi"));
    }

    #[test]
    fn test_whitespace_tolerant_numeric_cells() {
        let mut rows = sample_rows();
        rows[1][COL_SIZE] = " 1000 ".to_string();
        rows[1][6] = " 1.20 ".to_string();
        let catalog = make_catalog(rows).unwrap();
        assert_eq!(catalog.get("Milk").unwrap()[0].size(), 1000.0);
    }

    #[test]
    fn test_empty_sheet_is_empty_catalog() {
        let catalog = Catalog::from_sheet(&Sheet::empty()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.record_count(), 0);
        assert!(catalog.all_tags().is_empty());
    }
}
