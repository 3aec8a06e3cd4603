//! Typed wrapper over the raw price sheet.
//!
//! The persisted dataset is one rectangular sheet: a header row followed
//! by data rows. The first six columns are fixed; every column after
//! them is a branch:
//!
//! ```text
//! Grocery Item | Options | Size | Denominator | Unit | Unit Price | Aldi | Lidl | ...
//! ```
//!
//! `Options` holds the item's tags joined by `|`. `Unit Price` is a
//! layout placeholder kept for compatibility with older sheets; it is
//! written blank and ignored on read. A blank branch cell means no
//! observation at that branch, not a zero price.
//!
//! [`Sheet`] maintains one structural invariant: every data row has
//! exactly as many cells as the header. Short rows are padded when
//! loading; over-wide rows are rejected. All mutations validate their
//! inputs before touching any row, so a rejected mutation leaves the
//! sheet untouched.

use crate::error::TallyError;
use crate::models::NewItem;

/// Labels of the fixed (non-branch) columns, in sheet order.
pub const FIXED_COLUMNS: [&str; 6] = [
    "Grocery Item",
    "Options",
    "Size",
    "Denominator",
    "Unit",
    "Unit Price",
];

/// Column index of the item name.
pub const COL_ITEM: usize = 0;
/// Column index of the `|`-joined tags.
pub const COL_OPTIONS: usize = 1;
/// Column index of the pack size.
pub const COL_SIZE: usize = 2;
/// Column index of the display denominator.
pub const COL_DENOMINATOR: usize = 3;
/// Column index of the measurement unit.
pub const COL_UNIT: usize = 4;
/// Index of the first branch column.
pub const BRANCH_START: usize = FIXED_COLUMNS.len();

/// A parsed, rectangular price sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    /// A sheet with the fixed header and no items or branches.
    pub fn empty() -> Self {
        Self {
            header: FIXED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Parse a raw row set. The first row is the header.
    ///
    /// Data rows shorter than the header are padded with blank cells
    /// (trailing prices simply have not been observed). A data row wider
    /// than the header is a structural error, as is a missing header or
    /// one with fewer than the six fixed columns.
    pub fn from_rows(raw: Vec<Vec<String>>) -> Result<Self, TallyError> {
        let mut iter = raw.into_iter();
        let header = iter
            .next()
            .ok_or_else(|| TallyError::MalformedSheet("sheet has no header row".to_string()))?;
        if header.len() < BRANCH_START {
            return Err(TallyError::MalformedSheet(format!(
                "header has {} columns, expected at least {}",
                header.len(),
                BRANCH_START
            )));
        }

        let mut rows = Vec::new();
        for (i, mut row) in iter.enumerate() {
            if row.len() > header.len() {
                // Row 1 is the header, so the first data row is row 2.
                return Err(TallyError::MalformedSheet(format!(
                    "row {} has {} cells but the header has {}",
                    i + 2,
                    row.len(),
                    header.len()
                )));
            }
            row.resize(header.len(), String::new());
            rows.push(row);
        }

        Ok(Self { header, rows })
    }

    /// The raw row set: header first, then data rows.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push(self.header.clone());
        out.extend(self.rows.iter().cloned());
        out
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Branch names, in column order.
    pub fn branches(&self) -> &[String] {
        &self.header[BRANCH_START..]
    }

    /// Append an item row with no price observations.
    ///
    /// The name and unit are trimmed and must be non-empty; `size` must
    /// be a positive finite number and `denominator` at least 1. Tags
    /// are trimmed, blank tags dropped, and the rest joined with `|`
    /// into the `Options` cell. Every branch cell starts blank.
    pub fn add_item(&mut self, item: &NewItem) -> Result<(), TallyError> {
        let name = item.name.trim();
        if name.is_empty() {
            return Err(TallyError::EmptyRequiredField("item name"));
        }
        let unit = item.unit.trim();
        if unit.is_empty() {
            return Err(TallyError::EmptyRequiredField("unit"));
        }
        if !item.size.is_finite() || item.size <= 0.0 {
            return Err(TallyError::invalid(name, "Size", item.size.to_string()));
        }
        if item.denominator < 1 {
            return Err(TallyError::invalid(
                name,
                "Denominator",
                item.denominator.to_string(),
            ));
        }

        let options = item
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("|");

        let mut row = vec![
            name.to_string(),
            options,
            item.size.to_string(),
            item.denominator.to_string(),
            unit.to_string(),
            String::new(),
        ];
        row.resize(self.header.len(), String::new());
        self.rows.push(row);
        Ok(())
    }

    /// Append a branch column, blank in every data row.
    ///
    /// The name is trimmed and must be non-empty. It must not collide
    /// with any existing column, the fixed labels included; a sheet with
    /// a branch named `Size` would be unreadable.
    pub fn add_branch(&mut self, name: &str) -> Result<(), TallyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TallyError::EmptyRequiredField("branch name"));
        }
        if self.header.iter().any(|h| h == name) {
            return Err(TallyError::DuplicateBranch(name.to_string()));
        }

        self.header.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        Ok(())
    }

    /// Write or clear one price cell.
    ///
    /// Addresses the first (topmost) row whose item name matches; when
    /// an item has several variant rows the topmost one is the target.
    /// `Some(price)` must be finite and non-negative; `None` clears the
    /// cell, removing the observation. The cell is only written after
    /// every check passes.
    pub fn set_price(
        &mut self,
        item: &str,
        branch: &str,
        price: Option<f64>,
    ) -> Result<(), TallyError> {
        let item = item.trim();
        let branch = branch.trim();

        let row_idx = self
            .rows
            .iter()
            .position(|row| row[COL_ITEM] == item)
            .ok_or_else(|| TallyError::ItemNotFound(item.to_string()))?;
        let col_idx = self
            .header
            .iter()
            .skip(BRANCH_START)
            .position(|h| h == branch)
            .map(|i| BRANCH_START + i)
            .ok_or_else(|| TallyError::BranchNotFound(branch.to_string()))?;

        let cell = match price {
            Some(p) => {
                if !p.is_finite() || p < 0.0 {
                    return Err(TallyError::invalid(item, branch, p.to_string()));
                }
                p.to_string()
            }
            None => String::new(),
        };

        self.rows[row_idx][col_idx] = cell;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(name: &str, tags: &[&str], size: f64, denominator: u32, unit: &str) -> NewItem {
        NewItem {
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            size,
            denominator,
            unit: unit.to_string(),
        }
    }

    fn make_sheet() -> Sheet {
        let mut sheet = Sheet::empty();
        sheet.add_branch("Aldi").unwrap();
        sheet.add_branch("Lidl").unwrap();
        sheet
            .add_item(&make_item("Milk", &["dairy"], 1000.0, 100, "ml"))
            .unwrap();
        sheet
            .add_item(&make_item("Udon", &["noodles", "japanese"], 200.0, 100, "g"))
            .unwrap();
        sheet
    }

    #[test]
    fn test_empty_sheet_layout() {
        let sheet = Sheet::empty();
        assert_eq!(sheet.header(), &FIXED_COLUMNS);
        assert!(sheet.branches().is_empty());
        assert_eq!(sheet.to_rows().len(), 1);
    }

    #[test]
    fn test_from_rows_requires_header() {
        let err = Sheet::from_rows(Vec::new()).unwrap_err();
        assert!(matches!(err, TallyError::MalformedSheet(_)));
    }

    #[test]
    fn test_from_rows_rejects_narrow_header() {
        let raw = vec![vec!["Grocery Item".to_string(), "Options".to_string()]];
        let err = Sheet::from_rows(raw).unwrap_err();
        assert!(matches!(err, TallyError::MalformedSheet(_)));
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let mut raw = Sheet::empty().to_rows();
        raw[0].push("Aldi".to_string());
        // A row that stops after the unit: no placeholder, no price.
        raw.push(vec![
            "Milk".to_string(),
            "dairy".to_string(),
            "1000".to_string(),
            "100".to_string(),
            "ml".to_string(),
        ]);
        let sheet = Sheet::from_rows(raw).unwrap();
        assert_eq!(sheet.data_rows()[0].len(), sheet.header().len());
        assert_eq!(sheet.data_rows()[0][BRANCH_START], "");
    }

    #[test]
    fn test_from_rows_rejects_wide_row() {
        let mut raw = Sheet::empty().to_rows();
        raw.push(vec!["x".to_string(); 7]);
        let err = Sheet::from_rows(raw).unwrap_err();
        assert_eq!(
            err,
            TallyError::MalformedSheet("row 2 has 7 cells but the header has 6".to_string())
        );
    }

    #[test]
    fn test_add_item_appends_blank_row() {
        let sheet = make_sheet();
        let row = &sheet.data_rows()[0];
        assert_eq!(row[COL_ITEM], "Milk");
        assert_eq!(row[COL_OPTIONS], "dairy");
        assert_eq!(row[COL_SIZE], "1000");
        assert_eq!(row[COL_DENOMINATOR], "100");
        assert_eq!(row[COL_UNIT], "ml");
        // Placeholder and both branch cells are blank.
        assert_eq!(row[5], "");
        assert_eq!(row[BRANCH_START], "");
        assert_eq!(row[BRANCH_START + 1], "");
    }

    #[test]
    fn test_add_item_trims_and_joins_tags() {
        let mut sheet = Sheet::empty();
        sheet
            .add_item(&make_item("  Udon  ", &[" noodles ", "", "japanese"], 200.0, 100, " g "))
            .unwrap();
        let row = &sheet.data_rows()[0];
        assert_eq!(row[COL_ITEM], "Udon");
        assert_eq!(row[COL_OPTIONS], "noodles|japanese");
        assert_eq!(row[COL_UNIT], "g");
    }

    #[test]
    fn test_add_item_rejects_blank_name_and_unit() {
        let mut sheet = Sheet::empty();
        let err = sheet
            .add_item(&make_item("   ", &[], 1.0, 1, "g"))
            .unwrap_err();
        assert_eq!(err, TallyError::EmptyRequiredField("item name"));

        let err = sheet
            .add_item(&make_item("Milk", &[], 1.0, 1, "  "))
            .unwrap_err();
        assert_eq!(err, TallyError::EmptyRequiredField("unit"));
        assert!(sheet.data_rows().is_empty());
    }

    #[test]
    fn test_add_item_rejects_bad_numbers() {
        let mut sheet = Sheet::empty();
        assert!(matches!(
            sheet.add_item(&make_item("Milk", &[], 0.0, 1, "ml")),
            Err(TallyError::InvalidRecord { .. })
        ));
        assert!(matches!(
            sheet.add_item(&make_item("Milk", &[], 1000.0, 0, "ml")),
            Err(TallyError::InvalidRecord { .. })
        ));
        assert!(sheet.data_rows().is_empty());
    }

    #[test]
    fn test_add_branch_extends_every_row() {
        let mut sheet = make_sheet();
        sheet.add_branch("Tesco").unwrap();
        assert_eq!(sheet.branches(), ["Aldi", "Lidl", "Tesco"]);
        for row in sheet.data_rows() {
            assert_eq!(row.len(), sheet.header().len());
            assert_eq!(row[row.len() - 1], "");
        }
    }

    #[test]
    fn test_add_branch_rejects_duplicates() {
        let mut sheet = make_sheet();
        let err = sheet.add_branch("Aldi").unwrap_err();
        assert_eq!(err, TallyError::DuplicateBranch("Aldi".to_string()));
        // Trim happens before the collision check.
        let err = sheet.add_branch("  Lidl ").unwrap_err();
        assert_eq!(err, TallyError::DuplicateBranch("Lidl".to_string()));
        // Fixed labels are off limits too.
        let err = sheet.add_branch("Size").unwrap_err();
        assert_eq!(err, TallyError::DuplicateBranch("Size".to_string()));
        assert_eq!(sheet.branches().len(), 2);
    }

    #[test]
    fn test_add_branch_rejects_blank() {
        let mut sheet = make_sheet();
        let err = sheet.add_branch("   ").unwrap_err();
        assert_eq!(err, TallyError::EmptyRequiredField("branch name"));
    }

    #[test]
    fn test_set_price_writes_cell() {
        let mut sheet = make_sheet();
        sheet.set_price("Milk", "Aldi", Some(1.20)).unwrap();
        assert_eq!(sheet.data_rows()[0][BRANCH_START], "1.2");
        assert_eq!(sheet.data_rows()[0][BRANCH_START + 1], "");
    }

    #[test]
    fn test_set_price_targets_topmost_matching_row() {
        let mut sheet = make_sheet();
        sheet
            .add_item(&make_item("Milk", &["organic"], 500.0, 100, "ml"))
            .unwrap();
        sheet.set_price("Milk", "Lidl", Some(0.99)).unwrap();
        assert_eq!(sheet.data_rows()[0][BRANCH_START + 1], "0.99");
        assert_eq!(sheet.data_rows()[2][BRANCH_START + 1], "");
    }

    #[test]
    fn test_set_price_clears_cell() {
        let mut sheet = make_sheet();
        sheet.set_price("Milk", "Aldi", Some(1.20)).unwrap();
        sheet.set_price("Milk", "Aldi", None).unwrap();
        assert_eq!(sheet.data_rows()[0][BRANCH_START], "");
    }

    #[test]
    fn test_set_price_unknown_item_and_branch() {
        let mut sheet = make_sheet();
        let err = sheet.set_price("Bread", "Aldi", Some(1.0)).unwrap_err();
        assert_eq!(err, TallyError::ItemNotFound("Bread".to_string()));
        let err = sheet.set_price("Milk", "Waitrose", Some(1.0)).unwrap_err();
        assert_eq!(err, TallyError::BranchNotFound("Waitrose".to_string()));
        // A fixed column is not addressable as a branch.
        let err = sheet.set_price("Milk", "Size", Some(1.0)).unwrap_err();
        assert_eq!(err, TallyError::BranchNotFound("Size".to_string()));
    }

    #[test]
    fn test_set_price_rejects_bad_price() {
        let mut sheet = make_sheet();
        assert!(matches!(
            sheet.set_price("Milk", "Aldi", Some(-1.0)),
            Err(TallyError::InvalidRecord { .. })
        ));
        assert!(matches!(
            sheet.set_price("Milk", "Aldi", Some(f64::NAN)),
            Err(TallyError::InvalidRecord { .. })
        ));
        assert_eq!(sheet.data_rows()[0][BRANCH_START], "");
    }

    #[test]
    fn test_row_round_trip() {
        let mut sheet = make_sheet();
        sheet.set_price("Udon", "Lidl", Some(1.10)).unwrap();
        let reparsed = Sheet::from_rows(sheet.to_rows()).unwrap();
        assert_eq!(reparsed, sheet);
    }
}
