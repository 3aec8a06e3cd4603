//! Core data model: a single observed price, normalized for comparison.
//!
//! A [`PriceRecord`] is one price observation: an item variant, at one
//! branch, with a pack size and a display denominator. Prices for
//! different pack sizes are only comparable per unit, so every record
//! derives its unit price at construction:
//!
//! ```text
//! unit_price = price × denominator ÷ size
//! ```
//!
//! A 2L bottle at £1.20 with denominator 100 and unit `ml` normalizes to
//! £0.06 per 100ml. Ranking and tie detection compare `unit_price` alone.
//!
//! Construction goes through [`PriceRecord::new`], which validates the
//! numeric fields and computes `unit_price` exactly once. Fields are
//! private so a record cannot exist in a denormalized state.
//!
//! # Example
//!
//! ```rust
//! use price_tally_core::models::PriceRecord;
//!
//! let rec = PriceRecord::new("Milk", vec![], 1000.0, 100, "ml", "Aldi", 1.20).unwrap();
//! assert!((rec.unit_price() - 0.12).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TallyError;

/// One observed price for an item variant at a branch.
///
/// Two records with identical fields compare equal and are fully
/// interchangeable; there is no hidden identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    name: String,
    tags: Vec<String>,
    size: f64,
    denominator: u32,
    unit: String,
    branch: String,
    price: f64,
    unit_price: f64,
}

impl PriceRecord {
    /// Validate the numeric fields and derive the unit price.
    ///
    /// Rejected inputs, each as [`TallyError::InvalidRecord`] naming the
    /// item, the offending column, and the raw value:
    ///
    /// - `size` zero, negative, or non-finite (column `Size`)
    /// - `denominator` zero (column `Denominator`)
    /// - `price` negative or non-finite (column = the branch name)
    ///
    /// A zero price is a legitimate observation (free samples exist).
    pub fn new(
        name: impl Into<String>,
        tags: Vec<String>,
        size: f64,
        denominator: u32,
        unit: impl Into<String>,
        branch: impl Into<String>,
        price: f64,
    ) -> Result<Self, TallyError> {
        let name = name.into();
        let branch = branch.into();

        if !size.is_finite() || size <= 0.0 {
            return Err(TallyError::invalid(name, "Size", size.to_string()));
        }
        if denominator < 1 {
            return Err(TallyError::invalid(name, "Denominator", denominator.to_string()));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(TallyError::invalid(name, branch, price.to_string()));
        }

        let unit_price = price * f64::from(denominator) / size;
        Ok(Self {
            name,
            tags,
            size,
            denominator,
            unit: unit.into(),
            branch,
            price,
            unit_price,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Price per `denominator` of `unit`, derived at construction.
    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    /// True if this record carries every tag in `required`.
    pub fn has_all_tags<T: AsRef<str>>(&self, required: &[T]) -> bool {
        required
            .iter()
            .all(|t| self.tags.iter().any(|own| own == t.as_ref()))
    }
}

/// Request payload for adding a new item row.
///
/// Carries no price observations; those arrive later, one branch at a
/// time. Validation happens when the row is appended to the sheet, not
/// here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub size: f64,
    pub denominator: u32,
    pub unit: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(size: f64, denominator: u32, price: f64) -> Result<PriceRecord, TallyError> {
        PriceRecord::new(
            "Milk",
            vec!["dairy".to_string()],
            size,
            denominator,
            "ml",
            "Aldi",
            price,
        )
    }

    #[test]
    fn test_unit_price_formula() {
        let rec = make_record(1000.0, 100, 1.20).unwrap();
        assert!((rec.unit_price() - 0.12).abs() < 1e-12);

        let rec = make_record(500.0, 100, 1.00).unwrap();
        assert!((rec.unit_price() - 0.20).abs() < 1e-12);
    }

    #[test]
    fn test_unit_price_scale_invariant() {
        // Same price-per-size ratio at different pack sizes.
        let small = make_record(1000.0, 100, 1.20).unwrap();
        let large = make_record(2000.0, 100, 2.40).unwrap();
        assert_eq!(small.unit_price(), large.unit_price());
    }

    #[test]
    fn test_unit_price_monotonic_in_price() {
        let cheap = make_record(1000.0, 100, 1.00).unwrap();
        let dear = make_record(1000.0, 100, 1.50).unwrap();
        assert!(dear.unit_price() > cheap.unit_price());
    }

    #[test]
    fn test_unit_price_decreases_with_size() {
        // Same shelf price, bigger pack: better value.
        let small = make_record(500.0, 100, 1.20).unwrap();
        let large = make_record(1000.0, 100, 1.20).unwrap();
        assert!(large.unit_price() < small.unit_price());
    }

    #[test]
    fn test_denominator_one() {
        let rec = make_record(6.0, 1, 1.80).unwrap();
        assert!((rec.unit_price() - 0.30).abs() < 1e-12);
    }

    #[test]
    fn test_zero_price_is_valid() {
        let rec = make_record(100.0, 1, 0.0).unwrap();
        assert_eq!(rec.unit_price(), 0.0);
    }

    #[test]
    fn test_rejects_zero_size() {
        let err = make_record(0.0, 100, 1.20).unwrap_err();
        assert_eq!(
            err,
            TallyError::InvalidRecord {
                item: "Milk".to_string(),
                column: "Size".to_string(),
                value: "0".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_negative_size() {
        let err = make_record(-500.0, 100, 1.20).unwrap_err();
        assert!(matches!(err, TallyError::InvalidRecord { ref column, .. } if column == "Size"));
    }

    #[test]
    fn test_rejects_non_finite_size() {
        assert!(make_record(f64::NAN, 100, 1.20).is_err());
        assert!(make_record(f64::INFINITY, 100, 1.20).is_err());
    }

    #[test]
    fn test_rejects_zero_denominator() {
        let err = make_record(1000.0, 0, 1.20).unwrap_err();
        assert!(
            matches!(err, TallyError::InvalidRecord { ref column, .. } if column == "Denominator")
        );
    }

    #[test]
    fn test_rejects_negative_price() {
        let err = make_record(1000.0, 100, -0.01).unwrap_err();
        // Price errors name the branch column the price came from.
        assert!(matches!(err, TallyError::InvalidRecord { ref column, .. } if column == "Aldi"));
    }

    #[test]
    fn test_rejects_non_finite_price() {
        assert!(make_record(1000.0, 100, f64::NAN).is_err());
    }

    #[test]
    fn test_value_equality() {
        let a = make_record(1000.0, 100, 1.20).unwrap();
        let b = make_record(1000.0, 100, 1.20).unwrap();
        assert_eq!(a, b);

        let other_branch = PriceRecord::new(
            "Milk",
            vec!["dairy".to_string()],
            1000.0,
            100,
            "ml",
            "Lidl",
            1.20,
        )
        .unwrap();
        assert_ne!(a, other_branch);
    }

    #[test]
    fn test_has_all_tags() {
        let rec = PriceRecord::new(
            "Udon",
            vec!["noodles".to_string(), "japanese".to_string()],
            200.0,
            100,
            "g",
            "Tesco",
            1.10,
        )
        .unwrap();
        assert!(rec.has_all_tags::<&str>(&[]));
        assert!(rec.has_all_tags(&["noodles"]));
        assert!(rec.has_all_tags(&["noodles", "japanese"]));
        assert!(!rec.has_all_tags(&["noodles", "italian"]));
    }
}
