use serde::{Deserialize, Serialize};
use std::fmt;

use super::Period;

/// Grouping identity extracted from a time entry: an engineer, a booking
/// code, or the project-wide constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionKey(String);

impl DimensionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DimensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DimensionKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for DimensionKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// One row of a matrix. The synthetic "Total" row is flagged so renderers
/// can style it without re-deriving the totals themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowIdentity {
    pub key: DimensionKey,
    pub label: String,
    pub is_total: bool,
}

impl RowIdentity {
    pub fn new(key: impl Into<DimensionKey>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            is_total: false,
        }
    }

    pub fn total() -> Self {
        Self {
            key: DimensionKey::new("total"),
            label: "Total".to_string(),
            is_total: true,
        }
    }
}

/// A single cell: raw minutes plus hours pre-rounded to one decimal.
///
/// Rounding happens here, once, so every consumer shows the same hours for
/// the same minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatrixCell {
    pub minutes: i64,
    pub hours: f64,
}

impl MatrixCell {
    pub fn from_minutes(minutes: i64) -> Self {
        Self {
            minutes,
            hours: (minutes as f64 / 60.0 * 10.0).round() / 10.0,
        }
    }

}

/// A dense report grid: rows x ordered periods, with row, column and grand
/// totals. Derived on every read, never persisted.
///
/// Every declared row has a cell for every declared period (zero-filled), so
/// consumers can rely on positional indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matrix {
    pub periods: Vec<Period>,
    pub rows: Vec<RowIdentity>,
    /// Indexed `cells[row][period]`, parallel to `rows` and `periods`.
    pub cells: Vec<Vec<MatrixCell>>,
    /// Per row, parallel to `rows`.
    pub row_totals: Vec<MatrixCell>,
    /// Per period, across real rows only, parallel to `periods`.
    pub column_totals: Vec<MatrixCell>,
    pub grand_total: MatrixCell,
}

impl Matrix {
    pub fn cell(&self, row: usize, period: usize) -> Option<&MatrixCell> {
        self.cells.get(row).and_then(|r| r.get(period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_are_rounded_to_one_decimal() {
        assert_eq!(MatrixCell::from_minutes(120).hours, 2.0);
        assert_eq!(MatrixCell::from_minutes(125).hours, 2.1);
        assert_eq!(MatrixCell::from_minutes(122).hours, 2.0);
        assert_eq!(MatrixCell::from_minutes(45).hours, 0.8);
        assert_eq!(MatrixCell::from_minutes(0).hours, 0.0);
    }

    #[test]
    fn total_row_is_flagged() {
        assert!(RowIdentity::total().is_total);
        assert!(!RowIdentity::new("e1", "Engineer One").is_total);
    }
}
