//! Cell identity encoding and column labels.
//!
//! A cell is identified externally by `"{row}-{col}"` (both zero-indexed), and
//! columns are labelled spreadsheet-style (A, B, ..., Z, AA, AB, ...).
//!
//! # Examples
//!
//! ```
//! use gridpad_engine::engine::CellId;
//!
//! let id: CellId = "3-1".parse().unwrap();
//! assert_eq!((id.row, id.col), (3, 1));
//! assert_eq!(id.to_string(), "3-1");
//! assert_eq!(id.column_label(), "B");
//! ```

use super::error::MatrixError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identity of a cell, derived from its (row, column) position.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CellId {
    pub row: usize,
    pub col: usize,
}

impl CellId {
    pub fn new(row: usize, col: usize) -> CellId {
        CellId { row, col }
    }

    /// Decode an id string of the form `"{row}-{col}"`.
    pub fn parse(id: &str) -> Result<CellId, MatrixError> {
        let malformed = || MatrixError::MalformedId(id.to_string());
        let mut parts = id.split('-');
        let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };
        let row = row.parse::<usize>().map_err(|_| malformed())?;
        let col = col.parse::<usize>().map_err(|_| malformed())?;
        Ok(CellId::new(row, col))
    }

    /// Spreadsheet-style label of this cell's column.
    pub fn column_label(&self) -> String {
        column_label(self.col)
    }

    /// The cell immediately to the right, if `columns` leaves room for one.
    pub fn right_neighbor(&self, columns: usize) -> Option<CellId> {
        let col = self.col.checked_add(1)?;
        (col < columns).then(|| CellId::new(self.row, col))
    }
}

/// Convert a column index to letters (0 -> A, 25 -> Z, 26 -> AA, 701 -> ZZ).
///
/// Bijective base-26: there is no zero digit, so Z is followed by AA.
pub fn column_label(index: usize) -> String {
    let mut result = String::new();
    let mut n = index as u128 + 1;
    while n > 0 {
        n -= 1;
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    result
}

impl FromStr for CellId {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellId::parse(s)
    }
}

impl TryFrom<String> for CellId {
    type Error = MatrixError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CellId::parse(&value)
    }
}

impl From<CellId> for String {
    fn from(id: CellId) -> String {
        id.to_string()
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}
