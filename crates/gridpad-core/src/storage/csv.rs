//! CSV import/export functionality
//!
//! Export writes one line per row: every cell's content followed by a comma,
//! so each line ends with `,` (an explicit empty trailing field). Import splits
//! on newlines and commas without quoting rules, so the trailing empty field
//! is simply dropped or ignored when it falls past the last column.
//!
//! Import is lossy for styling: every imported cell gets default style.

use crate::error::Result;
use gridpad_engine::engine::{Cell, CellMatrix};
use std::path::Path;

pub const CSV_FILE_NAME: &str = "excel.csv";
pub const CSV_MIME_TYPE: &str = "text/plain";

/// Serialise cell contents, one `,`-terminated line per row.
pub fn to_csv(matrix: &CellMatrix) -> String {
    let mut out = String::new();
    for row in matrix.rows() {
        for cell in row {
            out.push_str(&cell.content);
            out.push(',');
        }
        out.push('\n');
    }
    out
}

/// Parse CSV text into a fresh `row_limit x column_limit` matrix.
///
/// Extra lines and fields are dropped, missing ones become empty content.
/// Never fails.
pub fn from_csv(text: &str, row_limit: usize, column_limit: usize) -> CellMatrix {
    let lines: Vec<Vec<&str>> = text
        .split('\n')
        .take(row_limit)
        .map(|line| line.strip_suffix('\r').unwrap_or(line).split(',').collect())
        .collect();

    CellMatrix::from_fn(row_limit, column_limit, |id| {
        let content = lines
            .get(id.row)
            .and_then(|fields| fields.get(id.col))
            .copied()
            .unwrap_or_default();
        Cell::with_content(id, content)
    })
}

/// Export to a CSV file.
pub fn write_csv(path: &Path, matrix: &CellMatrix) -> Result<()> {
    std::fs::write(path, to_csv(matrix))?;
    Ok(())
}

/// Import from a CSV file.
pub fn read_csv(path: &Path, row_limit: usize, column_limit: usize) -> Result<CellMatrix> {
    let content = std::fs::read_to_string(path)?;
    Ok(from_csv(&content, row_limit, column_limit))
}
