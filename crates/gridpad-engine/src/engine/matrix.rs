//! Fixed-size two-dimensional store of cells.

use super::cell::Cell;
use super::cell_id::CellId;
use super::error::MatrixError;
use serde::{Serialize, Serializer};

pub type Result<T> = std::result::Result<T, MatrixError>;

/// Rectangular `rows x columns` grid of cells, fixed at construction.
///
/// Every cell's `id` matches its position; `set`, `update` and `map` re-stamp
/// ids so callers cannot break that.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellMatrix {
    cells: Vec<Vec<Cell>>,
    rows: usize,
    columns: usize,
}

impl CellMatrix {
    /// A matrix of blank cells.
    pub fn new(rows: usize, columns: usize) -> CellMatrix {
        CellMatrix::from_fn(rows, columns, Cell::blank)
    }

    /// Build each cell from its id.
    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(CellId) -> Cell) -> CellMatrix {
        let cells = (0..rows)
            .map(|row| {
                (0..columns)
                    .map(|col| {
                        let id = CellId::new(row, col);
                        Cell { id, ..f(id) }
                    })
                    .collect()
            })
            .collect();
        CellMatrix {
            cells,
            rows,
            columns,
        }
    }

    /// Adopt already-built rows, checking shape and ids.
    pub fn from_rows(cells: Vec<Vec<Cell>>) -> Result<CellMatrix> {
        let rows = cells.len();
        let columns = cells.first().map_or(0, Vec::len);
        for (r, row) in cells.iter().enumerate() {
            if row.len() != columns {
                return Err(MatrixError::Ragged {
                    row: r,
                    expected: columns,
                    found: row.len(),
                });
            }
            for (c, cell) in row.iter().enumerate() {
                if cell.id != CellId::new(r, c) {
                    return Err(MatrixError::MalformedId(cell.id.to_string()));
                }
            }
        }
        Ok(CellMatrix {
            cells,
            rows,
            columns,
        })
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn contains(&self, id: &CellId) -> bool {
        id.row < self.rows && id.col < self.columns
    }

    fn check(&self, row: usize, col: usize) -> Result<()> {
        if row < self.rows && col < self.columns {
            Ok(())
        } else {
            Err(MatrixError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.columns,
            })
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<&Cell> {
        self.check(row, col)?;
        Ok(&self.cells[row][col])
    }

    pub fn cell(&self, id: &CellId) -> Result<&Cell> {
        self.get(id.row, id.col)
    }

    /// Replace the whole record at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        self.check(row, col)?;
        self.cells[row][col] = Cell {
            id: CellId::new(row, col),
            ..cell
        };
        Ok(())
    }

    /// Edit the record at `id` in place.
    pub fn update<R>(&mut self, id: &CellId, f: impl FnOnce(&mut Cell) -> R) -> Result<R> {
        self.check(id.row, id.col)?;
        let cell = &mut self.cells[id.row][id.col];
        let out = f(cell);
        cell.id = *id;
        Ok(out)
    }

    /// New matrix with `f` applied to every cell.
    pub fn map(&self, mut f: impl FnMut(&Cell) -> Cell) -> CellMatrix {
        CellMatrix::from_fn(self.rows, self.columns, |id| f(&self.cells[id.row][id.col]))
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Content strings only, row by row.
    pub fn contents(&self) -> Vec<Vec<&str>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.content.as_str()).collect())
            .collect()
    }
}

impl Serialize for CellMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.cells.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matrix_is_blank_with_positional_ids() {
        let m = CellMatrix::new(3, 4);
        assert_eq!(m.dimensions(), (3, 4));
        assert_eq!(m.iter().count(), 12);
        for cell in m.iter() {
            assert!(cell.is_blank());
        }
        assert_eq!(m.get(2, 3).unwrap().id.to_string(), "2-3");
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut m = CellMatrix::new(2, 2);
        assert_eq!(
            m.get(2, 0).unwrap_err(),
            MatrixError::OutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 2
            }
        );
        assert!(m.get(0, 2).is_err());
        assert!(m.set(5, 5, Cell::blank(CellId::new(5, 5))).is_err());
        assert!(m.update(&CellId::new(0, 9), |c| c.bold = true).is_err());
    }

    #[test]
    fn test_set_restamps_id() {
        let mut m = CellMatrix::new(2, 2);
        m.set(1, 0, Cell::with_content(CellId::new(0, 0), "moved"))
            .unwrap();
        let cell = m.get(1, 0).unwrap();
        assert_eq!(cell.id, CellId::new(1, 0));
        assert_eq!(cell.content, "moved");
        assert!(m.get(0, 0).unwrap().is_blank());
    }

    #[test]
    fn test_update_in_place() {
        let mut m = CellMatrix::new(2, 2);
        m.update(&CellId::new(0, 1), |c| c.content.push_str("abc"))
            .unwrap();
        assert_eq!(m.contents(), vec![vec!["", "abc"], vec!["", ""]]);
    }

    #[test]
    fn test_map_is_pure() {
        let mut m = CellMatrix::new(2, 2);
        m.update(&CellId::new(0, 0), |c| c.content = "a".into())
            .unwrap();
        let upper = m.map(|c| Cell {
            content: c.content.to_uppercase(),
            ..c.clone()
        });
        assert_eq!(m.get(0, 0).unwrap().content, "a");
        assert_eq!(upper.get(0, 0).unwrap().content, "A");
        assert_eq!(upper.dimensions(), m.dimensions());
    }

    #[test]
    fn test_from_rows_checks_shape_and_ids() {
        let good = CellMatrix::new(2, 3);
        assert_eq!(CellMatrix::from_rows(good.rows().to_vec()), Ok(good.clone()));

        let mut ragged = good.rows().to_vec();
        ragged[1].pop();
        assert_eq!(
            CellMatrix::from_rows(ragged),
            Err(MatrixError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );

        let mut swapped = good.rows().to_vec();
        swapped[0].swap(0, 1);
        assert!(matches!(
            CellMatrix::from_rows(swapped),
            Err(MatrixError::MalformedId(_))
        ));
    }

    #[test]
    fn test_serializes_as_nested_rows() {
        let m = CellMatrix::new(1, 2);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0][1]["id"], "0-1");
    }
}
