use crate::error::{GridpadError, Result};
use gridpad_engine::engine::{
    Cell, CellId, CellMatrix, DEFAULT_BACKGROUND_COLOR, DEFAULT_TEXT_COLOR, FontFamily,
    MatrixError, normalize_color,
};
use serde::Serialize;
use std::sync::Arc;

/// Style attributes of the focused cell, as shown by a property form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableProperties {
    pub bg_color: String,
    pub text_color: String,
    pub font_family: FontFamily,
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
}

impl Default for EditableProperties {
    fn default() -> Self {
        EditableProperties {
            bg_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            font_family: FontFamily::default(),
            bold: false,
            italic: false,
            strikethrough: false,
        }
    }
}

impl EditableProperties {
    /// Snapshot a cell's style, normalising colours to `#rrggbb`.
    pub fn from_cell(cell: &Cell) -> Self {
        EditableProperties {
            bg_color: normalize_color(&cell.background_color),
            text_color: normalize_color(&cell.text_color),
            font_family: cell.font_family,
            bold: cell.bold,
            italic: cell.italic,
            strikethrough: cell.strikethrough,
        }
    }
}

/// UI-agnostic grid document: the cell matrix plus focus and edit state.
///
/// The matrix sits behind an `Arc` so [`Document::snapshot`] is cheap and
/// immutable; edits copy on write. `version` increases on every change to the
/// matrix so a presentation layer can tell when to redraw.
#[derive(Clone, Debug)]
pub struct Document {
    pub(crate) matrix: Arc<CellMatrix>,
    /// The single focused cell
    pub(crate) focused: Option<CellId>,
    /// The single cell in text-edit mode
    pub(crate) editing: Option<CellId>,
    /// Most recently focused cell, kept after focus is cleared
    pub(crate) last_focused: Option<CellId>,
    pub(crate) editable: EditableProperties,
    pub(crate) version: u64,
}

impl Document {
    /// A document of blank cells.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self::from_matrix(CellMatrix::new(rows, columns))
    }

    pub fn from_matrix(matrix: CellMatrix) -> Self {
        Document {
            matrix: Arc::new(matrix),
            focused: None,
            editing: None,
            last_focused: None,
            editable: EditableProperties::default(),
            version: 0,
        }
    }

    pub fn matrix(&self) -> &CellMatrix {
        &self.matrix
    }

    /// Immutable view of the current matrix; later edits do not affect it.
    pub fn snapshot(&self) -> Arc<CellMatrix> {
        Arc::clone(&self.matrix)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.matrix.dimensions()
    }

    pub fn cell(&self, id: &CellId) -> Result<&Cell> {
        Ok(self.matrix.cell(id)?)
    }

    pub fn focused(&self) -> Option<CellId> {
        self.focused
    }

    pub fn editing(&self) -> Option<CellId> {
        self.editing
    }

    pub fn last_focused(&self) -> Option<CellId> {
        self.last_focused
    }

    pub fn is_focused(&self, id: &CellId) -> bool {
        self.focused == Some(*id)
    }

    pub fn is_editing(&self, id: &CellId) -> bool {
        self.editing == Some(*id)
    }

    pub fn editable_properties(&self) -> &EditableProperties {
        &self.editable
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply `f` to the matrix, bumping the version if it succeeds.
    pub(crate) fn mutate<R>(
        &mut self,
        f: impl FnOnce(&mut CellMatrix) -> std::result::Result<R, MatrixError>,
    ) -> Result<R> {
        let out = f(Arc::make_mut(&mut self.matrix))?;
        self.version += 1;
        Ok(out)
    }

    /// Re-read the editable snapshot if `id` is the focused cell.
    pub(crate) fn refresh_editable(&mut self, id: &CellId) {
        if self.is_focused(id)
            && let Ok(cell) = self.matrix.cell(id)
        {
            self.editable = EditableProperties::from_cell(cell);
        }
    }

    /// Swap in a whole new matrix of the same dimensions in one step.
    pub fn replace_matrix(&mut self, matrix: CellMatrix) -> Result<()> {
        let (expected_rows, expected_cols) = self.dimensions();
        let (rows, cols) = matrix.dimensions();
        if (rows, cols) != (expected_rows, expected_cols) {
            return Err(GridpadError::DimensionMismatch {
                expected_rows,
                expected_cols,
                rows,
                cols,
            });
        }
        self.matrix = Arc::new(matrix);
        self.version += 1;
        if let Some(id) = self.focused {
            self.refresh_editable(&id);
        }
        Ok(())
    }
}
