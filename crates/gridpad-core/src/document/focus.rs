//! Focus and edit coordination.
//!
//! At most one cell is focused and at most one is being edited. Editing only
//! starts on the focused cell; committing an edit works wherever focus has
//! moved since.

use super::state::{Document, EditableProperties};
use crate::error::Result;
use gridpad_engine::engine::CellId;
use log::debug;

/// User gestures on a cell, already resolved to that cell's id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellGesture {
    /// The cell received focus.
    Focus,
    /// Double click (or equivalent) on the cell.
    DoubleActivate,
    /// Enter pressed while the cell has focus.
    Enter,
    /// The edit input lost focus with this text.
    Blur(String),
}

impl Document {
    /// Focus `id` and load its style into the editable snapshot.
    pub fn focus(&mut self, id: &CellId) -> Result<()> {
        let cell = self.matrix.cell(id)?;
        self.editable = EditableProperties::from_cell(cell);
        if self.focused != Some(*id) {
            debug!("focus {:?} -> {}", self.focused.map(|f| f.to_string()), id);
        }
        self.focused = Some(*id);
        self.last_focused = Some(*id);
        Ok(())
    }

    /// Put the focused cell into edit mode.
    ///
    /// Returns `false` (and does nothing) if `id` is not the focused cell.
    pub fn begin_edit(&mut self, id: &CellId) -> bool {
        if !self.is_focused(id) {
            debug!("ignoring edit of unfocused cell {}", id);
            return false;
        }
        self.editing = Some(*id);
        debug!("editing {}", id);
        true
    }

    /// Write edited text into the cell and leave edit mode.
    pub fn commit_edit(&mut self, id: &CellId, content: impl Into<String>) -> Result<()> {
        let content = content.into();
        self.mutate(|m| m.update(id, |cell| cell.content = content))?;
        if self.is_editing(id) {
            self.editing = None;
        }
        debug!("committed edit of {}", id);
        Ok(())
    }

    /// Drop focus and reset the editable snapshot to defaults.
    pub fn clear_focus(&mut self) {
        if let Some(id) = self.focused.take() {
            debug!("focus {} -> none", id);
        }
        self.editable = EditableProperties::default();
    }

    /// Focus the most recently focused cell again, if there was one.
    pub fn refocus_last(&mut self) -> Result<Option<CellId>> {
        let Some(id) = self.last_focused else {
            return Ok(None);
        };
        self.focus(&id)?;
        Ok(Some(id))
    }

    /// Dispatch a gesture to the matching coordinator operation.
    pub fn handle_gesture(&mut self, id: &CellId, gesture: CellGesture) -> Result<()> {
        match gesture {
            CellGesture::Focus => self.focus(id),
            CellGesture::DoubleActivate | CellGesture::Enter => {
                self.begin_edit(id);
                Ok(())
            }
            CellGesture::Blur(text) => self.commit_edit(id, text),
        }
    }
}
