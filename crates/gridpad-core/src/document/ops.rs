use super::state::{Document, EditableProperties};
use crate::error::{GridpadError, Result};
use gridpad_engine::engine::{Cell, CellId, FontFamily, is_normalized_color, normalize_color};
use std::str::FromStr;
use std::sync::Arc;

/// One style attribute with its new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyChange {
    BackgroundColor(String),
    TextColor(String),
    FontFamily(FontFamily),
    Bold(bool),
    Italic(bool),
    Strikethrough(bool),
}

fn parse_flag(property: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" => Ok(false),
        _ => Err(GridpadError::InvalidProperty(format!(
            "{} expects true/false, got {:?}",
            property, value
        ))),
    }
}

fn checked_color(property: &str, value: &str) -> Result<String> {
    let color = normalize_color(value);
    if !is_normalized_color(&color) {
        return Err(GridpadError::InvalidProperty(format!(
            "{} expects a colour, got {:?}",
            property, value
        )));
    }
    Ok(color)
}

impl PropertyChange {
    /// Build a change from a property name and a textual value.
    ///
    /// Names accept both the form field names (`bgColor`, `isBold`, ...) and
    /// short aliases (`bg`, `bold`, ...).
    pub fn parse(property: &str, value: &str) -> Result<PropertyChange> {
        let change = match property {
            "bgColor" | "bg" | "background" => PropertyChange::BackgroundColor(value.to_string()),
            "textColor" | "color" | "text" => PropertyChange::TextColor(value.to_string()),
            "fontFamily" | "font" => PropertyChange::FontFamily(
                FontFamily::from_str(value).map_err(GridpadError::InvalidProperty)?,
            ),
            "isBold" | "bold" => PropertyChange::Bold(parse_flag(property, value)?),
            "isItalic" | "italic" => PropertyChange::Italic(parse_flag(property, value)?),
            "isStrikethrough" | "strike" | "strikethrough" => {
                PropertyChange::Strikethrough(parse_flag(property, value)?)
            }
            other => {
                return Err(GridpadError::InvalidProperty(format!(
                    "unknown property {:?}",
                    other
                )));
            }
        };
        Ok(change)
    }

    fn normalized(self) -> Result<PropertyChange> {
        match self {
            PropertyChange::BackgroundColor(c) => {
                Ok(PropertyChange::BackgroundColor(checked_color("bgColor", &c)?))
            }
            PropertyChange::TextColor(c) => {
                Ok(PropertyChange::TextColor(checked_color("textColor", &c)?))
            }
            other => Ok(other),
        }
    }

    fn apply_to_cell(&self, cell: &mut Cell) {
        match self {
            PropertyChange::BackgroundColor(c) => cell.background_color = c.clone(),
            PropertyChange::TextColor(c) => cell.text_color = c.clone(),
            PropertyChange::FontFamily(f) => cell.font_family = *f,
            PropertyChange::Bold(b) => cell.bold = *b,
            PropertyChange::Italic(b) => cell.italic = *b,
            PropertyChange::Strikethrough(b) => cell.strikethrough = *b,
        }
    }

    fn apply_to_properties(&self, props: &mut EditableProperties) {
        match self {
            PropertyChange::BackgroundColor(c) => props.bg_color = c.clone(),
            PropertyChange::TextColor(c) => props.text_color = c.clone(),
            PropertyChange::FontFamily(f) => props.font_family = *f,
            PropertyChange::Bold(b) => props.bold = *b,
            PropertyChange::Italic(b) => props.italic = *b,
            PropertyChange::Strikethrough(b) => props.strikethrough = *b,
        }
    }
}

impl Document {
    /// Change one style attribute of the focused cell `id`.
    pub fn set_property(&mut self, id: &CellId, change: PropertyChange) -> Result<()> {
        if !self.is_focused(id) {
            return Err(GridpadError::NoFocusedCell);
        }
        let change = change.normalized()?;
        self.mutate(|m| m.update(id, |cell| change.apply_to_cell(cell)))?;
        change.apply_to_properties(&mut self.editable);
        Ok(())
    }

    /// [`Document::set_property`] on whichever cell has focus.
    pub fn set_focused_property(&mut self, change: PropertyChange) -> Result<()> {
        let id = self.focused.ok_or(GridpadError::NoFocusedCell)?;
        self.set_property(&id, change)
    }

    /// Append the right neighbour's content to `id` and blank the neighbour.
    ///
    /// `id` keeps its own style. Returns `false` without changing anything
    /// when `id` is in the last column.
    pub fn merge(&mut self, id: &CellId) -> Result<bool> {
        self.matrix.cell(id)?;
        let Some(right) = id.right_neighbor(self.matrix.column_count()) else {
            return Ok(false);
        };
        self.mutate(|m| {
            let taken = m.update(&right, |cell| {
                let content = std::mem::take(&mut cell.content);
                cell.reset();
                content
            })?;
            m.update(id, |cell| cell.content.push_str(&taken))
        })?;
        self.refresh_editable(&right);
        Ok(true)
    }

    /// [`Document::merge`] on the focused cell.
    pub fn merge_focused(&mut self) -> Result<bool> {
        let id = self.focused.ok_or(GridpadError::NoFocusedCell)?;
        self.merge(&id)
    }

    /// Reset one cell to blank.
    pub fn clear(&mut self, id: &CellId) -> Result<()> {
        self.mutate(|m| m.update(id, Cell::reset))?;
        if self.is_focused(id) {
            self.editable = EditableProperties::default();
        }
        Ok(())
    }

    /// Reset every cell to blank.
    pub fn clear_all(&mut self) {
        let blank = self.matrix.map(|cell| Cell::blank(cell.id));
        self.matrix = Arc::new(blank);
        self.version += 1;
        self.editable = EditableProperties::default();
    }
}
