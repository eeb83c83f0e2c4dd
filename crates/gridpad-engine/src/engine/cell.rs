//! Cell record and style attributes.

use super::cell_id::CellId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

/// Font families a cell can be rendered with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    #[serde(rename = "sans")]
    Sans,
    #[default]
    #[serde(rename = "sans-serif")]
    SansSerif,
    #[serde(rename = "cursive")]
    Cursive,
    #[serde(rename = "monospace")]
    Monospace,
    #[serde(rename = "fantasy")]
    Fantasy,
}

impl FontFamily {
    pub const ALL: [FontFamily; 5] = [
        FontFamily::Sans,
        FontFamily::SansSerif,
        FontFamily::Cursive,
        FontFamily::Monospace,
        FontFamily::Fantasy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FontFamily::Sans => "sans",
            FontFamily::SansSerif => "sans-serif",
            FontFamily::Cursive => "cursive",
            FontFamily::Monospace => "monospace",
            FontFamily::Fantasy => "fantasy",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FontFamily::ALL
            .into_iter()
            .find(|family| family.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown font family: {}", s))
    }
}

/// One matrix entry: text content plus six style attributes.
///
/// Field names on the wire match the grid widget's stored layout
/// (`cellData`, `bgColor`, `isBold`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    #[serde(rename = "cellData")]
    pub content: String,
    #[serde(rename = "bgColor")]
    pub background_color: String,
    #[serde(rename = "textColor")]
    pub text_color: String,
    #[serde(rename = "fontFamily")]
    pub font_family: FontFamily,
    #[serde(rename = "isBold")]
    pub bold: bool,
    #[serde(rename = "isItalic")]
    pub italic: bool,
    #[serde(rename = "isStrikethrough")]
    pub strikethrough: bool,
}

impl Cell {
    /// Empty content with default styling.
    pub fn blank(id: CellId) -> Cell {
        Cell {
            id,
            content: String::new(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            font_family: FontFamily::default(),
            bold: false,
            italic: false,
            strikethrough: false,
        }
    }

    /// Given content with default styling.
    pub fn with_content(id: CellId, content: impl Into<String>) -> Cell {
        Cell {
            content: content.into(),
            ..Cell::blank(id)
        }
    }

    /// Reset content and styling, keeping the id.
    pub fn reset(&mut self) {
        *self = Cell::blank(self.id);
    }

    pub fn is_blank(&self) -> bool {
        *self == Cell::blank(self.id)
    }

    pub fn has_default_style(&self) -> bool {
        self.background_color == DEFAULT_BACKGROUND_COLOR
            && self.text_color == DEFAULT_TEXT_COLOR
            && self.font_family == FontFamily::default()
            && !self.bold
            && !self.italic
            && !self.strikethrough
    }
}
