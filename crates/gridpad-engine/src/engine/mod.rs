//! Grid data layer.
//!
//! - [`Cell`], [`FontFamily`] - One matrix entry and its style attributes
//! - [`CellId`], [`column_label`] - Position identity (`"row-col"`) and column letters
//! - [`CellMatrix`] - Fixed-size rectangular cell store
//! - [`normalize_color`] - Colour values to `#rrggbb`

mod cell;
mod cell_id;
mod color;
mod error;
mod matrix;

pub use cell::{Cell, DEFAULT_BACKGROUND_COLOR, DEFAULT_TEXT_COLOR, FontFamily};
pub use cell_id::{CellId, column_label};
pub use color::{is_normalized_color, normalize_color};
pub use error::MatrixError;
pub use matrix::CellMatrix;
