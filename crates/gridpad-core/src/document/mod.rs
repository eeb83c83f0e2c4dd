//! Document state and logic (UI-agnostic).

mod focus;
mod io;
mod ops;
mod state;

pub use focus::CellGesture;
pub use ops::PropertyChange;
pub use state::{Document, EditableProperties};
