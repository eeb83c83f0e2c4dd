//! gridpad-core - UI-agnostic grid document, CSV codec and persistence.

pub mod config;
pub mod document;
pub mod error;
pub mod session;
pub mod storage;
pub mod viewport;

pub use config::GridConfig;
pub use document::{CellGesture, Document, EditableProperties, PropertyChange};
pub use error::{GridpadError, Result};
pub use session::Session;
pub use storage::{FileStore, KeyValueStore, MemoryStore, Persistence};
pub use viewport::{GridWindow, ScrollOffset, ScrollTarget, ViewportSync};

pub use gridpad_engine::engine::{Cell, CellId, CellMatrix, FontFamily};
