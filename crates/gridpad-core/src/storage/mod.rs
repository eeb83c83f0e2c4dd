//! Storage: CSV import/export, the key-value store capability and debounced
//! grid persistence.

pub mod csv;
mod persist;
mod store;

pub use csv::{CSV_FILE_NAME, CSV_MIME_TYPE, from_csv, read_csv, to_csv, write_csv};
pub use persist::{CELLS_KEY, COLUMN_LIMIT_KEY, Persistence, ROW_LIMIT_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
