//! A document wired to debounced persistence.

use crate::config::GridConfig;
use crate::document::Document;
use crate::storage::{KeyValueStore, Persistence};
use log::info;

/// Owns the live [`Document`] and saves it after every change.
///
/// Saves go through [`Persistence`], so bursts of edits collapse into one
/// write of the final state.
pub struct Session<S: KeyValueStore> {
    doc: Document,
    persistence: Persistence<S>,
    row_limit: usize,
    column_limit: usize,
    saved_version: u64,
}

impl<S: KeyValueStore> Session<S> {
    /// Restore the saved grid if its dimensions match `config`, else start
    /// from blank cells (and schedule a save of them).
    pub fn open(config: &GridConfig, store: S) -> Self {
        let (row_limit, column_limit) = config.limits();
        let mut persistence = Persistence::new(store, config.debounce());

        let doc = match persistence.load(row_limit, column_limit) {
            Some(matrix) => {
                info!("Restored saved {}x{} grid", row_limit, column_limit);
                Document::from_matrix(matrix)
            }
            None => {
                let doc = Document::new(row_limit, column_limit);
                persistence.save(doc.matrix(), row_limit, column_limit);
                doc
            }
        };

        Session {
            saved_version: doc.version(),
            doc,
            persistence,
            row_limit,
            column_limit,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn limits(&self) -> (usize, usize) {
        (self.row_limit, self.column_limit)
    }

    /// Run an edit against the document, scheduling a save if it changed
    /// the grid. Whatever `f` returns is passed back.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Document) -> R) -> R {
        let out = f(&mut self.doc);
        if self.doc.version() != self.saved_version {
            self.persistence
                .save(self.doc.matrix(), self.row_limit, self.column_limit);
            self.saved_version = self.doc.version();
        }
        out
    }

    /// Write any pending save now.
    pub fn flush(&mut self) -> bool {
        self.persistence.flush()
    }
}
