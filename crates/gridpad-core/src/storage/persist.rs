//! Debounced grid persistence with dimension-checked restore.
//!
//! Three entries are written per save: the JSON cell payload and the row and
//! column limits it was built with. A restore is only accepted when both
//! stored limits equal the caller's current limits.

use super::store::KeyValueStore;
use gridpad_engine::engine::{Cell, CellMatrix};
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

pub const CELLS_KEY: &str = "excelCellsData";
pub const ROW_LIMIT_KEY: &str = "ROW_LIMIT";
pub const COLUMN_LIMIT_KEY: &str = "COLUMN_LIMIT";

/// Serialised grid waiting for its debounce window to elapse.
struct PendingWrite {
    payload: String,
    row_limit: usize,
    column_limit: usize,
}

type Pending = Arc<Mutex<Option<PendingWrite>>>;

fn take_pending(pending: &Pending) -> Option<PendingWrite> {
    lock(pending).take()
}

fn lock(pending: &Pending) -> MutexGuard<'_, Option<PendingWrite>> {
    pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Write all three entries. Failures are logged and the write is skipped.
fn commit<S: KeyValueStore>(store: &S, write: &PendingWrite) -> bool {
    let entries = [
        (CELLS_KEY, write.payload.clone()),
        (ROW_LIMIT_KEY, write.row_limit.to_string()),
        (COLUMN_LIMIT_KEY, write.column_limit.to_string()),
    ];
    for (key, value) in &entries {
        if let Err(err) = store.set(key, value) {
            warn!("Skipping grid save: failed to write {}: {}", key, err);
            return false;
        }
    }
    debug!(
        "Saved {}x{} grid ({} bytes)",
        write.row_limit,
        write.column_limit,
        write.payload.len()
    );
    true
}

/// Saves a grid to a [`KeyValueStore`] at most once per quiet period.
///
/// Each `save` replaces the pending snapshot and restarts the timer, so only
/// the latest state is ever written. Timers run on the ambient tokio runtime;
/// without one, `save` writes straight away.
pub struct Persistence<S: KeyValueStore> {
    store: Arc<S>,
    debounce: Duration,
    pending: Pending,
    timer: Option<JoinHandle<()>>,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S, debounce: Duration) -> Self {
        Persistence {
            store: Arc::new(store),
            debounce,
            pending: Arc::new(Mutex::new(None)),
            timer: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Whether a save is waiting on its timer.
    pub fn has_pending(&self) -> bool {
        lock(&self.pending).is_some()
    }

    /// Schedule a save of `matrix`, replacing any save still waiting.
    pub fn save(&mut self, matrix: &CellMatrix, row_limit: usize, column_limit: usize) {
        let payload = match serde_json::to_string(matrix) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("Skipping grid save: serialisation failed: {}", err);
                return;
            }
        };
        *lock(&self.pending) = Some(PendingWrite {
            payload,
            row_limit,
            column_limit,
        });

        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        let Ok(handle) = Handle::try_current() else {
            debug!("No async runtime; saving grid immediately");
            self.flush();
            return;
        };

        let pending = Arc::clone(&self.pending);
        let store = Arc::clone(&self.store);
        let delay = self.debounce;
        self.timer = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(write) = take_pending(&pending) {
                commit(store.as_ref(), &write);
            }
        }));
        debug!("Grid save scheduled in {:?}", delay);
    }

    /// Write any pending save now. Returns whether something was written.
    pub fn flush(&mut self) -> bool {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        match take_pending(&self.pending) {
            Some(write) => commit(self.store.as_ref(), &write),
            None => false,
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!("Ignoring saved grid: failed to read {}: {}", key, err);
                None
            }
        }
    }

    fn read_limit(&self, key: &str) -> Option<usize> {
        let raw = self.read(key)?;
        match raw.trim().parse::<usize>() {
            Ok(limit) => Some(limit),
            Err(_) => {
                warn!("Ignoring saved grid: {} is not a number: {:?}", key, raw);
                None
            }
        }
    }

    /// Restore the saved grid if it was built with exactly these limits.
    ///
    /// Missing, mismatched or unreadable data all yield `None`.
    pub fn load(&self, row_limit: usize, column_limit: usize) -> Option<CellMatrix> {
        let payload = self.read(CELLS_KEY)?;
        let stored_rows = self.read_limit(ROW_LIMIT_KEY)?;
        let stored_columns = self.read_limit(COLUMN_LIMIT_KEY)?;

        if (stored_rows, stored_columns) != (row_limit, column_limit) {
            info!(
                "Saved grid is {}x{}, configured {}x{}; starting fresh",
                stored_rows, stored_columns, row_limit, column_limit
            );
            return None;
        }

        let rows: Vec<Vec<Cell>> = match serde_json::from_str(&payload) {
            Ok(rows) => rows,
            Err(err) => {
                warn!("Ignoring saved grid: {}", err);
                return None;
            }
        };
        let matrix = match CellMatrix::from_rows(rows) {
            Ok(matrix) => matrix,
            Err(err) => {
                warn!("Ignoring saved grid: {}", err);
                return None;
            }
        };
        if matrix.dimensions() != (row_limit, column_limit) {
            warn!(
                "Ignoring saved grid: payload is {}x{} but limits say {}x{}",
                matrix.row_count(),
                matrix.column_count(),
                row_limit,
                column_limit
            );
            return None;
        }
        Some(matrix)
    }
}
