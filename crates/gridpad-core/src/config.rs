//! Grid configuration loaded from `config.toml`.

use crate::error::{GridpadError, Result};
use crate::viewport::GridWindow;
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MAX_CONFIG_FILE_BYTES: u64 = 65_536;

pub const DEFAULT_ROW_LIMIT: usize = 100;
pub const DEFAULT_COLUMN_LIMIT: usize = 100;
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;
pub const DEFAULT_COLUMN_WIDTH: f64 = 100.0;
pub const DEFAULT_ROW_HEIGHT: f64 = 28.0;

/// Grid dimensions, save debounce and virtualization item sizes.
///
/// Changing `row_limit` or `column_limit` invalidates any persisted grid.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub row_limit: usize,
    pub column_limit: usize,
    pub debounce_ms: u64,
    pub column_width: f64,
    pub row_height: f64,
    pub storage_dir: Option<PathBuf>,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            row_limit: DEFAULT_ROW_LIMIT,
            column_limit: DEFAULT_COLUMN_LIMIT,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            column_width: DEFAULT_COLUMN_WIDTH,
            row_height: DEFAULT_ROW_HEIGHT,
            storage_dir: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("me", "shoryuken", "gridpad")
}

/// `config.toml` in the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    let mut path = project_dirs()?.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

/// Platform data directory used by the file store.
pub fn default_storage_dir() -> Option<PathBuf> {
    Some(project_dirs()?.data_dir().to_path_buf())
}

impl GridConfig {
    pub fn from_toml(content: &str) -> Result<GridConfig> {
        let config: GridConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// Never fails: problems are reported as warnings and defaults are used.
    /// A missing default file is not worth a warning; a missing explicit one is.
    pub fn load(path: Option<&Path>) -> (GridConfig, Vec<String>) {
        let mut warnings = Vec::new();
        let Some(config_path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
            return (GridConfig::default(), warnings);
        };

        if !config_path.exists() {
            if path.is_some() {
                warnings.push(format!("Config file not found: {}", config_path.display()));
            }
            return (GridConfig::default(), warnings);
        }

        let config = match std::fs::metadata(&config_path) {
            Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
                warnings.push(format!(
                    "Refusing to read {}: file too large ({} bytes, max {})",
                    config_path.display(),
                    meta.len(),
                    MAX_CONFIG_FILE_BYTES
                ));
                None
            }
            Ok(_) => match std::fs::read_to_string(&config_path) {
                Ok(content) => match GridConfig::from_toml(&content) {
                    Ok(config) => Some(config),
                    Err(err) => {
                        warnings.push(format!("Failed to load {}: {}", config_path.display(), err));
                        None
                    }
                },
                Err(err) => {
                    warnings.push(format!("Failed to read {}: {}", config_path.display(), err));
                    None
                }
            },
            Err(err) => {
                warnings.push(format!(
                    "Failed to read metadata for {}: {}",
                    config_path.display(),
                    err
                ));
                None
            }
        };

        (config.unwrap_or_default(), warnings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.row_limit == 0 || self.column_limit == 0 {
            return Err(GridpadError::InvalidConfig(format!(
                "grid must have at least one row and column (got {}x{})",
                self.row_limit, self.column_limit
            )));
        }
        if !(self.column_width > 0.0 && self.row_height > 0.0) {
            return Err(GridpadError::InvalidConfig(
                "column_width and row_height must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn limits(&self) -> (usize, usize) {
        (self.row_limit, self.column_limit)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Configured storage directory, falling back to the platform data dir.
    pub fn storage_dir(&self) -> Option<PathBuf> {
        self.storage_dir.clone().or_else(default_storage_dir)
    }

    /// Virtualization window sized for this grid (viewport starts empty).
    pub fn window(&self) -> GridWindow {
        GridWindow::new(
            self.row_limit,
            self.column_limit,
            self.column_width,
            self.row_height,
        )
    }
}
