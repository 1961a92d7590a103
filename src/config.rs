//! Host configuration.
//!
//! The configuration is loaded from a JSON file.  The top-level schema uses
//! a `"grid"` key so the file can be extended with additional sections later
//! without breaking backward compatibility.
//!
//! # Example
//!
//! ```json
//! {
//!   "grid": {
//!     "rows": 4,
//!     "cols": 4,
//!     "overflow": "signal"
//!   }
//! }
//! ```

use crate::engine::OverflowPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
///
/// Every field is optional — a minimal `{}` file is valid and all sections
/// fall back to their compiled-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Grid capacity and overflow settings.
    #[serde(default)]
    pub grid: GridConfig,
}

/// Grid capacity and overflow settings.
///
/// Defaults to a 4×4 grid with the source-faithful `signal` overflow
/// behavior (report and keep inserting).  Set `"overflow": "reject"` to
/// refuse insertions once the grid is full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Row capacity.  Must be at least 1; validated when the engine is
    /// constructed, not at parse time.
    pub rows: usize,
    /// Column capacity.  Must be at least 1.
    pub cols: usize,
    /// What `insert` does once every row is occupied.
    pub overflow: OverflowPolicy,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            overflow: OverflowPolicy::Signal,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
