//! Engine configuration.
//!
//! Load tuning knobs for the combination generator and catalog planning
//! from TOML. Every field has a default, so an empty document is valid.
//!
//! ```
//! use u_timetable::config::TimetableConfig;
//!
//! let config = TimetableConfig::from_toml_str(r#"
//!     [generator]
//!     warning_threshold = 500
//!     time_limit_ms = 2000
//!
//!     [catalog]
//!     max_semester_credits = 18
//! "#).unwrap();
//!
//! assert_eq!(config.generator.warning_threshold, 500);
//! assert_eq!(config.catalog.max_semester_credits, 18);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// Default number of possible combinations above which a warning is attached.
pub const DEFAULT_WARNING_THRESHOLD: u64 = 1000;

/// Default credit cap per semester.
pub const DEFAULT_MAX_SEMESTER_CREDITS: u32 = 21;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TimetableConfig {
    /// Combination generator settings.
    pub generator: GeneratorConfig,
    /// Catalog planning settings.
    pub catalog: CatalogConfig,
}

/// Combination generator settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GeneratorConfig {
    /// `totalPossible` above this value attaches an advisory warning.
    pub warning_threshold: u64,
    /// Limit applied when a request does not carry its own.
    pub default_limit: Option<usize>,
    /// Wall-clock budget for one generation call (ms).
    pub time_limit_ms: Option<u64>,
    /// Seed for combination ids. `None` draws ids from OS entropy.
    pub id_seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            default_limit: None,
            time_limit_ms: None,
            id_seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Time limit as a [`Duration`], if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}

/// Catalog planning settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CatalogConfig {
    /// Maximum credits a single semester may carry.
    pub max_semester_credits: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_semester_credits: DEFAULT_MAX_SEMESTER_CREDITS,
        }
    }
}

impl TimetableConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::Config`] if the file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TimetableError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| TimetableError::Config(e.to_string()))
    }
}
