//! Path management for fee-cli
//!
//! Provides platform-aware path resolution for the settings file.
//!
//! ## Path Resolution Order
//!
//! 1. `FEE_CLI_CONFIG_DIR` environment variable (if set)
//! 2. The platform configuration directory for `fee-cli`
//!    (`$XDG_CONFIG_HOME/fee-cli` or `~/.config/fee-cli` on Linux)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::FeeError;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "FEE_CLI_CONFIG_DIR";

/// Manages all paths used by fee-cli
#[derive(Debug, Clone)]
pub struct FeePaths {
    /// Base directory for fee-cli configuration
    base_dir: PathBuf,
}

impl FeePaths {
    /// Create a new FeePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FeeError> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create FeePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }
}

/// Resolve the default configuration directory for this platform
fn resolve_default_path() -> Result<PathBuf, FeeError> {
    ProjectDirs::from("", "", "fee-cli")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FeeError::Config("Could not determine home directory".into()))
}
