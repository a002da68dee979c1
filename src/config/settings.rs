//! User settings for fee-cli
//!
//! Manages user preferences: the default display precision and the default
//! output format. Command-line flags take precedence over both.

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::paths::FeePaths;
use crate::error::FeeError;
use crate::models::MAX_PRECISION;

/// Output format preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<charge> + <proportion> = <total>` lines (default)
    #[default]
    Text,
    /// Aligned table with a totals row
    Table,
    /// JSON report
    Json,
    /// YAML report
    Yaml,
    /// CSV records, one per line
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Csv => "csv",
        };
        write!(f, "{}", name)
    }
}

/// User settings for fee-cli
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Decimal places of output
    #[serde(default = "default_precision")]
    pub precision: u32,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_schema_version() -> u32 {
    1
}

fn default_precision() -> u32 {
    2
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            precision: default_precision(),
            format: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from the default location, or defaults if there is no file
    pub fn load_or_default(paths: &FeePaths) -> Result<Self, FeeError> {
        Self::load_from(&paths.settings_file())
    }

    /// Load settings from a specific file, or defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, FeeError> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| FeeError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            FeeError::Config(format!(
                "Failed to parse settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        if settings.precision > MAX_PRECISION {
            return Err(FeeError::Config(format!(
                "precision {} in {} exceeds the maximum of {}",
                settings.precision,
                path.display(),
                MAX_PRECISION
            )));
        }

        Ok(settings)
    }
}
