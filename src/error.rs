//! Custom error types for fee-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Advisory conditions (negative fee, rounding
//! remainder, ...) are not errors; see [`crate::models::Warning`].

use thiserror::Error;

/// The main error type for fee-cli operations
#[derive(Error, Debug)]
pub enum FeeError {
    /// A required input is missing
    #[error("{0}")]
    Input(String),

    /// A charge, total or fee literal is not an exact number
    #[error("invalid amount '{literal}': {reason}")]
    Parse { literal: String, reason: String },

    /// The allocation cannot be computed (division by a zero charge sum)
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FeeError {
    /// Create a parse error naming the offending literal
    pub fn parse(literal: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            literal: literal.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if this is an input error
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Check if this is an arithmetic error
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Self::Arithmetic(_))
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Input(_) => 2,
            Self::Parse { .. } => 3,
            Self::Arithmetic(_) => 4,
            Self::Config(_) | Self::Io(_) | Self::Json(_) | Self::Export(_) => 1,
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for FeeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FeeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for fee-cli operations
pub type FeeResult<T> = Result<T, FeeError>;
