//! Configuration module for fee-cli
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings (default precision and output format)

pub mod paths;
pub mod settings;

pub use paths::FeePaths;
pub use settings::{OutputFormat, Settings};
