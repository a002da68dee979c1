//! Export module for fee-cli
//!
//! Provides machine-readable renderings of an allocation report:
//! - CSV: one record per allocation line (spreadsheet-compatible)
//! - JSON: the full report, including inference and warnings
//! - YAML: the same report in human-readable form

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_allocation_csv;
pub use json::{export_allocation_json, AllocationExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_allocation_yaml;
