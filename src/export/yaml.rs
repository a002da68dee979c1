//! YAML Export functionality
//!
//! Exports an allocation report to YAML for human-readable output.

use crate::error::{FeeError, FeeResult};
use crate::export::json::AllocationExport;
use crate::models::Allocation;
use std::io::Write;

/// Export an allocation as YAML
pub fn export_allocation_yaml<W: Write>(allocation: &Allocation, writer: &mut W) -> FeeResult<()> {
    let export = AllocationExport::from_allocation(allocation);

    serde_yaml::to_writer(writer, &export).map_err(|e| FeeError::Export(e.to_string()))?;

    Ok(())
}
