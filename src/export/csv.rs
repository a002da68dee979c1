//! CSV Export functionality
//!
//! Exports allocation lines to CSV format (spreadsheet-compatible).

use crate::error::{FeeError, FeeResult};
use crate::export::json::AllocationExport;
use crate::models::Allocation;
use std::io::Write;

/// Export one record per allocation line
///
/// Columns: charge, proportion, total, inferred
pub fn export_allocation_csv<W: Write>(allocation: &Allocation, writer: &mut W) -> FeeResult<()> {
    let export = AllocationExport::from_allocation(allocation);
    let mut csv_writer = csv::Writer::from_writer(writer);

    for line in &export.lines {
        csv_writer
            .serialize(line)
            .map_err(|e| FeeError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| FeeError::Export(e.to_string()))?;

    Ok(())
}
