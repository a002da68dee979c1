//! JSON Export functionality
//!
//! Exports an allocation report to JSON with schema versioning. Amounts are
//! written as decimal strings at the report precision so that no value passes
//! through a binary float.

use crate::error::{FeeError, FeeResult};
use crate::models::Allocation;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Serializable allocation report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Decimal places used for every amount below
    pub precision: u32,

    /// Sum of all charges, inferred charge included
    pub charges_sum: String,

    pub fee: String,

    /// Reconciled total
    pub total: String,

    /// The recovered quantity, if any
    pub inferred: Option<InferredExport>,

    pub lines: Vec<LineExport>,

    /// Warning messages in report order
    pub warnings: Vec<String>,
}

/// The quantity recovered during resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredExport {
    /// Either "fee" or "charge"
    pub kind: String,
    pub amount: String,
}

/// One allocation line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineExport {
    pub charge: String,
    pub proportion: String,
    pub total: String,
    pub inferred: bool,
}

impl AllocationExport {
    /// Build the export view of an allocation
    pub fn from_allocation(allocation: &Allocation) -> Self {
        let precision = allocation.precision;

        let lines = allocation
            .lines
            .iter()
            .map(|line| LineExport {
                charge: line.charge.amount.format(precision),
                proportion: line.proportion.format(precision),
                total: line.line_total.format(precision),
                inferred: line.charge.is_inferred(),
            })
            .collect();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            precision,
            charges_sum: allocation.sum.format(precision),
            fee: allocation.fee.format(precision),
            total: allocation.total.format(precision),
            inferred: allocation.inference.as_ref().map(|inference| InferredExport {
                kind: inference.kind().to_string(),
                amount: inference.amount().format(precision),
            }),
            lines,
            warnings: allocation.warnings.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// Export an allocation as pretty-printed JSON
pub fn export_allocation_json<W: Write>(allocation: &Allocation, writer: &mut W) -> FeeResult<()> {
    let export = AllocationExport::from_allocation(allocation);

    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| FeeError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FeeError::Export(e.to_string()))?;

    Ok(())
}
