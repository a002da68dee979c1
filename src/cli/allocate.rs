//! CLI handler for fee allocation
//!
//! Bridges the clap arguments with the allocation service and renders the
//! report in the requested format.

use std::io::Write;

use clap::Args;
use tracing::debug;

use crate::config::{OutputFormat, Settings};
use crate::display::{format_allocation_table, format_allocation_text, format_warnings};
use crate::error::{FeeError, FeeResult};
use crate::export::{export_allocation_csv, export_allocation_json, export_allocation_yaml};
use crate::models::{Allocation, MAX_PRECISION};
use crate::services::{AllocationRequest, Allocator};

/// Arguments of an allocation
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocateArgs {
    /// Charge amounts, e.g. 10 20.50 1/3
    #[arg(value_name = "CHARGES", allow_negative_numbers = true)]
    pub charges: Vec<String>,

    /// Total of charges plus fee
    #[arg(short, long, allow_negative_numbers = true)]
    pub total: Option<String>,

    /// Fee applied to the sum of charges. If --total is also given and they
    /// disagree, the difference becomes an extra charge
    #[arg(short, long, allow_negative_numbers = true)]
    pub fee: Option<String>,

    /// Decimal places of output [default: 2, or the configured precision]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(..=MAX_PRECISION as i64))]
    pub precision: Option<u32>,

    /// Output format [default: text, or the configured format]
    #[arg(short = 'o', long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Allocate the fee and write the report
///
/// Allocation lines go to `out`; warnings go to `err` once every line has
/// been written. Nothing is written when the allocation fails.
pub fn handle_allocate_command<O, E>(
    args: AllocateArgs,
    settings: &Settings,
    out: &mut O,
    err: &mut E,
) -> FeeResult<()>
where
    O: Write,
    E: Write,
{
    let precision = args.precision.unwrap_or(settings.precision);
    let format = args.format.unwrap_or(settings.format);
    debug!(precision, %format, "allocating");

    let request = AllocationRequest {
        charges: args.charges,
        total: args.total,
        fee: args.fee,
    };
    let allocation = Allocator::new(precision).allocate(&request)?;

    render(&allocation, format, out)?;
    out.flush()?;

    for warning in format_warnings(&allocation) {
        writeln!(err, "{}", warning)?;
    }

    Ok(())
}

/// Write the allocation in the given format
fn render<W: Write>(allocation: &Allocation, format: OutputFormat, out: &mut W) -> FeeResult<()> {
    match format {
        OutputFormat::Text => out
            .write_all(format_allocation_text(allocation).as_bytes())
            .map_err(FeeError::from),
        OutputFormat::Table => out
            .write_all(format_allocation_table(allocation).as_bytes())
            .map_err(FeeError::from),
        OutputFormat::Json => export_allocation_json(allocation, out),
        OutputFormat::Yaml => export_allocation_yaml(allocation, out),
        OutputFormat::Csv => export_allocation_csv(allocation, out),
    }
}
