//! Allocation display formatting
//!
//! Formats an allocation for terminal output as plain lines or a table.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Allocation;

/// Prefix marking a diagnostic line as non-fatal
pub const WARNING_PREFIX: &str = "warn: ";

#[derive(Tabled)]
struct AllocationRow {
    #[tabled(rename = "Charge")]
    charge: String,
    #[tabled(rename = "Proportion")]
    proportion: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Source")]
    source: String,
}

/// Format the allocation as one `<charge> + <proportion> = <total>` line per charge
pub fn format_allocation_text(allocation: &Allocation) -> String {
    let mut output = String::new();
    for line in allocation.formatted_lines() {
        output.push_str(&line);
        output.push('\n');
    }
    output
}

/// Format the allocation as a table with a closing totals row
pub fn format_allocation_table(allocation: &Allocation) -> String {
    let precision = allocation.precision;

    let mut rows: Vec<AllocationRow> = allocation
        .lines
        .iter()
        .map(|line| AllocationRow {
            charge: line.charge.amount.format(precision),
            proportion: line.proportion.format(precision),
            total: line.line_total.format(precision),
            source: line.charge.origin.to_string(),
        })
        .collect();

    rows.push(AllocationRow {
        charge: allocation.sum.format(precision),
        proportion: allocation.fee.format(precision),
        total: allocation.total.format(precision),
        source: "total".to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format each warning as a `warn: <message>` line, in report order
pub fn format_warnings(allocation: &Allocation) -> Vec<String> {
    allocation
        .warnings
        .iter()
        .map(|w| format!("{}{}", WARNING_PREFIX, w))
        .collect()
}
