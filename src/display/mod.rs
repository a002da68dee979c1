//! Display formatting for terminal output
//!
//! Provides utilities for formatting an allocation for terminal display.

pub mod allocation;

pub use allocation::{
    format_allocation_table, format_allocation_text, format_warnings, WARNING_PREFIX,
};
