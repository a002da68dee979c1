//! Core data models for fee-cli
//!
//! This module contains the data structures of the allocation domain:
//! exact amounts, charges, the fee specification and the allocation report.

pub mod allocation;
pub mod amount;

pub use allocation::{
    Allocation, AllocationLine, Charge, ChargeOrigin, FeeSpec, Inference, Warning,
};
pub use amount::{Amount, AmountParseError, MAX_PRECISION};
