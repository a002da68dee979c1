//! Service layer for fee-cli
//!
//! The service layer holds the allocation pipeline, kept separate from
//! argument parsing and output formatting.

pub mod allocator;

pub use allocator::{AllocationRequest, Allocator, Resolution};
