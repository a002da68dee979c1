//! fee-cli - Split a fee across a set of charges
//!
//! This library provides the core functionality of the `fee` command. Given a
//! set of charges and a fee, a total, or both, it infers whichever quantity
//! is missing, gives every charge its exact proportional share of the fee and
//! reports any discrepancy introduced by rounding to the display precision.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Exact amounts and the allocation data model
//! - `services`: The allocation pipeline
//! - `display`: Text and table formatting
//! - `export`: JSON, YAML and CSV output
//! - `cli`: Command-line interface
//!
//! # Example
//!
//! ```rust
//! use fee_cli::services::{AllocationRequest, Allocator};
//!
//! let request = AllocationRequest::new(["10", "20", "30"]).with_fee("6");
//! let allocation = Allocator::new(2).allocate(&request).unwrap();
//! assert_eq!(allocation.formatted_lines()[0], "10.00 + 1.00 = 11.00");
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;

pub use error::{FeeError, FeeResult};
