//! CLI command handlers
//!
//! This module defines the command-line interface and bridges the clap
//! argument parsing with the service layer.

pub mod allocate;

use std::path::PathBuf;

use clap::Parser;

pub use allocate::{handle_allocate_command, AllocateArgs};

/// Command-line interface of the `fee` binary
#[derive(Parser, Debug)]
#[command(
    name = "fee",
    version,
    about = "Calculate proportion of fee for each charge in set",
    long_about = "Splits a fee across a set of charges in proportion to their size, \
                  using exact rational arithmetic. Give the fee with --fee, or the \
                  total of charges plus fee with --total and the fee is inferred."
)]
pub struct Cli {
    #[command(flatten)]
    pub allocate: AllocateArgs,

    /// Read settings from this file instead of the default location
    #[arg(short, long, value_name = "FILE", env = "FEE_CLI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print debug diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
