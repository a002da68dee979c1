use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fee_cli::cli::{handle_allocate_command, Cli};
use fee_cli::config::{FeePaths, Settings};
use fee_cli::FeeError;

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        init_logging();
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        let code = e.downcast_ref::<FeeError>().map_or(1, FeeError::exit_code);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::load_or_default(&FeePaths::new()?)?,
    };

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    handle_allocate_command(cli.allocate, &settings, &mut stdout.lock(), &mut stderr.lock())?;

    Ok(())
}

/// Initialize logging with tracing
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fee_cli=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
