//! CLI entry point.
//!
//! Parses exactly one operation mode plus the session PID, composes the
//! runtime via `bootstrap`, runs the single lock-guarded transaction and
//! exits with the mapped status code. Malformed invocations never get
//! this far: clap rejects them with the usual usage exit status.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wakelock_cli::{Cli, CliError, bootstrap};
use wakelock_core::WakelockConfig;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = WakelockConfig::with_defaults()?;
    let controller = bootstrap(&config)?;
    controller.run(cli.operation(), cli.session).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("wakelock: {err}");
        std::process::exit(err.exit_code());
    }
}
