//! FlexiRide command-line client
//!
//! Usage:
//!   flexiride login --email you@example.com
//!   flexiride vehicles list --search honda
//!   flexiride bookings list --status active
//!
//! The session is saved under the platform data directory unless
//! `--data-dir` or `--ephemeral` is given.

use anyhow::Result;
use clap::Parser;
use flexiride_cli::{Cli, run};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut stdout = std::io::stdout().lock();
    run(cli, &mut stdout).await
}
