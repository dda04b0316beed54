//! `theme-toggle`: drive a theme controller from the terminal.
//!
//! Each invocation is one page load against a JSON-file store: the stored
//! theme is applied, the toggle is mounted, and the requested command runs.

mod cli;
mod error;
mod report;
mod session;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let output = session::run(&cli)?;
    println!("{}", output);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
