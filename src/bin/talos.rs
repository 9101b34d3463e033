//! Talos CLI Binary
//!
//! Command-line front-end for the Talos virtual filesystem shell.

use anyhow::Context;
use clap::Parser;
use talos::logging::init_logging;
use talos::tooling::cli::{Cli, CliContext};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli.load_config().context("Failed to load configuration")?;
    init_logging(Some(&config.logging), cli.log_file.clone())
        .context("Failed to initialize logging")?;

    let command = cli.resolved_command();
    let context = CliContext::new(config).context("Failed to open filesystem store")?;
    let output = context.execute(&command)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
