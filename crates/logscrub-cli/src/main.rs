mod cli;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use logscrub_config::{ConfigStore, SERVER_ADDRESS_KEY};
use logscrub_core::RedactionSession;
use tracing::warn;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    // No input file prints usage and exits cleanly.
    let Some(input) = cli.input else {
        cli::Cli::command().print_help()?;
        return Ok(());
    };

    let mut config = ConfigStore::load(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;

    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read log file {}", input.display()))?;

    let outcome = RedactionSession::new(text).run(config.try_get(SERVER_ADDRESS_KEY));

    // Persist a fresh detection so later runs reuse it.
    if outcome.detected && !outcome.server_address.is_empty() {
        config.set(SERVER_ADDRESS_KEY, outcome.server_address.as_str())?;
    }

    if outcome.server_address.is_empty() {
        warn!("server address could not be resolved for this run");
    } else {
        println!("Server address is {}", outcome.server_address);
    }

    if outcome.entries.is_empty() {
        println!("\nNo replacements were made in the log file.");
    } else {
        println!("\nThe following replacements were made in the log file:");
        print!("{}", outcome.report());
    }

    std::fs::write(&cli.output, &outcome.text)
        .with_context(|| format!("failed to write cleaned log {}", cli.output.display()))?;

    Ok(())
}
