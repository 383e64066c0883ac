//! permapress CLI entry point

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod args;
mod commands;
mod config;

use args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    init_logging(log_level)?;

    // Execute command
    match cli.command {
        Commands::Article(args) => commands::article::execute(args, cli.config).await,
        Commands::PublishAll(args) => commands::publish_all::execute(args, cli.config).await,
        Commands::Listing(args) => commands::listing::execute(args, cli.config).await,
        Commands::Collection(args) => commands::collection::execute(args, cli.config).await,
        Commands::Keys(args) => commands::keys::execute(args, cli.config).await,
        Commands::Settings(args) => commands::settings::execute(args, cli.config).await,
        Commands::Config(args) => commands::config::execute(args).await,
        Commands::Doctor(args) => commands::doctor::execute(args, cli.config).await,
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}
