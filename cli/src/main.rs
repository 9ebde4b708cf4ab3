use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;
pub mod ux_error;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let config = match config::load(&cwd) {
        Ok(config) => config,
        Err(err) => {
            init_tracing("warn");
            ux_error::invalid_config(&err).display();
            std::process::exit(1);
        }
    };
    init_tracing(&config.observability.logging_level);

    match cli.command {
        Commands::Bootstrap => commands::bootstrap::run(&config).await,
        Commands::Ask => commands::ask::run(&config).await,
        Commands::Notes => commands::notes::run(&config).await,
        Commands::Cleanup => commands::cleanup::run(&config).await
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
