use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod agent;
mod cli;
mod config;
mod coordinator;
mod error;
mod output;
mod provider;
#[cfg(test)]
mod testing;
mod trip;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("tripcrew=debug")
    } else {
        EnvFilter::new("tripcrew=warn")
    };

    // Logs go to stderr so `plan --events` keeps stdout clean
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Plan(args) => cli::plan::execute(args).await,
        Commands::Agents(args) => cli::agents::execute(args),
        Commands::Schema(args) => cli::schema::execute(args),
    }
}
