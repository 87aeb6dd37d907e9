pub mod agents;
pub mod plan;
pub mod schema;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tripcrew")]
#[command(
    author,
    version,
    about = "Multi-agent travel planner: five specialists in parallel, one planner to merge them"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan a trip and write the itinerary reports
    Plan(PlanArgs),

    /// Show which provider and model each agent uses
    Agents(AgentsArgs),

    /// Print JSON Schema for config or trip validation
    Schema(SchemaArgs),
}

#[derive(Parser, Clone)]
pub struct PlanArgs {
    /// Trip request file (YAML or JSON)
    #[arg(short, long)]
    pub trip: PathBuf,

    /// Path to config file
    #[arg(short, long, default_value = "tripcrew.yaml")]
    pub config: PathBuf,

    /// Override output directory
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Stream progress events to stdout as JSON lines
    #[arg(long)]
    pub events: bool,

    /// Show the agent roster and trip analysis without calling any model
    #[arg(long)]
    pub dry_run: bool,

    /// Exit 1 if the run failed or any agent slot holds an error (CI mode)
    #[arg(long)]
    pub fail_on_error: bool,
}

#[derive(Parser, Clone)]
pub struct AgentsArgs {
    /// Path to config file
    #[arg(short, long, default_value = "tripcrew.yaml")]
    pub config: PathBuf,
}

#[derive(Parser, Clone)]
pub struct SchemaArgs {
    /// Print the trip request schema instead of the config schema
    #[arg(long)]
    pub trip: bool,
}
