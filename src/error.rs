use std::path::PathBuf;
use thiserror::Error;

use crate::agent::AgentRole;

#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum TripcrewError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Trip error: {0}")]
    Trip(#[from] TripError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Coordinator error: {0}")]
    Coordinator(#[from] CoordinatorError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("timeout_sec must be greater than zero")]
    ZeroTimeout,

    #[error("Model name is empty for agent '{0}'")]
    EmptyModel(AgentRole),
}

#[derive(Error, Debug)]
pub enum TripError {
    #[error("Failed to read trip file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse trip: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Trip has no destinations, or one of them is blank")]
    NoDestinations,

    #[error("End date {end} is before start date {start}")]
    DateOrder {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Traveler count must be between 1 and {max}, got {got}")]
    Travelers { got: u32, max: u32 },

    #[error("Budget must be a non-negative amount, got {0}")]
    NegativeBudget(f64),
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("No credential for {provider}: set {env} or api_key in config")]
    MissingCredential { provider: String, env: String },

    #[error("No provider registered for '{0}'")]
    Unregistered(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} API returned {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} response had no text content")]
    EmptyResponse { provider: &'static str },

    #[error("Failed to serialize task: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum CoordinatorError {
    #[error("Failed to initialize agent '{role}': {source}")]
    AgentInit {
        role: AgentRole,
        #[source]
        source: ProviderError,
    },

    #[error("Failed to read prompt for '{role}' from '{path}': {source}")]
    PromptFile {
        role: AgentRole,
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write report: {0}")]
    WriteReport(std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
