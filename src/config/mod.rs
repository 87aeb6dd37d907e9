mod defaults;
mod types;

pub use types::*;

use crate::agent::AgentRole;
use crate::error::ConfigError;
use defaults::*;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            report_dir: default_report_dir(),
            timeout_sec: default_timeout_sec(),
            model: ModelConfig::default(),
            agents: BTreeMap::new(),
            prompts: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config if the file exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            info!("Loading config from {:?}", path);
            Self::load(path)
        } else {
            info!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_sec == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        for role in AgentRole::ALL {
            if self.model_for(role).model.trim().is_empty() {
                return Err(ConfigError::EmptyModel(role));
            }
        }

        Ok(())
    }

    /// Effective model configuration for one agent
    pub fn model_for(&self, role: AgentRole) -> ModelConfig {
        match self.agents.get(&role) {
            Some(over) => over.apply(&self.model),
            None => self.model.clone(),
        }
    }
}
