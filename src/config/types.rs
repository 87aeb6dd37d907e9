use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::defaults::*;
use crate::agent::AgentRole;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// Request timeout applied by the model HTTP client
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,

    /// Model used by every agent unless overridden in `agents`
    #[serde(default)]
    pub model: ModelConfig,

    /// Per-agent model overrides, merged field by field over `model`
    #[serde(default)]
    pub agents: BTreeMap<AgentRole, ModelOverride>,

    /// Per-agent prompt files; missing files fall back to the embedded prompt
    #[serde(default)]
    pub prompts: BTreeMap<AgentRole, PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct ModelConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    #[serde(default = "default_model_name")]
    pub model: String,

    /// Endpoint root; the provider default is used when unset
    #[serde(default)]
    pub base_url: Option<String>,

    /// Literal credential. Prefer `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Environment variable holding the credential
    #[serde(default)]
    pub api_key_env: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default)]
    pub temperature: Option<f32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: default_model_name(),
            base_url: None,
            api_key: None,
            api_key_env: None,
            max_tokens: default_max_tokens(),
            temperature: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct ModelOverride {
    #[serde(default)]
    pub provider: Option<ProviderKind>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub api_key_env: Option<String>,

    #[serde(default)]
    pub max_tokens: Option<u32>,

    #[serde(default)]
    pub temperature: Option<f32>,
}

impl ModelOverride {
    pub fn apply(&self, base: &ModelConfig) -> ModelConfig {
        let mut merged = base.clone();
        if let Some(provider) = self.provider {
            if provider != base.provider {
                // Endpoint and credential source belong to the old provider
                merged.base_url = None;
                merged.api_key = None;
                merged.api_key_env = None;
            }
            merged.provider = provider;
        }
        if let Some(ref model) = self.model {
            merged.model = model.clone();
        }
        if self.base_url.is_some() {
            merged.base_url = self.base_url.clone();
        }
        if self.api_key.is_some() {
            merged.api_key = self.api_key.clone();
        }
        if self.api_key_env.is_some() {
            merged.api_key_env = self.api_key_env.clone();
        }
        if let Some(max_tokens) = self.max_tokens {
            merged.max_tokens = max_tokens;
        }
        if self.temperature.is_some() {
            merged.temperature = self.temperature;
        }
        merged
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat completions
    #[default]
    OpenAi,
    /// Anthropic messages API
    Anthropic,
    /// Tongyi Qwen through its OpenAI-compatible endpoint
    DashScope,
}

impl ProviderKind {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => OPENAI_BASE_URL,
            ProviderKind::Anthropic => ANTHROPIC_BASE_URL,
            ProviderKind::DashScope => DASHSCOPE_BASE_URL,
        }
    }

    pub fn default_key_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::DashScope => "DASHSCOPE_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::Anthropic => write!(f, "anthropic"),
            ProviderKind::DashScope => write!(f, "dashscope"),
        }
    }
}
