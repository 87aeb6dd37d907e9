mod anthropic;
mod openai;

pub use anthropic::AnthropicModel;
pub use openai::OpenAiCompatModel;

use crate::agent::AgentRole;
use crate::config::{ModelConfig, ProviderKind};
use crate::error::ProviderError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// One chat completion: a role instruction and a user message
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
}

#[derive(Debug)]
pub struct ChatResponse {
    pub text: String,
    pub duration: Duration,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, request: &ChatRequest<'_>) -> Result<ChatResponse, ProviderError>;
}

/// Builds the model behind each agent
pub trait ModelFactory: Send + Sync {
    fn create(
        &self,
        role: AgentRole,
        config: &ModelConfig,
    ) -> Result<Arc<dyn ChatModel>, ProviderError>;
}

/// Model settings with the credential looked up and defaults filled in
#[derive(Debug, Clone)]
pub struct ResolvedModel {
    pub provider: ProviderKind,
    pub model: String,
    pub base_url: String,
    pub api_key: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

/// Where a model's credential comes from, without revealing it
pub fn credential_source(config: &ModelConfig) -> String {
    if config.api_key.is_some() {
        "config".to_string()
    } else {
        format!(
            "${}",
            config
                .api_key_env
                .as_deref()
                .unwrap_or(config.provider.default_key_env())
        )
    }
}

/// Fill in provider defaults and look up the credential
pub fn resolve<F>(config: &ModelConfig, lookup_env: F) -> Result<ResolvedModel, ProviderError>
where
    F: Fn(&str) -> Option<String>,
{
    let env_name = config
        .api_key_env
        .clone()
        .unwrap_or_else(|| config.provider.default_key_env().to_string());

    let api_key = config
        .api_key
        .clone()
        .or_else(|| lookup_env(&env_name))
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ProviderError::MissingCredential {
            provider: config.provider.to_string(),
            env: env_name.clone(),
        })?;

    let base_url = config
        .base_url
        .as_deref()
        .unwrap_or(config.provider.default_base_url())
        .trim_end_matches('/')
        .to_string();

    Ok(ResolvedModel {
        provider: config.provider,
        model: config.model.clone(),
        base_url,
        api_key,
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    })
}

pub type ModelConstructor = fn(ResolvedModel, reqwest::Client) -> Arc<dyn ChatModel>;

fn build_openai(resolved: ResolvedModel, client: reqwest::Client) -> Arc<dyn ChatModel> {
    Arc::new(OpenAiCompatModel::new("openai", resolved, client))
}

fn build_dashscope(resolved: ResolvedModel, client: reqwest::Client) -> Arc<dyn ChatModel> {
    Arc::new(OpenAiCompatModel::new("dashscope", resolved, client))
}

fn build_anthropic(resolved: ResolvedModel, client: reqwest::Client) -> Arc<dyn ChatModel> {
    Arc::new(AnthropicModel::new(resolved, client))
}

/// Constructors keyed by provider kind, sharing one HTTP client
pub struct ProviderRegistry {
    client: reqwest::Client,
    constructors: HashMap<ProviderKind, ModelConstructor>,
}

impl ProviderRegistry {
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let mut registry = Self {
            client,
            constructors: HashMap::new(),
        };
        registry.register(ProviderKind::OpenAi, build_openai);
        registry.register(ProviderKind::DashScope, build_dashscope);
        registry.register(ProviderKind::Anthropic, build_anthropic);
        Ok(registry)
    }

    pub fn register(&mut self, kind: ProviderKind, constructor: ModelConstructor) {
        self.constructors.insert(kind, constructor);
    }
}

impl ModelFactory for ProviderRegistry {
    fn create(
        &self,
        role: AgentRole,
        config: &ModelConfig,
    ) -> Result<Arc<dyn ChatModel>, ProviderError> {
        let resolved = resolve(config, |name| std::env::var(name).ok())?;
        let constructor = self
            .constructors
            .get(&resolved.provider)
            .ok_or_else(|| ProviderError::Unregistered(resolved.provider.to_string()))?;

        debug!(
            "Agent {} uses {} model {} at {}",
            role, resolved.provider, resolved.model, resolved.base_url
        );

        Ok(constructor(resolved, self.client.clone()))
    }
}
