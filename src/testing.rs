//! Scripted models and a counting factory for coordinator tests

use crate::agent::AgentRole;
use crate::config::ModelConfig;
use crate::error::ProviderError;
use crate::provider::{ChatModel, ChatRequest, ChatResponse, ModelFactory};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Script {
    Reply { text: String, delay: Duration },
    Fail(String),
    Panic,
}

impl Script {
    pub fn reply(text: &str) -> Self {
        Script::Reply {
            text: text.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(text: &str, millis: u64) -> Self {
        Script::Reply {
            text: text.to_string(),
            delay: Duration::from_millis(millis),
        }
    }

    pub fn fail(message: &str) -> Self {
        Script::Fail(message.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub user: String,
}

pub struct ScriptedModel {
    script: Script,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedModel {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, request: &ChatRequest<'_>) -> Result<ChatResponse, ProviderError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: request.system.to_string(),
            user: request.user.to_string(),
        });

        match &self.script {
            Script::Reply { text, delay } => {
                tokio::time::sleep(*delay).await;
                Ok(ChatResponse {
                    text: text.clone(),
                    duration: *delay,
                })
            }
            Script::Fail(message) => Err(ProviderError::Status {
                provider: "scripted",
                status: 503,
                body: message.clone(),
            }),
            Script::Panic => panic!("scripted model panicked"),
        }
    }
}

/// Hands out scripted models per role and counts how many it built
pub struct CountingFactory {
    scripts: HashMap<AgentRole, Script>,
    fallback: Script,
    refuse: Option<AgentRole>,
    created: AtomicUsize,
    models: Mutex<HashMap<AgentRole, Arc<ScriptedModel>>>,
}

impl CountingFactory {
    pub fn new(fallback: Script) -> Self {
        Self {
            scripts: HashMap::new(),
            fallback,
            refuse: None,
            created: AtomicUsize::new(0),
            models: Mutex::new(HashMap::new()),
        }
    }

    pub fn with(mut self, role: AgentRole, script: Script) -> Self {
        self.scripts.insert(role, script);
        self
    }

    /// Fail model creation for one role, as a missing credential would
    pub fn refusing(mut self, role: AgentRole) -> Self {
        self.refuse = Some(role);
        self
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn model(&self, role: AgentRole) -> Arc<ScriptedModel> {
        self.models.lock().unwrap()[&role].clone()
    }
}

impl ModelFactory for CountingFactory {
    fn create(
        &self,
        role: AgentRole,
        config: &ModelConfig,
    ) -> Result<Arc<dyn ChatModel>, ProviderError> {
        if self.refuse == Some(role) {
            return Err(ProviderError::MissingCredential {
                provider: config.provider.to_string(),
                env: config.provider.default_key_env().to_string(),
            });
        }

        self.created.fetch_add(1, Ordering::SeqCst);
        let script = self
            .scripts
            .get(&role)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone());
        let model = Arc::new(ScriptedModel::new(script));
        self.models.lock().unwrap().insert(role, model.clone());
        Ok(model)
    }
}
