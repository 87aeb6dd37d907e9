//! Model-backed agents: one role instruction, one model call per task
//!
//! Every agent, specialist or planner, has the same contract: serialize the
//! task, call the model once, parse the reply. A failed call becomes an error
//! descriptor in the returned [`AgentResult`] rather than an `Err`.

mod parse;
pub mod prompts;
mod result;
mod task;

pub use parse::parse_response;
pub use result::{AgentFailure, AgentResult};
pub use task::{AgentTask, TaskAction};

use crate::error::ProviderError;
use crate::provider::{ChatModel, ChatRequest};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Transport,
    Accommodation,
    Attraction,
    Food,
    Budget,
    /// The integrator that turns specialist output into an itinerary
    Planner,
}

impl AgentRole {
    pub const SPECIALISTS: [AgentRole; 5] = [
        AgentRole::Transport,
        AgentRole::Accommodation,
        AgentRole::Attraction,
        AgentRole::Food,
        AgentRole::Budget,
    ];

    pub const ALL: [AgentRole; 6] = [
        AgentRole::Transport,
        AgentRole::Accommodation,
        AgentRole::Attraction,
        AgentRole::Food,
        AgentRole::Budget,
        AgentRole::Planner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Transport => "transport",
            AgentRole::Accommodation => "accommodation",
            AgentRole::Attraction => "attraction",
            AgentRole::Food => "food",
            AgentRole::Budget => "budget",
            AgentRole::Planner => "planner",
        }
    }

    pub fn is_specialist(&self) -> bool {
        !matches!(self, AgentRole::Planner)
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Agent {
    role: AgentRole,
    instruction: String,
    model: Arc<dyn ChatModel>,
}

impl Agent {
    pub fn new(role: AgentRole, instruction: String, model: Arc<dyn ChatModel>) -> Self {
        Self {
            role,
            instruction,
            model,
        }
    }

    pub fn role(&self) -> AgentRole {
        self.role
    }

    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    /// Run one task, folding any call failure into the result
    pub async fn invoke(&self, task: &AgentTask) -> AgentResult {
        match self.try_invoke(task).await {
            Ok(payload) => {
                info!("[{}] completed ({} keys)", self.role, payload.len());
                AgentResult::Payload(payload)
            }
            Err(e) => {
                warn!("[{}] failed: {}", self.role, e);
                AgentResult::failed(self.role, e.to_string())
            }
        }
    }

    pub async fn try_invoke(&self, task: &AgentTask) -> Result<Map<String, Value>, ProviderError> {
        let input = serde_json::to_string(task)?;
        debug!(
            "[{}] sending {} task ({} bytes) to {}",
            self.role,
            task.action,
            input.len(),
            self.model.name()
        );

        let request = ChatRequest {
            system: &self.instruction,
            user: &input,
        };
        let response = self.model.complete(&request).await?;

        debug!(
            "[{}] model replied in {:?} ({} bytes)",
            self.role,
            response.duration,
            response.text.len()
        );

        Ok(parse_response(&response.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Script, ScriptedModel};
    use serde_json::json;

    fn agent(role: AgentRole, script: Script) -> (Agent, Arc<ScriptedModel>) {
        let model = Arc::new(ScriptedModel::new(script));
        let agent = Agent::new(role, "You are a test agent.".to_string(), model.clone());
        (agent, model)
    }

    #[tokio::test]
    async fn test_invoke_parses_json_reply() {
        let (agent, model) = agent(
            AgentRole::Transport,
            Script::reply(r#"{"legs": [], "cost": 300}"#),
        );
        let task = AgentTask::recommend(json!({"destinations": ["Tokyo"]}));

        let result = agent.invoke(&task).await;

        assert_eq!(result.payload().unwrap()["cost"], json!(300));
        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system, "You are a test agent.");
        let sent: Value = serde_json::from_str(&calls[0].user).unwrap();
        assert_eq!(sent["action"], "recommend");
        assert_eq!(sent["trip_data"]["destinations"][0], "Tokyo");
    }

    #[tokio::test]
    async fn test_invoke_wraps_plain_text() {
        let (agent, _) = agent(AgentRole::Food, Script::reply("busy"));
        let result = agent.invoke(&AgentTask::recommend(json!({}))).await;
        assert_eq!(result.to_value(), json!({"content": "busy"}));
    }

    #[tokio::test]
    async fn test_invoke_captures_failure() {
        let (agent, _) = agent(AgentRole::Budget, Script::fail("connection refused"));
        let result = agent.invoke(&AgentTask::recommend(json!({}))).await;

        let failure = result.failure().unwrap();
        assert_eq!(failure.source_agent, AgentRole::Budget);
        assert!(failure.message.contains("connection refused"));
        assert!(result.payload().is_none());
    }

    #[test]
    fn test_role_sets() {
        assert_eq!(AgentRole::SPECIALISTS.len(), 5);
        assert!(AgentRole::SPECIALISTS.iter().all(|r| r.is_specialist()));
        assert!(!AgentRole::Planner.is_specialist());
        assert_eq!(
            serde_json::to_value(AgentRole::Accommodation).unwrap(),
            json!("accommodation")
        );
    }
}
