use super::AgentRole;
use serde::Serialize;
use serde_json::{Map, Value};

/// Why an agent produced no payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentFailure {
    pub source_agent: AgentRole,
    pub message: String,
}

/// Output of one agent call: a parsed payload or an error descriptor, never both.
///
/// Serializes as the payload object itself, or as
/// `{"error": {"source_agent": .., "message": ..}}`. A model reply of exactly
/// that shape serializes the same way; the variant, not the JSON, is what
/// marks a failed call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AgentResult {
    Failed { error: AgentFailure },
    Payload(Map<String, Value>),
}

impl AgentResult {
    pub fn failed(source_agent: AgentRole, message: impl Into<String>) -> Self {
        AgentResult::Failed {
            error: AgentFailure {
                source_agent,
                message: message.into(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, AgentResult::Payload(_))
    }

    pub fn payload(&self) -> Option<&Map<String, Value>> {
        match self {
            AgentResult::Payload(payload) => Some(payload),
            AgentResult::Failed { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&AgentFailure> {
        match self {
            AgentResult::Failed { error } => Some(error),
            AgentResult::Payload(_) => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            AgentResult::Payload(payload) => Value::Object(payload.clone()),
            AgentResult::Failed { error } => serde_json::json!({
                "error": {
                    "source_agent": error.source_agent,
                    "message": error.message,
                }
            }),
        }
    }
}
