use super::{AgentResult, AgentRole};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    Recommend,
    GenerateItinerary,
}

impl std::fmt::Display for TaskAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskAction::Recommend => write!(f, "recommend"),
            TaskAction::GenerateItinerary => write!(f, "generate_itinerary"),
        }
    }
}

/// What an agent is asked to do. Serializes as `{"action": .., ...payload}`.
#[derive(Debug, Clone, Serialize)]
pub struct AgentTask {
    pub action: TaskAction,

    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl AgentTask {
    /// Task sent to every specialist
    pub fn recommend(trip_data: Value) -> Self {
        let mut payload = Map::new();
        payload.insert("trip_data".to_string(), trip_data);
        Self {
            action: TaskAction::Recommend,
            payload,
        }
    }

    /// Task sent to the planner once all specialists resolved
    pub fn generate_itinerary(
        trip_data: Value,
        specialists: &BTreeMap<AgentRole, AgentResult>,
    ) -> Self {
        let mut payload = Map::new();
        payload.insert("trip_data".to_string(), trip_data);
        for (role, result) in specialists {
            payload.insert(role.to_string(), result.to_value());
        }
        Self {
            action: TaskAction::GenerateItinerary,
            payload,
        }
    }
}
