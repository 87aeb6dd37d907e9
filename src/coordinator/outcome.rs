use crate::agent::{AgentResult, AgentRole};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Duration;
use uuid::Uuid;

/// Everything one planning run produced
#[derive(Debug, Clone, Serialize)]
pub struct PlanningOutcome {
    pub run_id: Uuid,

    /// True when the pipeline ran to the end, whatever individual agents did
    pub success: bool,

    /// Pipeline-level failure, only set when `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// One slot per specialist
    pub specialists: BTreeMap<AgentRole, AgentResult>,

    /// The planner's result
    pub itinerary: Option<AgentResult>,

    pub duration_ms: u64,
}

impl PlanningOutcome {
    pub fn completed(
        run_id: Uuid,
        specialists: BTreeMap<AgentRole, AgentResult>,
        itinerary: AgentResult,
        duration: Duration,
    ) -> Self {
        Self {
            run_id,
            success: true,
            error: None,
            specialists,
            itinerary: Some(itinerary),
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn failed(run_id: Uuid, error: String, duration: Duration) -> Self {
        Self {
            run_id,
            success: false,
            error: Some(error),
            specialists: BTreeMap::new(),
            itinerary: None,
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn slot(&self, role: AgentRole) -> Option<&AgentResult> {
        if role.is_specialist() {
            self.specialists.get(&role)
        } else {
            self.itinerary.as_ref()
        }
    }

    /// Agents whose slot holds an error descriptor
    pub fn failed_agents(&self) -> Vec<AgentRole> {
        AgentRole::ALL
            .into_iter()
            .filter(|role| {
                self.slot(*role)
                    .map(|result| !result.is_ok())
                    .unwrap_or(false)
            })
            .collect()
    }

    pub fn is_degraded(&self) -> bool {
        !self.success || !self.failed_agents().is_empty()
    }

    /// Day entries of the planner's itinerary, if it produced any
    pub fn itinerary_days(&self) -> &[Value] {
        self.itinerary_payload()
            .and_then(|payload| payload.get("itinerary").or_else(|| payload.get("days")))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The planner's budget summary, if it produced one
    pub fn budget_summary(&self) -> Option<&Map<String, Value>> {
        self.itinerary_payload()
            .and_then(|payload| payload.get("budget"))
            .and_then(Value::as_object)
    }

    fn itinerary_payload(&self) -> Option<&Map<String, Value>> {
        self.itinerary.as_ref().and_then(AgentResult::payload)
    }
}
