use crate::agent::AgentRole;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

/// Milestones of one planning run, in emission order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    Started {
        run_id: Uuid,
        title: String,
    },
    Initialized {
        agents: usize,
    },
    Broadcast {
        participants: Vec<AgentRole>,
    },
    SpecialistCompleted {
        agent: AgentRole,
        ok: bool,
        completed: usize,
        total: usize,
    },
    IntegratorCompleted {
        ok: bool,
    },
    Finished {
        success: bool,
        duration_ms: u64,
    },
    Failed {
        error: String,
    },
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// Discards every event
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _event: ProgressEvent) {}
}

impl ProgressReporter for UnboundedSender<ProgressEvent> {
    fn report(&self, event: ProgressEvent) {
        // Receiver gone means nobody is listening any more
        let _ = self.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_wire_shape() {
        let event = ProgressEvent::SpecialistCompleted {
            agent: AgentRole::Food,
            ok: false,
            completed: 3,
            total: 5,
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "event": "specialist_completed",
                "agent": "food",
                "ok": false,
                "completed": 3,
                "total": 5
            })
        );
    }

    #[test]
    fn test_channel_reporter_ignores_closed_receiver() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        drop(rx);
        tx.report(ProgressEvent::IntegratorCompleted { ok: true });
    }
}
