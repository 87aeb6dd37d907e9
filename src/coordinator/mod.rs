//! Coordinator for one trip planning run
//!
//! The run is a fixed pipeline:
//! 1. Init the six agents once per coordinator
//! 2. Broadcast the task (observability only)
//! 3. Fan out to the five specialists concurrently and wait for all of them
//! 4. Fan in: hand every specialist slot to the planner
//! 5. Assemble the outcome
//!
//! Agent failures are data in the outcome. Only an Init failure fails the run.

mod outcome;
mod progress;

pub use outcome::PlanningOutcome;
pub use progress::{NoProgress, ProgressEvent, ProgressReporter};

use crate::agent::prompts::load_prompt;
use crate::agent::{Agent, AgentResult, AgentRole, AgentTask};
use crate::config::Config;
use crate::error::{CoordinatorError, ProviderError};
use crate::provider::{ModelFactory, ProviderRegistry};
use crate::trip::TripRequest;
use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// The agents of one coordinator, read-only after Init
pub struct AgentRoster {
    pub specialists: Vec<Arc<Agent>>,
    pub planner: Arc<Agent>,
}

impl AgentRoster {
    pub fn participants(&self) -> Vec<AgentRole> {
        self.specialists
            .iter()
            .map(|agent| agent.role())
            .chain(std::iter::once(self.planner.role()))
            .collect()
    }
}

pub struct Coordinator {
    config: Config,
    factory: Arc<dyn ModelFactory>,
    roster: OnceCell<AgentRoster>,
}

impl Coordinator {
    pub fn new(config: Config, factory: Arc<dyn ModelFactory>) -> Self {
        Self {
            config,
            factory,
            roster: OnceCell::new(),
        }
    }

    /// Coordinator backed by the HTTP providers
    pub fn from_config(config: Config) -> Result<Self, ProviderError> {
        let registry = ProviderRegistry::new(Duration::from_secs(config.timeout_sec))?;
        Ok(Self::new(config, Arc::new(registry)))
    }

    /// Build the agents. Later calls return the agents built by the first one.
    pub async fn init(&self) -> Result<&AgentRoster, CoordinatorError> {
        self.roster
            .get_or_try_init(|| async { self.build_roster() })
            .await
    }

    fn build_roster(&self) -> Result<AgentRoster, CoordinatorError> {
        info!("Initializing {} agents", AgentRole::ALL.len());

        let mut specialists = Vec::with_capacity(AgentRole::SPECIALISTS.len());
        for role in AgentRole::SPECIALISTS {
            specialists.push(Arc::new(self.build_agent(role)?));
        }
        let planner = Arc::new(self.build_agent(AgentRole::Planner)?);

        Ok(AgentRoster {
            specialists,
            planner,
        })
    }

    fn build_agent(&self, role: AgentRole) -> Result<Agent, CoordinatorError> {
        let model_config = self.config.model_for(role);
        let model = self
            .factory
            .create(role, &model_config)
            .map_err(|source| CoordinatorError::AgentInit { role, source })?;
        let instruction = load_prompt(&self.config, role)?;

        let agent = Agent::new(role, instruction, model);
        debug!(
            "Agent {} ready: {} / {}",
            role,
            agent.model_name(),
            model_config.model
        );
        Ok(agent)
    }

    pub async fn plan_trip(&self, request: &TripRequest) -> PlanningOutcome {
        self.plan_trip_with(request, &NoProgress).await
    }

    pub async fn plan_trip_with(
        &self,
        request: &TripRequest,
        reporter: &dyn ProgressReporter,
    ) -> PlanningOutcome {
        let start = Instant::now();
        let run_id = Uuid::new_v4();
        let title = request.display_title();

        reporter.report(ProgressEvent::Started {
            run_id,
            title: title.clone(),
        });

        let roster = match self.init().await {
            Ok(roster) => roster,
            Err(e) => {
                error!("Planning '{}' failed during init: {}", title, e);
                reporter.report(ProgressEvent::Failed {
                    error: e.to_string(),
                });
                return PlanningOutcome::failed(run_id, e.to_string(), start.elapsed());
            }
        };
        reporter.report(ProgressEvent::Initialized {
            agents: roster.specialists.len() + 1,
        });

        info!("Starting multi-agent planning: {} ({})", title, run_id);

        let participants = roster.participants();
        info!("Task broadcast to {:?}", participants);
        reporter.report(ProgressEvent::Broadcast { participants });

        let trip_data = request.trip_data();
        let specialists = fan_out(roster, &trip_data, reporter).await;

        info!(
            "All specialists resolved ({} failed), invoking planner",
            specialists.values().filter(|r| !r.is_ok()).count()
        );

        let task = AgentTask::generate_itinerary(trip_data, &specialists);
        let itinerary = roster.planner.invoke(&task).await;
        reporter.report(ProgressEvent::IntegratorCompleted {
            ok: itinerary.is_ok(),
        });

        let outcome = PlanningOutcome::completed(run_id, specialists, itinerary, start.elapsed());
        info!(
            "Planning '{}' finished in {}ms",
            title, outcome.duration_ms
        );
        reporter.report(ProgressEvent::Finished {
            success: outcome.success,
            duration_ms: outcome.duration_ms,
        });

        outcome
    }
}

/// Run every specialist concurrently and wait until each has resolved
async fn fan_out(
    roster: &AgentRoster,
    trip_data: &Value,
    reporter: &dyn ProgressReporter,
) -> BTreeMap<AgentRole, AgentResult> {
    let total = roster.specialists.len();
    let mut futures = FuturesUnordered::new();

    for agent in &roster.specialists {
        let agent = Arc::clone(agent);
        let role = agent.role();
        let task = AgentTask::recommend(trip_data.clone());

        let handle = tokio::spawn(async move { agent.invoke(&task).await });
        futures.push(async move { (role, handle.await) });
    }

    let mut results = BTreeMap::new();
    while let Some((role, joined)) = futures.next().await {
        let result = match joined {
            Ok(result) => result,
            Err(e) => {
                warn!("Specialist {} task panicked: {}", role, e);
                AgentResult::failed(role, format!("agent task panicked: {}", e))
            }
        };

        let ok = result.is_ok();
        results.insert(role, result);
        reporter.report(ProgressEvent::SpecialistCompleted {
            agent: role,
            ok,
            completed: results.len(),
            total,
        });
    }

    results
}
