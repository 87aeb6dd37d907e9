use super::AgentRole;
use crate::config::Config;
use crate::error::CoordinatorError;
use tracing::debug;

// Embedded default prompts
const TRANSPORT_PROMPT: &str = include_str!("../../prompts/transport.md");
const ACCOMMODATION_PROMPT: &str = include_str!("../../prompts/accommodation.md");
const ATTRACTION_PROMPT: &str = include_str!("../../prompts/attraction.md");
const FOOD_PROMPT: &str = include_str!("../../prompts/food.md");
const BUDGET_PROMPT: &str = include_str!("../../prompts/budget.md");
const PLANNER_PROMPT: &str = include_str!("../../prompts/planner.md");

pub fn embedded_prompt(role: AgentRole) -> &'static str {
    match role {
        AgentRole::Transport => TRANSPORT_PROMPT,
        AgentRole::Accommodation => ACCOMMODATION_PROMPT,
        AgentRole::Attraction => ATTRACTION_PROMPT,
        AgentRole::Food => FOOD_PROMPT,
        AgentRole::Budget => BUDGET_PROMPT,
        AgentRole::Planner => PLANNER_PROMPT,
    }
}

/// Role instruction for an agent: the configured file, or the embedded default
pub fn load_prompt(config: &Config, role: AgentRole) -> Result<String, CoordinatorError> {
    let Some(path) = config.prompts.get(&role) else {
        return Ok(embedded_prompt(role).to_string());
    };

    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(
                "Prompt '{}' for {} not found, using embedded default",
                path.display(),
                role
            );
            Ok(embedded_prompt(role).to_string())
        }
        Err(e) => Err(CoordinatorError::PromptFile {
            role,
            path: path.clone(),
            source: e,
        }),
    }
}
