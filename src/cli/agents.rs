use crate::agent::AgentRole;
use crate::cli::AgentsArgs;
use crate::config::Config;
use crate::provider::credential_source;
use tracing::info;

pub fn execute(args: AgentsArgs) -> anyhow::Result<()> {
    let config = Config::load_or_default(&args.config)?;
    config.validate()?;
    info!("Listing agents from {:?}", args.config);

    print_roster(&config);
    Ok(())
}

/// One line per agent; credentials are shown by source only
pub fn print_roster(config: &Config) {
    println!(
        "{:<15} {:<10} {:<28} {:<52} {:<20} {}",
        "AGENT", "PROVIDER", "MODEL", "ENDPOINT", "CREDENTIAL", "PROMPT"
    );
    for role in AgentRole::ALL {
        let model = config.model_for(role);
        let prompt = config
            .prompts
            .get(&role)
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "(embedded)".to_string());
        let endpoint = model
            .base_url
            .as_deref()
            .unwrap_or(model.provider.default_base_url());
        println!(
            "{:<15} {:<10} {:<28} {:<52} {:<20} {}",
            role.as_str(),
            model.provider.to_string(),
            model.model,
            endpoint,
            credential_source(&model),
            prompt
        );
    }
}
