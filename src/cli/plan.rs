//! CLI handler for the `plan` subcommand
//!
//! Fans a trip out to the specialist agents, merges their answers through the
//! planner and writes the reports.

use crate::agent::AgentRole;
use crate::cli::agents::print_roster;
use crate::cli::PlanArgs;
use crate::config::Config;
use crate::coordinator::{Coordinator, PlanningOutcome, ProgressEvent};
use crate::output::write_outcome;
use crate::trip::TripRequest;
use chrono::Local;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn execute(args: PlanArgs) -> anyhow::Result<()> {
    let mut config = Config::load_or_default(&args.config)?;
    if let Some(report_dir) = args.report_dir {
        config.report_dir = report_dir;
    }
    config.validate()?;

    info!("Loading trip from {:?}", args.trip);
    let trip = TripRequest::load(&args.trip)?;
    trip.validate()?;

    if args.dry_run {
        info!("DRY RUN - no model calls will be made");
        print_trip_analysis(&config, &trip);
        return Ok(());
    }

    let report_dir = config
        .report_dir
        .join(Local::now().format("%Y-%m-%d").to_string());
    let coordinator = Coordinator::from_config(config)?;

    let outcome = if args.events {
        let (tx, mut rx) = mpsc::unbounded_channel::<ProgressEvent>();
        let printer = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match serde_json::to_string(&event) {
                    Ok(line) => println!("{}", line),
                    Err(e) => warn!("Failed to encode progress event: {}", e),
                }
            }
        });

        let outcome = coordinator.plan_trip_with(&trip, &tx).await;
        drop(tx);
        if let Err(e) = printer.await {
            warn!("Progress printer stopped: {}", e);
        }
        outcome
    } else {
        coordinator.plan_trip(&trip).await
    };

    let paths = write_outcome(&report_dir, &trip, &outcome)?;

    if !args.events {
        print_summary(&outcome);
        println!("\nReports: {}", paths.markdown.display());
        println!("         {}", paths.json.display());
    }

    if !outcome.success {
        anyhow::bail!(
            "Planning failed: {}",
            outcome.error.as_deref().unwrap_or("unknown error")
        );
    }

    if args.fail_on_error && outcome.is_degraded() {
        error!(
            "Exiting with error: {} agent(s) failed",
            outcome.failed_agents().len()
        );
        std::process::exit(1);
    }

    Ok(())
}

fn print_trip_analysis(config: &Config, trip: &TripRequest) {
    println!("\n=== Trip Preview (Dry Run) ===\n");
    println!("Title: {}", trip.display_title());
    println!("Destinations: {}", trip.destinations.join(", "));
    println!(
        "Dates: {} to {} ({} days)",
        trip.start_date,
        trip.end_date,
        trip.duration_days()
    );
    println!("Travelers: {}", trip.travelers);
    println!(
        "Budget: {} ({} tier)",
        trip.budget.total,
        trip.budget_tier()
    );
    for (category, tags) in &trip.preferences {
        println!("Preference {}: {}", category, tags.join(", "));
    }
    println!("Fingerprint: {}", trip.fingerprint());
    println!("Report dir: {}", config.report_dir.display());
    println!("Timeout: {}s per model call", config.timeout_sec);

    println!("\nAgents:");
    print_roster(config);
    println!();
}

fn print_summary(outcome: &PlanningOutcome) {
    if let Some(error) = &outcome.error {
        println!("Planning failed: {}", error);
        return;
    }

    let failed = outcome.failed_agents();
    println!(
        "Planned in {:.1}s, {} of {} agents succeeded",
        outcome.duration_ms as f64 / 1000.0,
        AgentRole::ALL.len() - failed.len(),
        AgentRole::ALL.len()
    );

    for role in AgentRole::ALL {
        let (icon, detail) = match outcome.slot(role).and_then(|slot| slot.failure()) {
            Some(failure) => {
                let message = &failure.message;
                let short = if message.chars().count() > 60 {
                    format!("{}...", message.chars().take(57).collect::<String>())
                } else {
                    message.clone()
                };
                ("✗", short)
            }
            None => ("✓", String::new()),
        };
        println!("  {} {:<15} {}", icon, role.as_str(), detail);
    }

    println!("  {} itinerary day(s)", outcome.itinerary_days().len());
}
