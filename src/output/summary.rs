use crate::coordinator::PlanningOutcome;
use crate::trip::TripRequest;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

/// The JSON document written for one planning run
#[derive(Debug, Serialize)]
pub struct TripReport<'a> {
    pub timestamp: String,
    pub title: String,
    pub fingerprint: String,
    pub destinations: &'a [String],
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub travelers: u32,
    pub trip_data: Value,
    pub failed_agents: Vec<String>,
    pub outcome: &'a PlanningOutcome,
}

pub fn build_report<'a>(request: &'a TripRequest, outcome: &'a PlanningOutcome) -> TripReport<'a> {
    TripReport {
        timestamp: Utc::now().to_rfc3339(),
        title: request.display_title(),
        fingerprint: request.fingerprint(),
        destinations: &request.destinations,
        start_date: request.start_date,
        end_date: request.end_date,
        travelers: request.travelers,
        trip_data: request.trip_data(),
        failed_agents: outcome
            .failed_agents()
            .iter()
            .map(ToString::to_string)
            .collect(),
        outcome,
    }
}
