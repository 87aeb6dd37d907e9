use super::summary::TripReport;
use crate::agent::{AgentResult, AgentRole};
use serde_json::{Map, Value};

/// Render the human-readable itinerary report
pub fn render_markdown(report: &TripReport<'_>) -> String {
    let outcome = report.outcome;
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", report.title));
    md.push_str(&format!("**Generated:** {}\n", report.timestamp));
    md.push_str(&format!(
        "**Dates:** {} to {}\n",
        report.start_date, report.end_date
    ));
    md.push_str(&format!("**Destinations:** {}\n", report.destinations.join(", ")));
    md.push_str(&format!("**Travelers:** {}\n", report.travelers));
    md.push_str(&format!(
        "**Run:** `{}` ({:.1}s)\n\n",
        outcome.run_id,
        outcome.duration_ms as f64 / 1000.0
    ));

    if let Some(error) = &outcome.error {
        md.push_str(&format!("**Planning failed:** {}\n", error));
        return md;
    }

    // Agent status
    md.push_str("## Agents\n\n");
    md.push_str("| Agent | Status |\n");
    md.push_str("|-------|--------|\n");
    for role in AgentRole::ALL {
        md.push_str(&format!(
            "| {} | {} |\n",
            role,
            format_status(outcome.slot(role))
        ));
    }
    md.push('\n');

    // Itinerary
    let days = outcome.itinerary_days();
    if days.is_empty() {
        md.push_str("*No itinerary produced*\n\n");
        if let Some(content) = outcome
            .itinerary
            .as_ref()
            .and_then(AgentResult::payload)
            .and_then(|payload| payload.get("content"))
            .and_then(Value::as_str)
        {
            md.push_str(content);
            md.push_str("\n\n");
        }
    } else {
        md.push_str("## Itinerary\n\n");
        for (i, day) in days.iter().enumerate() {
            render_day(&mut md, i + 1, day);
        }
    }

    if let Some(budget) = outcome.budget_summary() {
        md.push_str("## Budget\n\n");
        md.push_str("| Item | Amount |\n");
        md.push_str("|------|--------|\n");
        for (key, value) in budget {
            md.push_str(&format!("| {} | {} |\n", key, scalar(value)));
        }
        md.push('\n');
    }

    md
}

fn render_day(md: &mut String, index: usize, day: &Value) {
    let Some(day) = day.as_object() else {
        md.push_str(&format!("### Day {}\n\n{}\n\n", index, scalar(day)));
        return;
    };

    let number = day
        .get("day")
        .map(scalar)
        .unwrap_or_else(|| index.to_string());
    match day.get("date").and_then(Value::as_str) {
        Some(date) => md.push_str(&format!("### Day {} ({})\n\n", number, date)),
        None => md.push_str(&format!("### Day {}\n\n", number)),
    }

    if let Some(theme) = day.get("theme").and_then(Value::as_str) {
        md.push_str(&format!("*{}*\n\n", theme));
    }

    if let Some(activities) = day.get("activities").and_then(Value::as_array) {
        for activity in activities {
            md.push_str(&format!("- {}\n", describe_activity(activity)));
        }
        md.push('\n');
    }
}

fn describe_activity(activity: &Value) -> String {
    let Some(activity) = activity.as_object() else {
        return scalar(activity);
    };

    let field = |key: &str| activity.get(key).and_then(Value::as_str);
    let name = field("name")
        .or_else(|| field("activity"))
        .or_else(|| field("description"))
        .map(str::to_string)
        .unwrap_or_else(|| compact(activity));

    match (field("time"), field("location")) {
        (Some(time), Some(location)) => format!("**{}** {} @ {}", time, name, location),
        (Some(time), None) => format!("**{}** {}", time, name),
        (None, Some(location)) => format!("{} @ {}", name, location),
        (None, None) => name,
    }
}

fn format_status(slot: Option<&AgentResult>) -> String {
    match slot {
        Some(AgentResult::Payload(payload)) if payload.contains_key("content") => {
            "⚠️ Unstructured reply".to_string()
        }
        Some(AgentResult::Payload(_)) => "✅ Completed".to_string(),
        Some(AgentResult::Failed { error }) => {
            format!("❌ Failed ({})", error.message.replace('|', "\\|"))
        }
        None => "⏭️ Not run".to_string(),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn compact(map: &Map<String, Value>) -> String {
    serde_json::to_string(map).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::PlanningOutcome;
    use crate::output::summary::build_report;
    use crate::trip::TripRequest;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::time::Duration;
    use uuid::Uuid;

    fn trip() -> TripRequest {
        serde_json::from_value(json!({
            "title": "Spring in Tokyo",
            "destinations": ["Tokyo"],
            "start_date": "2026-03-01",
            "end_date": "2026-03-02",
            "budget": {"total": 20000}
        }))
        .unwrap()
    }

    fn completed(itinerary: Value) -> PlanningOutcome {
        let mut specialists = BTreeMap::new();
        for role in AgentRole::SPECIALISTS {
            specialists.insert(role, AgentResult::Payload(Map::new()));
        }
        specialists.insert(
            AgentRole::Budget,
            AgentResult::failed(AgentRole::Budget, "rate limited"),
        );
        let Value::Object(itinerary) = itinerary else {
            panic!("itinerary must be an object");
        };
        PlanningOutcome::completed(
            Uuid::new_v4(),
            specialists,
            AgentResult::Payload(itinerary),
            Duration::from_millis(1500),
        )
    }

    #[test]
    fn test_markdown_has_status_days_and_budget() {
        let trip = trip();
        let outcome = completed(json!({
            "itinerary": [
                {"day": 1, "date": "2026-03-01", "theme": "Arrival", "activities": [
                    {"time": "09:00", "name": "Tsukiji breakfast", "location": "Tsukiji"},
                    "Evening walk"
                ]},
                {"day": 2, "activities": [{"activity": "Meiji Shrine"}]}
            ],
            "budget": {"total": 18000, "currency": "CNY"}
        }));

        let md = render_markdown(&build_report(&trip, &outcome));

        assert!(md.starts_with("# Spring in Tokyo\n"));
        assert!(md.contains("| transport | ✅ Completed |"));
        assert!(md.contains("| budget | ❌ Failed (rate limited) |"));
        assert!(md.contains("### Day 1 (2026-03-01)"));
        assert!(md.contains("*Arrival*"));
        assert!(md.contains("- **09:00** Tsukiji breakfast @ Tsukiji"));
        assert!(md.contains("- Evening walk"));
        assert!(md.contains("- Meiji Shrine"));
        assert!(md.contains("| total | 18000 |"));
        assert!(md.contains("| currency | CNY |"));
    }

    #[test]
    fn test_markdown_falls_back_to_planner_content() {
        let trip = trip();
        let outcome = completed(json!({"content": "Day 1: see everything"}));

        let md = render_markdown(&build_report(&trip, &outcome));

        assert!(md.contains("| planner | ⚠️ Unstructured reply |"));
        assert!(md.contains("*No itinerary produced*"));
        assert!(md.contains("Day 1: see everything"));
        assert!(!md.contains("## Budget"));
    }

    #[test]
    fn test_markdown_for_failed_run() {
        let trip = trip();
        let outcome =
            PlanningOutcome::failed(Uuid::new_v4(), "no credential".to_string(), Duration::ZERO);

        let md = render_markdown(&build_report(&trip, &outcome));

        assert!(md.contains("**Planning failed:** no credential"));
        assert!(!md.contains("## Agents"));
    }
}
