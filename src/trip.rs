//! Trip requests: the immutable input of a planning run

use crate::error::TripError;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

pub const MAX_TRAVELERS: u32 = 20;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct TripRequest {
    /// Free-form label, e.g. "Spring in Tokyo"
    #[serde(default)]
    pub title: Option<String>,

    /// Places to visit, in order
    pub destinations: Vec<String>,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    #[serde(default = "default_travelers")]
    pub travelers: u32,

    pub budget: Budget,

    /// Tag lists keyed by category, e.g. `foodTypes: [sushi, ramen]`
    #[serde(default)]
    pub preferences: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Budget {
    pub total: f64,
}

fn default_travelers() -> u32 {
    2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Budget,
    Medium,
    Luxury,
}

impl std::fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetTier::Budget => write!(f, "budget"),
            BudgetTier::Medium => write!(f, "medium"),
            BudgetTier::Luxury => write!(f, "luxury"),
        }
    }
}

impl TripRequest {
    /// Load a trip from a YAML or JSON file
    pub fn load(path: &Path) -> Result<Self, TripError> {
        let content = std::fs::read_to_string(path).map_err(|e| TripError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let trip: TripRequest = serde_yaml::from_str(&content)?;
        Ok(trip)
    }

    pub fn validate(&self) -> Result<(), TripError> {
        if self.destinations.is_empty() || self.destinations.iter().any(|d| d.trim().is_empty()) {
            return Err(TripError::NoDestinations);
        }

        if self.end_date < self.start_date {
            return Err(TripError::DateOrder {
                start: self.start_date,
                end: self.end_date,
            });
        }

        if self.travelers == 0 || self.travelers > MAX_TRAVELERS {
            return Err(TripError::Travelers {
                got: self.travelers,
                max: MAX_TRAVELERS,
            });
        }

        if self.budget.total.is_nan() || self.budget.total < 0.0 {
            return Err(TripError::NegativeBudget(self.budget.total));
        }

        Ok(())
    }

    /// Number of calendar days, both ends included; never less than 1
    pub fn duration_days(&self) -> i64 {
        ((self.end_date - self.start_date).num_days() + 1).max(1)
    }

    pub fn budget_tier(&self) -> BudgetTier {
        if self.budget.total < 2000.0 {
            BudgetTier::Budget
        } else if self.budget.total < 8000.0 {
            BudgetTier::Medium
        } else {
            BudgetTier::Luxury
        }
    }

    pub fn display_title(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("Trip to {}", self.destinations.join(", ")),
        }
    }

    /// Stable id for the trip's planning inputs
    pub fn fingerprint(&self) -> String {
        let input = format!(
            "{}|{}|{}|{}|{}",
            self.destinations.join(","),
            self.start_date,
            self.end_date,
            self.travelers,
            self.budget.total
        );
        let hash = Sha256::digest(input.as_bytes());
        format!("{:x}", hash)[..12].to_string()
    }

    /// Filesystem-safe name derived from the title
    pub fn slug(&self) -> String {
        let mut slug = String::new();
        for c in self.display_title().chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
            } else if !slug.ends_with('-') && !slug.is_empty() {
                slug.push('-');
            }
        }
        let slug = slug.trim_end_matches('-');
        if slug.is_empty() {
            "trip".to_string()
        } else {
            slug.to_string()
        }
    }

    /// The `trip_data` object handed to every agent
    pub fn trip_data(&self) -> Value {
        json!({
            "title": self.display_title(),
            "destinations": self.destinations,
            "start_date": self.start_date.to_string(),
            "end_date": self.end_date.to_string(),
            "duration_days": self.duration_days(),
            "travelers": self.travelers,
            "budget": {
                "total": self.budget.total,
                "tier": self.budget_tier(),
            },
            "preferences": self.preferences,
        })
    }
}
