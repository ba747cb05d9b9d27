use std::path::Path;

use anyhow::Context as _;

use crate::error::{PlanpressError, PlanpressResult};

/// Athlete intake submission. The schema is intentionally loose: the
/// generation prompt echoes the whole document, so free-form sections are
/// kept as raw JSON.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Intake {
    pub email: String,
    pub goal: String,
    pub target_time: String,
    pub availability: Availability,
    pub blocked_dates: Vec<BlockedDate>,
    pub recent_race: serde_json::Value,
    pub heart_rate: serde_json::Value,
    pub body_composition: serde_json::Value,
    /// Anything else the form captured.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Availability {
    pub running_days: Vec<String>,
    pub strength_days: Vec<String>,
    pub preferred_long_run_day: String,
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            running_days: [
                "monday",
                "tuesday",
                "wednesday",
                "friday",
                "saturday",
                "sunday",
            ]
            .map(str::to_string)
            .to_vec(),
            strength_days: ["tuesday", "thursday", "saturday"].map(str::to_string).to_vec(),
            preferred_long_run_day: "sunday".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockedDate {
    #[serde(rename = "type")]
    pub kind: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
}

impl Intake {
    /// Required sections that are absent or null. Missing sections are a
    /// warning at intake time, not an error.
    pub fn missing_sections(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.availability.running_days.is_empty() {
            missing.push("availability");
        }
        if self.recent_race.is_null() {
            missing.push("recentRace");
        }
        if self.heart_rate.is_null() {
            missing.push("heartRate");
        }
        if self.body_composition.is_null() {
            missing.push("bodyComposition");
        }
        missing
    }

    /// Local part of the athlete's email with `.`/`_` mapped to `-`; used in
    /// generated-plan filenames and for discovery. `None` without an `@`.
    pub fn email_prefix(&self) -> Option<String> {
        let (local, _domain) = self.email.split_once('@')?;
        Some(local.replace(['.', '_'], "-"))
    }

    pub fn goal_slug(&self) -> String {
        let goal = if self.goal.is_empty() {
            "moderate"
        } else {
            &self.goal
        };
        goal.to_lowercase().replace(' ', "-")
    }
}

pub fn load_intake(path: &Path) -> PlanpressResult<Intake> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read intake '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .map_err(|e| PlanpressError::serde(format!("parse intake '{}': {e}", path.display())))
}
