use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;

use crate::error::{PlanpressError, PlanpressResult};

/// Day keys in the order the plan schema uses them, with the strip labels.
pub const DAY_ORDER: [(&str, &str); 7] = [
    ("monday", "Mon"),
    ("tuesday", "Tue"),
    ("wednesday", "Wed"),
    ("thursday", "Thu"),
    ("friday", "Fri"),
    ("saturday", "Sat"),
    ("sunday", "Sun"),
];

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Plan {
    pub metadata: PlanMetadata,
    /// Athlete intake echo; carried through but not interpreted by the renderer.
    pub athlete: serde_json::Value,
    pub pace_zones: PaceZones,
    pub hr_zones: HrZones,
    pub weeks: Vec<Week>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanMetadata {
    pub plan_name: String,
    pub race_name: String,
    /// ISO `YYYY-MM-DD`; rendered verbatim when unparseable.
    pub race_date: String,
    pub predicted_finish_time: PredictedFinish,
    pub plan_level: String,
    pub total_weeks: Option<u32>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PredictedFinish {
    pub target: String,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaceZones {
    pub easy: Option<PaceBand>,
    pub marathon: Option<PaceBand>,
    pub tempo: Option<PaceBand>,
    #[serde(rename = "fiveK")]
    pub five_k: Option<PaceBand>,
    pub interval: Option<PaceBand>,
    pub recovery: Option<PaceBand>,
}

impl PaceZones {
    /// Reference-card ordering with display labels.
    pub fn ordered(&self) -> [(&'static str, Option<&PaceBand>); 6] {
        [
            ("Easy", self.easy.as_ref()),
            ("Marathon", self.marathon.as_ref()),
            ("Tempo", self.tempo.as_ref()),
            ("5K", self.five_k.as_ref()),
            ("Interval", self.interval.as_ref()),
            ("Recovery", self.recovery.as_ref()),
        ]
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaceBand {
    pub min: String,
    pub max: String,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HrZones {
    pub zone1: Option<HrBand>,
    pub zone2: Option<HrBand>,
    pub zone3: Option<HrBand>,
    pub zone4: Option<HrBand>,
    pub zone5: Option<HrBand>,
}

impl HrZones {
    pub fn ordered(&self) -> [Option<&HrBand>; 5] {
        [
            self.zone1.as_ref(),
            self.zone2.as_ref(),
            self.zone3.as_ref(),
            self.zone4.as_ref(),
            self.zone5.as_ref(),
        ]
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HrBand {
    pub name: String,
    #[serde(rename = "minHR")]
    pub min_hr: Option<u32>,
    #[serde(rename = "maxHR")]
    pub max_hr: Option<u32>,
    #[serde(rename = "percentMaxHR")]
    pub percent_max_hr: String,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Week {
    pub week_number: u32,
    pub phase: Phase,
    pub is_recovery_week: bool,
    pub weeks_until_race: Option<u32>,
    pub focus: String,
    pub total_mileage: f32,
    pub total_hours: f32,
    pub strength_days: u32,
    pub days: BTreeMap<String, DaySchedule>,
}

impl Week {
    /// The week's longest qualifying run, for the overview "LR:" column.
    pub fn long_run_distance(&self) -> f32 {
        self.days
            .values()
            .filter(|day| {
                matches!(
                    day.running.kind,
                    WorkoutType::Long | WorkoutType::Progression | WorkoutType::RacePace
                )
            })
            .map(|day| day.running.total_distance)
            .fold(0.0, f32::max)
    }

    pub fn is_race_week(&self) -> bool {
        self.phase == Phase::Taper && self.weeks_until_race.unwrap_or(99) <= 1
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DaySchedule {
    pub date: String,
    pub running: RunWorkout,
    pub strength: Option<StrengthWork>,
    pub notes: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunWorkout {
    #[serde(rename = "type")]
    pub kind: WorkoutType,
    pub title: String,
    pub description: String,
    pub total_distance: f32,
    /// Minutes.
    pub estimated_duration: u32,
    pub hr_zone: String,
}

impl Default for RunWorkout {
    fn default() -> Self {
        Self {
            kind: WorkoutType::Rest,
            title: "Rest Day".to_string(),
            description: String::new(),
            total_distance: 0.0,
            estimated_duration: 0,
            hr_zone: String::new(),
        }
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrengthWork {
    pub scheduled: bool,
    #[serde(rename = "type")]
    pub kind: String,
    /// Minutes.
    pub duration: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Base,
    Build,
    Peak,
    Taper,
    Race,
    #[serde(other)]
    Other,
}

impl Phase {
    /// Overview strip tag, three letters.
    pub fn short_tag(self) -> &'static str {
        match self {
            Phase::Base => "BAS",
            Phase::Build => "BUI",
            Phase::Peak => "PEA",
            Phase::Taper => "TAP",
            Phase::Race => "RAC",
            Phase::Other => "???",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Base => "BASE",
            Phase::Build => "BUILD",
            Phase::Peak => "PEAK",
            Phase::Taper => "TAPER",
            Phase::Race => "RACE",
            Phase::Other => "TRAINING",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Easy,
    Long,
    Tempo,
    Intervals,
    Fartlek,
    HillRepeats,
    RacePace,
    #[default]
    Rest,
    CrossTraining,
    Recovery,
    Progression,
    #[serde(other)]
    Other,
}

impl Plan {
    pub fn validate(&self) -> PlanpressResult<()> {
        if self.weeks.is_empty() {
            return Err(PlanpressError::validation("plan has no weeks"));
        }
        for week in &self.weeks {
            if week.total_mileage < 0.0 || !week.total_mileage.is_finite() {
                return Err(PlanpressError::validation(format!(
                    "week {} has invalid total mileage",
                    week.week_number
                )));
            }
            for key in week.days.keys() {
                if !DAY_ORDER.iter().any(|(name, _)| *name == key.as_str()) {
                    return Err(PlanpressError::validation(format!(
                        "week {} has unknown day key '{key}'",
                        week.week_number
                    )));
                }
            }
        }
        Ok(())
    }

    /// Last taper week within one week of the race, if any. The race-week
    /// special page is only emitted when this returns a week.
    pub fn race_week(&self) -> Option<&Week> {
        self.weeks.iter().filter(|w| w.is_race_week()).next_back()
    }

    pub fn total_weeks_or(&self, fallback: u32) -> u32 {
        self.metadata.total_weeks.unwrap_or(fallback)
    }
}

pub fn load_plan(path: &Path) -> PlanpressResult<Plan> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read plan '{}'", path.display()))?;
    let plan: Plan = serde_json::from_str(&raw)
        .map_err(|e| PlanpressError::serde(format!("parse plan '{}': {e}", path.display())))?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(phase: Phase, weeks_until_race: Option<u32>) -> Week {
        Week {
            week_number: 1,
            phase,
            weeks_until_race,
            ..Week::default()
        }
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let plan: Plan = serde_json::from_str(r#"{"weeks": [{"weekNumber": 3}]}"#).unwrap();
        assert_eq!(plan.metadata.plan_name, "");
        assert_eq!(plan.metadata.total_weeks, None);
        assert_eq!(plan.weeks[0].week_number, 3);
        assert_eq!(plan.weeks[0].phase, Phase::Base);
        assert!(!plan.weeks[0].is_recovery_week);
    }

    #[test]
    fn unknown_phase_and_workout_are_tolerated() {
        let json = r#"{
            "weeks": [{
                "phase": "megataper",
                "days": {"monday": {"running": {"type": "zumba"}}}
            }]
        }"#;
        let plan: Plan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.weeks[0].phase, Phase::Other);
        assert_eq!(
            plan.weeks[0].days["monday"].running.kind,
            WorkoutType::Other
        );
    }

    #[test]
    fn default_workout_is_a_rest_day() {
        let day: DaySchedule = serde_json::from_str(r#"{"date": "2026-04-20"}"#).unwrap();
        assert_eq!(day.running.kind, WorkoutType::Rest);
        assert_eq!(day.running.title, "Rest Day");
    }

    #[test]
    fn long_run_distance_picks_qualifying_max() {
        let json = r#"{
            "days": {
                "tuesday": {"running": {"type": "tempo", "totalDistance": 8.0}},
                "saturday": {"running": {"type": "long", "totalDistance": 16.0}},
                "sunday": {"running": {"type": "race_pace", "totalDistance": 10.0}}
            }
        }"#;
        let week: Week = serde_json::from_str(json).unwrap();
        assert_eq!(week.long_run_distance(), 16.0);
    }

    #[test]
    fn race_week_requires_taper_and_countdown() {
        let mut plan = Plan {
            weeks: vec![
                week(Phase::Taper, Some(2)),
                week(Phase::Taper, Some(1)),
                week(Phase::Base, Some(0)),
            ],
            ..Plan::default()
        };
        plan.weeks[1].week_number = 14;
        let rw = plan.race_week().expect("race week");
        assert_eq!(rw.week_number, 14);

        // Missing countdown does not qualify.
        let plan = Plan {
            weeks: vec![week(Phase::Taper, None)],
            ..Plan::default()
        };
        assert!(plan.race_week().is_none());
    }

    #[test]
    fn validate_rejects_empty_and_unknown_days() {
        assert!(Plan::default().validate().is_err());

        let json = r#"{"weeks": [{"days": {"funday": {}}}]}"#;
        let plan: Plan = serde_json::from_str(json).unwrap();
        assert!(plan.validate().is_err());
    }

    #[test]
    fn plan_json_roundtrip_keeps_wire_names() {
        let plan: Plan = serde_json::from_str(
            r#"{
                "metadata": {"planName": "Eugene", "totalWeeks": 15},
                "paceZones": {"fiveK": {"min": "7:10", "max": "7:25"}},
                "hrZones": {"zone2": {"name": "Aerobic", "minHR": 130, "maxHR": 148, "percentMaxHR": "70-80%"}},
                "weeks": [{"weekNumber": 1}]
            }"#,
        )
        .unwrap();
        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(value["metadata"]["planName"], "Eugene");
        assert!(value["paceZones"]["fiveK"].is_object());
        assert_eq!(value["hrZones"]["zone2"]["minHR"], 130);
    }
}
