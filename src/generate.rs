//! Plan generation: prompt assembly, the Anthropic Messages call, and
//! persistence of the extracted plan JSON.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::NaiveDate;

use crate::error::{PlanpressError, PlanpressResult};
use crate::intake::{BlockedDate, Intake};
use crate::render::ensure_parent_dir;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 16000;

/// How much of the example plan the system context carries.
const EXAMPLE_PLAN_BUDGET: usize = 10_000;

const DEFAULT_TEMPLATE: &str = include_str!("../assets/prompt_template.md");

/// Guide documents folded into the system context, in order, when present.
const GUIDE_FILES: [&str; 3] = [
    "availability-scheduling.md",
    "periodization.md",
    "pace-zones.md",
];

#[derive(Clone, Debug)]
pub struct GenerateConfig {
    pub model: String,
    pub plans_dir: PathBuf,
    pub template_path: Option<PathBuf>,
    pub guides_dir: Option<PathBuf>,
    pub example_plan_path: Option<PathBuf>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            plans_dir: PathBuf::from("plans"),
            template_path: None,
            guides_dir: None,
            example_plan_path: None,
        }
    }
}

impl GenerateConfig {
    pub fn validate(&self) -> PlanpressResult<()> {
        if self.model.trim().is_empty() {
            return Err(PlanpressError::validation("model must be non-empty"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct GeneratedPlan {
    pub path: PathBuf,
    pub plan: serde_json::Value,
    /// False when the sanity check flagged problems; the plan is saved either
    /// way so it can be reviewed.
    pub valid: bool,
}

pub fn format_blocked_dates(dates: &[BlockedDate], kind: &str) -> String {
    let formatted: Vec<String> = dates
        .iter()
        .filter(|d| d.kind.eq_ignore_ascii_case(kind))
        .map(|d| {
            let reason = if d.reason.is_empty() { "N/A" } else { &d.reason };
            format!("{} to {} ({reason})", d.start_date, d.end_date)
        })
        .collect();
    if formatted.is_empty() {
        "None".to_string()
    } else {
        formatted.join(", ")
    }
}

/// Substitute athlete data into the prompt template.
pub fn build_prompt(intake: &Intake, template: &str, today: NaiveDate) -> String {
    let athlete_data =
        serde_json::to_string_pretty(intake).unwrap_or_else(|_| "{}".to_string());
    let availability = &intake.availability;

    template
        .replace("{athlete_data}", &athlete_data)
        .replace("{today_date}", &today.format("%Y-%m-%d").to_string())
        .replace("{running_days}", &availability.running_days.join(", "))
        .replace("{strength_days}", &availability.strength_days.join(", "))
        .replace("{long_run_day}", &availability.preferred_long_run_day)
        .replace(
            "{blocked_dates_rest}",
            &format_blocked_dates(&intake.blocked_dates, "rest"),
        )
        .replace(
            "{blocked_dates_cross}",
            &format_blocked_dates(&intake.blocked_dates, "cross-training"),
        )
}

/// Coach persona, guide material and a truncated example plan.
pub fn build_system_context(guides: &str, example: Option<&serde_json::Value>) -> String {
    let example_excerpt = example
        .and_then(|e| serde_json::to_string_pretty(e).ok())
        .map(|mut s| {
            if s.len() > EXAMPLE_PLAN_BUDGET {
                let mut cut = EXAMPLE_PLAN_BUDGET;
                while !s.is_char_boundary(cut) {
                    cut -= 1;
                }
                s.truncate(cut);
            }
            format!("{s}...")
        })
        .unwrap_or_else(|| "(no example available)".to_string());

    format!(
        "You are an expert marathon coach creating personalized training plans.\n\n\
         ## Training Guides\n\n{guides}\n\n\
         ## Example Plan Structure (for reference)\n\n```json\n{example_excerpt}\n```\n\n\
         Follow the exact JSON structure from the example. Output ONLY valid JSON."
    )
}

fn load_guides(guides_dir: Option<&Path>) -> String {
    let Some(dir) = guides_dir else {
        return String::new();
    };
    let mut sections = Vec::new();
    for name in GUIDE_FILES {
        let path = dir.join(name);
        match std::fs::read_to_string(&path) {
            Ok(content) => sections.push(format!("## {name}\n\n{content}")),
            Err(_) => tracing::debug!(guide = name, "guide file not present, skipping"),
        }
    }
    sections.join("\n\n---\n\n")
}

/// Pull the plan JSON out of a model reply that may wrap it in code fences.
pub fn extract_json_block(text: &str) -> &str {
    for fence in ["```json", "```"] {
        if let Some(start) = text.find(fence) {
            let body = &text[start + fence.len()..];
            return match body.find("```") {
                Some(end) => body[..end].trim(),
                None => body.trim(),
            };
        }
    }
    text.trim()
}

/// Structural problems with a generated plan. Empty means it passed.
pub fn sanity_check_plan(plan: &serde_json::Value) -> Vec<String> {
    let mut problems = Vec::new();

    for key in ["metadata", "athlete", "paceZones", "hrZones", "weeks"] {
        if plan.get(key).is_none() {
            problems.push(format!("missing required key '{key}'"));
        }
    }

    let weeks = plan
        .get("weeks")
        .and_then(|w| w.as_array())
        .cloned()
        .unwrap_or_default();
    if weeks.len() < 10 {
        problems.push(format!(
            "only {} weeks generated, expected at least 10",
            weeks.len()
        ));
    }
    for (i, week) in weeks.iter().enumerate() {
        if week.get("days").is_none() {
            problems.push(format!("week {} missing 'days' object", i + 1));
        }
    }

    problems
}

pub fn plan_filename(intake: &Intake, timestamp: &str) -> String {
    let prefix = intake
        .email_prefix()
        .unwrap_or_else(|| "athlete".to_string());
    format!("{prefix}-{}-generated-{timestamp}.json", intake.goal_slug())
}

pub struct AnthropicClient {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl AnthropicClient {
    pub fn from_env(model: impl Into<String>) -> PlanpressResult<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            PlanpressError::generate("ANTHROPIC_API_KEY environment variable not set")
        })?;
        Ok(Self {
            client: reqwest::blocking::Client::new(),
            api_key,
            model: model.into(),
        })
    }

    /// One Messages-API turn; returns the concatenated text blocks.
    pub fn complete(&self, system: &str, prompt: &str) -> PlanpressResult<String> {
        #[derive(serde::Deserialize)]
        struct MessagesResponse {
            content: Vec<ContentBlock>,
        }
        #[derive(serde::Deserialize)]
        struct ContentBlock {
            #[serde(default)]
            text: String,
        }

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "system": system,
            "messages": [{"role": "user", "content": prompt}],
        });

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .context("send plan generation request")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            let excerpt: String = detail.chars().take(500).collect();
            return Err(PlanpressError::generate(format!(
                "plan generation request returned {status}: {excerpt}"
            )));
        }

        let parsed: MessagesResponse = response.json().context("decode model response")?;
        let text: String = parsed
            .content
            .into_iter()
            .map(|block| block.text)
            .collect();
        if text.is_empty() {
            return Err(PlanpressError::generate("model returned no text content"));
        }
        Ok(text)
    }
}

/// End-to-end generation: prompt -> model -> extracted JSON -> saved plan.
#[tracing::instrument(skip_all, fields(model = %cfg.model))]
pub fn generate_plan(intake: &Intake, cfg: &GenerateConfig) -> PlanpressResult<GeneratedPlan> {
    cfg.validate()?;

    let missing = intake.missing_sections();
    if !missing.is_empty() {
        tracing::warn!(?missing, "intake is missing sections");
    }

    let template = match &cfg.template_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read prompt template '{}'", path.display()))?,
        None => DEFAULT_TEMPLATE.to_string(),
    };
    let guides = load_guides(cfg.guides_dir.as_deref());
    let example = match &cfg.example_plan_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read example plan '{}'", path.display()))?;
            Some(serde_json::from_str(&raw).map_err(|e| {
                PlanpressError::serde(format!("parse example plan '{}': {e}", path.display()))
            })?)
        }
        None => None,
    };

    let today = chrono::Local::now().date_naive();
    let prompt = build_prompt(intake, &template, today);
    let system = build_system_context(&guides, example.as_ref());

    tracing::info!("requesting plan from model");
    let client = AnthropicClient::from_env(cfg.model.clone())?;
    let reply = client.complete(&system, &prompt)?;

    let block = extract_json_block(&reply);
    let plan: serde_json::Value = serde_json::from_str(block).map_err(|e| {
        let excerpt: String = block.chars().take(1000).collect();
        PlanpressError::generate(format!("model reply is not valid JSON: {e}; got: {excerpt}"))
    })?;

    let problems = sanity_check_plan(&plan);
    for problem in &problems {
        tracing::warn!(%problem, "generated plan failed a sanity check");
    }

    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
    let path = cfg.plans_dir.join(plan_filename(intake, &timestamp));
    ensure_parent_dir(&path)?;
    let pretty = serde_json::to_string_pretty(&plan)
        .map_err(|e| PlanpressError::serde(format!("encode generated plan: {e}")))?;
    std::fs::write(&path, pretty)
        .with_context(|| format!("write generated plan '{}'", path.display()))?;

    tracing::info!(path = %path.display(), valid = problems.is_empty(), "saved generated plan");
    Ok(GeneratedPlan {
        path,
        plan,
        valid: problems.is_empty(),
    })
}
