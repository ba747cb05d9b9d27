use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;

use crate::error::{PlanpressError, PlanpressResult};

const DEFAULT_PRE_RACE: &str = "You've done the work. Now go shine.";
const DEFAULT_START_LINE: &str = "Reign or shine, you've got this.";

/// Motivational copy keyed by week number, plus the race-day lines.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct QuoteBook {
    pub weekly_quotes: BTreeMap<String, WeeklyQuote>,
    pub race_day: RaceDayQuotes,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WeeklyQuote {
    pub quote: String,
    pub author: String,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RaceDayQuotes {
    pub pre_race: String,
    pub start_line: String,
}

impl QuoteBook {
    /// Quote for a week, if the book has a non-empty one.
    pub fn weekly(&self, week: u32) -> Option<&WeeklyQuote> {
        self.weekly_quotes
            .get(&week.to_string())
            .filter(|q| !q.quote.is_empty())
    }

    pub fn pre_race(&self) -> &str {
        if self.race_day.pre_race.is_empty() {
            DEFAULT_PRE_RACE
        } else {
            &self.race_day.pre_race
        }
    }

    pub fn start_line(&self) -> &str {
        if self.race_day.start_line.is_empty() {
            DEFAULT_START_LINE
        } else {
            &self.race_day.start_line
        }
    }

    /// A missing file yields the built-in defaults; a malformed one is an error.
    pub fn load(path: &Path) -> PlanpressResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read quotes '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .map_err(|e| PlanpressError::serde(format!("parse quotes '{}': {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_kick_in_for_empty_race_day() {
        let book = QuoteBook::default();
        assert_eq!(book.pre_race(), DEFAULT_PRE_RACE);
        assert_eq!(book.start_line(), DEFAULT_START_LINE);
    }

    #[test]
    fn weekly_lookup_uses_string_keys() {
        let book: QuoteBook = serde_json::from_str(
            r#"{"weekly_quotes": {"3": {"quote": "Trust the process.", "author": "Coach"}}}"#,
        )
        .unwrap();
        assert_eq!(book.weekly(3).unwrap().quote, "Trust the process.");
        assert!(book.weekly(4).is_none());
    }

    #[test]
    fn empty_weekly_quote_is_treated_as_absent() {
        let book: QuoteBook =
            serde_json::from_str(r#"{"weekly_quotes": {"1": {"quote": ""}}}"#).unwrap();
        assert!(book.weekly(1).is_none());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let book = QuoteBook::load(Path::new("does/not/exist.json")).unwrap();
        assert_eq!(book.pre_race(), DEFAULT_PRE_RACE);
    }
}
