//! Page composers. One module per page type; each emits drawing calls
//! top-to-bottom onto a fresh canvas and hands the finished page to the
//! document.

pub mod cover;
pub mod overview;
pub mod race_week;
pub mod week_detail;
pub mod zones;

use chrono::NaiveDate;

use crate::draw;
use crate::pdf::PageCanvas;
use crate::theme::{PAGE_HEIGHT, PAGE_WIDTH};

/// Letter-size canvas with the twilight gradient and a starfield already
/// painted.
pub(crate) fn backdrop(star_count: u32) -> PageCanvas {
    let mut page = PageCanvas::new(PAGE_WIDTH, PAGE_HEIGHT);
    draw::twilight_gradient(&mut page, PAGE_WIDTH, PAGE_HEIGHT);
    draw::starfield(&mut page, PAGE_WIDTH, PAGE_HEIGHT, star_count);
    page
}

/// Quantities like mileage print without a decimal when whole: `16`, `6.5`.
pub(crate) fn fmt_qty(v: f32) -> String {
    if (v - v.round()).abs() < 1e-4 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.1}")
    }
}

pub(crate) fn parse_plan_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// `April 26, 2026`, or the raw string when it does not parse.
pub(crate) fn long_date(raw: &str) -> String {
    match parse_plan_date(raw) {
        Some(date) => date.format("%B %d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// `Sunday, April 26, 2026`, or the raw string when it does not parse.
pub(crate) fn weekday_date(raw: &str) -> String {
    match parse_plan_date(raw) {
        Some(date) => date.format("%A, %B %d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// `04/26`; `None` when the date does not parse.
pub(crate) fn short_date(raw: &str) -> Option<String> {
    parse_plan_date(raw).map(|date| date.format("%m/%d").to_string())
}

/// Non-empty string or the fallback.
pub(crate) fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}
