use std::path::Path;

use planpress::plan::load_plan;
use planpress::render::{RenderOptions, expected_page_count, render_plan};
use planpress::QuoteBook;

fn sample() -> (planpress::Plan, QuoteBook) {
    let plan = load_plan(Path::new("demos/plan-sample.json")).unwrap();
    let quotes = QuoteBook::load(Path::new("demos/quotes-sample.json")).unwrap();
    (plan, quotes)
}

#[test]
fn sample_plan_renders_to_a_pdf() {
    let (plan, quotes) = sample();
    let bytes = render_plan(&plan, &quotes, &RenderOptions::default()).unwrap();

    assert!(bytes.starts_with(b"%PDF-"));

    // Cover + zones + 1 overview page + 3 weeks + race week.
    assert_eq!(expected_page_count(&plan), 7);
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Count 7"));

    // Document metadata comes from the plan.
    assert!(text.contains("Eugene Marathon Moderate"));
}

#[test]
fn rendering_is_deterministic() {
    let (plan, quotes) = sample();
    let options = RenderOptions::default();
    let first = render_plan(&plan, &quotes, &options).unwrap();
    let second = render_plan(&plan, &quotes, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn overview_paginates_past_twelve_weeks() {
    let (mut plan, quotes) = sample();
    let template = plan.weeks[0].clone();
    plan.weeks = (1..=20)
        .map(|i| {
            let mut week = template.clone();
            week.week_number = i;
            week.weeks_until_race = Some(20 - i);
            week
        })
        .collect();

    // Cover + zones + 2 overview pages + 20 weeks, no race week (taper gone).
    assert_eq!(expected_page_count(&plan), 24);
    let bytes = render_plan(&plan, &quotes, &RenderOptions::default()).unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Count 24"));
    assert!(text.contains("Training Overview \\(cont.\\)") || text.contains("Training Overview (cont.)"));
}

#[test]
fn empty_plan_is_rejected() {
    let plan = planpress::Plan::default();
    let quotes = QuoteBook::default();
    assert!(render_plan(&plan, &quotes, &RenderOptions::default()).is_err());
}
