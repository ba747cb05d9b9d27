use std::path::Path;

use anyhow::Context as _;
use chrono::NaiveDate;

use crate::error::PlanpressResult;
use crate::pages;
use crate::pdf::{DocInfo, PdfDocument};
use crate::plan::Plan;
use crate::quotes::QuoteBook;
use crate::theme::Branding;

#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    pub branding: Branding,
}

/// Compose the full document: cover, zones card, overview strips, one detail
/// page per week, and the race-week special when the plan has one.
#[tracing::instrument(skip_all, fields(plan = %plan.metadata.plan_name))]
pub fn render_plan(
    plan: &Plan,
    quotes: &QuoteBook,
    options: &RenderOptions,
) -> PlanpressResult<Vec<u8>> {
    plan.validate()?;

    let mut doc = PdfDocument::new();

    tracing::debug!("drawing cover page");
    pages::cover::compose(&mut doc, plan, &options.branding);

    tracing::debug!("drawing zones reference card");
    pages::zones::compose(&mut doc, plan);

    tracing::debug!("drawing training overview");
    pages::overview::compose(&mut doc, plan);

    tracing::debug!(weeks = plan.weeks.len(), "drawing weekly detail pages");
    for (i, week) in plan.weeks.iter().enumerate() {
        let week_number = if week.week_number == 0 {
            (i + 1) as u32
        } else {
            week.week_number
        };
        pages::week_detail::compose(&mut doc, week, week_number, quotes);
    }

    if plan.race_week().is_some() {
        tracing::debug!("drawing race week special page");
        pages::race_week::compose(&mut doc, plan, quotes);
    }

    tracing::info!(pages = doc.page_count(), "composed training plan document");

    let info = doc_info(plan, &options.branding);
    Ok(doc.finish(&info))
}

pub fn render_plan_to_file(
    plan: &Plan,
    quotes: &QuoteBook,
    options: &RenderOptions,
    out_path: &Path,
) -> PlanpressResult<()> {
    let bytes = render_plan(plan, quotes, options)?;
    ensure_parent_dir(out_path)?;
    std::fs::write(out_path, &bytes)
        .with_context(|| format!("write pdf '{}'", out_path.display()))?;
    tracing::info!(out = %out_path.display(), bytes = bytes.len(), "wrote training plan pdf");
    Ok(())
}

/// Pages the composition will produce for this plan.
pub fn expected_page_count(plan: &Plan) -> usize {
    2 + pages::overview::page_count(plan.weeks.len())
        + plan.weeks.len()
        + usize::from(plan.race_week().is_some())
}

/// `{slugified-plan-name}-{YYYYMMDD}.pdf`
pub fn default_output_name(plan: &Plan, date: NaiveDate) -> String {
    let name = if plan.metadata.plan_name.is_empty() {
        "training-plan"
    } else {
        &plan.metadata.plan_name
    };
    let slug = name.to_lowercase().replace([' ', '/'], "-");
    format!("{slug}-{}.pdf", date.format("%Y%m%d"))
}

fn doc_info(plan: &Plan, branding: &Branding) -> DocInfo {
    let metadata = &plan.metadata;
    let title = if metadata.plan_name.is_empty() {
        "Training Plan".to_string()
    } else {
        metadata.plan_name.clone()
    };
    let race = if metadata.race_name.is_empty() {
        "Marathon"
    } else {
        &metadata.race_name
    };
    DocInfo {
        title,
        author: branding.author.clone(),
        subject: format!("{} - {race}", branding.subject_prefix),
        creator: branding.creator.clone(),
    }
}

pub fn ensure_parent_dir(path: &Path) -> PlanpressResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output directory '{}'", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Phase, Week};

    fn plan_with_weeks(n: usize) -> Plan {
        Plan {
            weeks: (1..=n)
                .map(|i| Week {
                    week_number: i as u32,
                    ..Week::default()
                })
                .collect(),
            ..Plan::default()
        }
    }

    #[test]
    fn output_name_slugs_and_dates() {
        let mut plan = plan_with_weeks(1);
        plan.metadata.plan_name = "Eugene Marathon Moderate".to_string();
        let date = NaiveDate::from_ymd_opt(2026, 4, 26).unwrap();
        assert_eq!(
            default_output_name(&plan, date),
            "eugene-marathon-moderate-20260426.pdf"
        );
        assert_eq!(
            default_output_name(&plan_with_weeks(1), date),
            "training-plan-20260426.pdf"
        );
    }

    #[test]
    fn expected_pages_track_overview_breaks_and_race_week() {
        assert_eq!(expected_page_count(&plan_with_weeks(12)), 2 + 1 + 12);
        assert_eq!(expected_page_count(&plan_with_weeks(13)), 2 + 2 + 13);

        let mut plan = plan_with_weeks(15);
        plan.weeks[14].phase = Phase::Taper;
        plan.weeks[14].weeks_until_race = Some(0);
        assert_eq!(expected_page_count(&plan), 2 + 2 + 15 + 1);
    }
}
