use crate::metrics::{self, Face};
use crate::pages::{backdrop, fmt_qty};
use crate::pdf::{PageCanvas, PdfDocument};
use crate::plan::{Phase, Plan};
use crate::theme::{
    CYAN_GLOW, DEEP_PURPLE, MARGIN, PAGE_HEIGHT, PAGE_WIDTH, SOFT_WHITE, STRIP_PURPLE,
    STRIP_RADIUS, font_size, inch, phase_color,
};

const STRIPS_PER_PAGE: usize = 12;

fn page_with_header(title: &str) -> (PageCanvas, f32) {
    let mut page = backdrop(60);
    let title_y = PAGE_HEIGHT - MARGIN - inch(0.5);
    page.draw_text(
        Face::HelveticaBold,
        font_size::PAGE_TITLE,
        CYAN_GLOW,
        MARGIN,
        title_y,
        title,
    );
    (page, title_y)
}

pub fn compose(doc: &mut PdfDocument, plan: &Plan) {
    if plan.weeks.is_empty() {
        return;
    }

    let (mut page, title_y) = page_with_header("Training Overview");

    let total_weeks = plan.total_weeks_or(plan.weeks.len() as u32);
    let subtitle_y = title_y - inch(0.4);
    page.draw_text(
        Face::Helvetica,
        font_size::BODY,
        SOFT_WHITE,
        MARGIN,
        subtitle_y,
        &format!("{total_weeks} weeks to race day"),
    );

    let strip_width = PAGE_WIDTH - 2.0 * MARGIN;
    let strip_height = inch(0.45);
    let strip_spacing = 6.0;

    let mut current_y = subtitle_y - inch(0.6);

    for (i, week) in plan.weeks.iter().enumerate() {
        if i > 0 && i % STRIPS_PER_PAGE == 0 {
            doc.add_page(page);
            let (next, title_y) = page_with_header("Training Overview (cont.)");
            page = next;
            current_y = title_y - inch(0.8);
        }

        let week_num = if week.week_number == 0 {
            (i + 1) as u32
        } else {
            week.week_number
        };

        let strip_color = if week.is_recovery_week {
            DEEP_PURPLE
        } else {
            STRIP_PURPLE
        };
        page.fill_rounded_rect(
            MARGIN,
            current_y - strip_height,
            strip_width,
            strip_height,
            STRIP_RADIUS,
            strip_color,
            0.85,
        );

        let accent = phase_color(week.phase);
        page.fill_rounded_rect(
            MARGIN + 4.0,
            current_y - strip_height + 5.0,
            6.0,
            strip_height - 10.0,
            3.0,
            accent,
            1.0,
        );

        let baseline = current_y - strip_height + 14.0;
        page.draw_text(
            Face::HelveticaBold,
            font_size::BODY_SMALL,
            SOFT_WHITE,
            MARGIN + 18.0,
            baseline,
            &format!("Wk {week_num}"),
        );

        let tag = if week.is_recovery_week {
            "REC"
        } else {
            week.phase.short_tag()
        };
        page.draw_text(
            Face::HelveticaBold,
            font_size::CAPTION,
            accent,
            MARGIN + 65.0,
            baseline,
            tag,
        );

        page.draw_text(
            Face::Helvetica,
            font_size::CAPTION,
            SOFT_WHITE,
            MARGIN + 105.0,
            baseline,
            &format!("{}mi", fmt_qty(week.total_mileage)),
        );

        page.draw_text(
            Face::Helvetica,
            font_size::CAPTION,
            CYAN_GLOW,
            MARGIN + 150.0,
            baseline,
            &format!("LR:{}mi", fmt_qty(week.long_run_distance())),
        );

        if !week.focus.is_empty() {
            let max_focus_width = strip_width - 230.0;
            let display = metrics::truncate_with_ellipsis(
                Face::HelveticaOblique,
                font_size::CAPTION,
                max_focus_width,
                &week.focus,
            );
            page.draw_text(
                Face::HelveticaOblique,
                font_size::CAPTION,
                SOFT_WHITE,
                MARGIN + 210.0,
                baseline,
                &display,
            );
        }

        current_y -= strip_height + strip_spacing;
    }

    // Phase legend at the bottom of the last page.
    let legend_y = MARGIN + inch(0.8);
    page.draw_text(
        Face::HelveticaBold,
        font_size::CAPTION,
        SOFT_WHITE,
        MARGIN,
        legend_y,
        "Phases:",
    );

    let mut legend_x = MARGIN + 50.0;
    for (phase, label) in [
        (Phase::Base, "Base"),
        (Phase::Build, "Build"),
        (Phase::Peak, "Peak"),
        (Phase::Taper, "Taper"),
    ] {
        page.fill_circle(legend_x, legend_y + 3.0, 4.0, phase_color(phase), 1.0);
        page.draw_text(
            Face::Helvetica,
            font_size::CAPTION,
            SOFT_WHITE,
            legend_x + 10.0,
            legend_y,
            label,
        );
        legend_x += 70.0;
    }

    doc.add_page(page);
}

/// Overview pages needed for `week_count` weeks.
pub fn page_count(week_count: usize) -> usize {
    if week_count == 0 {
        0
    } else {
        week_count.div_ceil(STRIPS_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_strips_fit_one_page() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(12), 1);
        assert_eq!(page_count(13), 2);
        assert_eq!(page_count(24), 2);
        assert_eq!(page_count(25), 3);
    }
}
