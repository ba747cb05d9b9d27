use crate::metrics::{self, Face};
use crate::pages::{backdrop, fmt_qty, short_date};
use crate::pdf::PdfDocument;
use crate::plan::{DAY_ORDER, Week, WorkoutType};
use crate::quotes::QuoteBook;
use crate::theme::{
    CYAN_GLOW, DEEP_PURPLE, MARGIN, NEON_PINK, PAGE_HEIGHT, PAGE_WIDTH, SOFT_WHITE, STRIP_PURPLE,
    STRIP_RADIUS, font_size, inch, phase_color, workout_color,
};

pub fn compose(doc: &mut PdfDocument, week: &Week, week_number: u32, quotes: &QuoteBook) {
    let mut page = backdrop(50);

    let accent = phase_color(week.phase);
    let title_y = PAGE_HEIGHT - MARGIN - inch(0.5);
    page.draw_text(
        Face::HelveticaBold,
        font_size::PAGE_TITLE,
        accent,
        MARGIN,
        title_y,
        &format!("Week {week_number}"),
    );

    let (badge_text, badge_color) = if week.is_recovery_week {
        ("RECOVERY", NEON_PINK)
    } else {
        (week.phase.label(), accent)
    };
    page.draw_text(
        Face::HelveticaBold,
        font_size::BODY,
        badge_color,
        MARGIN + 120.0,
        title_y + 5.0,
        badge_text,
    );

    let weeks_until = week.weeks_until_race.unwrap_or(0);
    page.draw_text(
        Face::Helvetica,
        font_size::BODY,
        SOFT_WHITE,
        PAGE_WIDTH - MARGIN - 100.0,
        title_y + 5.0,
        &format!("{weeks_until} weeks to go"),
    );

    let start_y = match quotes.weekly(week_number) {
        Some(weekly) => {
            let quote_y = title_y - inch(0.4);
            page.draw_text_centered(
                Face::HelveticaOblique,
                font_size::BODY,
                NEON_PINK,
                quote_y,
                &format!("\"{}\"", weekly.quote),
            );
            quote_y - inch(0.5)
        }
        None => title_y - inch(0.6),
    };

    // Weekly totals bar.
    let totals_y = start_y;
    let totals_height = inch(0.4);
    page.fill_rounded_rect(
        MARGIN,
        totals_y - totals_height,
        PAGE_WIDTH - 2.0 * MARGIN,
        totals_height,
        STRIP_RADIUS,
        DEEP_PURPLE,
        0.9,
    );

    let totals_baseline = totals_y - totals_height + 12.0;
    page.draw_text(
        Face::HelveticaBold,
        font_size::BODY_SMALL,
        SOFT_WHITE,
        MARGIN + 15.0,
        totals_baseline,
        &format!("Total: {} miles", fmt_qty(week.total_mileage)),
    );
    page.draw_text(
        Face::HelveticaBold,
        font_size::BODY_SMALL,
        SOFT_WHITE,
        MARGIN + 150.0,
        totals_baseline,
        &format!("~{} hours", fmt_qty(week.total_hours)),
    );
    page.draw_text(
        Face::HelveticaBold,
        font_size::BODY_SMALL,
        SOFT_WHITE,
        MARGIN + 280.0,
        totals_baseline,
        &format!("Strength: {}x", week.strength_days),
    );

    if !week.focus.is_empty() {
        let max_width = 200.0;
        let display = metrics::truncate_with_dots(
            Face::HelveticaOblique,
            font_size::BODY_SMALL,
            max_width,
            &week.focus,
        );
        page.draw_text(
            Face::HelveticaOblique,
            font_size::BODY_SMALL,
            CYAN_GLOW,
            PAGE_WIDTH - MARGIN - max_width - 15.0,
            totals_baseline,
            &display,
        );
    }

    // Daily workout strips, Monday through Sunday.
    let strip_width = PAGE_WIDTH - 2.0 * MARGIN;
    let strip_height = inch(0.7);
    let mut strip_y = totals_y - totals_height - inch(0.3);

    for (day_key, day_label) in DAY_ORDER {
        let Some(day) = week.days.get(day_key) else {
            continue;
        };

        let running = &day.running;
        let color = workout_color(running.kind);

        page.fill_rounded_rect(
            MARGIN,
            strip_y - strip_height,
            strip_width,
            strip_height,
            STRIP_RADIUS,
            STRIP_PURPLE,
            0.8,
        );
        page.fill_rounded_rect(
            MARGIN + 4.0,
            strip_y - strip_height + 8.0,
            6.0,
            strip_height - 16.0,
            3.0,
            color,
            1.0,
        );

        let upper = strip_y - strip_height + strip_height / 2.0 + 8.0;
        let lower = strip_y - strip_height + strip_height / 2.0 - 8.0;

        page.draw_text(
            Face::HelveticaBold,
            font_size::BODY,
            SOFT_WHITE,
            MARGIN + 18.0,
            upper,
            day_label,
        );
        if let Some(date) = short_date(&day.date) {
            page.draw_text(
                Face::Helvetica,
                font_size::CAPTION,
                SOFT_WHITE,
                MARGIN + 18.0,
                lower,
                &date,
            );
        }

        page.draw_text(
            Face::HelveticaBold,
            font_size::BODY,
            color,
            MARGIN + 65.0,
            upper,
            &running.title,
        );

        if running.total_distance > 0.0 {
            let mut dist_text = format!("{} mi", fmt_qty(running.total_distance));
            if running.estimated_duration > 0 {
                dist_text.push_str(&format!(" | ~{} min", running.estimated_duration));
            }
            page.draw_text(
                Face::Helvetica,
                font_size::BODY_SMALL,
                SOFT_WHITE,
                MARGIN + 65.0,
                lower,
                &dist_text,
            );
        }

        if !running.hr_zone.is_empty() {
            page.draw_text(
                Face::Helvetica,
                font_size::CAPTION,
                CYAN_GLOW,
                PAGE_WIDTH - MARGIN - 80.0,
                upper,
                &running.hr_zone,
            );
        }

        if let Some(strength) = day.strength.as_ref().filter(|s| s.scheduled) {
            let label = strength.kind.replace('_', " ");
            page.draw_text(
                Face::Helvetica,
                font_size::CAPTION,
                NEON_PINK,
                PAGE_WIDTH - MARGIN - 150.0,
                lower,
                &format!("+ {label} {}min", strength.duration),
            );
        }

        if !running.description.is_empty() && running.kind != WorkoutType::Rest {
            let max_desc_width = strip_width - 100.0;
            let display = metrics::truncate_with_dots(
                Face::HelveticaOblique,
                font_size::CAPTION,
                max_desc_width,
                &running.description,
            );
            page.draw_text(
                Face::HelveticaOblique,
                font_size::CAPTION,
                SOFT_WHITE,
                MARGIN + 65.0,
                strip_y - strip_height + 10.0,
                &display,
            );
        }

        strip_y -= strip_height + 6.0;
    }

    doc.add_page(page);
}
