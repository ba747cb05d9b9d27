use crate::metrics::Face;
use crate::pages::backdrop;
use crate::pdf::PdfDocument;
use crate::plan::Plan;
use crate::theme::{
    CYAN_GLOW, MARGIN, NEON_PINK, PAGE_HEIGHT, PAGE_WIDTH, Rgb, SOFT_WHITE, STRIP_PURPLE,
    STRIP_RADIUS, WORKOUT_EASY, WORKOUT_INTERVALS, WORKOUT_RACE_PACE, WORKOUT_RECOVERY,
    WORKOUT_TEMPO, font_size, inch,
};

/// HR zone indicator colors, zone 1 through 5.
const HR_INDICATORS: [Rgb; 5] = [
    WORKOUT_RECOVERY,
    WORKOUT_EASY,
    WORKOUT_TEMPO,
    WORKOUT_INTERVALS,
    WORKOUT_RACE_PACE,
];

pub fn compose(doc: &mut PdfDocument, plan: &Plan) {
    let mut page = backdrop(80);

    let title_y = PAGE_HEIGHT - MARGIN - inch(0.5);
    page.draw_text(
        Face::HelveticaBold,
        font_size::PAGE_TITLE,
        CYAN_GLOW,
        MARGIN,
        title_y,
        "Your Training Zones",
    );

    let pace_y = title_y - inch(0.8);
    page.draw_text(
        Face::HelveticaBold,
        font_size::SECTION_HEADER,
        NEON_PINK,
        MARGIN,
        pace_y,
        "Pace Zones",
    );

    let strip_width = PAGE_WIDTH - 2.0 * MARGIN;
    let strip_height = inch(0.5);
    let mut strip_y = pace_y - inch(0.6);

    for (label, band) in plan.pace_zones.ordered() {
        let Some(band) = band else { continue };

        page.fill_rounded_rect(
            MARGIN,
            strip_y - strip_height,
            strip_width,
            strip_height,
            STRIP_RADIUS,
            STRIP_PURPLE,
            0.8,
        );

        page.draw_text(
            Face::HelveticaBold,
            font_size::BODY,
            CYAN_GLOW,
            MARGIN + 15.0,
            strip_y - strip_height + 15.0,
            label,
        );

        let pace_text = match (band.min.is_empty(), band.max.is_empty()) {
            (false, false) => format!("{} - {} /mile", band.min, band.max),
            (false, true) => format!("{} /mile", band.min),
            _ => String::new(),
        };
        let text_width = page.text_width(Face::HelveticaBold, font_size::BODY, &pace_text);
        page.draw_text(
            Face::HelveticaBold,
            font_size::BODY,
            SOFT_WHITE,
            PAGE_WIDTH - MARGIN - text_width - 15.0,
            strip_y - strip_height + 15.0,
            &pace_text,
        );

        strip_y -= strip_height + 8.0;
    }

    let hr_y = strip_y - inch(0.6);
    page.draw_text(
        Face::HelveticaBold,
        font_size::SECTION_HEADER,
        NEON_PINK,
        MARGIN,
        hr_y,
        "Heart Rate Zones",
    );

    let mut strip_y = hr_y - inch(0.6);
    for (i, band) in plan.hr_zones.ordered().into_iter().enumerate() {
        let Some(band) = band else { continue };

        page.fill_rounded_rect(
            MARGIN,
            strip_y - strip_height,
            strip_width,
            strip_height,
            STRIP_RADIUS,
            STRIP_PURPLE,
            0.8,
        );

        // Colored intensity bar on the left edge.
        page.fill_rounded_rect(
            MARGIN + 5.0,
            strip_y - strip_height + 5.0,
            6.0,
            strip_height - 10.0,
            3.0,
            HR_INDICATORS[i],
            1.0,
        );

        let fallback = format!("Zone {}", i + 1);
        let name = if band.name.is_empty() {
            fallback.as_str()
        } else {
            band.name.as_str()
        };
        page.draw_text(
            Face::HelveticaBold,
            font_size::BODY,
            CYAN_GLOW,
            MARGIN + 20.0,
            strip_y - strip_height + 15.0,
            name,
        );

        let hr_text = match (band.min_hr, band.max_hr) {
            (Some(min), Some(max)) => {
                format!("{min}-{max} bpm ({})", band.percent_max_hr)
            }
            _ => String::new(),
        };
        let text_width = page.text_width(Face::Helvetica, font_size::BODY_SMALL, &hr_text);
        page.draw_text(
            Face::Helvetica,
            font_size::BODY_SMALL,
            SOFT_WHITE,
            PAGE_WIDTH - MARGIN - text_width - 15.0,
            strip_y - strip_height + 15.0,
            &hr_text,
        );

        strip_y -= strip_height + 8.0;
    }

    let footer_y = MARGIN + inch(0.3);
    page.draw_text_centered(
        Face::HelveticaOblique,
        font_size::CAPTION,
        SOFT_WHITE,
        footer_y,
        "80% of training should be in Zone 2 (Easy/Aerobic)",
    );

    doc.add_page(page);
}
