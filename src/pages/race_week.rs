use crate::draw;
use crate::metrics::Face;
use crate::pages::{backdrop, or_default, weekday_date};
use crate::pdf::PdfDocument;
use crate::plan::Plan;
use crate::quotes::QuoteBook;
use crate::theme::{
    CYAN_GLOW, MARGIN, NEON_PINK, PAGE_HEIGHT, PAGE_WIDTH, SOFT_WHITE, STRIP_PURPLE, STRIP_RADIUS,
    font_size, inch,
};

const PACING_TIPS: [&str; 4] = [
    "Start conservative - first 5K at easy pace",
    "Settle into marathon pace by mile 6",
    "Stay steady through halfway",
    "Fuel every 45 minutes",
];

const CHECKLIST: [(&str, &str); 4] = [
    ("Race day -2", "Lay out all race gear, check weather forecast"),
    ("Race day -1", "Carb-load dinner, hydrate well, sleep early"),
    (
        "Race morning",
        "Wake 3hrs before start, light breakfast, arrive early",
    ),
    (
        "Start line",
        "Dynamic stretches, stay warm, trust your training",
    ),
];

pub fn compose(doc: &mut PdfDocument, plan: &Plan, quotes: &QuoteBook) {
    let mut page = backdrop(200);
    let metadata = &plan.metadata;

    let crown_y = PAGE_HEIGHT - inch(1.2);
    draw::crown(&mut page, PAGE_WIDTH / 2.0, crown_y, 50.0);

    let title = "RACE WEEK";
    let title_size = font_size::PAGE_TITLE + 8.0;
    let title_y = crown_y - inch(0.6);
    let title_x = (PAGE_WIDTH - page.text_width(Face::HelveticaBold, title_size, title)) / 2.0;
    draw::glow_text(
        &mut page,
        title,
        title_x,
        title_y,
        Face::HelveticaBold,
        title_size,
        SOFT_WHITE,
        NEON_PINK,
        3.0,
    );

    let race_name = or_default(&metadata.race_name, "Marathon");
    let info_y = title_y - inch(0.8);
    page.draw_text_centered(
        Face::HelveticaBold,
        font_size::SECTION_HEADER,
        CYAN_GLOW,
        info_y,
        race_name,
    );

    let date_y = info_y - inch(0.4);
    let date_shown = !metadata.race_date.is_empty();
    if date_shown {
        page.draw_text_centered(
            Face::Helvetica,
            font_size::BODY,
            SOFT_WHITE,
            date_y,
            &weekday_date(&metadata.race_date),
        );
    }

    let aff_y = if date_shown { date_y } else { info_y } - inch(0.6);
    page.draw_text_centered(
        Face::HelveticaOblique,
        font_size::BODY,
        NEON_PINK,
        aff_y,
        &format!("\"{}\"", quotes.pre_race()),
    );

    // Race day strategy.
    let strategy_y = aff_y - inch(0.8);
    let section_width = PAGE_WIDTH - 2.0 * MARGIN;
    page.draw_text(
        Face::HelveticaBold,
        font_size::SECTION_HEADER,
        CYAN_GLOW,
        MARGIN,
        strategy_y,
        "Race Day Strategy",
    );

    let box_y = strategy_y - inch(0.4);
    let box_height = inch(1.8);
    page.fill_rounded_rect(
        MARGIN,
        box_y - box_height,
        section_width,
        box_height,
        STRIP_RADIUS,
        STRIP_PURPLE,
        0.85,
    );

    let marathon = plan.pace_zones.marathon.clone().unwrap_or_default();
    let target_pace = format!(
        "{} - {}/mile",
        or_default(&marathon.min, "9:00"),
        or_default(&marathon.max, "9:15"),
    );

    let mut content_y = box_y - inch(0.3);
    page.draw_text(
        Face::HelveticaBold,
        font_size::BODY,
        SOFT_WHITE,
        MARGIN + 15.0,
        content_y,
        "Target Pace:",
    );
    page.draw_text(
        Face::HelveticaBold,
        font_size::BODY,
        NEON_PINK,
        MARGIN + 120.0,
        content_y,
        &target_pace,
    );

    let target_time = &metadata.predicted_finish_time.target;
    if !target_time.is_empty() {
        content_y -= inch(0.3);
        page.draw_text(
            Face::HelveticaBold,
            font_size::BODY,
            SOFT_WHITE,
            MARGIN + 15.0,
            content_y,
            "Goal Time:",
        );
        page.draw_text(
            Face::HelveticaBold,
            font_size::BODY,
            CYAN_GLOW,
            MARGIN + 120.0,
            content_y,
            target_time,
        );
    }

    content_y -= inch(0.4);
    for tip in PACING_TIPS {
        page.draw_text(
            Face::Helvetica,
            font_size::BODY_SMALL,
            SOFT_WHITE,
            MARGIN + 15.0,
            content_y,
            &format!("\u{2022} {tip}"),
        );
        content_y -= inch(0.25);
    }

    // Pre-race checklist.
    let checklist_y = box_y - box_height - inch(0.6);
    page.draw_text(
        Face::HelveticaBold,
        font_size::SECTION_HEADER,
        CYAN_GLOW,
        MARGIN,
        checklist_y,
        "Pre-Race Checklist",
    );

    let mut item_y = checklist_y - inch(0.5);
    let item_height = inch(0.35);
    for (label, description) in CHECKLIST {
        page.fill_rounded_rect(
            MARGIN,
            item_y - item_height,
            section_width,
            item_height,
            6.0,
            STRIP_PURPLE,
            0.7,
        );

        page.stroke_rect(
            MARGIN + 10.0,
            item_y - item_height + 8.0,
            12.0,
            12.0,
            SOFT_WHITE,
            1.0,
        );

        page.draw_text(
            Face::HelveticaBold,
            font_size::CAPTION,
            NEON_PINK,
            MARGIN + 30.0,
            item_y - item_height + 10.0,
            label,
        );
        page.draw_text(
            Face::Helvetica,
            font_size::CAPTION,
            SOFT_WHITE,
            MARGIN + 110.0,
            item_y - item_height + 10.0,
            description,
        );

        item_y -= item_height + 5.0;
    }

    let footer_y = MARGIN + inch(0.5);
    page.draw_text_centered(
        Face::HelveticaBold,
        font_size::BODY,
        NEON_PINK,
        footer_y,
        quotes.start_line(),
    );

    doc.add_page(page);
}
