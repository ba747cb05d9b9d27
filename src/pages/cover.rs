use crate::draw;
use crate::metrics::Face;
use crate::pages::{backdrop, long_date, or_default};
use crate::pdf::PdfDocument;
use crate::plan::Plan;
use crate::theme::{
    Branding, CYAN_GLOW, MARGIN, NEON_PINK, PAGE_HEIGHT, PAGE_WIDTH, SOFT_WHITE, font_size, inch,
};

pub fn compose(doc: &mut PdfDocument, plan: &Plan, branding: &Branding) {
    let mut page = backdrop(150);
    let metadata = &plan.metadata;

    let crown_y = PAGE_HEIGHT - inch(2.0);
    draw::crown(&mut page, PAGE_WIDTH / 2.0, crown_y, 60.0);

    let title_y = crown_y - inch(0.8);
    let title_x = (PAGE_WIDTH
        - page.text_width(Face::HelveticaBold, font_size::BRAND_TITLE, &branding.title))
        / 2.0;
    draw::glow_text(
        &mut page,
        &branding.title,
        title_x,
        title_y,
        Face::HelveticaBold,
        font_size::BRAND_TITLE,
        CYAN_GLOW,
        NEON_PINK,
        2.0,
    );

    let race_name = or_default(&metadata.race_name, "Marathon Training Plan");
    let race_y = title_y - inch(1.2);
    page.draw_text_centered(
        Face::HelveticaBold,
        font_size::PAGE_TITLE,
        NEON_PINK,
        race_y,
        race_name,
    );

    let date_y = race_y - inch(0.5);
    if !metadata.race_date.is_empty() {
        page.draw_text_centered(
            Face::Helvetica,
            font_size::SECTION_HEADER,
            SOFT_WHITE,
            date_y,
            &long_date(&metadata.race_date),
        );
    }

    let target = &metadata.predicted_finish_time.target;
    let goal_y = date_y - inch(1.0);
    if !target.is_empty() {
        page.draw_text_centered(
            Face::HelveticaBold,
            font_size::SECTION_HEADER,
            CYAN_GLOW,
            goal_y,
            &format!("Goal Time: {target}"),
        );
    }

    let level = or_default(&metadata.plan_level, "moderate").to_uppercase();
    let total_weeks = plan.total_weeks_or(15);
    let badge_y = if target.is_empty() {
        date_y - inch(1.0)
    } else {
        goal_y - inch(0.8)
    };
    page.draw_text_centered(
        Face::Helvetica,
        font_size::BODY,
        SOFT_WHITE,
        badge_y,
        &format!("{total_weeks}-WEEK {level} PLAN"),
    );

    let footer_y = MARGIN + inch(0.5);
    page.draw_text_centered(
        Face::HelveticaOblique,
        font_size::CAPTION,
        SOFT_WHITE,
        footer_y,
        &branding.footer,
    );

    doc.add_page(page);
}
