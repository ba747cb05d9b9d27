//! Procedural backdrop and accent primitives shared by all page composers.

use rand::{Rng as _, SeedableRng as _};
use rand_chacha::ChaCha8Rng;

use crate::metrics::Face;
use crate::pdf::PageCanvas;
use crate::theme::{CYAN_GLOW, DEEP_PURPLE, Rgb, SOFT_WHITE, TWILIGHT_NAVY};

/// Fixed seed so the star pattern is identical on every render.
pub const STAR_SEED: u64 = 42;

const GRADIENT_STEPS: u32 = 50;

/// Twilight backdrop: navy at the top blending into purple at the bottom,
/// emulated with horizontal bands.
pub fn twilight_gradient(canvas: &mut PageCanvas, width: f32, height: f32) {
    let band = height / GRADIENT_STEPS as f32;
    for i in 0..GRADIENT_STEPS {
        let ratio = i as f32 / GRADIENT_STEPS as f32;
        let color = TWILIGHT_NAVY.lerp(DEEP_PURPLE, ratio);
        let y = height - band * (i + 1) as f32;
        // Bands overlap by a point to avoid hairline seams.
        canvas.fill_rect(0.0, y, width, band + 1.0, color);
    }
}

/// Scatter `count` stars over the page from a fixed-seed stream.
pub fn starfield(canvas: &mut PageCanvas, width: f32, height: f32, count: u32) {
    let mut rng = ChaCha8Rng::seed_from_u64(STAR_SEED);
    for _ in 0..count {
        let x = rng.gen_range(0.0..width);
        let y = rng.gen_range(0.0..height);
        let size = rng.gen_range(1.0..3.0);
        let alpha = rng.gen_range(0.3..1.0);
        canvas.fill_circle(x, y, size, SOFT_WHITE, alpha);
    }
}

/// Text with four offset glow layers underneath the main fill.
#[allow(clippy::too_many_arguments)]
pub fn glow_text(
    canvas: &mut PageCanvas,
    text: &str,
    x: f32,
    y: f32,
    face: Face,
    size: f32,
    main_color: Rgb,
    glow_color: Rgb,
    glow_offset: f32,
) {
    for (dx, dy) in [
        (glow_offset, glow_offset),
        (-glow_offset, -glow_offset),
        (glow_offset, -glow_offset),
        (-glow_offset, glow_offset),
    ] {
        canvas.draw_text_alpha(face, size, glow_color, 0.3, x + dx, y + dy, text);
    }
    canvas.draw_text(face, size, main_color, x, y, text);
}

/// Three-peak crown outline centered at (`x`, `y`).
pub fn crown(canvas: &mut PageCanvas, x: f32, y: f32, size: f32) {
    let half = size / 2.0;
    let peak = size * 0.8;
    let w = 2.0;

    canvas.stroke_line(x - half, y, x + half, y, CYAN_GLOW, w);

    canvas.stroke_line(x - half, y, x - half * 0.6, y + peak * 0.6, CYAN_GLOW, w);
    canvas.stroke_line(
        x - half * 0.6,
        y + peak * 0.6,
        x - half * 0.3,
        y + peak * 0.3,
        CYAN_GLOW,
        w,
    );
    canvas.stroke_line(x - half * 0.3, y + peak * 0.3, x, y + peak, CYAN_GLOW, w);
    canvas.stroke_line(x, y + peak, x + half * 0.3, y + peak * 0.3, CYAN_GLOW, w);
    canvas.stroke_line(
        x + half * 0.3,
        y + peak * 0.3,
        x + half * 0.6,
        y + peak * 0.6,
        CYAN_GLOW,
        w,
    );
    canvas.stroke_line(x + half * 0.6, y + peak * 0.6, x + half, y, CYAN_GLOW, w);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::{DocInfo, PdfDocument};

    fn starfield_page_bytes() -> Vec<u8> {
        let mut doc = PdfDocument::new();
        let mut page = PageCanvas::new(200.0, 200.0);
        starfield(&mut page, 200.0, 200.0, 40);
        doc.add_page(page);
        doc.finish(&DocInfo::default())
    }

    #[test]
    fn starfield_is_deterministic() {
        assert_eq!(starfield_page_bytes(), starfield_page_bytes());
    }

    #[test]
    fn gradient_covers_the_page() {
        let mut doc = PdfDocument::new();
        let mut page = PageCanvas::new(100.0, 100.0);
        twilight_gradient(&mut page, 100.0, 100.0);
        doc.add_page(page);
        let text = String::from_utf8_lossy(&doc.finish(&DocInfo::default())).into_owned();
        // One rect op per gradient step.
        assert_eq!(text.matches(" re").count(), 50);
    }
}
