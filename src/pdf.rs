//! Minimal page canvas over `pdf-writer`.
//!
//! Pages draw in PDF user space (origin bottom-left, points). Text uses the
//! built-in Helvetica family with WinAnsi encoding, so no fonts are embedded
//! and measurement goes through [`crate::metrics`].

use std::collections::{BTreeMap, BTreeSet};

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::metrics::{self, Face};
use crate::theme::Rgb;

/// Cubic-arc circle/corner approximation factor.
const ARC_K: f32 = 0.552_284_75;

#[derive(Clone, Debug, Default)]
pub struct DocInfo {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub creator: String,
}

pub struct PdfDocument {
    pdf: Pdf,
    next_ref: i32,
    pages_id: Ref,
    page_ids: Vec<Ref>,
    fonts: BTreeMap<Face, Ref>,
    /// Fill alpha in thousandths -> shared ExtGState.
    alphas: BTreeMap<u16, Ref>,
}

impl PdfDocument {
    pub fn new() -> Self {
        let mut doc = Self {
            pdf: Pdf::new(),
            next_ref: 1,
            pages_id: Ref::new(1),
            page_ids: Vec::new(),
            fonts: BTreeMap::new(),
            alphas: BTreeMap::new(),
        };
        doc.pages_id = doc.alloc();
        doc
    }

    fn alloc(&mut self) -> Ref {
        let id = Ref::new(self.next_ref);
        self.next_ref += 1;
        id
    }

    fn font_ref(&mut self, face: Face) -> Ref {
        if let Some(id) = self.fonts.get(&face) {
            return *id;
        }
        let id = self.alloc();
        self.pdf
            .type1_font(id)
            .base_font(Name(face.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        self.fonts.insert(face, id);
        id
    }

    fn alpha_ref(&mut self, key: u16) -> Ref {
        if let Some(id) = self.alphas.get(&key) {
            return *id;
        }
        let id = self.alloc();
        self.pdf
            .ext_graphics(id)
            .non_stroking_alpha(f32::from(key) / 1000.0);
        self.alphas.insert(key, id);
        id
    }

    /// Close out a composed page: write its content stream and page object,
    /// wiring up only the resources the page actually used.
    pub fn add_page(&mut self, canvas: PageCanvas) {
        let PageCanvas {
            content,
            width,
            height,
            used_faces,
            used_alphas,
        } = canvas;

        let fonts: Vec<(String, Ref)> = used_faces
            .iter()
            .map(|face| (font_resource_name(*face), self.font_ref(*face)))
            .collect();
        let alphas: Vec<(String, Ref)> = used_alphas
            .iter()
            .map(|key| (alpha_resource_name(*key), self.alpha_ref(*key)))
            .collect();

        let content_id = self.alloc();
        self.pdf.stream(content_id, &content.finish());

        let page_id = self.alloc();
        let mut page = self.pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, width, height));
        page.parent(self.pages_id);
        page.contents(content_id);
        {
            let mut resources = page.resources();
            if !fonts.is_empty() {
                let mut dict = resources.fonts();
                for (name, id) in &fonts {
                    dict.pair(Name(name.as_bytes()), *id);
                }
            }
            if !alphas.is_empty() {
                let mut dict = resources.ext_g_states();
                for (name, id) in &alphas {
                    dict.pair(Name(name.as_bytes()), *id);
                }
            }
        }
        page.finish();
        self.page_ids.push(page_id);
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn finish(mut self, info: &DocInfo) -> Vec<u8> {
        let catalog_id = self.alloc();
        self.pdf.catalog(catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .kids(self.page_ids.iter().copied())
            .count(self.page_ids.len() as i32);

        let info_id = self.alloc();
        let mut writer = self.pdf.document_info(info_id);
        if !info.title.is_empty() {
            writer.title(TextStr(&info.title));
        }
        if !info.author.is_empty() {
            writer.author(TextStr(&info.author));
        }
        if !info.subject.is_empty() {
            writer.subject(TextStr(&info.subject));
        }
        if !info.creator.is_empty() {
            writer.creator(TextStr(&info.creator));
        }
        writer.finish();

        self.pdf.finish()
    }
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

fn font_resource_name(face: Face) -> String {
    let idx = match face {
        Face::Helvetica => 0,
        Face::HelveticaBold => 1,
        Face::HelveticaOblique => 2,
    };
    format!("F{idx}")
}

fn alpha_resource_name(key: u16) -> String {
    format!("GS{key}")
}

/// One page's content stream plus the resources it touched.
pub struct PageCanvas {
    content: Content,
    width: f32,
    height: f32,
    used_faces: BTreeSet<Face>,
    used_alphas: BTreeSet<u16>,
}

impl PageCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            content: Content::new(),
            width,
            height,
            used_faces: BTreeSet::new(),
            used_alphas: BTreeSet::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    fn set_fill(&mut self, color: Rgb) {
        let (r, g, b) = color.to_unit();
        self.content.set_fill_rgb(r, g, b);
    }

    /// Applies a non-stroking alpha for the duration of `draw`. Full opacity
    /// skips the graphics-state push entirely.
    fn with_fill_alpha(&mut self, alpha: f32, draw: impl FnOnce(&mut Self)) {
        let key = (alpha.clamp(0.0, 1.0) * 1000.0).round() as u16;
        if key >= 1000 {
            draw(self);
            return;
        }
        self.used_alphas.insert(key);
        self.content.save_state();
        let name = alpha_resource_name(key);
        self.content.set_parameters(Name(name.as_bytes()));
        draw(self);
        self.content.restore_state();
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.set_fill(color);
        self.content.rect(x, y, w, h);
        self.content.fill_nonzero();
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, line_width: f32) {
        let (r, g, b) = color.to_unit();
        self.content.save_state();
        self.content.set_stroke_rgb(r, g, b);
        self.content.set_line_width(line_width);
        self.content.rect(x, y, w, h);
        self.content.stroke();
        self.content.restore_state();
    }

    pub fn fill_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        color: Rgb,
        alpha: f32,
    ) {
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
        self.with_fill_alpha(alpha, |canvas| {
            canvas.set_fill(color);
            let k = ARC_K * r;
            let c = &mut canvas.content;
            c.move_to(x + r, y);
            c.line_to(x + w - r, y);
            c.cubic_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
            c.line_to(x + w, y + h - r);
            c.cubic_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
            c.line_to(x + r, y + h);
            c.cubic_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
            c.line_to(x, y + r);
            c.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
            c.close_path();
            c.fill_nonzero();
        });
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
        self.with_fill_alpha(alpha, |canvas| {
            canvas.set_fill(color);
            let k = ARC_K * radius;
            let c = &mut canvas.content;
            c.move_to(cx + radius, cy);
            c.cubic_to(cx + radius, cy + k, cx + k, cy + radius, cx, cy + radius);
            c.cubic_to(cx - k, cy + radius, cx - radius, cy + k, cx - radius, cy);
            c.cubic_to(cx - radius, cy - k, cx - k, cy - radius, cx, cy - radius);
            c.cubic_to(cx + k, cy - radius, cx + radius, cy - k, cx + radius, cy);
            c.close_path();
            c.fill_nonzero();
        });
    }

    pub fn stroke_line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        line_width: f32,
    ) {
        let (r, g, b) = color.to_unit();
        self.content.save_state();
        self.content.set_stroke_rgb(r, g, b);
        self.content.set_line_width(line_width);
        self.content.move_to(x1, y1);
        self.content.line_to(x2, y2);
        self.content.stroke();
        self.content.restore_state();
    }

    pub fn draw_text(&mut self, face: Face, size: f32, color: Rgb, x: f32, y: f32, text: &str) {
        self.draw_text_alpha(face, size, color, 1.0, x, y, text);
    }

    pub fn draw_text_alpha(
        &mut self,
        face: Face,
        size: f32,
        color: Rgb,
        alpha: f32,
        x: f32,
        y: f32,
        text: &str,
    ) {
        self.used_faces.insert(face);
        let encoded: Vec<u8> = text
            .chars()
            .map(|c| metrics::winansi_byte(c).unwrap_or(b'?'))
            .collect();
        let name = font_resource_name(face);
        self.with_fill_alpha(alpha, |canvas| {
            canvas.set_fill(color);
            let c = &mut canvas.content;
            c.begin_text();
            c.set_font(Name(name.as_bytes()), size);
            c.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
            c.show(Str(&encoded));
            c.end_text();
        });
    }

    pub fn text_width(&self, face: Face, size: f32, text: &str) -> f32 {
        metrics::text_width(face, size, text)
    }

    /// Draw `text` horizontally centered on the page.
    pub fn draw_text_centered(
        &mut self,
        face: Face,
        size: f32,
        color: Rgb,
        y: f32,
        text: &str,
    ) {
        let x = (self.width - metrics::text_width(face, size, text)) / 2.0;
        self.draw_text(face, size, color, x, y, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{CYAN_GLOW, SOFT_WHITE, TWILIGHT_NAVY};

    fn pdf_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn single_page_document_has_expected_structure() {
        let mut doc = PdfDocument::new();
        let mut page = PageCanvas::new(612.0, 792.0);
        page.fill_rect(0.0, 0.0, 612.0, 792.0, TWILIGHT_NAVY);
        page.draw_text(Face::HelveticaBold, 28.0, CYAN_GLOW, 36.0, 700.0, "Hello");
        doc.add_page(page);

        let info = DocInfo {
            title: "Test".to_string(),
            ..DocInfo::default()
        };
        let bytes = doc.finish(&info);
        let text = pdf_text(&bytes);

        assert!(bytes.starts_with(b"%PDF-"));
        assert!(text.contains("/Count 1"));
        assert!(text.contains("Helvetica-Bold"));
        assert!(text.contains("WinAnsiEncoding"));
    }

    #[test]
    fn alpha_states_are_shared_across_pages() {
        let mut doc = PdfDocument::new();
        for _ in 0..2 {
            let mut page = PageCanvas::new(100.0, 100.0);
            page.fill_rounded_rect(0.0, 0.0, 80.0, 40.0, 8.0, SOFT_WHITE, 0.8);
            doc.add_page(page);
        }
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.alphas.len(), 1);
        let bytes = doc.finish(&DocInfo::default());
        assert!(pdf_text(&bytes).contains("GS800"));
    }

    #[test]
    fn full_opacity_does_not_allocate_a_graphics_state() {
        let mut doc = PdfDocument::new();
        let mut page = PageCanvas::new(100.0, 100.0);
        page.fill_rounded_rect(0.0, 0.0, 80.0, 40.0, 8.0, SOFT_WHITE, 1.0);
        doc.add_page(page);
        assert!(doc.alphas.is_empty());
    }

    #[test]
    fn unmapped_characters_become_question_marks() {
        let mut doc = PdfDocument::new();
        let mut page = PageCanvas::new(100.0, 100.0);
        page.draw_text(Face::Helvetica, 12.0, SOFT_WHITE, 0.0, 0.0, "ab\u{4e16}");
        doc.add_page(page);
        let bytes = doc.finish(&DocInfo::default());
        assert!(pdf_text(&bytes).contains("ab?"));
    }
}
