//! Text measurement for the base-14 Helvetica family.
//!
//! The document uses the PDF viewer's built-in Helvetica faces, so advances
//! come from the Adobe core AFM tables (units of 1/1000 em). Oblique shares
//! the regular widths.

use std::borrow::Cow;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Face {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

impl Face {
    pub fn base_font(self) -> &'static str {
        match self {
            Face::Helvetica => "Helvetica",
            Face::HelveticaBold => "Helvetica-Bold",
            Face::HelveticaOblique => "Helvetica-Oblique",
        }
    }
}

/// Advance used for characters outside the table.
const DEFAULT_ADVANCE: u16 = 556;

/// Helvetica / Helvetica-Oblique advances for 0x20..=0x7E.
#[rustfmt::skip]
const WIDTHS_REGULAR: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advances for 0x20..=0x7E.
#[rustfmt::skip]
const WIDTHS_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn advance_units(face: Face, c: char) -> u16 {
    let table = match face {
        Face::Helvetica | Face::HelveticaOblique => &WIDTHS_REGULAR,
        Face::HelveticaBold => &WIDTHS_BOLD,
    };
    match c {
        ' '..='~' => table[c as usize - 0x20],
        '\u{2026}' => 1000, // ellipsis
        '\u{2022}' => 350,  // bullet
        '\u{2013}' => 556,
        '\u{2014}' => 1000,
        '\u{2018}' | '\u{2019}' => match face {
            Face::HelveticaBold => 278,
            _ => 222,
        },
        '\u{201C}' | '\u{201D}' => match face {
            Face::HelveticaBold => 500,
            _ => 333,
        },
        _ => DEFAULT_ADVANCE,
    }
}

/// WinAnsi code point for `c`, if it has one the tables cover. The canvas
/// substitutes '?' for anything else.
pub fn winansi_byte(c: char) -> Option<u8> {
    match c {
        ' '..='~' => Some(c as u8),
        '\u{2026}' => Some(0x85),
        '\u{2022}' => Some(0x95),
        '\u{2013}' => Some(0x96),
        '\u{2014}' => Some(0x97),
        '\u{2018}' => Some(0x91),
        '\u{2019}' => Some(0x92),
        '\u{201C}' => Some(0x93),
        '\u{201D}' => Some(0x94),
        _ => None,
    }
}

/// Width of `text` in points at the given size.
pub fn text_width(face: Face, size: f32, text: &str) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(advance_units(face, c))).sum();
    units as f32 / 1000.0 * size
}

/// Overview-strip fitting: if the text is too wide, drop characters until the
/// ellipsis variant fits (or the string empties), then append an ellipsis.
pub fn truncate_with_ellipsis(face: Face, size: f32, max_width: f32, text: &str) -> Cow<'_, str> {
    if text_width(face, size, text) <= max_width {
        return Cow::Borrowed(text);
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        let mut candidate: String = chars.iter().collect();
        candidate.push('\u{2026}');
        if text_width(face, size, &candidate) <= max_width {
            return Cow::Owned(candidate);
        }
        chars.pop();
    }
    Cow::Owned("\u{2026}".to_string())
}

/// Detail-strip fitting: shrink until the bare text fits, then mark the cut
/// with a three-dot suffix.
pub fn truncate_with_dots(face: Face, size: f32, max_width: f32, text: &str) -> Cow<'_, str> {
    if text_width(face, size, text) <= max_width {
        return Cow::Borrowed(text);
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        let candidate: String = chars.iter().collect();
        if text_width(face, size, &candidate) <= max_width {
            return Cow::Owned(format!("{candidate}..."));
        }
        chars.pop();
    }
    Cow::Owned("...".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_advances_match_the_afm() {
        // "Hello" in Helvetica: H=722 e=556 l=222 l=222 o=556 -> 2278 units.
        let w = text_width(Face::Helvetica, 10.0, "Hello");
        assert!((w - 22.78).abs() < 1e-3);

        // Bold space stays 278, bold 'a' is 556.
        assert_eq!(
            text_width(Face::HelveticaBold, 1000.0, " "),
            278.0 * 1000.0 / 1000.0
        );
    }

    #[test]
    fn oblique_shares_regular_widths() {
        let s = "Training Overview (cont.)";
        assert_eq!(
            text_width(Face::Helvetica, 14.0, s),
            text_width(Face::HelveticaOblique, 14.0, s)
        );
    }

    #[test]
    fn width_is_monotone_in_length() {
        let mut prev = 0.0;
        let mut s = String::new();
        for _ in 0..20 {
            s.push('m');
            let w = text_width(Face::Helvetica, 12.0, &s);
            assert!(w > prev);
            prev = w;
        }
    }

    #[test]
    fn truncate_keeps_fitting_text_untouched() {
        let out = truncate_with_ellipsis(Face::Helvetica, 10.0, 500.0, "short");
        assert!(matches!(out, Cow::Borrowed("short")));
    }

    #[test]
    fn truncate_result_fits_and_ends_with_ellipsis() {
        let text = "a very long focus description that cannot possibly fit";
        let max = 80.0;
        let out = truncate_with_ellipsis(Face::HelveticaOblique, 10.0, max, text);
        assert!(out.ends_with('\u{2026}'));
        assert!(text_width(Face::HelveticaOblique, 10.0, &out) <= max);
        assert!(out.len() < text.len());
    }

    #[test]
    fn dot_truncation_appends_ascii_dots() {
        let text = "progression long run with surges in the final miles";
        let out = truncate_with_dots(Face::Helvetica, 12.0, 100.0, text);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn winansi_maps_typographic_chars() {
        assert_eq!(winansi_byte('\u{2026}'), Some(0x85));
        assert_eq!(winansi_byte('A'), Some(b'A'));
        assert_eq!(winansi_byte('\u{4e16}'), None);
    }
}
