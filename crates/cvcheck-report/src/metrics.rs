// Glyph advance widths of the standard Helvetica faces, in 1/1000 em,
// for the printable ASCII range 0x20..=0x7E.

use crate::layout::Font;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const BULLET_WIDTH: u16 = 350;
const FALLBACK_WIDTH: u16 = 556;

const MM_PER_POINT: f32 = 25.4 / 72.0;

fn glyph_width(font: Font, c: char) -> u16 {
    let table = match font {
        Font::Regular => &HELVETICA,
        Font::Bold => &HELVETICA_BOLD,
    };

    match c {
        ' '..='~' => table[c as usize - 0x20],
        '•' => BULLET_WIDTH,
        _ => FALLBACK_WIDTH,
    }
}

/// Rendered width of `text` in millimetres
pub fn text_width_mm(text: &str, font: Font, size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(font, c) as u32).sum();
    units as f32 / 1000.0 * size_pt * MM_PER_POINT
}

/// Encode for a WinAnsiEncoding Type1 font. Characters outside the
/// encoding become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_scales_with_size() {
        let small = text_width_mm("Hello", Font::Regular, 10.0);
        let large = text_width_mm("Hello", Font::Regular, 20.0);
        assert!((large - 2.0 * small).abs() < 1e-4);
        assert!(text_width_mm("Hello", Font::Bold, 10.0) > small);
    }

    #[test]
    fn known_width() {
        // "Hi" = 722 + 222 units at 10pt
        let expected = 944.0 / 1000.0 * 10.0 * 25.4 / 72.0;
        assert!((text_width_mm("Hi", Font::Regular, 10.0) - expected).abs() < 1e-4);
    }

    #[test]
    fn win_ansi_bullets_and_latin1() {
        assert_eq!(encode_win_ansi("• café"), vec![0x95, b' ', b'c', b'a', b'f', 0xe9]);
        assert_eq!(encode_win_ansi("中"), vec![b'?']);
    }
}
