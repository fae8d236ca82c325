//! Builtin font selection and text measurement.
//!
//! The guide is rendered with the PDF base-14 Helvetica family, so no font files have to be
//! located or embedded.  The canvas does not report text extents, which means centring and word
//! wrapping rely on the advance-width tables below (taken from the Adobe core font metrics,
//! in thousandths of an em).

use printpdf::BuiltinFont;

use crate::style::{FontWeight, TextStyle};

/// Width used for characters outside the printable ASCII range.
const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Returns the builtin PDF font matching the given weight.
pub fn builtin_font(weight: FontWeight) -> BuiltinFont {
    match weight {
        FontWeight::Normal => BuiltinFont::Helvetica,
        FontWeight::Bold => BuiltinFont::HelveticaBold,
    }
}

fn char_width(ch: char, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Normal => &HELVETICA_WIDTHS,
        FontWeight::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    match ch {
        ' '..='~' => table[ch as usize - 0x20],
        // Bullet and copyright sign have dedicated widths in the AFM files.
        '•' => 350,
        '©' => 737,
        _ => FALLBACK_WIDTH,
    }
}

/// Measures the rendered width of `text` in millimetres.
pub fn text_width(text: &str, style: &TextStyle) -> f32 {
    let units: u32 = text
        .chars()
        .map(|ch| u32::from(char_width(ch, style.weight())))
        .sum();
    units as f32 / 1000.0 * style.em_mm()
}

/// Breaks `text` into lines no wider than `max_width` millimetres.
///
/// Lines break at whitespace only; a single word wider than the limit is kept on its own line.
pub fn wrap_text(text: &str, style: &TextStyle, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate_width = text_width(&current, style) + text_width(" ", style)
            + text_width(word, style);
        if candidate_width <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_text_is_wider_than_regular() {
        let regular = TextStyle::body();
        let bold = regular.bold();
        assert!(text_width("Challenge Question", &bold) > text_width("Challenge Question", &regular));
    }

    #[test]
    fn width_scales_with_font_size() {
        let small = TextStyle::body();
        let large = small.sized(20.0);
        let ratio = text_width("FSA ID", &large) / text_width("FSA ID", &small);
        assert!((ratio - 2.0).abs() < 1e-4);
    }

    #[test]
    fn digits_measure_half_an_em() {
        // 10 digits at 556/1000 em of a 10pt font.
        let expected = 10.0 * 0.556 * 10.0 * crate::style::MM_PER_PT;
        assert!((text_width("1234567890", &TextStyle::body()) - expected).abs() < 1e-3);
    }

    #[test]
    fn wrap_respects_maximum_width() {
        let style = TextStyle::body();
        let text = "Test your FSA ID by logging in at studentaid.gov before using it for applications";
        let lines = wrap_text(text, &style, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, &style) <= 60.0, "line too wide: {line}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_keeps_overlong_word_on_its_own_line() {
        let lines = wrap_text("a https://studentaid.gov/fsa-id/create-account b", &TextStyle::body(), 20.0);
        assert_eq!(lines, vec!["a", "https://studentaid.gov/fsa-id/create-account", "b"]);
    }

    #[test]
    fn wrap_of_blank_text_is_empty() {
        assert!(wrap_text("   ", &TextStyle::body(), 100.0).is_empty());
    }
}
