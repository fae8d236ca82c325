//! Fixed text of the three generated documents.
//!
//! Every table returns plain [`Section`] values; positions are absolute millimetres on an A4 page
//! and advances are chosen so each document keeps its expected page count under the overflow
//! rules in [`crate::layout`].

pub mod checklist;
pub mod guide;
pub mod template;

use crate::model::{Block, Line};
use crate::style::{palette, TextStyle};

/// Left edge of body text.
pub const LEFT: f32 = 20.0;
/// Indented column for detail rows.
pub const INDENT: f32 = 25.0;
/// Left edge of full-width boxes.
pub const BOX_X: f32 = 15.0;
/// Width of full-width boxes.
pub const BOX_WIDTH: f32 = 180.0;
/// Cursor position on page 1 once the masthead is drawn.
pub const BODY_START: f32 = 40.0;

/// Organisation name printed at the top of page 1.
pub const ORGANIZATION: &str = "MY COLLEGE FINANCE";
/// Tagline printed under the organisation name.
pub const TAGLINE: &str = "EDUCATE • MOTIVATE • ELEVATE";
/// Footer stamped on every page.
pub const FOOTER: &str = "© 2025 My College Finance. All rights reserved.";

/// Masthead rows with their fixed baselines.
pub fn masthead() -> [(Line, f32); 2] {
    [
        (Line::centered(ORGANIZATION, TextStyle::title(20.0), 0.0), 20.0),
        (
            Line::centered(TAGLINE, TextStyle::body().colored(palette::SLATE), 0.0),
            28.0,
        ),
    ]
}

/// Copyright row stamped at the footer baseline.
pub fn footer() -> Line {
    Line::centered(
        FOOTER,
        TextStyle::body().sized(8.0).colored(palette::MUTED),
        0.0,
    )
}

/// Text of the "Generated:" cover row.
pub fn generated_label(date: &str) -> String {
    format!("Generated: {date}")
}

/// A 10pt regular row at `x`.
pub(crate) fn body(x: f32, text: impl Into<String>, advance: f32) -> Line {
    Line::text(x, text, TextStyle::body(), advance)
}

/// A bold row at `x` with the given size.
pub(crate) fn bold(x: f32, text: impl Into<String>, size: f32, advance: f32) -> Line {
    Line::text(x, text, TextStyle::body().bold().sized(size), advance)
}

/// A muted 9pt note row under a heading.
pub(crate) fn note(text: impl Into<String>, advance: f32) -> Line {
    Line::text(LEFT, text, TextStyle::hint(), advance)
}

/// A centred muted cover row.
pub(crate) fn cover_subtitle(text: impl Into<String>, size: f32, advance: f32) -> Line {
    Line::centered(
        text,
        TextStyle::body().sized(size).colored(palette::MUTED),
        advance,
    )
}

/// A form field: bold label with an optional hint on the same row, followed by answer rows.
pub(crate) fn field(
    label: &str,
    hint: Option<(f32, &str)>,
    label_advance: f32,
    rows: &[(&str, f32)],
) -> Block {
    let mut label_row = Line::new(label_advance).run(LEFT, label, TextStyle::body().bold());
    if let Some((x, text)) = hint {
        label_row = label_row.run(x, text, TextStyle::body().sized(9.0));
    }

    let mut lines = vec![label_row];
    lines.extend(rows.iter().map(|(text, advance)| body(LEFT, *text, *advance)));
    Block::Lines(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::text_width;

    #[test]
    fn masthead_sits_above_the_body() {
        for (line, y) in masthead() {
            assert!(y < BODY_START);
            assert_eq!(line.runs().len(), 1);
        }
    }

    #[test]
    fn field_hint_does_not_overlap_label() {
        let block = field(
            "Full Legal Name:",
            Some((55.0, "(As it appears on your Social Security card)")),
            5.0,
            &[("First: ____", 12.0)],
        );
        let Block::Lines(lines) = block else {
            panic!("field renders as rows");
        };
        let label = &lines[0].runs()[0];
        let hint = &lines[0].runs()[1];
        assert!(label.x() + text_width(label.text(), label.style()) < hint.x());
        assert_eq!(lines.iter().map(Line::advance).sum::<f32>(), 17.0);
    }
}
