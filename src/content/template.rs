//! The three-page fill-in template used to collect information before registering.

use super::{body, cover_subtitle, field, generated_label, note, BOX_WIDTH, BOX_X, LEFT};
use crate::canvas::PaintMode;
use crate::model::{Block, Callout, Line, Section, SectionBuilder};
use crate::style::{palette, TextStyle};

const LONG_BLANK: &str = "_________________________________________________________";
const DATE_BLANK: &str = "___  ___ / ___  ___ / ___  ___  ___  ___";
const YES_NO: &str = "[ ] Yes    [ ] No    Date: ___________________";

/// Closing reminders, each with an empty checkbox.
pub const REMINDERS: [&str; 5] = [
    "[ ] Stored this document in a secure location",
    "[ ] Did NOT share password with anyone",
    "[ ] Logged in successfully at studentaid.gov",
    "[ ] Saved username in secure password manager",
    "[ ] Ready to use FSA ID for FAFSA application",
];

fn part(title: &str, advance: f32) -> SectionBuilder {
    Section::builder(title)
        .identifier(Some(title.to_lowercase()))
        .heading(LEFT, TextStyle::heading(14.0), advance)
}

fn cover(generated: &str) -> Section {
    Section::new("Template cover").with_blocks([
        Block::Spacer(8.0),
        Block::Lines(vec![
            Line::centered("FSA ID Creation Template", TextStyle::title(20.0), 9.0),
            cover_subtitle(
                "Use this template to organize your information before creating your FSA ID",
                10.0,
                6.0,
            ),
            cover_subtitle(generated_label(generated), 10.0, 9.0),
        ]),
        Block::Callout(
            Callout::new(BOX_X, BOX_WIDTH, 20.0, PaintMode::FillStroke)
                .with_fill(palette::ALERT_TINT)
                .with_stroke(palette::ALERT_RED, 1.0)
                .row(
                    8.0,
                    LEFT,
                    "SECURITY WARNING:",
                    TextStyle::body().bold().colored(palette::ALERT_RED),
                )
                .row(
                    15.0,
                    LEFT,
                    "Keep this document secure. Do not share your password or SSN with anyone.",
                    TextStyle::body().sized(9.0),
                )
                .with_gap_after(8.0),
        ),
    ])
}

fn personal_information() -> Section {
    part("1. PERSONAL INFORMATION", 7.0)
        .note(note(
            "(This information must match your official documents)",
            8.0,
        ))
        .push_block(field(
            "Full Legal Name:",
            Some((55.0, "(As it appears on your Social Security card)")),
            5.0,
            &[(
                "First: _____________________  Middle: __________  Last: _____________________",
                12.0,
            )],
        ))
        .push_block(field(
            "Social Security Number:",
            Some((70.0, "(Enter without dashes)")),
            5.0,
            &[("___  ___  ___  -  ___  ___ - ___  ___  ___  ___", 12.0)],
        ))
        .push_block(field(
            "Date of Birth:",
            Some((50.0, "(MM/DD/YYYY)")),
            5.0,
            &[(DATE_BLANK, 12.0)],
        ))
        .push_block(field(
            "Email Address:",
            Some((52.0, "(Use an email you check regularly)")),
            5.0,
            &[(LONG_BLANK, 12.0)],
        ))
        .push_block(field(
            "Phone Number:",
            None,
            5.0,
            &[("(___) ___ - ____", 12.0)],
        ))
        .push_block(field(
            "Mailing Address:",
            None,
            5.0,
            &[
                (
                    "Street: _____________________________________________________",
                    7.0,
                ),
                (
                    "City: _______________________  State: _____  ZIP: __________",
                    12.0,
                ),
            ],
        ))
        .build()
}

fn credentials() -> Section {
    part("2. FSA ID CREDENTIALS", 7.0)
        .start_on_new_page(true)
        .note(note(
            "(Create strong, unique credentials for your FSA ID)",
            13.0,
        ))
        .push_block(field(
            "Username:",
            Some((45.0, "(Must be unique, NOT your email address)")),
            5.0,
            &[(LONG_BLANK, 15.0)],
        ))
        .push_block(field(
            "Password:",
            Some((
                45.0,
                "(8+ characters: uppercase, lowercase, numbers, symbols)",
            )),
            5.0,
            &[(LONG_BLANK, 12.0)],
        ))
        .push_block(Block::Callout(
            Callout::new(LEFT, 170.0, 18.0, PaintMode::Fill)
                .with_fill(palette::INFO_BLUE)
                .row(
                    5.0,
                    25.0,
                    "Password Requirements: At least 8 characters with:",
                    TextStyle::body().sized(9.0),
                )
                .row(
                    12.0,
                    25.0,
                    "• Uppercase letter   • Lowercase letter   • Number   • Symbol",
                    TextStyle::body().sized(9.0),
                )
                .with_gap_after(7.0),
        ))
        .build()
}

fn challenge_questions() -> Section {
    part("3. CHALLENGE QUESTIONS", 7.0)
        .note(note(
            "(Choose answers only YOU would know - for account recovery)",
            11.0,
        ))
        .extend_blocks((1..=3).map(|number| {
            field(
                &format!("Challenge Question {number}:"),
                None,
                5.0,
                &[
                    (LONG_BLANK, 10.0),
                    (
                        "Answer: _________________________________________________",
                        15.0,
                    ),
                ],
            )
        }))
        .build()
}

fn verification() -> Section {
    part("4. ACCOUNT VERIFICATION", 12.0)
        .start_on_new_page(true)
        .push_block(field("Date Account Created:", None, 5.0, &[(DATE_BLANK, 13.0)]))
        .push_block(field(
            "Email Verification Completed:",
            None,
            5.0,
            &[(YES_NO, 13.0)],
        ))
        .push_block(field("Test Login Successful:", None, 5.0, &[(YES_NO, 13.0)]))
        .gap_after(6.0)
        .build()
}

fn reminders() -> Section {
    part("5. IMPORTANT REMINDERS", 12.0)
        .extend_blocks(
            REMINDERS
                .iter()
                .map(|reminder| Block::line(body(LEFT, *reminder, 8.0))),
        )
        .gap_after(8.0)
        .build()
}

fn additional_notes() -> Section {
    part("ADDITIONAL NOTES", 12.0)
        .push_block(Block::Lines(
            (0..8).map(|_| body(LEFT, LONG_BLANK, 7.0)).collect(),
        ))
        .gap_after(5.0)
        .build()
}

fn help() -> Section {
    Section::new("Need Help Creating Your FSA ID?").with_block(Block::Callout(
        Callout::new(BOX_X, BOX_WIDTH, 30.0, PaintMode::Fill)
            .with_fill(palette::HELP_YELLOW)
            .row(
                10.0,
                LEFT,
                "Need Help Creating Your FSA ID?",
                TextStyle::body().bold().sized(11.0),
            )
            .row(
                17.0,
                LEFT,
                "Phone: 1-800-4-FED-AID (1-800-433-3243)",
                TextStyle::body().sized(9.0),
            )
            .row(
                23.0,
                LEFT,
                "Website: https://studentaid.gov/fsa-id/create-account",
                TextStyle::body().sized(9.0),
            ),
    ))
}

/// Sections of the template: cover, five numbered parts, notes and the help box.
pub fn sections(generated: &str) -> Vec<Section> {
    vec![
        cover(generated),
        personal_information(),
        credentials(),
        challenge_questions(),
        verification(),
        reminders(),
        additional_notes(),
        help(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BODY_START;
    use crate::layout::PageGeometry;

    fn page_heights(sections: &[Section]) -> Vec<f32> {
        let mut pages = vec![BODY_START];
        for section in sections {
            if section.starts_on_new_page() {
                pages.push(PageGeometry::A4.top_margin);
            }
            *pages.last_mut().unwrap() += section.height();
        }
        pages
    }

    #[test]
    fn parts_fill_three_pages_without_overflow() {
        let pages = page_heights(&sections("1/1/2025"));
        assert_eq!(pages.len(), 3);
        for bottom in pages {
            assert!(bottom <= PageGeometry::A4.content_bottom, "{bottom}");
        }
    }

    #[test]
    fn warning_box_uses_alert_colours() {
        let cover = cover("1/1/2025");
        let callout = cover
            .blocks()
            .iter()
            .find_map(|block| match block {
                Block::Callout(callout) => Some(callout),
                _ => None,
            })
            .expect("warning box");
        assert_eq!(callout.mode(), PaintMode::FillStroke);
        assert_eq!(callout.stroke(), palette::ALERT_RED);
        assert_eq!(callout.rows()[0].1.style().color(), palette::ALERT_RED);
    }
}
