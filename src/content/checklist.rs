//! The two-page printable creation checklist.

use super::{body, cover_subtitle, generated_label, BOX_WIDTH, BOX_X, LEFT};
use crate::canvas::PaintMode;
use crate::model::{Block, Callout, Line, Section};
use crate::style::{palette, TextStyle};

/// Documents to gather before starting.
pub const PREREQUISITES: [&str; 6] = [
    "Social Security Number (no dashes)",
    "Legal name (matches Social Security card)",
    "Date of birth",
    "Valid email address you check regularly",
    "Mailing address",
    "Phone number",
];

/// Numbered account creation steps.
pub const CREATION_STEPS: [&str; 10] = [
    "Visit studentaid.gov/fsa-id/create-account",
    "Enter personal information accurately",
    "Create username (NOT your email)",
    "Create strong password (8+ characters, mixed)",
    "Set up challenge questions & answers",
    "Verify email address (check inbox)",
    "Review all information for accuracy",
    "Submit application",
    "Save FSA ID credentials in safe place",
    "Test login at studentaid.gov",
];

/// Security items confirmed after the account exists.
pub const SECURITY_CHECKS: [&str; 5] = [
    "Password is unique (not used elsewhere)",
    "Challenge answers are memorable to me only",
    "FSA ID credentials stored securely",
    "Did NOT share password with anyone",
    "Logged out after creating account",
];

const NOTE_FIELDS: [&str; 4] = [
    "FSA ID Username (for reference only - keep secure!):",
    "Password Hint (DO NOT write actual password):",
    "Email Used for Verification:",
    "Date FSA ID Was Created:",
];

/// Empty checkbox printed in front of every item.
pub const CHECKBOX: &str = "[ ]";

const BLANK: &str = "_______________________________________________";
const ROW_ADVANCE: f32 = 8.0;
const TEXT_X: f32 = 30.0;

fn checkbox_row(box_size: f32, text: &str) -> Line {
    Line::new(ROW_ADVANCE)
        .run(LEFT, CHECKBOX, TextStyle::body().sized(box_size))
        .run(TEXT_X, text, TextStyle::body())
}

fn group(title: &str, advance: f32) -> crate::model::SectionBuilder {
    Section::builder(title)
        .identifier(Some(title.to_lowercase()))
        .heading(LEFT, TextStyle::heading(14.0), advance)
}

fn cover(generated: &str) -> Section {
    let title = TextStyle::title(20.0);
    let subtitle = 10.0;
    Section::new("Checklist cover").with_blocks([
        Block::Spacer(8.0),
        Block::Lines(vec![
            Line::centered("FSA ID Creation Checklist", title, 9.0),
            cover_subtitle(
                "Complete this checklist as you create your FSA ID",
                subtitle,
                6.0,
            ),
            cover_subtitle(generated_label(generated), subtitle, 9.0),
        ]),
        Block::Callout(
            Callout::new(BOX_X, BOX_WIDTH, 22.0, PaintMode::Stroke)
                .with_stroke(palette::BRAND_BLUE, 0.5)
                .row(
                    8.0,
                    LEFT,
                    "Name: ___________________________________________",
                    TextStyle::body().sized(11.0),
                )
                .row(
                    16.0,
                    LEFT,
                    "Date Started: ______________  Date Completed: ______________",
                    TextStyle::body().sized(11.0),
                )
                .with_gap_after(6.0),
        ),
        Block::Callout(
            Callout::new(BOX_X, BOX_WIDTH, 12.0, PaintMode::Fill)
                .with_fill(palette::INFO_BLUE)
                .row(
                    8.0,
                    LEFT,
                    "Instructions: Check off each box as you complete the step",
                    TextStyle::body().bold(),
                )
                .with_gap_after(10.0),
        ),
    ])
}

fn before_you_start() -> Section {
    group("BEFORE YOU START", 9.0)
        .extend_blocks(
            PREREQUISITES
                .iter()
                .map(|item| Block::line(checkbox_row(12.0, item))),
        )
        .gap_after(5.0)
        .build()
}

fn account_creation() -> Section {
    group("ACCOUNT CREATION STEPS", 9.0)
        .extend_blocks(CREATION_STEPS.iter().enumerate().map(|(index, item)| {
            Block::line(
                Line::new(ROW_ADVANCE)
                    .run(LEFT, CHECKBOX, TextStyle::body())
                    .run(TEXT_X, format!("{}.", index + 1), TextStyle::body().bold())
                    .run(37.0, *item, TextStyle::body()),
            )
        }))
        .gap_after(5.0)
        .build()
}

fn security_reminders() -> Section {
    group("SECURITY REMINDERS", 9.0)
        .start_on_new_page(true)
        .extend_blocks(
            SECURITY_CHECKS
                .iter()
                .map(|item| Block::line(checkbox_row(10.0, item))),
        )
        .gap_after(10.0)
        .build()
}

fn notes() -> Section {
    let mut additional = vec![body(LEFT, "Additional Notes:", 6.0)];
    additional.extend((0..5).map(|_| body(LEFT, BLANK, 7.0)));

    group("NOTES & IMPORTANT DATES", 10.0)
        .extend_blocks(NOTE_FIELDS.iter().map(|label| {
            Block::Lines(vec![body(LEFT, *label, 6.0), body(LEFT, BLANK, 12.0)])
        }))
        .push_block(Block::Lines(additional))
        .gap_after(5.0)
        .build()
}

fn help() -> Section {
    Section::new("Need Help?").with_block(Block::Callout(
        Callout::new(BOX_X, BOX_WIDTH, 25.0, PaintMode::Fill)
            .with_fill(palette::HELP_YELLOW)
            .row(8.0, LEFT, "Need Help?", TextStyle::body().bold().sized(11.0))
            .row(
                15.0,
                LEFT,
                "Federal Student Aid: 1-800-4-FED-AID (1-800-433-3243)",
                TextStyle::body().sized(9.0),
            )
            .row(
                21.0,
                LEFT,
                "Website: https://studentaid.gov/help",
                TextStyle::body().sized(9.0),
            ),
    ))
}

/// Sections of the checklist: cover, three checkbox groups, notes and the help box.
pub fn sections(generated: &str) -> Vec<Section> {
    vec![
        cover(generated),
        before_you_start(),
        account_creation(),
        security_reminders(),
        notes(),
        help(),
    ]
}

/// Number of checkbox rows printed across all groups.
pub fn checkbox_count() -> usize {
    PREREQUISITES.len() + CREATION_STEPS.len() + SECURITY_CHECKS.len()
}
