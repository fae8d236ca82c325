//! The nine-page FSA ID creation guide.

use super::{body, bold, cover_subtitle, generated_label, INDENT, LEFT};
use crate::canvas::PaintMode;
use crate::model::{Block, Callout, Line, Paragraph, Section};
use crate::style::{palette, TextStyle};

/// Entries of the table of contents, one per topic section.
pub const CONTENTS: [&str; 7] = [
    "1. What is an FSA ID?",
    "2. Who Needs an FSA ID?",
    "3. Before You Begin",
    "4. Step-by-Step Creation Process",
    "5. Security Best Practices",
    "6. Troubleshooting Common Issues",
    "7. Important Reminders",
];

const USES: [&str; 5] = [
    "• Completing the FAFSA form",
    "• Signing your Master Promissory Note (MPN)",
    "• Accessing your federal student aid information",
    "• Completing entrance counseling",
    "• Managing your federal student loans",
];

const AUDIENCES: [(&str, &str); 3] = [
    (
        "Students:",
        "All students applying for federal financial aid must have their own FSA ID.",
    ),
    (
        "Parents:",
        "Parents of dependent students need their own FSA ID to sign the FAFSA.",
    ),
    (
        "Spouses:",
        "Married students may need their spouse's FSA ID for certain applications.",
    ),
];

const REQUIREMENTS: [(&str, &str); 6] = [
    (
        "Social Security Number (SSN)",
        "Enter without dashes or spaces (e.g., 123456789)",
    ),
    (
        "Full Legal Name",
        "Must match your Social Security card exactly - no nicknames",
    ),
    ("Date of Birth", "Enter in the correct format as requested"),
    (
        "Valid Email Address",
        "Use an email you check regularly for verification",
    ),
    ("Mailing Address", "Current address where you can receive mail"),
    ("Phone Number", "A number where you can be reached"),
];

const STEPS: [(&str, &str); 7] = [
    (
        "Visit StudentAid.gov",
        "Go to https://studentaid.gov/fsa-id/create-account",
    ),
    (
        "Enter Personal Information",
        "Provide your SSN, name, date of birth, and contact information",
    ),
    (
        "Create Username",
        "Choose a unique username (not your email address)",
    ),
    (
        "Create Password",
        "Use 8+ characters with letters, numbers, and symbols",
    ),
    (
        "Set Challenge Questions",
        "Choose and answer questions only you would know",
    ),
    (
        "Verify Email",
        "Check your email and click the verification link",
    ),
    (
        "Review and Submit",
        "Double-check all information before submitting",
    ),
];

const PRACTICES: [&str; 7] = [
    "Never share your FSA ID username or password with anyone",
    "Use a strong, unique password for your FSA ID",
    "Don't use the same password for multiple accounts",
    "Keep your challenge question answers private",
    "Update your contact information if it changes",
    "Log out after using your FSA ID on shared computers",
    "Be cautious of phishing emails asking for your FSA ID",
];

const ISSUES: [(&str, &str); 5] = [
    (
        "Account Creation Failed",
        "Ensure name matches Social Security card exactly",
    ),
    (
        "Email Already in Use",
        "Each FSA ID needs a unique email address",
    ),
    (
        "SSN Not Recognized",
        "Enter without dashes (123456789) and verify it's correct",
    ),
    (
        "Forgot Username/Password",
        "Use account recovery at studentaid.gov",
    ),
    (
        "Account Locked",
        "Wait 15 minutes or contact Federal Student Aid",
    ),
];

const REMINDERS: [&str; 6] = [
    "Your FSA ID is your legal signature - protect it like you would a handwritten signature",
    "Each person needs their own FSA ID - never share or use someone else's",
    "Keep your FSA ID information in a safe place",
    "Test your FSA ID by logging in at studentaid.gov before using it for applications",
    "Your FSA ID remains active unless you deactivate it",
    "You can update your password and security questions at any time",
];

const TOPIC_HEADING_SIZE: f32 = 16.0;

fn topic(title: &str, advance: f32) -> crate::model::SectionBuilder {
    Section::builder(title)
        .identifier(Some(title.to_string()))
        .start_on_new_page(true)
        .heading(LEFT, TextStyle::title(TOPIC_HEADING_SIZE), advance)
}

fn cover(generated: &str) -> Section {
    Section::new("Cover").with_blocks([
        Block::Spacer(30.0),
        Block::Lines(vec![
            Line::centered("FSA ID", TextStyle::title(24.0), 15.0),
            Line::centered("Creation Guide", TextStyle::title(24.0), 20.0),
            cover_subtitle("Complete Step-by-Step Instructions", 12.0, 10.0),
            cover_subtitle(generated_label(generated), 12.0, 10.0),
        ]),
    ])
}

fn table_of_contents() -> Section {
    Section::builder("Table of Contents")
        .identifier(Some("contents".to_string()))
        .start_on_new_page(true)
        .heading(LEFT, TextStyle::title(18.0), 20.0)
        .extend_blocks(CONTENTS.iter().map(|entry| {
            Block::line(Line::text(INDENT, *entry, TextStyle::body().sized(11.0), 12.0))
        }))
        .build()
}

fn what_is_it() -> Section {
    topic(CONTENTS[0], 15.0)
        .push_block(Block::Paragraph(
            Paragraph::new(
                LEFT,
                "An FSA ID is a username and password that gives you access to Federal \
                 Student Aid's online systems. It serves as your legal signature for:",
                TextStyle::body(),
                170.0,
            )
            .with_line_advance(7.0)
            .with_gap_after(5.0),
        ))
        .extend_blocks(USES.iter().map(|item| Block::line(body(INDENT, *item, 8.0))))
        .build()
}

fn who_needs_it() -> Section {
    topic(CONTENTS[1], 20.0)
        .extend_blocks(AUDIENCES.iter().map(|(who, why)| {
            Block::Lines(vec![bold(LEFT, *who, 11.0, 8.0), body(INDENT, *why, 15.0)])
        }))
        .build()
}

fn before_you_begin() -> Section {
    topic("3. Before You Begin - Gather Required Information", 20.0)
        .extend_blocks(REQUIREMENTS.iter().map(|(title, detail)| {
            Block::Lines(vec![
                bold(LEFT, format!("• {title}"), 10.0, 7.0),
                body(INDENT, *detail, 12.0),
            ])
        }))
        .build()
}

fn creation_steps() -> Section {
    topic(CONTENTS[3], 20.0)
        .extend_blocks(STEPS.iter().enumerate().map(|(index, (title, detail))| {
            Block::Lines(vec![
                bold(LEFT, format!("Step {}: {title}", index + 1), 11.0, 7.0),
                body(INDENT, *detail, 12.0),
            ])
        }))
        .build()
}

fn security_practices() -> Section {
    topic(CONTENTS[4], 20.0)
        .extend_blocks(
            PRACTICES
                .iter()
                .map(|item| Block::line(body(LEFT, format!("• {item}"), 10.0))),
        )
        .push_block(Block::Spacer(5.0))
        .push_block(Block::Callout(
            Callout::new(super::BOX_X, super::BOX_WIDTH, 25.0, PaintMode::Fill)
                .with_fill(palette::WARNING_AMBER)
                .row(8.0, LEFT, "Warning:", TextStyle::body().bold().sized(11.0))
                .row(
                    15.0,
                    LEFT,
                    "Federal Student Aid will NEVER ask for your password. If someone",
                    TextStyle::body(),
                )
                .row(
                    22.0,
                    LEFT,
                    "requests this information, it's likely a scam.",
                    TextStyle::body(),
                ),
        ))
        .build()
}

fn troubleshooting() -> Section {
    topic(CONTENTS[5], 20.0)
        .extend_blocks(ISSUES.iter().map(|(issue, solution)| {
            Block::Lines(vec![
                bold(LEFT, format!("Problem: {issue}"), 10.0, 7.0),
                body(INDENT, format!("Solution: {solution}"), 12.0),
            ])
        }))
        .push_block(Block::Spacer(5.0))
        .push_block(Block::Lines(vec![
            bold(LEFT, "Need Help?", 11.0, 8.0),
            body(
                LEFT,
                "Call Federal Student Aid: 1-800-4-FED-AID (1-800-433-3243)",
                7.0,
            ),
            body(LEFT, "Visit: https://studentaid.gov/help", 7.0),
        ]))
        .build()
}

fn reminders() -> Section {
    topic(CONTENTS[6], 20.0)
        .extend_blocks(REMINDERS.iter().enumerate().map(|(index, reminder)| {
            Block::Paragraph(
                Paragraph::new(
                    LEFT,
                    format!("{}. {reminder}", index + 1),
                    TextStyle::body(),
                    170.0,
                )
                .with_line_advance(5.0)
                .with_gap_after(10.0),
            )
        }))
        .build()
}

/// Sections of the full guide: cover, table of contents and seven topics, one per page.
pub fn sections(generated: &str) -> Vec<Section> {
    vec![
        cover(generated),
        table_of_contents(),
        what_is_it(),
        who_needs_it(),
        before_you_begin(),
        creation_steps(),
        security_practices(),
        troubleshooting(),
        reminders(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageGeometry;

    #[test]
    fn every_topic_fits_on_one_page() {
        let capacity = PageGeometry::A4.capacity();
        for section in sections("1/1/2025").iter().skip(1) {
            assert!(section.starts_on_new_page(), "{}", section.title());
            assert!(
                section.height() <= capacity,
                "{} is {} mm tall",
                section.title(),
                section.height()
            );
        }
    }

    #[test]
    fn contents_match_topic_headings() {
        let titles: Vec<_> = sections("1/1/2025")
            .iter()
            .skip(2)
            .map(|section| section.title().to_string())
            .collect();
        for (entry, title) in CONTENTS.iter().zip(&titles) {
            let number = entry.split('.').next().unwrap();
            assert!(title.starts_with(number), "{title} does not match {entry}");
        }
        assert_eq!(titles.len(), CONTENTS.len());
    }
}
