//! Data structures describing the static content of a generated document.
//!
//! A document is an ordered list of [`Section`]s.  Each section carries an optional heading and a
//! list of [`Block`]s; a block is the unit the layout composer keeps together on one page.  All
//! geometry is expressed in millimetres: run offsets are absolute x positions on the page and
//! advances describe how far the cursor moves after a row has been written.

use crate::canvas::PaintMode;
use crate::fonts;
use crate::style::{Rgb, TextStyle};

/// A run of uniformly styled text placed at a fixed x position.
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    x: f32,
    text: String,
    style: TextStyle,
}

impl Run {
    /// Creates a run starting at `x`.
    pub fn new(x: f32, text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            x,
            text: text.into(),
            style,
        }
    }

    /// Left edge of the run.
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Text of the run.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Style of the run.
    pub fn style(&self) -> &TextStyle {
        &self.style
    }
}

/// Horizontal placement of a [`Line`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    /// Runs are drawn at their own x offsets.
    #[default]
    Positioned,
    /// The line is centred on the page; run offsets are ignored.
    Centered,
}

/// One row of text sharing a baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    runs: Vec<Run>,
    placement: Placement,
    advance: f32,
}

impl Line {
    /// Creates an empty row that moves the cursor by `advance` once written.
    pub fn new(advance: f32) -> Self {
        Self {
            runs: Vec::new(),
            placement: Placement::Positioned,
            advance,
        }
    }

    /// A single run at `x`.
    pub fn text(x: f32, text: impl Into<String>, style: TextStyle, advance: f32) -> Self {
        Self::new(advance).run(x, text, style)
    }

    /// A single run centred on the page.
    pub fn centered(text: impl Into<String>, style: TextStyle, advance: f32) -> Self {
        let mut line = Self::text(0.0, text, style, advance);
        line.placement = Placement::Centered;
        line
    }

    /// Appends a run and returns the updated row.
    pub fn run(mut self, x: f32, text: impl Into<String>, style: TextStyle) -> Self {
        self.runs.push(Run::new(x, text, style));
        self
    }

    /// Returns the runs of the row.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Returns the horizontal placement.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Distance the cursor moves after the row.
    pub fn advance(&self) -> f32 {
        self.advance
    }

    /// Concatenated text of all runs.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(Run::text).collect::<Vec<_>>().join(" ")
    }
}

/// Long text broken into rows at render time.
#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph {
    x: f32,
    text: String,
    style: TextStyle,
    max_width: f32,
    line_advance: f32,
    gap_after: f32,
}

impl Paragraph {
    /// Creates a paragraph starting at `x`, wrapped to `max_width`.
    pub fn new(x: f32, text: impl Into<String>, style: TextStyle, max_width: f32) -> Self {
        Self {
            x,
            text: text.into(),
            style,
            max_width,
            line_advance: 5.0,
            gap_after: 0.0,
        }
    }

    /// Sets the distance between consecutive baselines.
    pub fn with_line_advance(mut self, line_advance: f32) -> Self {
        self.line_advance = line_advance;
        self
    }

    /// Sets extra space after the last row.
    pub fn with_gap_after(mut self, gap_after: f32) -> Self {
        self.gap_after = gap_after;
        self
    }

    /// Breaks the paragraph into rows using the builtin font metrics.
    pub fn lines(&self) -> Vec<Line> {
        let wrapped = fonts::wrap_text(&self.text, &self.style, self.max_width);
        let count = wrapped.len();
        wrapped
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                let advance = if index + 1 == count {
                    self.line_advance + self.gap_after
                } else {
                    self.line_advance
                };
                Line::text(self.x, text, self.style, advance)
            })
            .collect()
    }
}

/// A box drawn at the cursor with text rows at fixed offsets inside it.
#[derive(Clone, Debug, PartialEq)]
pub struct Callout {
    x: f32,
    width: f32,
    height: f32,
    mode: PaintMode,
    fill: Rgb,
    stroke: Rgb,
    line_width: f32,
    rows: Vec<(f32, Run)>,
    gap_after: f32,
}

impl Callout {
    /// Creates a box spanning `x..x + width` with the given height.
    pub fn new(x: f32, width: f32, height: f32, mode: PaintMode) -> Self {
        Self {
            x,
            width,
            height,
            mode,
            fill: Rgb::new(255, 255, 255),
            stroke: Rgb::default(),
            line_width: 0.2,
            rows: Vec::new(),
            gap_after: 0.0,
        }
    }

    /// Sets the fill colour.
    pub fn with_fill(mut self, fill: Rgb) -> Self {
        self.fill = fill;
        self
    }

    /// Sets the outline colour and width.
    pub fn with_stroke(mut self, stroke: Rgb, line_width: f32) -> Self {
        self.stroke = stroke;
        self.line_width = line_width;
        self
    }

    /// Places a run with its baseline `offset` below the top of the box.
    pub fn row(mut self, offset: f32, x: f32, text: impl Into<String>, style: TextStyle) -> Self {
        self.rows.push((offset, Run::new(x, text, style)));
        self
    }

    /// Sets the space between the bottom of the box and the next block.
    pub fn with_gap_after(mut self, gap_after: f32) -> Self {
        self.gap_after = gap_after;
        self
    }

    /// Left edge.
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Box width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Box height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Paint mode.
    pub fn mode(&self) -> PaintMode {
        self.mode
    }

    /// Fill colour.
    pub fn fill(&self) -> Rgb {
        self.fill
    }

    /// Outline colour.
    pub fn stroke(&self) -> Rgb {
        self.stroke
    }

    /// Outline width.
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Text rows with their offsets from the top edge.
    pub fn rows(&self) -> &[(f32, Run)] {
        &self.rows
    }

    /// Space after the box.
    pub fn gap_after(&self) -> f32 {
        self.gap_after
    }
}

/// Individual content blocks that make up a section.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Rows that are always kept on the same page.
    Lines(Vec<Line>),
    /// Word-wrapped text that may continue on the next page between rows.
    Paragraph(Paragraph),
    /// Decorated box.
    Callout(Callout),
    /// Vertical whitespace.
    Spacer(f32),
}

impl Block {
    /// Convenience helper for a single-row block.
    pub fn line(line: Line) -> Self {
        Self::Lines(vec![line])
    }

    /// Total vertical space the block consumes, including trailing gaps.
    pub fn height(&self) -> f32 {
        match self {
            Block::Lines(lines) => lines.iter().map(Line::advance).sum(),
            Block::Paragraph(paragraph) => paragraph.lines().iter().map(Line::advance).sum(),
            Block::Callout(callout) => callout.height + callout.gap_after,
            Block::Spacer(amount) => *amount,
        }
    }
}

/// Logical representation of a document section.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    identifier: Option<String>,
    title: String,
    heading: Option<Block>,
    blocks: Vec<Block>,
    gap_after: f32,
    start_on_new_page: bool,
}

impl Section {
    /// Creates an untitled-on-paper section; `title` is only used for logging and outlines.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            identifier: None,
            title: title.into(),
            heading: None,
            blocks: Vec::new(),
            gap_after: 0.0,
            start_on_new_page: false,
        }
    }

    /// Creates a builder for a section with the given title.
    pub fn builder(title: impl Into<String>) -> SectionBuilder {
        SectionBuilder::new(title)
    }

    /// Returns the section identifier used for bookmarks.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Returns the title of the section.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the heading rows, if the section prints one.
    pub fn heading(&self) -> Option<&Block> {
        self.heading.as_ref()
    }

    /// Returns the blocks contained in the section.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Space after the last block.
    pub fn gap_after(&self) -> f32 {
        self.gap_after
    }

    /// Whether the section always begins on a fresh page.
    pub fn starts_on_new_page(&self) -> bool {
        self.start_on_new_page
    }

    /// Total height of heading, blocks and trailing gap.
    pub fn height(&self) -> f32 {
        self.heading.iter().map(Block::height).sum::<f32>()
            + self.blocks.iter().map(Block::height).sum::<f32>()
            + self.gap_after
    }

    /// Appends a block and returns the updated section.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Extends the section with additional blocks and returns the updated instance.
    pub fn with_blocks<I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks.extend(blocks);
        self
    }
}

/// Builder for [`Section`] values.
#[derive(Clone, Debug, Default)]
pub struct SectionBuilder {
    identifier: Option<String>,
    title: String,
    heading: Vec<Line>,
    blocks: Vec<Block>,
    gap_after: f32,
    start_on_new_page: bool,
}

impl SectionBuilder {
    /// Creates a builder for a section with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Marks the section to start on a new page.
    pub fn start_on_new_page(mut self, start_on_new_page: bool) -> Self {
        self.start_on_new_page = start_on_new_page;
        self
    }

    /// Sets the identifier for the section.
    pub fn identifier(mut self, identifier: impl Into<Option<String>>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Prints the title at `x` in `style` as the section heading.
    pub fn heading(mut self, x: f32, style: TextStyle, advance: f32) -> Self {
        let title = self.title.clone();
        self.heading.push(Line::text(x, title, style, advance));
        self
    }

    /// Adds a note row directly under the heading.
    pub fn note(mut self, line: Line) -> Self {
        self.heading.push(line);
        self
    }

    /// Pushes an additional block into the section.
    pub fn push_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Extends the builder with multiple blocks.
    pub fn extend_blocks<I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks.extend(blocks);
        self
    }

    /// Sets the space after the last block.
    pub fn gap_after(mut self, gap_after: f32) -> Self {
        self.gap_after = gap_after;
        self
    }

    /// Builds the final section.
    pub fn build(self) -> Section {
        let heading = if self.heading.is_empty() {
            None
        } else {
            Some(Block::Lines(self.heading))
        };

        Section {
            identifier: self.identifier,
            title: self.title,
            heading,
            blocks: self.blocks,
            gap_after: self.gap_after,
            start_on_new_page: self.start_on_new_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_heading_and_note() {
        let section = Section::builder("1. PERSONAL INFORMATION")
            .heading(20.0, TextStyle::heading(14.0), 7.0)
            .note(Line::text(20.0, "(note)", TextStyle::hint(), 8.0))
            .push_block(Block::Spacer(4.0))
            .gap_after(6.0)
            .build();

        let Some(Block::Lines(heading)) = section.heading() else {
            panic!("heading rows expected");
        };
        assert_eq!(heading.len(), 2);
        assert_eq!(heading[0].plain_text(), "1. PERSONAL INFORMATION");
        assert_eq!(section.height(), 7.0 + 8.0 + 4.0 + 6.0);
    }

    #[test]
    fn section_without_heading_has_none() {
        let section = Section::new("Cover").with_block(Block::Spacer(10.0));
        assert!(section.heading().is_none());
        assert!(!section.starts_on_new_page());
        assert_eq!(section.height(), 10.0);
    }

    #[test]
    fn paragraph_height_accounts_for_wrapping() {
        let text = "Your FSA ID is your legal signature - protect it like you would a handwritten signature";
        let narrow = Paragraph::new(20.0, text, TextStyle::body(), 60.0)
            .with_line_advance(5.0)
            .with_gap_after(10.0);
        let rows = narrow.lines();
        assert!(rows.len() > 1);
        let block = Block::Paragraph(narrow);
        assert_eq!(block.height(), rows.len() as f32 * 5.0 + 10.0);
    }

    #[test]
    fn callout_height_includes_gap() {
        let callout = Callout::new(15.0, 180.0, 25.0, PaintMode::Fill).with_gap_after(5.0);
        assert_eq!(Block::Callout(callout).height(), 30.0);
    }
}
