//! Cursor-driven layout of sections onto a [`Canvas`].
//!
//! The [`Composer`] owns the only mutable layout state: the index of the current page and the
//! vertical cursor `y`, which is the baseline of the next row in millimetres from the top edge.
//! Every write first checks that the block fits above [`PageGeometry::content_bottom`]; if it does
//! not, a page break is inserted and the cursor returns to [`PageGeometry::top_margin`].  A page
//! nothing has been drawn on is never left behind: the cursor rewinds to the top margin instead.
//!
//! Sections are placed with the following policy:
//!
//! * a section flagged `start_on_new_page` begins on a fresh page unless nothing has been drawn on
//!   the current page yet;
//! * a section that does not fit in the remaining space but fits on an empty page is moved to the
//!   next page as a whole, so exactly one break precedes it;
//! * a section taller than a page keeps its heading with the first block and then flows block by
//!   block.  Blocks never split, except word-wrapped paragraphs and row groups taller than a page,
//!   which flow row by row.  A single row or box taller than a page is an error.

use log::debug;

use crate::canvas::{Canvas, CanvasError, PageSize, Rect};
use crate::fonts;
use crate::model::{Block, Callout, Line, Placement, Section};
use crate::style::TextStyle;

/// Tolerance for comparisons of accumulated f32 offsets.
const EPSILON: f32 = 1e-3;

/// Vertical landmarks of a page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    /// Physical page size.
    pub size: PageSize,
    /// Cursor position after a page break.
    pub top_margin: f32,
    /// Lowest position any row or box may reach.
    pub content_bottom: f32,
    /// Baseline of the footer stamped on every page.
    pub footer_y: f32,
}

impl PageGeometry {
    /// A4 portrait with a 30 mm top margin and the footer at 285 mm.
    pub const A4: PageGeometry = PageGeometry {
        size: PageSize::A4,
        top_margin: 30.0,
        content_bottom: 280.0,
        footer_y: 285.0,
    };

    /// Vertical space available on an empty page.
    pub fn capacity(&self) -> f32 {
        self.content_bottom - self.top_margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// Position of the next write.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    /// Zero-based page index.
    pub page: usize,
    /// Baseline of the next row.
    pub y: f32,
}

/// Outcome of a completed layout pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutSummary {
    /// Number of pages in the document.
    pub page_count: usize,
    /// One-based first page of each section that prints a heading.
    pub section_pages: Vec<Option<usize>>,
    /// Page breaks inserted by overflow checks rather than explicit section starts.
    pub overflow_breaks: usize,
}

/// Writes sections onto a canvas while tracking the cursor.
pub struct Composer<'a, C: Canvas> {
    canvas: &'a mut C,
    geometry: PageGeometry,
    cursor: Cursor,
    page_dirty: bool,
    applied: Option<TextStyle>,
    summary: LayoutSummary,
}

impl<'a, C: Canvas> Composer<'a, C> {
    /// Starts composing at the top margin of the canvas' current page.
    pub fn new(canvas: &'a mut C, geometry: PageGeometry) -> Self {
        let page = canvas.page_count().saturating_sub(1);
        Self {
            canvas,
            geometry,
            cursor: Cursor {
                page,
                y: geometry.top_margin,
            },
            page_dirty: false,
            applied: None,
            summary: LayoutSummary::default(),
        }
    }

    /// Returns the current cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Space left between the cursor and the content bottom.
    pub fn remaining(&self) -> f32 {
        self.geometry.content_bottom - self.cursor.y
    }

    fn fits(&self, height: f32) -> bool {
        self.cursor.y + height <= self.geometry.content_bottom + EPSILON
    }

    /// Moves the cursor to an absolute position on the current page.
    pub fn move_to(&mut self, y: f32) {
        self.cursor.y = y;
    }

    /// Draws a row at a fixed baseline without moving the cursor.
    pub fn place_line(&mut self, line: &Line, y: f32) -> Result<(), CanvasError> {
        self.draw_runs(line, y)?;
        self.page_dirty = true;
        Ok(())
    }

    /// Appends a page and resets the cursor to the top margin.
    pub fn page_break(&mut self) -> Result<(), CanvasError> {
        self.canvas.new_page()?;
        self.cursor = Cursor {
            page: self.canvas.page_count().saturating_sub(1),
            y: self.geometry.top_margin,
        };
        self.page_dirty = false;
        Ok(())
    }

    /// Breaks the page when `height` does not fit below the cursor.
    ///
    /// On a page nothing has been drawn on, the cursor moves back to the top margin instead of
    /// leaving a blank page behind.  Returns whether a break was inserted.
    pub fn ensure_space(&mut self, height: f32) -> Result<bool, CanvasError> {
        let capacity = self.geometry.capacity();
        if height > capacity + EPSILON {
            return Err(CanvasError::BlockTooTall { height, capacity });
        }
        if self.fits(height) {
            return Ok(false);
        }
        if !self.page_dirty {
            debug!(
                "Block of {:.1} mm does not fit at y={:.1} on untouched page {}; rewinding",
                height,
                self.cursor.y,
                self.cursor.page + 1
            );
            self.cursor.y = self.geometry.top_margin;
            return Ok(false);
        }
        debug!(
            "Block of {:.1} mm does not fit at y={:.1} on page {}; breaking page",
            height,
            self.cursor.y,
            self.cursor.page + 1
        );
        self.page_break()?;
        self.summary.overflow_breaks += 1;
        Ok(true)
    }

    /// Lays out a complete section.
    pub fn write_section(&mut self, section: &Section) -> Result<(), CanvasError> {
        if section.starts_on_new_page() && self.page_dirty {
            self.page_break()?;
        }

        let height = section.height();
        if !self.fits(height) {
            if height <= self.geometry.capacity() + EPSILON {
                self.ensure_space(height)?;
            } else {
                let capacity = self.geometry.capacity();
                let lead = section.heading().map_or(0.0, Block::height)
                    + section
                        .blocks()
                        .first()
                        .map_or(0.0, |block| leading_height(block, capacity));
                self.ensure_space(lead.min(capacity))?;
            }
        }

        debug!(
            "Section '{}' starts on page {} at y={:.1}",
            section.title(),
            self.cursor.page + 1,
            self.cursor.y
        );
        self.summary
            .section_pages
            .push(section.heading().map(|_| self.cursor.page + 1));

        if let Some(heading) = section.heading() {
            self.write_block(heading)?;
        }
        for block in section.blocks() {
            self.write_block(block)?;
        }
        self.advance(section.gap_after());
        Ok(())
    }

    /// Writes a block at the cursor, breaking the page first when it does not fit.
    pub fn write_block(&mut self, block: &Block) -> Result<(), CanvasError> {
        match block {
            Block::Lines(lines) if block.height() <= self.geometry.capacity() + EPSILON => {
                self.ensure_space(block.height())?;
                for line in lines {
                    self.write_line(line)?;
                }
            }
            Block::Lines(lines) => {
                debug!(
                    "Row group of {:.1} mm is taller than a page; flowing row by row",
                    block.height()
                );
                for line in lines {
                    self.ensure_space(line.advance())?;
                    self.write_line(line)?;
                }
            }
            Block::Paragraph(paragraph) => {
                for line in paragraph.lines() {
                    self.ensure_space(line.advance())?;
                    self.write_line(&line)?;
                }
            }
            Block::Callout(callout) => {
                self.ensure_space(block.height())?;
                self.write_callout(callout)?;
            }
            Block::Spacer(amount) => self.advance(*amount),
        }
        Ok(())
    }

    /// Draws `line` on every page at the footer baseline and returns to the last page.
    pub fn stamp_footer(&mut self, line: &Line) -> Result<(), CanvasError> {
        let pages = self.canvas.page_count();
        if pages == 0 {
            return Ok(());
        }
        for index in 0..pages {
            self.canvas.select_page(index)?;
            self.draw_runs(line, self.geometry.footer_y)?;
        }
        self.canvas.select_page(pages.saturating_sub(1))?;
        Ok(())
    }

    /// Finishes the pass and reports pages and section positions.
    pub fn finish(mut self) -> LayoutSummary {
        self.summary.page_count = self.canvas.page_count();
        self.summary
    }

    fn advance(&mut self, amount: f32) {
        // Whitespace never forces a break on its own; the next block decides.
        self.cursor.y = (self.cursor.y + amount).min(self.geometry.content_bottom);
    }

    fn write_line(&mut self, line: &Line) -> Result<(), CanvasError> {
        self.draw_runs(line, self.cursor.y)?;
        self.page_dirty = true;
        self.cursor.y += line.advance();
        Ok(())
    }

    fn write_callout(&mut self, callout: &Callout) -> Result<(), CanvasError> {
        let top = self.cursor.y;
        self.canvas.set_fill_color(callout.fill())?;
        self.canvas.set_draw_color(callout.stroke())?;
        self.canvas.set_line_width(callout.line_width())?;
        self.canvas.draw_rect(
            Rect::new(callout.x(), top, callout.width(), callout.height()),
            callout.mode(),
        )?;

        for (offset, run) in callout.rows() {
            self.apply_style(run.style())?;
            self.canvas.draw_text(run.x(), top + offset, run.text())?;
        }

        self.page_dirty = true;
        self.cursor.y = top + callout.height();
        self.advance(callout.gap_after());
        Ok(())
    }

    fn draw_runs(&mut self, line: &Line, y: f32) -> Result<(), CanvasError> {
        for run in line.runs() {
            let x = match line.placement() {
                Placement::Positioned => run.x(),
                Placement::Centered => {
                    let width = fonts::text_width(run.text(), run.style());
                    ((self.canvas.page_size().width - width) / 2.0).max(0.0)
                }
            };
            self.apply_style(run.style())?;
            self.canvas.draw_text(x, y, run.text())?;
        }
        Ok(())
    }

    fn apply_style(&mut self, style: &TextStyle) -> Result<(), CanvasError> {
        let previous = self.applied;
        if previous.map(|s| s.size()) != Some(style.size()) {
            self.canvas.set_font_size(style.size())?;
        }
        if previous.map(|s| s.weight()) != Some(style.weight()) {
            self.canvas.set_font_weight(style.weight())?;
        }
        if previous.map(|s| s.color()) != Some(style.color()) {
            self.canvas.set_text_color(style.color())?;
        }
        self.applied = Some(*style);
        Ok(())
    }
}

/// Space the first rows of a block need so a heading is never left alone at a page bottom.
fn leading_height(block: &Block, capacity: f32) -> f32 {
    match block {
        Block::Paragraph(paragraph) => paragraph
            .lines()
            .first()
            .map_or(0.0, Line::advance),
        Block::Lines(lines) if block.height() > capacity => {
            lines.first().map_or(0.0, Line::advance)
        }
        other => other.height(),
    }
}
