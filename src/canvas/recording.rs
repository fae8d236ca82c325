//! [`Canvas`] implementation that records every draw call instead of producing bytes.
//!
//! The recording keeps the resolved style of each text placement, which makes it suitable for
//! previews (`fsa-guide generate --dry-run`) and for asserting layout properties in tests.

use super::{
    check_font_size, check_line_width, check_point, check_rect, Canvas, CanvasError, PageSize,
    PaintMode, Rect,
};
use crate::style::{FontWeight, Rgb};

/// A single placed string together with the canvas state at the time it was drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRecord {
    /// Left edge of the baseline.
    pub x: f32,
    /// Baseline position.
    pub y: f32,
    /// The string that was placed.
    pub text: String,
    /// Font size in points.
    pub size: f32,
    /// Font weight.
    pub weight: FontWeight,
    /// Text colour.
    pub color: Rgb,
}

/// A recorded drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Text placement.
    Text(TextRecord),
    /// Rectangle painted with the colours active at the time.
    Rect {
        /// Geometry of the rectangle.
        rect: Rect,
        /// Paint mode.
        mode: PaintMode,
        /// Fill colour.
        fill: Rgb,
        /// Outline colour.
        stroke: Rgb,
    },
}

/// Operations recorded for one page, in drawing order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageRecord {
    ops: Vec<DrawOp>,
}

impl PageRecord {
    /// Returns every operation recorded on the page.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Iterates over the text placements on the page.
    pub fn texts(&self) -> impl Iterator<Item = &TextRecord> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(text) => Some(text),
            DrawOp::Rect { .. } => None,
        })
    }

    /// Iterates over the rectangles on the page.
    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Rect { rect, .. } => Some(rect),
            DrawOp::Text(_) => None,
        })
    }

    /// Returns whether any text placement on the page equals `text`.
    pub fn contains_text(&self, text: &str) -> bool {
        self.texts().any(|record| record.text == text)
    }

    /// Counts text placements that start with `prefix`.
    pub fn count_prefixed(&self, prefix: &str) -> usize {
        self.texts()
            .filter(|record| record.text.starts_with(prefix))
            .count()
    }
}

/// Canvas that records draw calls per page.
#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    size: PageSize,
    pages: Vec<PageRecord>,
    current: usize,
    font_size: f32,
    weight: FontWeight,
    text_color: Rgb,
    fill_color: Rgb,
    draw_color: Rgb,
    operations: usize,
    fail_at: Option<usize>,
}

impl RecordingCanvas {
    /// Creates a recording with a single empty page.
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            pages: vec![PageRecord::default()],
            current: 0,
            font_size: 16.0,
            weight: FontWeight::Normal,
            text_color: Rgb::default(),
            fill_color: Rgb::default(),
            draw_color: Rgb::default(),
            operations: 0,
            fail_at: None,
        }
    }

    /// Makes the canvas reject the operation with the given zero-based index.
    ///
    /// Every trait method counts as one operation, including the state setters.
    pub fn failing_at(mut self, operation: usize) -> Self {
        self.fail_at = Some(operation);
        self
    }

    /// Returns the recorded pages.
    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    /// Number of operations attempted so far.
    pub fn operations(&self) -> usize {
        self.operations
    }

    fn tick(&mut self) -> Result<(), CanvasError> {
        let index = self.operations;
        self.operations += 1;
        if self.fail_at == Some(index) {
            return Err(CanvasError::Backend(format!(
                "injected failure at operation {index}"
            )));
        }
        Ok(())
    }

    fn push(&mut self, op: DrawOp) {
        self.pages[self.current].ops.push(op);
    }
}

impl Canvas for RecordingCanvas {
    fn page_size(&self) -> PageSize {
        self.size
    }

    fn set_font_size(&mut self, size: f32) -> Result<(), CanvasError> {
        self.tick()?;
        check_font_size(size)?;
        self.font_size = size;
        Ok(())
    }

    fn set_font_weight(&mut self, weight: FontWeight) -> Result<(), CanvasError> {
        self.tick()?;
        self.weight = weight;
        Ok(())
    }

    fn set_text_color(&mut self, color: Rgb) -> Result<(), CanvasError> {
        self.tick()?;
        self.text_color = color;
        Ok(())
    }

    fn set_fill_color(&mut self, color: Rgb) -> Result<(), CanvasError> {
        self.tick()?;
        self.fill_color = color;
        Ok(())
    }

    fn set_draw_color(&mut self, color: Rgb) -> Result<(), CanvasError> {
        self.tick()?;
        self.draw_color = color;
        Ok(())
    }

    fn set_line_width(&mut self, width: f32) -> Result<(), CanvasError> {
        self.tick()?;
        check_line_width(width)
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str) -> Result<(), CanvasError> {
        self.tick()?;
        check_point(self.size, x, y)?;
        self.push(DrawOp::Text(TextRecord {
            x,
            y,
            text: text.to_owned(),
            size: self.font_size,
            weight: self.weight,
            color: self.text_color,
        }));
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, mode: PaintMode) -> Result<(), CanvasError> {
        self.tick()?;
        check_rect(self.size, &rect)?;
        self.push(DrawOp::Rect {
            rect,
            mode,
            fill: self.fill_color,
            stroke: self.draw_color,
        });
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), CanvasError> {
        self.tick()?;
        self.pages.push(PageRecord::default());
        self.current = self.pages.len() - 1;
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn select_page(&mut self, index: usize) -> Result<(), CanvasError> {
        self.tick()?;
        if index >= self.pages.len() {
            return Err(CanvasError::PageOutOfRange {
                index,
                count: self.pages.len(),
            });
        }
        self.current = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_text_with_active_style() {
        let mut canvas = RecordingCanvas::new(PageSize::A4);
        canvas.set_font_size(11.0).unwrap();
        canvas.set_font_weight(FontWeight::Bold).unwrap();
        canvas.set_text_color(Rgb::new(1, 38, 153)).unwrap();
        canvas.draw_text(20.0, 30.0, "Heading").unwrap();

        let record = canvas.pages()[0].texts().next().expect("text recorded");
        assert_eq!(record.text, "Heading");
        assert_eq!(record.size, 11.0);
        assert_eq!(record.weight, FontWeight::Bold);
        assert_eq!(record.color, Rgb::new(1, 38, 153));
    }

    #[test]
    fn draws_land_on_the_selected_page() {
        let mut canvas = RecordingCanvas::new(PageSize::A4);
        canvas.new_page().unwrap();
        canvas.draw_text(20.0, 30.0, "second").unwrap();
        canvas.select_page(0).unwrap();
        canvas.draw_text(20.0, 30.0, "first").unwrap();

        assert!(canvas.pages()[0].contains_text("first"));
        assert!(canvas.pages()[1].contains_text("second"));
        assert!(!canvas.pages()[0].contains_text("second"));
    }

    #[test]
    fn injected_failure_hits_the_requested_operation() {
        let mut canvas = RecordingCanvas::new(PageSize::A4).failing_at(1);
        assert!(canvas.set_font_size(10.0).is_ok());
        assert!(matches!(
            canvas.draw_text(20.0, 30.0, "boom"),
            Err(CanvasError::Backend(_))
        ));
        assert!(canvas.pages()[0].ops().is_empty());
        assert_eq!(canvas.operations(), 2);
    }
}
