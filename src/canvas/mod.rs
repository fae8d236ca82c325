//! Page-oriented drawing surfaces.
//!
//! The [`Canvas`] trait is the only seam between the layout composer and the output format.  All
//! coordinates are millimetres measured from the top-left corner of the current page, with `y`
//! growing downwards; text is positioned by its baseline.  Every operation is fallible so a
//! backend can reject invalid input, and the composer propagates the first failure unchanged.

mod pdf;
mod recording;

pub use pdf::PdfCanvas;
pub use recording::{DrawOp, PageRecord, RecordingCanvas, TextRecord};

use thiserror::Error;

use crate::style::{FontWeight, Rgb};

/// Physical page size in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSize {
    /// Page width.
    pub width: f32,
    /// Page height.
    pub height: f32,
}

impl PageSize {
    /// ISO A4 portrait.
    pub const A4: PageSize = PageSize {
        width: 210.0,
        height: 297.0,
    };

    fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and extent.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge of the rectangle.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// How a rectangle is painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintMode {
    /// Filled with the current fill colour.
    Fill,
    /// Outlined with the current draw colour and line width.
    Stroke,
    /// Filled and outlined.
    FillStroke,
}

/// Failures reported by canvas implementations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CanvasError {
    /// A coordinate is not finite or lies outside the page.
    #[error("coordinate ({x}, {y}) lies outside the {width}x{height} mm page")]
    InvalidCoordinate {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
        /// Page width.
        width: f32,
        /// Page height.
        height: f32,
    },
    /// The requested font size is not a positive number.
    #[error("invalid font size {0}")]
    InvalidFontSize(f32),
    /// The requested line width is not a positive number.
    #[error("invalid line width {0}")]
    InvalidLineWidth(f32),
    /// A page index past the last page was selected.
    #[error("page {index} does not exist (document has {count} pages)")]
    PageOutOfRange {
        /// Zero-based page index requested.
        index: usize,
        /// Number of pages in the document.
        count: usize,
    },
    /// A row or box is taller than the writable area of an empty page.
    #[error("{height} mm does not fit in the {capacity} mm available on a page")]
    BlockTooTall {
        /// Height that was requested.
        height: f32,
        /// Space between the top margin and the content bottom.
        capacity: f32,
    },
    /// The underlying drawing library reported an error.
    #[error("drawing backend failed: {0}")]
    Backend(String),
}

/// Drawing operations consumed by the layout composer.
///
/// Implementations keep the current font size, weight, colours and line width as state; the
/// setters change that state for every subsequent draw on any page.
pub trait Canvas {
    /// Size of every page of the document.
    fn page_size(&self) -> PageSize;

    /// Sets the font size in points for subsequent text.
    fn set_font_size(&mut self, size: f32) -> Result<(), CanvasError>;

    /// Switches between regular and bold text.
    fn set_font_weight(&mut self, weight: FontWeight) -> Result<(), CanvasError>;

    /// Sets the colour used for text.
    fn set_text_color(&mut self, color: Rgb) -> Result<(), CanvasError>;

    /// Sets the colour used to fill rectangles.
    fn set_fill_color(&mut self, color: Rgb) -> Result<(), CanvasError>;

    /// Sets the colour used to outline rectangles.
    fn set_draw_color(&mut self, color: Rgb) -> Result<(), CanvasError>;

    /// Sets the outline width in millimetres.
    fn set_line_width(&mut self, width: f32) -> Result<(), CanvasError>;

    /// Places `text` with its baseline starting at `(x, y)` on the current page.
    fn draw_text(&mut self, x: f32, y: f32, text: &str) -> Result<(), CanvasError>;

    /// Paints a rectangle on the current page.
    fn draw_rect(&mut self, rect: Rect, mode: PaintMode) -> Result<(), CanvasError>;

    /// Appends a page and makes it current.
    fn new_page(&mut self) -> Result<(), CanvasError>;

    /// Number of pages created so far.
    fn page_count(&self) -> usize;

    /// Makes the page with the zero-based `index` current.
    fn select_page(&mut self, index: usize) -> Result<(), CanvasError>;
}

pub(crate) fn check_point(size: PageSize, x: f32, y: f32) -> Result<(), CanvasError> {
    if x.is_finite() && y.is_finite() && size.contains(x, y) {
        Ok(())
    } else {
        Err(CanvasError::InvalidCoordinate {
            x,
            y,
            width: size.width,
            height: size.height,
        })
    }
}

pub(crate) fn check_rect(size: PageSize, rect: &Rect) -> Result<(), CanvasError> {
    check_point(size, rect.x, rect.y)?;
    check_point(size, rect.x + rect.width, rect.bottom())
}

pub(crate) fn check_font_size(size: f32) -> Result<(), CanvasError> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(CanvasError::InvalidFontSize(size))
    }
}

pub(crate) fn check_line_width(width: f32) -> Result<(), CanvasError> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(CanvasError::InvalidLineWidth(width))
    }
}
