//! [`Canvas`] implementation that emits a PDF document through `printpdf`.

use log::debug;
use printpdf::path::PaintMode as PdfPaintMode;
use printpdf::{Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use super::{
    check_font_size, check_line_width, check_point, check_rect, Canvas, CanvasError, PageSize,
    PaintMode, Rect,
};
use crate::fonts;
use crate::style::{FontWeight, Rgb, MM_PER_PT};

const LAYER_NAME: &str = "Content";

fn pdf_color(color: Rgb) -> Color {
    let (r, g, b) = color.to_unit();
    Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

fn backend_error(err: printpdf::Error) -> CanvasError {
    CanvasError::Backend(err.to_string())
}

/// Drawing surface backed by a `printpdf` document using the builtin Helvetica fonts.
pub struct PdfCanvas {
    document: PdfDocumentReference,
    layers: Vec<PdfLayerReference>,
    current: usize,
    size: PageSize,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    font_size: f32,
    weight: FontWeight,
    text_color: Rgb,
    fill_color: Rgb,
    draw_color: Rgb,
    line_width: f32,
}

impl PdfCanvas {
    /// Creates a document titled `title` with a single empty page of the given size.
    pub fn new(title: &str, size: PageSize) -> Result<Self, CanvasError> {
        let (document, page, layer) =
            PdfDocument::new(title, Mm(size.width), Mm(size.height), LAYER_NAME);
        let first_layer = document.get_page(page).get_layer(layer);

        let regular = document
            .add_builtin_font(fonts::builtin_font(FontWeight::Normal))
            .map_err(backend_error)?;
        let bold = document
            .add_builtin_font(fonts::builtin_font(FontWeight::Bold))
            .map_err(backend_error)?;

        Ok(Self {
            document,
            layers: vec![first_layer],
            current: 0,
            size,
            regular,
            bold,
            font_size: 16.0,
            weight: FontWeight::Normal,
            text_color: Rgb::default(),
            fill_color: Rgb::default(),
            draw_color: Rgb::default(),
            line_width: 0.2,
        })
    }

    /// Serializes the document and returns the PDF bytes.
    pub fn finish(self) -> Result<Vec<u8>, CanvasError> {
        debug!("Serializing PDF with {} page(s)", self.layers.len());
        self.document.save_to_bytes().map_err(backend_error)
    }

    fn layer(&self) -> &PdfLayerReference {
        // `current` is only ever set to an index of an existing layer.
        &self.layers[self.current]
    }

    fn font(&self) -> &IndirectFontRef {
        match self.weight {
            FontWeight::Normal => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }

    /// Converts a top-left based y coordinate into PDF user space.
    fn flip(&self, y: f32) -> Mm {
        Mm(self.size.height - y)
    }
}

impl Canvas for PdfCanvas {
    fn page_size(&self) -> PageSize {
        self.size
    }

    fn set_font_size(&mut self, size: f32) -> Result<(), CanvasError> {
        check_font_size(size)?;
        self.font_size = size;
        Ok(())
    }

    fn set_font_weight(&mut self, weight: FontWeight) -> Result<(), CanvasError> {
        self.weight = weight;
        Ok(())
    }

    fn set_text_color(&mut self, color: Rgb) -> Result<(), CanvasError> {
        self.text_color = color;
        Ok(())
    }

    fn set_fill_color(&mut self, color: Rgb) -> Result<(), CanvasError> {
        self.fill_color = color;
        Ok(())
    }

    fn set_draw_color(&mut self, color: Rgb) -> Result<(), CanvasError> {
        self.draw_color = color;
        Ok(())
    }

    fn set_line_width(&mut self, width: f32) -> Result<(), CanvasError> {
        check_line_width(width)?;
        self.line_width = width;
        Ok(())
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str) -> Result<(), CanvasError> {
        check_point(self.size, x, y)?;
        // PDF text is painted with the fill colour, which rectangles share.
        let layer = self.layer();
        layer.set_fill_color(pdf_color(self.text_color));
        layer.use_text(text, self.font_size, Mm(x), self.flip(y), self.font());
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, mode: PaintMode) -> Result<(), CanvasError> {
        check_rect(self.size, &rect)?;
        let layer = self.layer();
        layer.set_fill_color(pdf_color(self.fill_color));
        layer.set_outline_color(pdf_color(self.draw_color));
        // printpdf takes the outline thickness in points.
        layer.set_outline_thickness(self.line_width / MM_PER_PT);

        let mode = match mode {
            PaintMode::Fill => PdfPaintMode::Fill,
            PaintMode::Stroke => PdfPaintMode::Stroke,
            PaintMode::FillStroke => PdfPaintMode::FillStroke,
        };
        let shape = printpdf::Rect::new(
            Mm(rect.x),
            self.flip(rect.bottom()),
            Mm(rect.x + rect.width),
            self.flip(rect.y),
        )
        .with_mode(mode);
        layer.add_rect(shape);
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), CanvasError> {
        let (page, layer) = self
            .document
            .add_page(Mm(self.size.width), Mm(self.size.height), LAYER_NAME);
        self.layers.push(self.document.get_page(page).get_layer(layer));
        self.current = self.layers.len() - 1;
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.layers.len()
    }

    fn select_page(&mut self, index: usize) -> Result<(), CanvasError> {
        if index >= self.layers.len() {
            return Err(CanvasError::PageOutOfRange {
                index,
                count: self.layers.len(),
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
    fn tracks_pages_and_selection() {
        let mut canvas = PdfCanvas::new("test", PageSize::A4).expect("canvas");
        assert_eq!(canvas.page_count(), 1);
        canvas.new_page().expect("page");
        canvas.new_page().expect("page");
        assert_eq!(canvas.page_count(), 3);
        assert!(canvas.select_page(0).is_ok());
        assert_eq!(
            canvas.select_page(3),
            Err(CanvasError::PageOutOfRange { index: 3, count: 3 })
        );
    }

    #[test]
    fn rejects_text_below_the_page() {
        let mut canvas = PdfCanvas::new("test", PageSize::A4).expect("canvas");
        assert!(canvas.draw_text(20.0, 310.0, "overflow").is_err());
    }

    #[test]
    fn finished_document_is_a_pdf() {
        let mut canvas = PdfCanvas::new("test", PageSize::A4).expect("canvas");
        canvas.set_font_size(12.0).expect("size");
        canvas.draw_text(20.0, 30.0, "Hello").expect("text");
        canvas
            .draw_rect(Rect::new(15.0, 40.0, 180.0, 20.0), PaintMode::FillStroke)
            .expect("rect");
        let bytes = canvas.finish().expect("bytes");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
