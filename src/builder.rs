//! Turns a [`DocumentKind`] into a finished, paginated document.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use log::{debug, info};

use crate::canvas::{Canvas, PdfCanvas, RecordingCanvas};
use crate::content::{self, checklist, guide, template};
use crate::error::GuideError;
use crate::layout::{Composer, LayoutSummary, PageGeometry};
use crate::model::Section;

/// Format of the "Generated:" cover line, e.g. `3/7/2025`.
pub const DATE_FORMAT: &str = "%-m/%-d/%Y";

/// The three downloadable documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Nine-page step-by-step guide.
    Full,
    /// Two-page printable checklist.
    Checklist,
    /// Three-page fill-in template.
    Template,
}

impl DocumentKind {
    /// Every kind in download-button order.
    pub const ALL: [DocumentKind; 3] = [Self::Full, Self::Checklist, Self::Template];

    /// Filename offered for the artifact.
    pub fn filename(self) -> &'static str {
        match self {
            Self::Full => "MCF-FSA-ID-Guide.pdf",
            Self::Checklist => "MCF-FSA-ID-Checklist.pdf",
            Self::Template => "MCF-FSA-ID-Template.pdf",
        }
    }

    /// Title stored in the PDF metadata.
    pub fn title(self) -> &'static str {
        match self {
            Self::Full => "FSA ID Creation Guide",
            Self::Checklist => "FSA ID Creation Checklist",
            Self::Template => "FSA ID Creation Template",
        }
    }

    /// Fixed section table of the document.
    pub fn sections(self, generated: &str) -> Vec<Section> {
        match self {
            Self::Full => guide::sections(generated),
            Self::Checklist => checklist::sections(generated),
            Self::Template => template::sections(generated),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Full => "full",
            Self::Checklist => "checklist",
            Self::Template => "template",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown document name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown document kind '{0}' (expected full, checklist or template)")]
pub struct UnknownKind(pub String);

impl FromStr for DocumentKind {
    type Err = UnknownKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "full" | "guide" => Ok(Self::Full),
            "checklist" => Ok(Self::Checklist),
            "template" => Ok(Self::Template),
            _ => Err(UnknownKind(value.to_string())),
        }
    }
}

/// A rendered document ready to be delivered.
#[derive(Clone, Debug)]
pub struct RenderedDocument {
    /// PDF bytes.
    pub bytes: Vec<u8>,
    /// Filename derived from the kind.
    pub filename: &'static str,
    /// Number of pages.
    pub page_count: usize,
    /// First page of each section with a heading, parallel to the section table.
    pub section_pages: Vec<Option<usize>>,
}

/// Builds one document kind.
///
/// The builder holds no shared state; every call lays the document out from scratch on a fresh
/// canvas.
#[derive(Clone, Debug)]
pub struct DocumentBuilder {
    kind: DocumentKind,
    generated: Option<NaiveDate>,
    geometry: PageGeometry,
    #[cfg(feature = "bookmarks")]
    bookmarks: bool,
}

impl DocumentBuilder {
    /// Creates a builder for `kind` dated today.
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            generated: None,
            geometry: PageGeometry::A4,
            #[cfg(feature = "bookmarks")]
            bookmarks: false,
        }
    }

    /// Prints `date` on the cover instead of today's date.
    pub fn generated_on(mut self, date: NaiveDate) -> Self {
        self.generated = Some(date);
        self
    }

    /// Adds a PDF outline with one entry per headed section.
    #[cfg(feature = "bookmarks")]
    pub fn with_bookmarks(mut self, enabled: bool) -> Self {
        self.bookmarks = enabled;
        self
    }

    /// Kind being built.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Section table with the cover date filled in.
    pub fn sections(&self) -> Vec<Section> {
        let date = self.generated.unwrap_or_else(|| Local::now().date_naive());
        self.kind
            .sections(&date.format(DATE_FORMAT).to_string())
    }

    /// Lays the document out on any canvas.
    ///
    /// The canvas must be fresh: the masthead is drawn on its current page.
    pub fn render_with<C: Canvas>(
        &self,
        canvas: &mut C,
        sections: &[Section],
    ) -> Result<LayoutSummary, GuideError> {
        let mut composer = Composer::new(canvas, self.geometry);
        for (line, y) in content::masthead() {
            composer.place_line(&line, y)?;
        }
        composer.move_to(content::BODY_START);

        for section in sections {
            composer.write_section(section)?;
        }
        composer.stamp_footer(&content::footer())?;

        let summary = composer.finish();
        debug!(
            "Laid out {} on {} page(s), {} overflow break(s)",
            self.kind, summary.page_count, summary.overflow_breaks
        );
        Ok(summary)
    }

    /// Renders into a [`RecordingCanvas`] without producing PDF bytes.
    pub fn preview(&self) -> Result<(RecordingCanvas, LayoutSummary), GuideError> {
        let mut canvas = RecordingCanvas::new(self.geometry.size);
        let summary = self.render_with(&mut canvas, &self.sections())?;
        Ok((canvas, summary))
    }

    /// Renders the PDF.
    pub fn build(&self) -> Result<RenderedDocument, GuideError> {
        let sections = self.sections();
        let mut canvas = PdfCanvas::new(self.kind.title(), self.geometry.size)?;
        let summary = self.render_with(&mut canvas, &sections)?;
        let bytes = canvas.finish()?;

        #[cfg(feature = "bookmarks")]
        let bytes = if self.bookmarks {
            crate::bookmarks::apply_section_bookmarks(&bytes, &sections, &summary.section_pages)?
        } else {
            bytes
        };

        info!(
            "Rendered {} ({} pages, {} bytes)",
            self.kind.filename(),
            summary.page_count,
            bytes.len()
        );
        Ok(RenderedDocument {
            bytes,
            filename: self.kind.filename(),
            page_count: summary.page_count,
            section_pages: summary.section_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasError;

    fn fixed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    #[test]
    fn parses_kind_names() {
        assert_eq!("full".parse::<DocumentKind>(), Ok(DocumentKind::Full));
        assert_eq!("Checklist".parse::<DocumentKind>(), Ok(DocumentKind::Checklist));
        assert_eq!("template".parse::<DocumentKind>(), Ok(DocumentKind::Template));
        assert!("brochure".parse::<DocumentKind>().is_err());
        for kind in DocumentKind::ALL {
            assert_eq!(kind.to_string().parse::<DocumentKind>(), Ok(kind));
        }
    }

    #[test]
    fn cover_date_uses_short_us_format() {
        let builder = DocumentBuilder::new(DocumentKind::Checklist).generated_on(fixed_date());
        let (canvas, _) = builder.preview().unwrap();
        assert!(canvas.pages()[0].contains_text("Generated: 3/7/2025"));
    }

    #[test]
    fn previews_have_the_expected_page_counts() {
        for (kind, pages) in [
            (DocumentKind::Full, 9),
            (DocumentKind::Checklist, 2),
            (DocumentKind::Template, 3),
        ] {
            let (canvas, summary) = DocumentBuilder::new(kind)
                .generated_on(fixed_date())
                .preview()
                .unwrap();
            assert_eq!(summary.page_count, pages, "{kind}");
            assert_eq!(canvas.pages().len(), pages, "{kind}");
            assert_eq!(summary.overflow_breaks, 0, "{kind}");
        }
    }

    #[test]
    fn canvas_failure_becomes_render_error() {
        let builder = DocumentBuilder::new(DocumentKind::Template).generated_on(fixed_date());
        let mut canvas = RecordingCanvas::new(PageGeometry::A4.size).failing_at(40);
        let err = builder
            .render_with(&mut canvas, &builder.sections())
            .unwrap_err();
        assert!(matches!(err, GuideError::Render(CanvasError::Backend(_))));
    }
}
