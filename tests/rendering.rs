use chrono::NaiveDate;
use fsa_guide::builder::{DocumentBuilder, DocumentKind, RenderedDocument};
use fsa_guide::canvas::RecordingCanvas;
use fsa_guide::content::{self, checklist};
use fsa_guide::layout::PageGeometry;
use fsa_guide::session::{DirectorySink, GenerationSession, Status};
use fsa_guide::GuideError;
use lopdf::content::Content;
use lopdf::Document;
use sha2::{Digest, Sha256};

fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid date")
}

fn builder(kind: DocumentKind) -> DocumentBuilder {
    DocumentBuilder::new(kind).generated_on(fixed_date())
}

fn render(kind: DocumentKind) -> RenderedDocument {
    builder(kind).build().expect("render document")
}

/// Hashes the decoded page content streams, which excludes the random document id and the
/// metadata timestamps `printpdf` embeds.
fn content_digest(bytes: &[u8]) -> Vec<u8> {
    let document = Document::load_mem(bytes).expect("parse rendered pdf");
    let mut hasher = Sha256::new();
    for (_, page_id) in document.get_pages() {
        let content = document
            .get_page_content(page_id)
            .expect("page content stream");
        hasher.update(&content);
    }
    hasher.finalize().to_vec()
}

/// Operands of every `w` (line width) operator on one-based `page`, in points.
fn line_widths(bytes: &[u8], page: u32) -> Vec<f32> {
    let document = Document::load_mem(bytes).expect("parse rendered pdf");
    let page_id = document.get_pages()[&page];
    let content = document
        .get_page_content(page_id)
        .expect("page content stream");
    Content::decode(&content)
        .expect("decode content stream")
        .operations
        .into_iter()
        .filter(|operation| operation.operator == "w")
        .filter_map(|operation| operation.operands.first().and_then(|o| o.as_float().ok()))
        .collect()
}

#[test]
fn page_counts_are_fixed_per_kind() {
    for (kind, expected) in [
        (DocumentKind::Full, 9),
        (DocumentKind::Checklist, 2),
        (DocumentKind::Template, 3),
    ] {
        let rendered = render(kind);
        assert!(rendered.bytes.starts_with(b"%PDF"), "{kind}");
        assert_eq!(rendered.page_count, expected, "{kind}");

        let document = Document::load_mem(&rendered.bytes).expect("parse rendered pdf");
        assert_eq!(document.get_pages().len(), expected, "{kind}");
    }
}

#[test]
fn filenames_match_the_download_names() {
    assert_eq!(render(DocumentKind::Full).filename, "MCF-FSA-ID-Guide.pdf");
    assert_eq!(
        render(DocumentKind::Checklist).filename,
        "MCF-FSA-ID-Checklist.pdf"
    );
    assert_eq!(
        render(DocumentKind::Template).filename,
        "MCF-FSA-ID-Template.pdf"
    );
}

#[test]
fn repeated_builds_draw_identical_pages() {
    for kind in DocumentKind::ALL {
        let first = content_digest(&render(kind).bytes);
        let second = content_digest(&render(kind).bytes);
        assert_eq!(first, second, "{kind}");
    }

    let other_day = DocumentBuilder::new(DocumentKind::Checklist)
        .generated_on(NaiveDate::from_ymd_opt(2025, 12, 24).expect("valid date"))
        .build()
        .expect("render document");
    assert_ne!(
        content_digest(&other_day.bytes),
        content_digest(&render(DocumentKind::Checklist).bytes)
    );
}

#[test]
fn footer_is_stamped_on_every_page() {
    for kind in DocumentKind::ALL {
        let (canvas, _) = builder(kind).preview().expect("preview");
        for (index, page) in canvas.pages().iter().enumerate() {
            let footers: Vec<_> = page
                .texts()
                .filter(|text| text.text == content::FOOTER)
                .collect();
            assert_eq!(footers.len(), 1, "{kind} page {}", index + 1);
            assert_eq!(footers[0].y, PageGeometry::A4.footer_y);
        }
    }
}

#[test]
fn nothing_but_the_footer_reaches_below_the_content_bottom() {
    let bottom = PageGeometry::A4.content_bottom;
    for kind in DocumentKind::ALL {
        let (canvas, _) = builder(kind).preview().expect("preview");
        for page in canvas.pages() {
            for text in page.texts().filter(|text| text.text != content::FOOTER) {
                assert!(text.y <= bottom, "{kind}: '{}' at {}", text.text, text.y);
            }
            for rect in page.rects() {
                assert!(rect.bottom() <= bottom, "{kind}: box ends at {}", rect.bottom());
            }
        }
    }
}

#[test]
fn masthead_only_appears_on_the_first_page() {
    let (canvas, _) = builder(DocumentKind::Full).preview().expect("preview");
    assert!(canvas.pages()[0].contains_text(content::ORGANIZATION));
    assert!(canvas.pages()[0].contains_text(content::TAGLINE));
    assert!(canvas.pages()[1..]
        .iter()
        .all(|page| !page.contains_text(content::ORGANIZATION)));
}

#[test]
fn full_guide_places_one_topic_per_page() {
    let (canvas, summary) = builder(DocumentKind::Full).preview().expect("preview");
    assert!(canvas.pages()[1].contains_text("Table of Contents"));
    let headed: Vec<usize> = summary.section_pages.iter().flatten().copied().collect();
    assert_eq!(headed, (2..=9).collect::<Vec<_>>());
    assert!(canvas.pages()[8].contains_text("7. Important Reminders"));
}

#[test]
fn checklist_end_to_end() {
    let rendered = render(DocumentKind::Checklist);
    assert_eq!(rendered.page_count, 2);

    let (canvas, _) = builder(DocumentKind::Checklist)
        .preview()
        .expect("preview");
    let pages = canvas.pages();
    assert_eq!(pages.len(), 2);

    assert!(pages[0].contains_text("BEFORE YOU START"));
    let prerequisites = checklist::PREREQUISITES
        .iter()
        .filter(|item| pages[0].contains_text(item))
        .count();
    assert_eq!(prerequisites, 6);

    assert!(pages[1].contains_text("SECURITY REMINDERS"));
    assert_eq!(pages[1].count_prefixed(checklist::CHECKBOX), 5);
    for item in checklist::SECURITY_CHECKS {
        assert!(pages[1].contains_text(item), "{item}");
    }
}

#[test]
fn box_outlines_are_converted_from_millimetres_to_points() {
    // 1 mm warning border on the template cover, 0.5 mm brand border on the checklist cover.
    for (kind, millimetres) in [(DocumentKind::Template, 1.0), (DocumentKind::Checklist, 0.5)] {
        let expected = millimetres * 72.0 / 25.4;
        let widths = line_widths(&render(kind).bytes, 1);
        assert!(
            widths.iter().any(|w| (w - expected).abs() < 1e-2),
            "{kind}: expected {expected:.4} pt among {widths:?}"
        );
    }
}

#[test]
fn canvas_failure_never_reaches_the_sink() {
    let builder = builder(DocumentKind::Template);
    let sections = builder.sections();

    let mut reference = RecordingCanvas::new(PageGeometry::A4.size);
    builder
        .render_with(&mut reference, &sections)
        .expect("reference layout");
    let total = reference.operations();

    let dir = tempfile::tempdir().expect("temp dir");
    let mut sink = DirectorySink::new(dir.path());
    let session = GenerationSession::new();

    for failing in [0, total / 2, total - 1] {
        let result = session.run(&mut sink, || {
            let mut canvas = RecordingCanvas::new(PageGeometry::A4.size).failing_at(failing);
            let summary = builder.render_with(&mut canvas, &sections)?;
            Ok(RenderedDocument {
                bytes: Vec::new(),
                filename: builder.kind().filename(),
                page_count: summary.page_count,
                section_pages: summary.section_pages,
            })
        });

        assert!(matches!(result, Err(GuideError::Render(_))), "op {failing}");
        assert!(!session.is_busy());
        assert!(matches!(session.status(), Status::Failed(_)));
    }

    let written = std::fs::read_dir(dir.path()).expect("list output").count();
    assert_eq!(written, 0);
}

#[test]
fn session_writes_every_document() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut sink = DirectorySink::new(dir.path());
    let session = GenerationSession::new();

    for kind in DocumentKind::ALL {
        let path = session
            .generate(&builder(kind), &mut sink)
            .expect("generate");
        assert_eq!(path, dir.path().join(kind.filename()));
        assert_eq!(session.status(), Status::Saved(path.clone()));
        let bytes = std::fs::read(&path).expect("read artifact");
        assert!(bytes.starts_with(b"%PDF"));
    }
}

#[cfg(feature = "bookmarks")]
#[test]
fn full_guide_outline_lists_contents_and_topics() {
    let rendered = builder(DocumentKind::Full)
        .with_bookmarks(true)
        .build()
        .expect("render with bookmarks");
    let document = Document::load_mem(&rendered.bytes).expect("parse rendered pdf");

    let outlines_id = document
        .catalog()
        .and_then(|catalog| catalog.get(b"Outlines"))
        .and_then(|object| object.as_reference())
        .expect("outline root");
    let count = document
        .get_object(outlines_id)
        .and_then(|object| object.as_dict())
        .and_then(|outlines| outlines.get(b"Count"))
        .and_then(|object| object.as_i64())
        .expect("outline count");
    assert_eq!(count, 8);
}
