//! Document outline injection built on top of `lopdf`.
//!
//! `printpdf` writes no outline, so the rendered bytes are reopened and a flat `/Outlines` tree
//! is attached to the catalog, one entry per headed section.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document, Object, ObjectId};
use thiserror::Error;

use crate::model::Section;

/// Errors that can occur while embedding an outline into a rendered document.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// The PDF bytes could not be parsed or re-serialised by `lopdf`.
    #[error("failed to process PDF bytes: {0}")]
    Parse(#[from] lopdf::Error),
    /// Writing the updated document failed.
    #[error("failed to write PDF bytes: {0}")]
    Write(#[from] std::io::Error),
    /// The trailer has no usable `/Root` catalog.
    #[error("PDF catalog entry is missing or is not a dictionary")]
    MissingCatalog,
    /// A section points at a page the document does not have.
    #[error("section '{title}' refers to missing page {page}")]
    MissingPage {
        /// Title of the offending section.
        title: String,
        /// One-based page number that could not be resolved.
        page: usize,
    },
}

struct OutlineEntry {
    object_id: ObjectId,
    page_ref: ObjectId,
    title: String,
    name: Option<String>,
}

/// Adds one outline entry per section that reports a first page.
///
/// `section_pages` is parallel to `sections`; sections without a page (headless cover rows) are
/// skipped. When nothing qualifies the input is returned unchanged.
pub fn apply_section_bookmarks(
    pdf_bytes: &[u8],
    sections: &[Section],
    section_pages: &[Option<usize>],
) -> Result<Vec<u8>, BookmarkError> {
    let mut document = Document::load_mem(pdf_bytes)?;
    let pages = document.get_pages();

    let entries = collect_entries(&mut document, sections, section_pages, &pages)?;
    if entries.is_empty() {
        return Ok(pdf_bytes.to_vec());
    }

    let outlines_id = document.new_object_id();
    for (index, entry) in entries.iter().enumerate() {
        let previous = index.checked_sub(1).map(|i| entries[i].object_id);
        let next = entries.get(index + 1).map(|e| e.object_id);
        document.objects.insert(
            entry.object_id,
            Object::Dictionary(outline_item(entry, outlines_id, previous, next)),
        );
    }

    let mut root = Dictionary::new();
    root.set("Type", Object::Name(b"Outlines".to_vec()));
    root.set("Count", Object::Integer(entries.len() as i64));
    if let (Some(first), Some(last)) = (entries.first(), entries.last()) {
        root.set("First", Object::Reference(first.object_id));
        root.set("Last", Object::Reference(last.object_id));
    }
    document.objects.insert(outlines_id, Object::Dictionary(root));

    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| BookmarkError::MissingCatalog)?;
    document
        .objects
        .get_mut(&catalog_id)
        .and_then(|object| object.as_dict_mut().ok())
        .ok_or(BookmarkError::MissingCatalog)?
        .set("Outlines", Object::Reference(outlines_id));

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

fn collect_entries(
    document: &mut Document,
    sections: &[Section],
    section_pages: &[Option<usize>],
    pages: &BTreeMap<u32, ObjectId>,
) -> Result<Vec<OutlineEntry>, BookmarkError> {
    let mut entries = Vec::new();
    for (section, page) in sections.iter().zip(section_pages) {
        let Some(page) = *page else {
            continue;
        };
        let page_ref = u32::try_from(page)
            .ok()
            .and_then(|number| pages.get(&number).copied())
            .ok_or_else(|| BookmarkError::MissingPage {
                title: section.title().to_string(),
                page,
            })?;

        entries.push(OutlineEntry {
            object_id: document.new_object_id(),
            page_ref,
            title: section.title().to_string(),
            name: section.identifier().map(str::to_string),
        });
    }
    Ok(entries)
}

fn outline_item(
    entry: &OutlineEntry,
    parent: ObjectId,
    previous: Option<ObjectId>,
    next: Option<ObjectId>,
) -> Dictionary {
    let mut dictionary = Dictionary::new();
    dictionary.set("Title", Object::string_literal(entry.title.as_str()));
    dictionary.set(
        "Dest",
        Object::Array(vec![
            Object::Reference(entry.page_ref),
            Object::Name(b"Fit".to_vec()),
        ]),
    );
    dictionary.set("Parent", Object::Reference(parent));
    if let Some(name) = &entry.name {
        dictionary.set("NM", Object::string_literal(name.as_str()));
    }
    if let Some(previous) = previous {
        dictionary.set("Prev", Object::Reference(previous));
    }
    if let Some(next) = next {
        dictionary.set("Next", Object::Reference(next));
    }
    dictionary
}
