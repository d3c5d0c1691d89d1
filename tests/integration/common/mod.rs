//! Integration test helpers.
//!
//! Fixtures are built programmatically with `lopdf` and the `image` crate,
//! so the tests need no binary files checked in.

#![allow(dead_code)]

use lopdf::{Document, Object, ObjectId, dictionary};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use pdfbind::config::{Config, FileFilter};

/// Write a minimal valid PDF with the given number of pages.
pub fn write_pdf(path: &Path, pages: usize) {
    let mut doc = document_with_pages(pages);
    doc.save(path).expect("failed to save fixture PDF");
}

/// Write a PDF that carries its own outline (one bookmark per page).
pub fn write_pdf_with_outline(path: &Path, pages: usize) {
    let mut doc = document_with_pages(pages);

    let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
    let outlines_id = doc.new_object_id();
    let item_ids: Vec<ObjectId> = page_ids.iter().map(|_| doc.new_object_id()).collect();

    for (index, (&page_id, &item_id)) in page_ids.iter().zip(&item_ids).enumerate() {
        let mut item = dictionary! {
            "Title" => Object::string_literal(format!("Section {}", index + 1)),
            "Parent" => Object::Reference(outlines_id),
            "Dest" => vec![
                Object::Reference(page_id),
                Object::Name(b"XYZ".to_vec()),
                Object::Null,
                Object::Null,
                Object::Null,
            ],
        };
        if index > 0 {
            item.set("Prev", Object::Reference(item_ids[index - 1]));
        }
        if index + 1 < item_ids.len() {
            item.set("Next", Object::Reference(item_ids[index + 1]));
        }
        doc.objects.insert(item_id, Object::Dictionary(item));
    }

    doc.objects.insert(
        outlines_id,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "Count" => item_ids.len() as i64,
            "First" => Object::Reference(item_ids[0]),
            "Last" => Object::Reference(item_ids[item_ids.len() - 1]),
        }),
    );

    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(|r| r.as_reference())
        .expect("fixture has a catalog");
    if let Ok(Object::Dictionary(catalog)) = doc.get_object_mut(catalog_id) {
        catalog.set("Outlines", Object::Reference(outlines_id));
    }

    doc.save(path).expect("failed to save fixture PDF");
}

/// Write a solid-color PNG.
pub fn write_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([30, 60, 90]));
    img.save(path).expect("failed to save fixture PNG");
}

fn document_with_pages(pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();
    for _ in 0..pages {
        let page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        kids.push(Object::Reference(doc.add_object(page)));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Default config for a test run.
pub fn make_config(input: &Path, output: &Path) -> Config {
    Config {
        input_dir: input.to_path_buf(),
        output: output.to_path_buf(),
        filter: FileFilter::default(),
        verbose: false,
        quiet: true,
        json: false,
    }
}

/// One bookmark as read back from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    /// Nesting depth, 0 for top-level entries.
    pub depth: usize,
    /// Bookmark title.
    pub title: String,
    /// 1-based page number the bookmark points at, or 0 when it has no
    /// destination (folder bookmarks).
    pub page: u32,
}

/// Read the outline back out of a document, depth-first in display order.
pub fn collect_outline(doc: &Document) -> Vec<Bookmark> {
    let mut page_numbers: HashMap<ObjectId, u32> = HashMap::new();
    for (number, id) in doc.get_pages() {
        page_numbers.insert(id, number);
    }

    let mut bookmarks = Vec::new();

    let Ok(catalog) = doc.catalog() else {
        return bookmarks;
    };
    let Ok(outlines_ref) = catalog.get(b"Outlines") else {
        return bookmarks;
    };
    let Ok(outlines_id) = outlines_ref.as_reference() else {
        return bookmarks;
    };
    let Ok(outlines) = doc.get_dictionary(outlines_id) else {
        return bookmarks;
    };

    if let Ok(first) = outlines.get(b"First").and_then(|o| o.as_reference()) {
        walk_outline(doc, first, 0, &page_numbers, &mut bookmarks);
    }

    bookmarks
}

fn walk_outline(
    doc: &Document,
    start: ObjectId,
    depth: usize,
    page_numbers: &HashMap<ObjectId, u32>,
    out: &mut Vec<Bookmark>,
) {
    let mut current = Some(start);
    while let Some(id) = current {
        let Ok(item) = doc.get_dictionary(id) else {
            return;
        };

        let title = item
            .get(b"Title")
            .and_then(|t| t.as_str())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default();

        let page = item
            .get(b"Dest")
            .and_then(|d| d.as_array())
            .ok()
            .and_then(|dest| dest.first())
            .and_then(|target| target.as_reference().ok())
            .and_then(|page_id| page_numbers.get(&page_id).copied())
            .unwrap_or(0);

        out.push(Bookmark { depth, title, page });

        if let Ok(first) = item.get(b"First").and_then(|o| o.as_reference()) {
            walk_outline(doc, first, depth + 1, page_numbers, out);
        }

        current = item.get(b"Next").and_then(|o| o.as_reference()).ok();
    }
}
