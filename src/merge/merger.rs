//! The merge driver.
//!
//! Builds the output document from an empty page-tree skeleton, appending
//! the cover (if any) and then every file from the merge plan in order.
//! Because appends always go through the same path, the zero-based page
//! offset of each file is simply the page count of the document just before
//! its pages land.

use lopdf::{Document, Object, ObjectId, dictionary};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::cover;
use crate::error::{PdfBindError, Result};
use crate::io::PdfReader;
use crate::merge::bookmarks::OutlineTree;
use crate::walker::{Entry, EntryKind, Walker};

/// Summary of one merge run, printable as JSON via `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    /// Number of source PDFs merged.
    pub files_merged: usize,

    /// Total pages in the output, cover included.
    pub total_pages: usize,

    /// Number of bookmarks written to the outline.
    pub bookmarks_added: usize,

    /// Cover image used, if one was found.
    pub cover: Option<PathBuf>,

    /// Source files in merge order.
    pub merged_files: Vec<PathBuf>,

    /// Time taken by the merge (excluding the final save).
    #[serde(skip)]
    pub merge_time: Duration,
}

/// The merged document together with its report.
#[derive(Debug)]
pub struct MergeOutcome {
    /// The assembled document, ready to save.
    pub document: Document,

    /// What went into it.
    pub report: MergeReport,
}

/// Drives the whole merge for one configuration.
pub struct Merger {
    reader: PdfReader,
}

impl Merger {
    /// Create a merger with a default reader.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
        }
    }

    /// Run the merge described by `config`.
    ///
    /// The output path is checked first: an existing file is never
    /// overwritten. An input tree with no accepted PDFs still produces a
    /// valid (empty) document.
    ///
    /// # Errors
    ///
    /// Fails when the output already exists, the input tree cannot be
    /// walked, or any source file cannot be loaded.
    pub fn merge(&self, config: &Config) -> Result<MergeOutcome> {
        if config.output.exists() {
            return Err(PdfBindError::output_exists(config.output.clone()));
        }

        let start = Instant::now();
        let mut document = empty_document();
        let mut report = MergeReport {
            files_merged: 0,
            total_pages: 0,
            bookmarks_added: 0,
            cover: None,
            merged_files: Vec::new(),
            merge_time: Duration::ZERO,
        };

        if let Some(cover_path) = cover::find_cover(&config.input_dir) {
            let cover_doc = cover::cover_document(&cover_path)?;
            append_document(&mut document, cover_doc)?;
            report.cover = Some(cover_path);
        }

        let walker = Walker::new(&self.reader, &config.filter);
        let mut entries = walker.collect(&config.input_dir)?;

        for entry in &mut entries {
            let Some(path) = &entry.path else {
                continue;
            };
            let loaded = self.reader.load(path)?;

            // Offset of this file's first page in the merged document.
            entry.page_index = Some(document.get_pages().len());
            append_document(&mut document, loaded.document)?;

            report.files_merged += 1;
            report.merged_files.push(path.clone());
        }

        report.bookmarks_added = build_outline(&entries)?.attach(&mut document)?;
        document.renumber_objects();

        report.total_pages = document.get_pages().len();
        report.merge_time = start.elapsed();

        Ok(MergeOutcome { document, report })
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate the merge plan into an outline tree.
///
/// Folders become page-less container bookmarks. Files become leaves unless
/// they carry their own outline, in which case they get no entry at all and
/// sit under their folder bookmark unlabeled.
fn build_outline(entries: &[Entry]) -> Result<OutlineTree> {
    let mut tree = OutlineTree::new();

    for entry in entries {
        match &entry.kind {
            EntryKind::Folder => tree.add_folder(&entry.outline_path)?,
            EntryKind::File { has_outline: true } => {}
            EntryKind::File { has_outline: false } => {
                let Some(page_index) = entry.page_index else {
                    return Err(PdfBindError::merge_failed(format!(
                        "file '{}' was never appended",
                        entry.outline_path
                    )));
                };
                tree.add_leaf(&entry.outline_path, page_index)?;
            }
        }
    }

    Ok(tree)
}

/// A valid document with a catalog and an empty page tree.
fn empty_document() -> Document {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Vec::<Object>::new(),
        "Count" => 0,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Page-tree attributes that pages inherit from their `Pages` ancestors.
const INHERITABLE_PAGE_KEYS: [&[u8]; 4] = [b"MediaBox", b"Resources", b"Rotate", b"CropBox"];

/// Move every page of `incoming` onto the end of `target`'s page tree.
///
/// The incoming document is renumbered past `target`'s highest object id, so
/// its objects slot in without collisions. Its catalog and page-tree root are
/// dropped; everything else (pages, fonts, content streams) carries over.
/// Attributes the source kept on its page-tree root (`MediaBox`, `Resources`,
/// `Rotate`, `CropBox`) are pushed down onto pages that lack them, since the
/// root they inherited from does not survive the merge.
fn append_document(target: &mut Document, mut incoming: Document) -> Result<()> {
    incoming.renumber_objects_with(target.max_id + 1);
    target.max_id = incoming.max_id;

    let incoming_catalog = incoming.trailer.get(b"Root")?.as_reference()?;
    let incoming_pages_root = incoming
        .get_dictionary(incoming_catalog)?
        .get(b"Pages")?
        .as_reference()?;
    let page_ids: Vec<ObjectId> = incoming.get_pages().values().copied().collect();

    let inherited: Vec<(Vec<u8>, Object)> = {
        let root = incoming.get_dictionary(incoming_pages_root)?;
        INHERITABLE_PAGE_KEYS
            .iter()
            .filter_map(|&key| root.get(key).ok().map(|value| (key.to_vec(), value.clone())))
            .collect()
    };

    let target_pages_root = pages_root(target)?;

    for (id, object) in incoming.objects {
        if id == incoming_catalog || id == incoming_pages_root {
            continue;
        }
        target.objects.insert(id, object);
    }

    for &page_id in &page_ids {
        let page = target.get_dictionary_mut(page_id)?;
        for (key, value) in &inherited {
            if page.get(key).is_err() {
                page.set(key.clone(), value.clone());
            }
        }
        page.set("Parent", Object::Reference(target_pages_root));
    }

    let pages = target.get_dictionary_mut(target_pages_root)?;
    let count = pages.get(b"Count")?.as_i64()? + page_ids.len() as i64;
    pages
        .get_mut(b"Kids")?
        .as_array_mut()?
        .extend(page_ids.iter().map(|&id| Object::Reference(id)));
    pages.set("Count", count);

    Ok(())
}

fn pages_root(doc: &Document) -> Result<ObjectId> {
    let id = doc.catalog()?.get(b"Pages")?.as_reference()?;
    Ok(id)
}
