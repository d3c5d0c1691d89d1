//! PDF loading and outline probing.
//!
//! Every read goes through [`PdfReader`], which maps parse failures to
//! descriptive errors and (by default) rejects documents without pages.
//! A load failure anywhere aborts the whole merge; there is no skip mode.

use lopdf::{Document, Object};
use std::path::{Path, PathBuf};

use crate::error::{PdfBindError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// File size in bytes.
    pub file_size: u64,
}

/// PDF reader with configurable loading behavior.
#[derive(Debug, Clone)]
pub struct PdfReader {
    /// Whether to reject documents without pages.
    verify: bool,
}

impl PdfReader {
    /// Create a new PDF reader with default settings.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that skips page verification.
    pub fn without_verification() -> Self {
        Self { verify: false }
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File cannot be read
    /// - File is not a valid PDF
    /// - PDF is encrypted
    /// - PDF has no pages (unless verification is disabled)
    pub fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let document = Document::load(path).map_err(|e| load_error(path, e))?;

        if self.verify && document.get_pages().is_empty() {
            return Err(PdfBindError::failed_to_load_pdf(
                path.to_path_buf(),
                "PDF has no pages",
            ));
        }

        let page_count = document.get_pages().len();
        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        Ok(LoadedPdf {
            document,
            path: path.to_path_buf(),
            page_count,
            file_size,
        })
    }

    /// Check whether a PDF already carries its own outline (bookmarks).
    ///
    /// Opens the file read-only and inspects the catalog for a non-empty
    /// `/Outlines` tree. Files with internal navigation keep it; the merge
    /// driver will not add a duplicate leaf bookmark for them.
    ///
    /// # Errors
    ///
    /// A file that cannot be parsed as a PDF is a hard failure - the probe
    /// never silently reports `false` for a broken document.
    pub fn has_outline(&self, path: &Path) -> Result<bool> {
        let document = Document::load(path).map_err(|e| load_error(path, e))?;
        Ok(document_has_outline(&document))
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Inspect a loaded document's catalog for a non-empty outline tree.
pub fn document_has_outline(document: &Document) -> bool {
    let Ok(catalog) = document.catalog() else {
        return false;
    };

    let outlines = match catalog.get(b"Outlines") {
        Ok(Object::Reference(id)) => match document.get_dictionary(*id) {
            Ok(dict) => dict,
            Err(_) => return false,
        },
        Ok(Object::Dictionary(dict)) => dict,
        _ => return false,
    };

    // An Outlines dictionary without a First entry declares no bookmarks.
    matches!(outlines.get(b"First"), Ok(Object::Reference(_)))
}

fn load_error(path: &Path, err: lopdf::Error) -> PdfBindError {
    let message = err.to_string();
    if message.contains("encrypt") || message.contains("password") {
        PdfBindError::encrypted_pdf(path.to_path_buf())
    } else {
        PdfBindError::failed_to_load_pdf(path.to_path_buf(), message)
    }
}
