//! Directory traversal and merge plan construction.
//!
//! The walker turns a directory tree of PDFs into a flat, ordered list of
//! [`Entry`] values: one per folder that (transitively) contains at least one
//! accepted PDF, and one per accepted PDF file. Entries come out in merge
//! order - a folder always precedes everything inside it, and siblings are
//! naturally sorted by name.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::FileFilter;
use crate::error::{PdfBindError, Result};
use crate::io::PdfReader;
use crate::sort::natural_cmp;

/// Position of a bookmark in the outline tree, as a list of titles from the
/// root down.
///
/// Two different folders named `notes` under different parents produce
/// different paths, so the path is a collision-free identity for a bookmark
/// even when titles repeat across the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutlinePath(Vec<String>);

impl OutlinePath {
    /// The empty path addressing the outline root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Extend this path with one more title.
    pub fn child(&self, title: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(title.to_string());
        Self(segments)
    }

    /// The path one level up, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// True for the outline root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The last segment, used as the bookmark title.
    pub fn title(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }
}

impl fmt::Display for OutlinePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// What kind of tree node an [`Entry`] describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory; gets a container bookmark pointing at its first page.
    Folder,
    /// A PDF file. `has_outline` records whether the file brings its own
    /// bookmark tree, in which case no leaf bookmark is added for it.
    File {
        /// True when the file's catalog declares a non-empty outline.
        has_outline: bool,
    },
}

/// One unit of the merge plan.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Source file path. `None` for folders, which have no file of their own.
    pub path: Option<PathBuf>,

    /// Bookmark position of this entry in the outline.
    pub outline_path: OutlinePath,

    /// Folder or file.
    pub kind: EntryKind,

    /// Zero-based page index of the entry's first page in the merged
    /// document. Filled in by the merge driver for files; folders have no
    /// page of their own and stay `None`.
    pub page_index: Option<usize>,
}

impl Entry {
    /// True for folder entries.
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, EntryKind::Folder)
    }

    /// Bookmark title (the final path segment).
    pub fn title(&self) -> &str {
        self.outline_path.title().unwrap_or_default()
    }
}

/// Walks the input tree and produces the ordered merge plan.
pub struct Walker<'a> {
    reader: &'a PdfReader,
    filter: &'a FileFilter,
}

impl<'a> Walker<'a> {
    /// Create a walker over the given reader and filename filter.
    pub fn new(reader: &'a PdfReader, filter: &'a FileFilter) -> Self {
        Self { reader, filter }
    }

    /// Collect the merge plan for the tree rooted at `root`.
    ///
    /// Folders that contain no accepted PDFs anywhere below them are pruned
    /// and produce no entry. Probing a file's outline is a hard failure when
    /// the file is not a readable PDF.
    ///
    /// # Errors
    ///
    /// Returns an error when `root` is not a directory, a directory cannot
    /// be listed, or a candidate file cannot be parsed as a PDF.
    pub fn collect(&self, root: &Path) -> Result<Vec<Entry>> {
        if !root.is_dir() {
            return Err(PdfBindError::not_a_directory(root.to_path_buf()));
        }

        let mut entries = Vec::new();
        self.collect_dir(root, &OutlinePath::root(), &mut entries)?;
        Ok(entries)
    }

    fn collect_dir(
        &self,
        dir: &Path,
        parent: &OutlinePath,
        entries: &mut Vec<Entry>,
    ) -> Result<()> {
        let mut files: Vec<(String, PathBuf)> = Vec::new();
        let mut dirs: Vec<(String, PathBuf)> = Vec::new();

        let listing = std::fs::read_dir(dir).map_err(|e| PdfBindError::FileNotAccessible {
            path: dir.to_path_buf(),
            source: e,
        })?;

        for item in listing {
            let item = item.map_err(|e| PdfBindError::FileNotAccessible {
                path: dir.to_path_buf(),
                source: e,
            })?;
            let path = item.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if path.is_dir() {
                dirs.push((name.to_string(), path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("pdf")
                && self.filter.accepts(name)
            {
                files.push((name.to_string(), path));
            }
        }

        // Files and subfolders interleave in one naturally-sorted sequence.
        let mut children: Vec<(String, PathBuf, bool)> = files
            .into_iter()
            .map(|(name, path)| (name, path, false))
            .chain(dirs.into_iter().map(|(name, path)| (name, path, true)))
            .collect();
        children.sort_by(|a, b| natural_cmp(&a.0, &b.0));

        for (name, path, is_dir) in children {
            if is_dir {
                let child_path = parent.child(&name);
                let folder_slot = entries.len();
                entries.push(Entry {
                    path: None,
                    outline_path: child_path.clone(),
                    kind: EntryKind::Folder,
                    page_index: None,
                });

                self.collect_dir(&path, &child_path, entries)?;

                // Prune folders with nothing under them.
                if entries.len() == folder_slot + 1 {
                    entries.pop();
                }
            } else {
                let stem = name.strip_suffix(".pdf").unwrap_or(&name);
                let has_outline = self.reader.has_outline(&path)?;
                entries.push(Entry {
                    path: Some(path),
                    outline_path: parent.child(stem),
                    kind: EntryKind::File { has_outline },
                    page_index: None,
                });
            }
        }

        Ok(())
    }
}
