//! Outline (bookmark) tree construction.
//!
//! Bookmarks are accumulated into an in-memory arena while the merge runs,
//! then serialized into PDF outline dictionaries in one pass. Nodes are
//! addressed by [`OutlinePath`], so registration is collision-free even when
//! the same title appears under different parents. Every path registers at
//! most once; a second registration is a bug in the caller and fails loudly.

use lopdf::{Document, Object, dictionary};
use std::collections::HashMap;

use crate::error::{PdfBindError, Result};
use crate::walker::OutlinePath;

#[derive(Debug)]
struct Node {
    title: String,
    page_index: Option<usize>,
    children: Vec<usize>,
}

/// Arena of pending bookmarks, filled during the merge and attached to the
/// output document at the end.
#[derive(Debug, Default)]
pub struct OutlineTree {
    nodes: Vec<Node>,
    roots: Vec<usize>,
    registry: HashMap<OutlinePath, usize>,
}

impl OutlineTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bookmarks registered so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no bookmarks are registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Register a container bookmark for a folder.
    ///
    /// Folder bookmarks have no target page: they exist to group their
    /// children and are written without a `Dest`.
    ///
    /// # Errors
    ///
    /// Fails when the path is already registered or its parent is not.
    pub fn add_folder(&mut self, path: &OutlinePath) -> Result<()> {
        self.insert(path, None)
    }

    /// Register a leaf bookmark for a file starting at `page_index`
    /// (zero-based) in the merged document.
    ///
    /// # Errors
    ///
    /// Fails when the path is already registered or its parent is not.
    pub fn add_leaf(&mut self, path: &OutlinePath, page_index: usize) -> Result<()> {
        self.insert(path, Some(page_index))
    }

    fn insert(&mut self, path: &OutlinePath, page_index: Option<usize>) -> Result<()> {
        if self.registry.contains_key(path) {
            return Err(PdfBindError::bookmark_failed(format!(
                "duplicate bookmark path: {path}"
            )));
        }

        let Some(title) = path.title() else {
            return Err(PdfBindError::bookmark_failed(
                "cannot register a bookmark at the outline root",
            ));
        };

        let index = self.nodes.len();
        self.nodes.push(Node {
            title: title.to_string(),
            page_index,
            children: Vec::new(),
        });

        let parent = path.parent().unwrap_or_else(OutlinePath::root);
        if parent.is_root() {
            self.roots.push(index);
        } else {
            let Some(&parent_index) = self.registry.get(&parent) else {
                return Err(PdfBindError::bookmark_failed(format!(
                    "parent bookmark not registered: {parent}"
                )));
            };
            self.nodes[parent_index].children.push(index);
        }

        self.registry.insert(path.clone(), index);
        Ok(())
    }

    /// Serialize the tree into the document's catalog as `/Outlines`.
    ///
    /// Leaf bookmarks open at the top-left of their target page; folder
    /// bookmarks carry no destination. All levels are expanded by default.
    /// Returns the number of bookmarks written.
    ///
    /// # Errors
    ///
    /// Fails when a leaf's page index falls outside the document.
    pub fn attach(self, doc: &mut Document) -> Result<usize> {
        if self.is_empty() {
            return Ok(0);
        }

        // get_pages keys are 1-based page numbers.
        let pages = doc.get_pages();
        let page_ref = |index: usize, title: &str| -> Result<Object> {
            let number = u32::try_from(index + 1).map_err(|_| {
                PdfBindError::bookmark_failed(format!("page index overflow for '{title}'"))
            })?;
            let id = pages.get(&number).ok_or_else(|| {
                PdfBindError::bookmark_failed(format!(
                    "bookmark '{title}' points at page {number} of a {}-page document",
                    pages.len()
                ))
            })?;
            Ok(Object::Reference(*id))
        };

        let outlines_id = doc.new_object_id();
        let ids: Vec<_> = self.nodes.iter().map(|_| doc.new_object_id()).collect();

        for (index, node) in self.nodes.iter().enumerate() {
            let parent_id = self
                .nodes
                .iter()
                .position(|n| n.children.contains(&index))
                .map_or(outlines_id, |p| ids[p]);

            let siblings = self
                .nodes
                .iter()
                .find(|n| n.children.contains(&index))
                .map_or(&self.roots, |n| &n.children);
            let slot = siblings.iter().position(|&i| i == index).unwrap_or(0);

            let mut item = dictionary! {
                "Title" => Object::string_literal(node.title.clone()),
                "Parent" => Object::Reference(parent_id),
            };

            if let Some(page_index) = node.page_index {
                item.set(
                    "Dest",
                    vec![
                        page_ref(page_index, &node.title)?,
                        Object::Name(b"XYZ".to_vec()),
                        Object::Null,
                        Object::Null,
                        Object::Null,
                    ],
                );
            }

            if slot > 0 {
                item.set("Prev", Object::Reference(ids[siblings[slot - 1]]));
            }
            if slot + 1 < siblings.len() {
                item.set("Next", Object::Reference(ids[siblings[slot + 1]]));
            }
            if let (Some(&first), Some(&last)) = (node.children.first(), node.children.last()) {
                item.set("First", Object::Reference(ids[first]));
                item.set("Last", Object::Reference(ids[last]));
                // Positive count keeps the level expanded in viewers.
                item.set("Count", Object::Integer(self.descendants(index) as i64));
            }

            doc.objects.insert(ids[index], Object::Dictionary(item));
        }

        let first_root = self.roots.first().copied();
        let last_root = self.roots.last().copied();
        let mut outlines = dictionary! {
            "Type" => "Outlines",
            "Count" => self.nodes.len() as i64,
        };
        if let (Some(first), Some(last)) = (first_root, last_root) {
            outlines.set("First", Object::Reference(ids[first]));
            outlines.set("Last", Object::Reference(ids[last]));
        }
        doc.objects.insert(outlines_id, Object::Dictionary(outlines));

        doc.catalog_mut()?
            .set("Outlines", Object::Reference(outlines_id));

        Ok(self.nodes.len())
    }

    fn descendants(&self, index: usize) -> usize {
        self.nodes[index]
            .children
            .iter()
            .map(|&child| 1 + self.descendants(child))
            .sum()
    }
}
