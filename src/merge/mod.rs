//! Merging PDFs and building the output document's outline.

pub mod bookmarks;
pub mod merger;

pub use bookmarks::OutlineTree;
pub use merger::{MergeOutcome, MergeReport, Merger};
