//! pdfbind - Merge a directory tree of PDFs into one bookmarked document.
//!
//! This library walks a directory of PDF files, merges them into a single
//! document in natural sort order, and builds an outline (bookmark tree)
//! that mirrors the folder structure. It supports:
//!
//! - Recursive directory traversal with natural sorting
//! - Nested bookmarks, one section per folder
//! - A cover image as the first page
//! - Include/exclude filename filters
//! - Detection of PDFs that bring their own outline
//! - Comprehensive error handling
//!
//! # Examples
//!
//! ```no_run
//! use pdfbind::config::{Config, FileFilter};
//! use pdfbind::io::PdfWriter;
//! use pdfbind::merge::Merger;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input_dir: PathBuf::from("./pdfs"),
//!     output: PathBuf::from("/tmp/merged.pdf"),
//!     filter: FileFilter::default(),
//!     verbose: false,
//!     quiet: false,
//!     json: false,
//! };
//!
//! let outcome = Merger::new().merge(&config)?;
//! println!("Created {} page document", outcome.report.total_pages);
//!
//! let writer = PdfWriter::new();
//! writer.save(&outcome.document, &config.output).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod cover;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod sort;
pub mod walker;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfBindError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
