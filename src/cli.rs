//! CLI argument parsing for pdfbind.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and help text generation.
//!
//! # Examples
//!
//! ```no_run
//! use pdfbind::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! println!("Merging PDFs under {}", cli.input.display());
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_FILE, FileFilter};
use crate::error::Result;

/// Merge a directory tree of PDFs into a single bookmarked document.
///
/// pdfbind walks the input directory recursively, merges every PDF it finds
/// in natural sort order, and builds an outline that mirrors the folder
/// structure. A cover image at the root of the tree becomes the first page.
#[derive(Parser, Debug)]
#[command(name = "pdfbind")]
#[command(version)]
#[command(about = "Merge a directory tree of PDFs into one bookmarked document", long_about = None)]
#[command(author)]
pub struct Cli {
    /// Input directory containing the PDF tree
    ///
    /// Walked recursively. Subfolders become nested bookmark sections;
    /// files and folders at each level are merged in natural sort order
    /// (item2.pdf before item10.pdf).
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_INPUT_DIR)]
    pub input: PathBuf,

    /// Output PDF file path
    ///
    /// The merged PDF will be written here. An existing file is never
    /// overwritten; remove or rename it first.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Only merge these filenames
    ///
    /// Matched against the plain filename, extension included.
    /// May be given multiple times or with several values.
    ///
    /// Example:
    ///   pdfbind --include ch1.pdf ch2.pdf
    #[arg(long, value_name = "NAME", num_args = 1..)]
    pub include: Vec<String>,

    /// Skip these filenames
    ///
    /// Matched against the plain filename, extension included.
    /// Applied after --include, so a name in both lists is skipped.
    #[arg(long, value_name = "NAME", num_args = 1..)]
    pub exclude: Vec<String>,

    /// Verbose output - show each file as it is merged
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    /// Useful for scripts and automation.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the merge report as JSON instead of the human-readable summary
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// Relative output paths are resolved against the current directory so
    /// the inside-the-input-tree check compares like with like.
    ///
    /// # Errors
    ///
    /// Returns an error when the current directory cannot be determined or
    /// the resulting configuration is inconsistent.
    pub fn to_config(&self) -> Result<Config> {
        let output = if self.output.is_absolute() {
            self.output.clone()
        } else {
            std::env::current_dir()?.join(&self.output)
        };

        let input_dir = if self.input.is_absolute() {
            self.input.clone()
        } else {
            std::env::current_dir()?.join(&self.input)
        };

        let config = Config {
            input_dir,
            output,
            filter: FileFilter::new(&self.include, &self.exclude),
            verbose: self.verbose,
            quiet: self.quiet,
            json: self.json,
        };

        config.validate()?;
        Ok(config)
    }
}
