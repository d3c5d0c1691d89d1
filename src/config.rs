//! Configuration for pdfbind.
//!
//! This module turns CLI arguments into a validated, normalized configuration
//! that drives the merge. It handles:
//! - Validation of argument combinations
//! - Application of defaults
//! - Include/exclude filename filtering

use anyhow::{Result, bail};
use std::collections::HashSet;
use std::path::PathBuf;

/// Default input directory when `--input` is not given.
pub const DEFAULT_INPUT_DIR: &str = "./pdfs";

/// Default output file when `--output` is not given.
pub const DEFAULT_OUTPUT_FILE: &str = "merged_output.pdf";

/// Filename whitelist/blacklist applied to files found by the walker.
///
/// Both sets match the plain filename (extension included), never the path.
/// The exclude set is evaluated after the include set, so a name present in
/// both is dropped.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    /// If present, only these filenames are kept.
    include: Option<HashSet<String>>,
    /// Filenames dropped after the include pass.
    exclude: HashSet<String>,
}

impl FileFilter {
    /// Build a filter from CLI argument lists.
    ///
    /// An empty include list means "no whitelist" rather than "match nothing".
    pub fn new(include: &[String], exclude: &[String]) -> Self {
        let include = if include.is_empty() {
            None
        } else {
            Some(include.iter().cloned().collect())
        };

        Self {
            include,
            exclude: exclude.iter().cloned().collect(),
        }
    }

    /// Check whether a filename survives the filter.
    pub fn accepts(&self, name: &str) -> bool {
        if let Some(include) = &self.include
            && !include.contains(name)
        {
            return false;
        }

        !self.exclude.contains(name)
    }

    /// True when neither set is configured.
    pub fn is_empty(&self) -> bool {
        self.include.is_none() && self.exclude.is_empty()
    }
}

/// Complete configuration for one merge run.
///
/// Derived and validated from CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory containing the PDF tree.
    pub input_dir: PathBuf,

    /// Output PDF file path (absolute).
    pub output: PathBuf,

    /// Filename include/exclude filter.
    pub filter: FileFilter,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Emit the merge report as JSON instead of the human-readable summary.
    pub json: bool,
}

impl Config {
    /// Validate the configuration.
    ///
    /// Checks for logical inconsistencies and invalid combinations.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - The output path lands inside the input directory (it would be
    ///   swallowed by a later run)
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if self.output.starts_with(&self.input_dir) {
            bail!(
                "Output file cannot be inside the input directory: {}",
                self.output.display()
            );
        }

        Ok(())
    }

    /// Check if output should be displayed.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }
}
