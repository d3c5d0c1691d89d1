//! Error types for pdfbind.
//!
//! All fallible operations in pdfbind return [`Result`], carrying a
//! [`PdfBindError`] that names the failing path and the reason. Errors are
//! fatal to the whole merge: there is no per-file skip mode, and a failed run
//! must never leave a usable partial output behind.
//!
//! # Error Categories
//!
//! - **I/O Errors**: inaccessible files or directories
//! - **PDF Errors**: source files that fail to parse
//! - **Output Errors**: existing output, failed create/write
//! - **Merge Errors**: page-tree or outline construction problems

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for pdfbind operations.
pub type Result<T> = std::result::Result<T, PdfBindError>;

/// Main error type for pdfbind operations.
#[derive(Debug)]
pub enum PdfBindError {
    /// Input path is not a directory.
    NotADirectory {
        /// Path that is not a directory.
        path: PathBuf,
    },

    /// A file or directory is not accessible (permission denied, etc.).
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A source PDF failed to parse.
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// A source PDF is encrypted and cannot be processed.
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// The cover image could not be decoded.
    CoverDecodeFailed {
        /// Path to the cover image.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Output file already exists; pdfbind never overwrites.
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create the output file.
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to the output file.
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Merge operation failed.
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Outline (bookmark) construction failed.
    BookmarkFailed {
        /// Details about the failure.
        reason: String,
    },

    /// Invalid configuration.
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    Io {
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Generic error with a custom message.
    Other {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for PdfBindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADirectory { path } => {
                write!(f, "Not a directory: {}", path.display())
            }
            Self::FileNotAccessible { path, source } => {
                write!(f, "Cannot access: {}\n  Reason: {}", path.display(), source)
            }
            Self::FailedToLoadPdf { path, reason } => {
                write!(
                    f,
                    "Failed to load PDF: {}\n  Reason: {}",
                    path.display(),
                    reason
                )
            }
            Self::EncryptedPdf { path } => {
                write!(
                    f,
                    "PDF is encrypted and cannot be processed: {}\n  \
                     Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
                    path.display()
                )
            }
            Self::CoverDecodeFailed { path, reason } => {
                write!(
                    f,
                    "Failed to decode cover image: {}\n  Reason: {}",
                    path.display(),
                    reason
                )
            }
            Self::OutputExists { path } => {
                write!(
                    f,
                    "Output file already exists: {}\n  \
                     Choose a different output path or remove the existing file",
                    path.display()
                )
            }
            Self::FailedToCreateOutput { path, source } => {
                write!(
                    f,
                    "Failed to create output file: {}\n  Reason: {}",
                    path.display(),
                    source
                )
            }
            Self::FailedToWrite { path, source } => {
                write!(
                    f,
                    "Failed to write to output file: {}\n  Reason: {}",
                    path.display(),
                    source
                )
            }
            Self::MergeFailed { reason } => {
                write!(f, "Merge operation failed: {reason}")
            }
            Self::BookmarkFailed { reason } => {
                write!(f, "Failed to build outline: {reason}")
            }
            Self::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {message}")
            }
            Self::Io { source } => {
                write!(f, "I/O error: {source}")
            }
            Self::Other { message } => {
                write!(f, "{message}")
            }
        }
    }
}

impl std::error::Error for PdfBindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileNotAccessible { source, .. } => Some(source),
            Self::FailedToCreateOutput { source, .. } => Some(source),
            Self::FailedToWrite { source, .. } => Some(source),
            Self::Io { source } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for PdfBindError {
    fn from(err: io::Error) -> Self {
        Self::Io { source: err }
    }
}

impl From<lopdf::Error> for PdfBindError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for PdfBindError {
    fn from(err: anyhow::Error) -> Self {
        Self::InvalidConfig {
            message: err.to_string(),
        }
    }
}

impl PdfBindError {
    /// Create a NotADirectory error.
    pub fn not_a_directory(path: PathBuf) -> Self {
        Self::NotADirectory { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create a CoverDecodeFailed error.
    pub fn cover_decode_failed(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::CoverDecodeFailed {
            path,
            reason: reason.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create a BookmarkFailed error.
    pub fn bookmark_failed(reason: impl Into<String>) -> Self {
        Self::BookmarkFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error.
    ///
    /// Returns the appropriate process exit code based on error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotADirectory { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::CoverDecodeFailed { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::MergeFailed { .. } => 6,
            Self::BookmarkFailed { .. } => 6,
            Self::InvalidConfig { .. } => 1,
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
