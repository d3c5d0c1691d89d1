//! End-to-end tests for failure handling.

use tempfile::TempDir;

use crate::common::{make_config, write_pdf};
use pdfbind::config::FileFilter;
use pdfbind::error::PdfBindError;
use pdfbind::merge::Merger;

#[test]
fn test_missing_input_directory() {
    let dir = TempDir::new().unwrap();
    let config = make_config(&dir.path().join("nope"), &dir.path().join("out.pdf"));

    let err = Merger::new().merge(&config).unwrap_err();
    assert!(matches!(err, PdfBindError::NotADirectory { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_corrupted_pdf_aborts_the_merge() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pdfs");
    std::fs::create_dir_all(&input).unwrap();

    write_pdf(&input.join("good.pdf"), 1);
    std::fs::write(input.join("bad.pdf"), b"%PDF-garbage").unwrap();

    let output = dir.path().join("out.pdf");
    let config = make_config(&input, &output);

    let err = Merger::new().merge(&config).unwrap_err();
    assert!(matches!(err, PdfBindError::FailedToLoadPdf { .. }));
    assert_eq!(err.exit_code(), 3);

    // Nothing was written.
    assert!(!output.exists());
}

#[test]
fn test_filter_that_excludes_everything_still_succeeds() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pdfs");
    std::fs::create_dir_all(&input).unwrap();
    write_pdf(&input.join("a.pdf"), 1);

    let mut config = make_config(&input, &dir.path().join("out.pdf"));
    config.filter = FileFilter::new(&["does-not-exist.pdf".to_string()], &[]);

    let outcome = Merger::new().merge(&config).unwrap();
    assert_eq!(outcome.report.files_merged, 0);
    assert_eq!(outcome.report.total_pages, 0);
}

#[test]
fn test_undecodable_cover_is_fatal() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pdfs");
    std::fs::create_dir_all(&input).unwrap();

    write_pdf(&input.join("a.pdf"), 1);
    std::fs::write(input.join("cover.jpg"), b"not an image").unwrap();

    let config = make_config(&input, &dir.path().join("out.pdf"));
    let err = Merger::new().merge(&config).unwrap_err();
    assert!(matches!(err, PdfBindError::CoverDecodeFailed { .. }));
}

#[test]
fn test_error_messages_name_the_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pdfs");
    std::fs::create_dir_all(&input).unwrap();
    std::fs::write(input.join("broken.pdf"), b"nope").unwrap();

    let config = make_config(&input, &dir.path().join("out.pdf"));
    let err = Merger::new().merge(&config).unwrap_err();
    assert!(err.to_string().contains("broken.pdf"));
}
