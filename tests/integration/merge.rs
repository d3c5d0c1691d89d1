//! End-to-end tests for page offsets, covers, and the write pipeline.

use lopdf::Document;
use tempfile::TempDir;

use crate::common::{
    collect_outline, make_config, write_pdf, write_pdf_with_outline, write_png,
};
use pdfbind::error::PdfBindError;
use pdfbind::io::PdfWriter;
use pdfbind::merge::Merger;

#[test]
fn test_page_offsets_accumulate() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pdfs");
    std::fs::create_dir_all(&input).unwrap();

    write_pdf(&input.join("a.pdf"), 3);
    write_pdf(&input.join("b.pdf"), 2);

    let config = make_config(&input, &dir.path().join("out.pdf"));
    let outcome = Merger::new().merge(&config).unwrap();

    assert_eq!(outcome.report.total_pages, 5);
    let bookmarks = collect_outline(&outcome.document);
    assert_eq!(bookmarks[0].page, 1); // a starts at page 1
    assert_eq!(bookmarks[1].page, 4); // b starts after a's 3 pages
}

#[test]
fn test_cover_is_first_page_and_shifts_offsets() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pdfs");
    std::fs::create_dir_all(&input).unwrap();

    write_png(&input.join("cover.png"), 16, 16);
    write_pdf(&input.join("a.pdf"), 1);

    let config = make_config(&input, &dir.path().join("out.pdf"));
    let outcome = Merger::new().merge(&config).unwrap();

    assert_eq!(outcome.report.total_pages, 2);
    assert!(outcome.report.cover.is_some());

    // The file's bookmark lands on page 2, after the cover.
    let bookmarks = collect_outline(&outcome.document);
    assert_eq!(bookmarks.len(), 1);
    assert_eq!(bookmarks[0].page, 2);
}

#[test]
fn test_file_with_own_outline_gets_no_leaf() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pdfs");
    let sub = input.join("books");
    std::fs::create_dir_all(&sub).unwrap();

    write_pdf_with_outline(&sub.join("novel.pdf"), 3);
    write_pdf(&sub.join("plain.pdf"), 1);

    let config = make_config(&input, &dir.path().join("out.pdf"));
    let outcome = Merger::new().merge(&config).unwrap();

    let bookmarks = collect_outline(&outcome.document);
    let titles: Vec<&str> = bookmarks.iter().map(|b| b.title.as_str()).collect();

    // The folder bookmark survives, but the novel itself has no leaf entry.
    assert_eq!(titles, vec!["books", "plain"]);
    assert_eq!(bookmarks[1].page, 4);
}

#[test]
fn test_folder_bookmarks_carry_no_destination() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pdfs");
    let sub = input.join("part1");
    std::fs::create_dir_all(&sub).unwrap();
    write_pdf(&sub.join("a.pdf"), 1);

    let config = make_config(&input, &dir.path().join("out.pdf"));
    let outcome = Merger::new().merge(&config).unwrap();

    let doc = &outcome.document;
    let outlines_id = doc
        .catalog()
        .unwrap()
        .get(b"Outlines")
        .unwrap()
        .as_reference()
        .unwrap();
    let folder_id = doc
        .get_dictionary(outlines_id)
        .unwrap()
        .get(b"First")
        .unwrap()
        .as_reference()
        .unwrap();
    let folder = doc.get_dictionary(folder_id).unwrap();

    assert_eq!(
        folder.get(b"Title").unwrap().as_str().unwrap(),
        b"part1".as_slice()
    );
    assert!(folder.get(b"Dest").is_err());

    // Its leaf child still points at the page.
    let leaf_id = folder.get(b"First").unwrap().as_reference().unwrap();
    let leaf = doc.get_dictionary(leaf_id).unwrap();
    assert!(leaf.get(b"Dest").is_ok());
}

#[test]
fn test_existing_output_is_never_touched() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pdfs");
    std::fs::create_dir_all(&input).unwrap();
    write_pdf(&input.join("a.pdf"), 1);

    let output = dir.path().join("out.pdf");
    std::fs::write(&output, b"precious data").unwrap();

    let config = make_config(&input, &output);
    let err = Merger::new().merge(&config).unwrap_err();
    assert!(matches!(err, PdfBindError::OutputExists { .. }));

    let contents = std::fs::read(&output).unwrap();
    assert_eq!(contents, b"precious data");
}

#[tokio::test]
async fn test_saved_output_reloads_with_outline() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pdfs");
    let sub = input.join("chapters");
    std::fs::create_dir_all(&sub).unwrap();

    write_pdf(&sub.join("ch1.pdf"), 2);
    write_pdf(&sub.join("ch2.pdf"), 1);

    let output = dir.path().join("out.pdf");
    let config = make_config(&input, &output);
    let outcome = Merger::new().merge(&config).unwrap();

    PdfWriter::new().save(&outcome.document, &output).await.unwrap();

    let reloaded = Document::load(&output).unwrap();
    assert_eq!(reloaded.get_pages().len(), 3);

    let bookmarks = collect_outline(&reloaded);
    let titles: Vec<&str> = bookmarks.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["chapters", "ch1", "ch2"]);
    assert_eq!(bookmarks[2].page, 3);
}

#[test]
fn test_report_counts_match() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pdfs");
    let sub = input.join("part1");
    std::fs::create_dir_all(&sub).unwrap();

    write_pdf(&input.join("intro.pdf"), 1);
    write_pdf(&sub.join("a.pdf"), 2);

    let config = make_config(&input, &dir.path().join("out.pdf"));
    let outcome = Merger::new().merge(&config).unwrap();

    assert_eq!(outcome.report.files_merged, 2);
    assert_eq!(outcome.report.total_pages, 3);
    assert_eq!(outcome.report.bookmarks_added, 3); // intro + part1 + a
    assert_eq!(outcome.report.merged_files.len(), 2);

    // The report serializes for --json output.
    let json = serde_json::to_string(&outcome.report).unwrap();
    assert!(json.contains("\"files_merged\":2"));
}
