//! pdfbind - Merge a directory tree of PDFs into one bookmarked document.
//!
//! A CLI tool that merges every PDF under a directory into a single file
//! with an outline mirroring the folder structure.

use clap::Parser;
use std::process;

use pdfbind::cli::Cli;
use pdfbind::error::PdfBindError;
use pdfbind::io::PdfWriter;
use pdfbind::merge::Merger;
use pdfbind::output::OutputFormatter;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the application and handle errors
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfBindError> {
    // Convert CLI to config
    let config = cli.to_config()?;

    // JSON mode owns stdout; route everything else through quiet.
    let formatter = if config.json {
        OutputFormatter::quiet()
    } else {
        OutputFormatter::from_config(&config)
    };

    // Print header
    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfbind::NAME, pdfbind::VERSION));
        formatter.blank_line();
    }

    // A missing input directory is scaffolded rather than treated as an
    // error: create it and carry on, which yields an empty output document.
    if !config.input_dir.exists() {
        tokio::fs::create_dir_all(&config.input_dir).await?;
        formatter.info(&format!(
            "Created input directory: {}",
            config.input_dir.display()
        ));
    }

    // Perform the merge
    formatter.info(&format!("Scanning: {}", config.input_dir.display()));

    let merger = Merger::new();
    let outcome = merger.merge(&config)?;

    if formatter.should_print() {
        if let Some(cover) = &outcome.report.cover {
            formatter.info(&format!("Cover: {}", cover.display()));
        }
        formatter.info(&format!(
            "Merged {} file(s) into {} pages",
            outcome.report.files_merged, outcome.report.total_pages
        ));

        if formatter.is_verbose() {
            formatter.blank_line();
            formatter.section("Merged files");
            for (index, file) in outcome.report.merged_files.iter().enumerate() {
                formatter.list_item(index + 1, &file.display().to_string());
            }
        }
    }

    // Write the output
    formatter.info(&format!("Writing to: {}", config.output.display()));

    let writer = PdfWriter::new();
    let write_stats = writer.save_with_stats(&outcome.document, &config.output).await?;

    if formatter.should_print() {
        formatter.blank_line();
        formatter.success(&format!(
            "Successfully created {} ({})",
            config.output.display(),
            write_stats.format_file_size()
        ));

        if formatter.is_verbose() {
            formatter.blank_line();
            formatter.section("Statistics");
            formatter.detail("Input files", &outcome.report.files_merged.to_string());
            formatter.detail("Total pages", &outcome.report.total_pages.to_string());
            formatter.detail("Bookmarks", &outcome.report.bookmarks_added.to_string());
            formatter.detail("Output size", &write_stats.format_file_size());
            formatter.detail(
                "Merge time",
                &format!("{:.2}s", outcome.report.merge_time.as_secs_f64()),
            );
            formatter.detail(
                "Write time",
                &format!("{:.2}s", write_stats.write_time.as_secs_f64()),
            );
        }
    }

    if config.json {
        let json = serde_json::to_string_pretty(&outcome.report)
            .map_err(|e| PdfBindError::other(e.to_string()))?;
        println!("{json}");
    }

    Ok(())
}
