//! Cover image detection and conversion.
//!
//! If the input directory root contains a file named `cover.jpg`,
//! `cover.jpeg` or `cover.png` (checked in that exact order and spelling),
//! it becomes the first page of the merged document. The image is decoded,
//! flattened to RGB and embedded as a single full-bleed page whose media box
//! matches the pixel dimensions.

use image::ImageReader;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};

use crate::error::{PdfBindError, Result};

/// Recognized cover filenames, highest priority first.
const COVER_CANDIDATES: [&str; 3] = ["cover.jpg", "cover.jpeg", "cover.png"];

/// Name under which the image XObject is registered on the cover page.
const COVER_XOBJECT: &str = "Cover";

/// Look for a cover image directly inside `dir` (never in subdirectories).
///
/// Checks the three candidate names in priority order and returns the first
/// that exists as a file. Matching is exact: `Cover.PNG` is not a cover.
pub fn find_cover(dir: &Path) -> Option<PathBuf> {
    COVER_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Decode an image file into a one-page PDF document.
///
/// The page carries the raw RGB pixels as an image XObject scaled to fill
/// the page exactly. Alpha channels are flattened during the RGB conversion.
///
/// # Errors
///
/// Returns [`PdfBindError::CoverDecodeFailed`] when the file cannot be
/// opened or decoded as an image.
pub fn cover_document(path: &Path) -> Result<Document> {
    let image = ImageReader::open(path)
        .map_err(|e| decode_error(path, e.to_string()))?
        .decode()
        .map_err(|e| decode_error(path, e.to_string()))?;

    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut doc = Document::with_version("1.5");

    let image_stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        rgb.into_raw(),
    );
    let image_id = doc.add_object(image_stream);

    // Scale the unit image square up to the full page.
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    (width as f32).into(),
                    0.into(),
                    0.into(),
                    (height as f32).into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(COVER_XOBJECT.into())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            (width as i64).into(),
            (height as i64).into(),
        ],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                COVER_XOBJECT => image_id,
            },
        },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

fn decode_error(path: &Path, reason: String) -> PdfBindError {
    PdfBindError::cover_decode_failed(path.to_path_buf(), reason)
}
