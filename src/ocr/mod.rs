//! Text recognition over in-memory images.

mod tesseract;

pub use tesseract::TesseractOcr;

use anyhow::Result;
use image::RgbImage;

/// The form-feed page separator tesseract emits for a page with no text.
/// A recognizer returning exactly this means "nothing readable here".
pub const EMPTY_SENTINEL: &str = "\u{000C}";

/// Turns an image into the text printed on it.
///
/// The schedule pipeline only depends on this trait, so tests can feed it
/// scripted text instead of running a real OCR engine.
pub trait TextRecognizer {
    fn image_to_text(&self, image: &RgbImage) -> Result<String>;
}
