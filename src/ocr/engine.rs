//! OCR engine capability trait

use super::types::{Result, TextRegion};
use image::GrayImage;

/// Capability contract every OCR backend must implement.
///
/// The pipeline depends only on this surface, so any conforming engine
/// can be substituted without touching redaction logic. Both calls are
/// blocking and are invoked at most once per pipeline operation; retry
/// and timeout policy belongs to the caller.
pub trait OcrEngine: Send + Sync {
    /// Engine identifier (e.g. "tesseract")
    fn name(&self) -> &'static str;

    /// Structured recognition: per-token bounding boxes with confidence
    /// scores, in the engine's native token order. Returns everything
    /// the engine emits; confidence filtering is the caller's concern.
    fn recognize_regions(&self, image: &GrayImage) -> Result<Vec<TextRegion>>;

    /// Full-text recognition: plain transcription with no geometry and
    /// no confidence filtering.
    fn recognize_text(&self, image: &GrayImage) -> Result<String>;
}
