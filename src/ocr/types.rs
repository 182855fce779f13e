//! Common types for the OCR module

use thiserror::Error;

/// OCR error types
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),

    #[error("OCR engine failed: {0}")]
    EngineFailure(String),

    #[error("Malformed OCR output: {0}")]
    MalformedOutput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OcrError>;

/// A single recognized text token with its bounding geometry.
///
/// Coordinates are in pixels, origin top-left. `confidence` is the
/// engine's self-reported certainty on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRegion {
    /// Recognized token text
    pub text: String,
    /// Left edge of the bounding box
    pub x: u32,
    /// Top edge of the bounding box
    pub y: u32,
    /// Bounding box width
    pub width: u32,
    /// Bounding box height
    pub height: u32,
    /// Recognition confidence (0-100)
    pub confidence: i32,
}

impl TextRegion {
    /// Check that the box has non-zero area
    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Right edge (exclusive). Saturates: geometry comes from external
    /// engine output, so degenerate rows must not overflow.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive). Saturates like [`TextRegion::right`].
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }
}
