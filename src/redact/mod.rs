//! Redaction module
//!
//! Erases detected text from an image by overwriting each region with
//! the dominant background color.
//!
//! # Features
//!
//! - **Background estimation** ([`dominant_color`]) - exact-value
//!   frequency analysis with a reproducible tie-break
//! - **Region fill** ([`TextRedactor`]) - margin-expanded, bounds-clamped
//!   rectangle overwrite
//!
//! # Algorithm
//!
//! 1. Estimate the single most frequent pixel value (the background)
//! 2. Expand every confident text box by a fixed margin
//! 3. Clamp each rectangle to the buffer and fill it with the background

mod background;
mod fill;
mod types;

// Re-export public API
pub use background::dominant_color;
pub use fill::{RedactionSummary, TextRedactor};
pub use types::RedactError;

// ============================================================
// Constants
// ============================================================

/// Default minimum confidence: tokens must STRICTLY exceed this
const DEFAULT_MIN_CONFIDENCE: i32 = 60;

/// Default margin expansion in pixels
const DEFAULT_MARGIN: u32 = 5;

// ============================================================
// Options
// ============================================================

/// Redaction options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedactOptions {
    /// Minimum OCR confidence (0-100); tokens at or below are discarded
    pub min_confidence: i32,
    /// Pixel margin added around each detected box
    pub margin: u32,
    /// Fixed fill color; `None` estimates the background per call
    pub fill: Option<[u8; 3]>,
}

impl Default for RedactOptions {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            margin: DEFAULT_MARGIN,
            fill: None,
        }
    }
}

impl RedactOptions {
    /// Create a new options builder
    pub fn builder() -> RedactOptionsBuilder {
        RedactOptionsBuilder::default()
    }
}

/// Builder for RedactOptions
#[derive(Debug, Default)]
pub struct RedactOptionsBuilder {
    options: RedactOptions,
}

impl RedactOptionsBuilder {
    /// Set the minimum confidence (clamped to 0-100)
    #[must_use]
    pub fn min_confidence(mut self, min_confidence: i32) -> Self {
        self.options.min_confidence = min_confidence.clamp(0, 100);
        self
    }

    /// Set the margin expansion in pixels
    #[must_use]
    pub fn margin(mut self, margin: u32) -> Self {
        self.options.margin = margin;
        self
    }

    /// Use a fixed fill color instead of background estimation
    #[must_use]
    pub fn fill(mut self, fill: [u8; 3]) -> Self {
        self.options.fill = Some(fill);
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> RedactOptions {
        self.options
    }
}
