//! textscrub - automated text removal for raster images
//!
//! Locates printed text in an image with an OCR collaborator, erases it
//! by filling each detected region with the dominant background color,
//! and optionally transcribes the text or composites replacement text
//! onto the cleaned image.
//!
//! # Pipeline
//!
//! 1. **Load** - decode any supported format to a normalized RGB buffer
//! 2. **Detect** - OCR structured mode, confidence-filtered boxes
//! 3. **Estimate** - most frequent pixel value as the background color
//! 4. **Redact** - margin-expanded, bounds-clamped rectangle fills
//!
//! Extraction (full-text OCR) and annotation (text compositing) are
//! independent read/write paths over the same buffers.
//!
//! # Example
//!
//! ```rust,no_run
//! use textscrub::{loader, PipelineConfig, RedactionPipeline};
//! use std::path::Path;
//!
//! let image = loader::load_path(Path::new("sign.jpg")).unwrap();
//! let pipeline = RedactionPipeline::new(PipelineConfig::default());
//!
//! let cleaned = pipeline.clean(&image).unwrap();
//! let transcript = pipeline.extract_text(&image).unwrap();
//! let edited = pipeline.annotate(&cleaned, "NEW TEXT").unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod loader;
pub mod ocr;
pub mod overlay;
pub mod pipeline;
pub mod redact;

// Re-export public API
pub use cli::{AnnotateArgs, CleanArgs, Cli, Commands, ExtractArgs};
pub use config::{CliOverrides, Config, ConfigError, PipelineConfig};
pub use loader::LoadError;
pub use ocr::{OcrEngine, OcrError, TesseractEngine, TextRegion};
pub use overlay::{OverlayError, OverlayStyle};
pub use pipeline::{PipelineError, RedactionPipeline};
pub use redact::{RedactError, RedactOptions, RedactionSummary, TextRedactor};

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INPUT_NOT_FOUND: i32 = 2;
}
