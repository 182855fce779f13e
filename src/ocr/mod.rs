//! OCR module
//!
//! Capability boundary between the redaction pipeline and whatever OCR
//! engine is installed.
//!
//! # Features
//!
//! - **Capability trait** ([`OcrEngine`]) - structured (per-token boxes +
//!   confidence) and full-text recognition over a grayscale buffer
//! - **Tesseract backend** ([`TesseractEngine`]) - default implementation
//!   wrapping the external `tesseract` binary
//!
//! The pipeline never talks to a concrete engine directly; any backend
//! implementing [`OcrEngine`] can be injected.

mod engine;
mod tesseract;
mod types;

// Re-export public API
pub use engine::OcrEngine;
pub use tesseract::TesseractEngine;
pub use types::{OcrError, Result, TextRegion};
