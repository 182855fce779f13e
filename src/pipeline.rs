//! Redaction pipeline
//!
//! Explicit composition of the processing stages: load -> detect ->
//! estimate background -> fill, plus the independent extract and
//! annotate paths. The caller threads buffers between calls; no state
//! is shared across invocations.
//!
//! Each operation is a synchronous, CPU-bound transformation. The OCR
//! collaborator is invoked at most once per detect/extract call and is
//! never retried internally.

use crate::config::PipelineConfig;
use crate::loader::LoadError;
use crate::ocr::{OcrEngine, OcrError, TesseractEngine, TextRegion};
use crate::overlay::{self, OverlayError, OverlayStyle};
use crate::redact::{RedactError, RedactOptions, TextRedactor};
use image::{imageops, RgbImage};
use thiserror::Error;
use tracing::debug;

/// Pipeline error types
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Redact(#[from] RedactError),

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error(transparent)]
    Overlay(#[from] OverlayError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Text detection-and-redaction pipeline
pub struct RedactionPipeline {
    config: PipelineConfig,
    engine: Option<Box<dyn OcrEngine>>,
}

impl RedactionPipeline {
    /// Create a pipeline using the default Tesseract backend.
    ///
    /// The backend is resolved lazily on the first detect/extract
    /// call, so redaction-free operations (annotate) work without an
    /// OCR engine installed.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            engine: None,
        }
    }

    /// Create a pipeline with an injected OCR engine
    pub fn with_engine(config: PipelineConfig, engine: Box<dyn OcrEngine>) -> Self {
        Self {
            config,
            engine: Some(engine),
        }
    }

    /// The resolved configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Redaction options derived from the configuration
    pub fn redact_options(&self) -> RedactOptions {
        let mut builder = RedactOptions::builder()
            .min_confidence(self.config.min_confidence)
            .margin(self.config.margin);
        if let Some(fill) = self.config.fill {
            builder = builder.fill(fill);
        }
        builder.build()
    }

    /// Detect text regions whose confidence strictly exceeds the
    /// configured minimum. Region order follows the engine's native
    /// token order.
    pub fn detect_regions(&self, image: &RgbImage) -> Result<Vec<TextRegion>> {
        require_pixels(image)?;

        let options = self.redact_options();
        let gray = imageops::grayscale(image);
        let mut regions = self.recognize_regions(&gray)?;
        let total = regions.len();

        regions.retain(|r| r.confidence > options.min_confidence);
        debug!(
            total,
            kept = regions.len(),
            min_confidence = options.min_confidence,
            "text detection finished"
        );

        Ok(regions)
    }

    /// Remove detected text by filling each region with the background
    /// color. Returns a fresh buffer; the input is untouched.
    pub fn clean(&self, image: &RgbImage) -> Result<RgbImage> {
        let regions = self.detect_regions(image)?;
        let options = self.redact_options();

        let mut cleaned = image.clone();
        let summary = TextRedactor::redact(&mut cleaned, &regions, &options)?;
        debug!(
            filled = summary.regions_filled,
            skipped = summary.regions_skipped,
            "redaction finished"
        );

        Ok(cleaned)
    }

    /// Transcribe the image's text, unfiltered. Read-only; independent
    /// of any redaction step.
    pub fn extract_text(&self, image: &RgbImage) -> Result<String> {
        require_pixels(image)?;

        let gray = imageops::grayscale(image);
        let text = self.recognize_text(&gray)?;
        debug!(chars = text.len(), "text extraction finished");

        Ok(text)
    }

    /// Composite `text` onto a copy of `image` using the configured
    /// overlay style.
    pub fn annotate(&self, image: &RgbImage, text: &str) -> Result<RgbImage> {
        require_pixels(image)?;
        Ok(overlay::draw_annotation(image, text, &self.overlay_style())?)
    }

    /// Overlay style derived from the configuration
    pub fn overlay_style(&self) -> OverlayStyle {
        let mut builder = OverlayStyle::builder()
            .anchor(self.config.anchor.0, self.config.anchor.1)
            .color(self.config.color)
            .scale(self.config.scale);
        if let Some(path) = &self.config.font_path {
            builder = builder.font_path(path.clone());
        }
        builder.build()
    }

    fn recognize_regions(&self, gray: &image::GrayImage) -> Result<Vec<TextRegion>> {
        match &self.engine {
            Some(engine) => Ok(engine.recognize_regions(gray)?),
            None => Ok(self.default_engine()?.recognize_regions(gray)?),
        }
    }

    fn recognize_text(&self, gray: &image::GrayImage) -> Result<String> {
        match &self.engine {
            Some(engine) => Ok(engine.recognize_text(gray)?),
            None => Ok(self.default_engine()?.recognize_text(gray)?),
        }
    }

    fn default_engine(&self) -> std::result::Result<TesseractEngine, OcrError> {
        let engine = match &self.config.tesseract_binary {
            Some(path) => TesseractEngine::with_binary(path.clone())?,
            None => TesseractEngine::new()?,
        };
        Ok(engine.language(self.config.language.clone()))
    }
}

fn require_pixels(image: &RgbImage) -> std::result::Result<(), RedactError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(RedactError::EmptyImage);
    }
    Ok(())
}
