//! Text compositing
//!
//! Draws a replacement string onto an image at a fixed anchor. A single
//! draw call: no wrapping, sizing, or collision avoidance. Long strings
//! may run past the buffer edge, which is accepted behavior.
//!
//! Rendering uses `ab_glyph` with a TTF resolved from an explicit path
//! or from a fixed list of common system font locations.

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Overlay error types
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("No usable font: {0}")]
    FontUnavailable(String),

    #[error("Failed to load font {0}: {1}")]
    FontLoadFailed(PathBuf, String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OverlayError>;

// ============================================================
// Constants
// ============================================================

/// Default anchor point for the overlay
const DEFAULT_ANCHOR: (i32, i32) = (10, 10);

/// Default text color (black)
const DEFAULT_COLOR: [u8; 3] = [0, 0, 0];

/// Default glyph scale in pixels
const DEFAULT_SCALE: f32 = 16.0;

/// System font locations tried in order when no font path is given
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/gnu-free/FreeSans.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
];

// ============================================================
// Style
// ============================================================

/// Overlay style options
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    /// Top-left anchor of the drawn text
    pub anchor: (i32, i32),
    /// Text color
    pub color: [u8; 3],
    /// Glyph scale in pixels
    pub scale: f32,
    /// Explicit font file; `None` searches system locations
    pub font_path: Option<PathBuf>,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            anchor: DEFAULT_ANCHOR,
            color: DEFAULT_COLOR,
            scale: DEFAULT_SCALE,
            font_path: None,
        }
    }
}

impl OverlayStyle {
    /// Create a new style builder
    pub fn builder() -> OverlayStyleBuilder {
        OverlayStyleBuilder::default()
    }
}

/// Builder for OverlayStyle
#[derive(Debug, Default)]
pub struct OverlayStyleBuilder {
    style: OverlayStyle,
}

impl OverlayStyleBuilder {
    /// Set the anchor point
    #[must_use]
    pub fn anchor(mut self, x: i32, y: i32) -> Self {
        self.style.anchor = (x, y);
        self
    }

    /// Set the text color
    #[must_use]
    pub fn color(mut self, color: [u8; 3]) -> Self {
        self.style.color = color;
        self
    }

    /// Set the glyph scale in pixels
    #[must_use]
    pub fn scale(mut self, scale: f32) -> Self {
        self.style.scale = scale.max(1.0);
        self
    }

    /// Use a specific font file
    #[must_use]
    pub fn font_path(mut self, path: PathBuf) -> Self {
        self.style.font_path = Some(path);
        self
    }

    /// Build the style
    #[must_use]
    pub fn build(self) -> OverlayStyle {
        self.style
    }
}

// ============================================================
// Compositing
// ============================================================

/// Render `text` onto a copy of `image` at the style's anchor.
///
/// Deterministic for identical inputs and a fixed font. Fails with
/// [`OverlayError::FontUnavailable`] when no font can be resolved.
pub fn draw_annotation(image: &RgbImage, text: &str, style: &OverlayStyle) -> Result<RgbImage> {
    let font = load_font(style.font_path.as_deref())?;

    let mut annotated = image.clone();
    draw_text_mut(
        &mut annotated,
        Rgb(style.color),
        style.anchor.0,
        style.anchor.1,
        PxScale::from(style.scale),
        &font,
        text,
    );

    Ok(annotated)
}

/// Resolve a usable font file path.
///
/// An explicit path must exist; otherwise the system candidates are
/// tried in order.
pub fn resolve_font_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(OverlayError::FontUnavailable(format!(
            "font file not found: {}",
            path.display()
        )));
    }

    SYSTEM_FONT_CANDIDATES
        .iter()
        .map(Path::new)
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            OverlayError::FontUnavailable(
                "no system font found; set an explicit font path".to_string(),
            )
        })
}

fn load_font(explicit: Option<&Path>) -> Result<FontVec> {
    let path = resolve_font_path(explicit)?;
    let bytes = std::fs::read(&path)?;
    FontVec::try_from_vec(bytes).map_err(|e| OverlayError::FontLoadFailed(path, e.to_string()))
}
