//! Image loading and normalization
//!
//! Decodes any codec-supported raster format (JPEG, PNG, BMP, GIF first
//! frame, ...) into a canonical 3-channel RGB buffer. Alpha is discarded
//! and grayscale is expanded, so every downstream stage sees the same
//! pixel layout.

use image::RgbImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Image loading error types
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Image not found: {0}")]
    ImageNotFound(PathBuf),

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// Load an image from a file path, normalized to RGB
pub fn load_path(path: &Path) -> Result<RgbImage> {
    if !path.exists() {
        return Err(LoadError::ImageNotFound(path.to_path_buf()));
    }

    let img = image::open(path).map_err(|e| LoadError::DecodeFailed(e.to_string()))?;
    Ok(img.to_rgb8())
}

/// Decode an image from raw bytes, normalized to RGB.
///
/// The format is guessed from the content, matching what
/// `image::load_from_memory` supports.
pub fn load_bytes(bytes: &[u8]) -> Result<RgbImage> {
    let img =
        image::load_from_memory(bytes).map_err(|e| LoadError::DecodeFailed(e.to_string()))?;
    Ok(img.to_rgb8())
}
