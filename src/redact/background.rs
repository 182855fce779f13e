//! Dominant background color estimation
//!
//! # Algorithm
//!
//! 1. Scan every pixel in row-major order
//! 2. Count exact RGB value frequency
//! 3. Return the most frequent value; ties break toward the color
//!    encountered first in scan order
//!
//! The tie-break makes the result reproducible for identical pixel
//! data. O(W*H) time, O(distinct colors) space.

use super::types::{RedactError, Result};
use image::{Rgb, RgbImage};
use std::collections::HashMap;

/// Estimate the background color of an image by exact-value frequency.
///
/// A zero-pixel buffer is a precondition violation and fails with
/// [`RedactError::EmptyImage`].
pub fn dominant_color(image: &RgbImage) -> Result<Rgb<u8>> {
    if image.width() == 0 || image.height() == 0 {
        return Err(RedactError::EmptyImage);
    }

    let mut counts: HashMap<[u8; 3], u32> = HashMap::new();
    let mut scan_order: Vec<[u8; 3]> = Vec::new();

    for pixel in image.pixels() {
        let entry = counts.entry(pixel.0).or_insert_with(|| {
            scan_order.push(pixel.0);
            0
        });
        *entry += 1;
    }

    // scan_order holds distinct colors in first-encounter order, so a
    // strict comparison keeps the earliest color on ties
    let mut best = scan_order[0];
    let mut best_count = counts[&best];

    for color in &scan_order[1..] {
        let count = counts[color];
        if count > best_count {
            best = *color;
            best_count = count;
        }
    }

    Ok(Rgb(best))
}
