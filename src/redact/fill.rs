//! Region fill redaction
//!
//! Overwrites detected text regions with a fill color. Each region is
//! expanded by a fixed margin to cover anti-aliased glyph edges, then
//! clamped on both bounds to the buffer before writing.

use super::background::dominant_color;
use super::types::Result;
use super::RedactOptions;
use crate::ocr::TextRegion;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

/// Summary of a redaction pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedactionSummary {
    /// Regions that produced a non-empty fill rectangle
    pub regions_filled: usize,
    /// Regions that clamped to zero area (fully outside the buffer)
    pub regions_skipped: usize,
}

impl RedactionSummary {
    /// Whether anything was written
    pub fn changed(&self) -> bool {
        self.regions_filled > 0
    }
}

/// Region redaction processor
pub struct TextRedactor;

impl TextRedactor {
    /// Redact `regions` according to `options`.
    ///
    /// When `options.fill` is unset, the buffer's dominant color is
    /// estimated per call and used as the fill. Confidence filtering
    /// happens at detection time; every region given here is written.
    pub fn redact(
        image: &mut RgbImage,
        regions: &[TextRegion],
        options: &RedactOptions,
    ) -> Result<RedactionSummary> {
        let fill = match options.fill {
            Some(rgb) => Rgb(rgb),
            None => dominant_color(image)?,
        };
        Self::redact_regions(image, regions, fill, options.margin)
    }

    /// Overwrite every region, expanded by `margin`, with `fill`.
    ///
    /// Regions are processed independently; overlapping fills are
    /// idempotent. A region whose expanded rectangle clamps to zero
    /// area is silently skipped.
    pub fn redact_regions(
        image: &mut RgbImage,
        regions: &[TextRegion],
        fill: Rgb<u8>,
        margin: u32,
    ) -> Result<RedactionSummary> {
        let bounds = image.dimensions();
        let mut summary = RedactionSummary {
            regions_filled: 0,
            regions_skipped: 0,
        };

        for region in regions {
            match expanded_rect(region, margin, bounds) {
                Some((x0, y0, x1, y1)) => {
                    let rect = Rect::at(x0 as i32, y0 as i32).of_size(x1 - x0, y1 - y0);
                    draw_filled_rect_mut(image, rect, fill);
                    summary.regions_filled += 1;
                }
                None => summary.regions_skipped += 1,
            }
        }

        Ok(summary)
    }
}

/// Expand a region by `margin` on all sides and clamp to the buffer.
///
/// Returns half-open pixel bounds `(x0, y0, x1, y1)`, or `None` when
/// the clamped rectangle has zero area. Both bounds are clamped: the
/// low edge saturates at 0 and the high edge at the buffer extent, so
/// no write can land out of range.
pub(crate) fn expanded_rect(
    region: &TextRegion,
    margin: u32,
    bounds: (u32, u32),
) -> Option<(u32, u32, u32, u32)> {
    let (buffer_width, buffer_height) = bounds;

    let x0 = region.x.saturating_sub(margin).min(buffer_width);
    let y0 = region.y.saturating_sub(margin).min(buffer_height);
    let x1 = region.right().saturating_add(margin).min(buffer_width);
    let y1 = region.bottom().saturating_add(margin).min(buffer_height);

    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    Some((x0, y0, x1, y1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x: u32, y: u32, width: u32, height: u32) -> TextRegion {
        TextRegion {
            text: "token".to_string(),
            x,
            y,
            width,
            height,
            confidence: 90,
        }
    }

    fn assert_rect_filled(image: &RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, fill: Rgb<u8>) {
        for y in y0..y1 {
            for x in x0..x1 {
                assert_eq!(*image.get_pixel(x, y), fill, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_expanded_rect_interior() {
        let rect = expanded_rect(&region(20, 20, 50, 10), 5, (100, 100)).unwrap();
        assert_eq!(rect, (15, 15, 75, 35));
    }

    #[test]
    fn test_expanded_rect_clamps_low_edge() {
        let rect = expanded_rect(&region(2, 3, 10, 10), 5, (100, 100)).unwrap();
        assert_eq!(rect, (0, 0, 17, 18));
    }

    #[test]
    fn test_expanded_rect_clamps_high_edge() {
        let rect = expanded_rect(&region(95, 95, 10, 10), 5, (100, 100)).unwrap();
        assert_eq!(rect, (90, 90, 100, 100));
    }

    #[test]
    fn test_expanded_rect_fully_outside() {
        assert!(expanded_rect(&region(200, 200, 10, 10), 5, (100, 100)).is_none());
    }

    #[test]
    fn test_expanded_rect_zero_margin() {
        let rect = expanded_rect(&region(10, 10, 5, 5), 0, (100, 100)).unwrap();
        assert_eq!(rect, (10, 10, 15, 15));
    }

    #[test]
    fn test_redact_fills_inside_and_preserves_outside() {
        let background = Rgb([10, 10, 10]);
        let fill = Rgb([255, 0, 0]);
        let mut image = RgbImage::from_pixel(100, 100, background);

        let regions = vec![region(20, 20, 50, 10)];
        let summary = TextRedactor::redact_regions(&mut image, &regions, fill, 5).unwrap();

        assert_eq!(summary.regions_filled, 1);
        assert_eq!(summary.regions_skipped, 0);

        // Inside the clamped expanded rectangle
        assert_rect_filled(&image, 15, 15, 75, 35, fill);

        // Strictly outside: corners and the pixel just past each edge
        assert_eq!(*image.get_pixel(0, 0), background);
        assert_eq!(*image.get_pixel(99, 99), background);
        assert_eq!(*image.get_pixel(14, 20), background);
        assert_eq!(*image.get_pixel(75, 20), background);
        assert_eq!(*image.get_pixel(20, 14), background);
        assert_eq!(*image.get_pixel(20, 35), background);
    }

    #[test]
    fn test_redact_hello_scenario() {
        // Token "HELLO" at (20,20,50,10), red background, margin 5:
        // (15,15)-(70,30) must end up entirely red
        let red = Rgb([255, 0, 0]);
        let mut image = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));

        let mut hello = region(20, 20, 50, 10);
        hello.text = "HELLO".to_string();

        TextRedactor::redact_regions(&mut image, &[hello], red, 5).unwrap();

        assert_rect_filled(&image, 15, 15, 70, 30, red);
    }

    #[test]
    fn test_redact_is_idempotent() {
        let fill = Rgb([0, 128, 0]);
        let mut image = RgbImage::from_pixel(60, 60, Rgb([255, 255, 255]));
        let regions = vec![region(10, 10, 20, 8), region(25, 12, 20, 8)];

        TextRedactor::redact_regions(&mut image, &regions, fill, 5).unwrap();
        let after_first = image.clone();

        TextRedactor::redact_regions(&mut image, &regions, fill, 5).unwrap();
        assert_eq!(image, after_first);
    }

    #[test]
    fn test_redact_overlapping_regions() {
        let fill = Rgb([1, 2, 3]);
        let mut image = RgbImage::from_pixel(50, 50, Rgb([255, 255, 255]));

        // Two regions sharing most of their area
        let regions = vec![region(10, 10, 20, 10), region(15, 12, 20, 10)];
        let summary = TextRedactor::redact_regions(&mut image, &regions, fill, 2).unwrap();

        assert_eq!(summary.regions_filled, 2);
        assert_rect_filled(&image, 8, 8, 32, 22, fill);
    }

    #[test]
    fn test_redact_out_of_bounds_region_is_noop() {
        let base = Rgb([7, 7, 7]);
        let mut image = RgbImage::from_pixel(30, 30, base);

        let regions = vec![region(100, 100, 10, 10)];
        let summary =
            TextRedactor::redact_regions(&mut image, &regions, Rgb([0, 0, 0]), 5).unwrap();

        assert_eq!(summary.regions_filled, 0);
        assert_eq!(summary.regions_skipped, 1);
        assert!(!summary.changed());
        assert_rect_filled(&image, 0, 0, 30, 30, base);
    }

    #[test]
    fn test_redact_empty_region_list() {
        let base = Rgb([200, 200, 200]);
        let mut image = RgbImage::from_pixel(20, 20, base);

        let summary = TextRedactor::redact_regions(&mut image, &[], Rgb([0, 0, 0]), 5).unwrap();
        assert_eq!(summary.regions_filled, 0);
        assert_rect_filled(&image, 0, 0, 20, 20, base);
    }

    #[test]
    fn test_redact_with_options_estimates_background() {
        // fill: None resolves to the dominant color of the buffer
        let background = Rgb([200, 0, 0]);
        let mut image = RgbImage::from_pixel(50, 50, background);
        for x in 20..30 {
            image.put_pixel(x, 20, Rgb([0, 0, 0]));
        }

        let options = RedactOptions {
            min_confidence: 60,
            margin: 5,
            fill: None,
        };
        let summary = TextRedactor::redact(&mut image, &[region(20, 18, 10, 5)], &options).unwrap();

        assert!(summary.changed());
        assert_rect_filled(&image, 15, 13, 35, 28, background);
    }

    #[test]
    fn test_redact_with_options_fixed_fill_and_margin() {
        let mut image = RgbImage::from_pixel(40, 40, Rgb([255, 255, 255]));

        let options = RedactOptions::builder().margin(0).fill([1, 2, 3]).build();
        TextRedactor::redact(&mut image, &[region(10, 10, 5, 5)], &options).unwrap();

        // Margin 0: the box itself is filled, its neighbors are not
        assert_rect_filled(&image, 10, 10, 15, 15, Rgb([1, 2, 3]));
        assert_eq!(*image.get_pixel(9, 10), Rgb([255, 255, 255]));
        assert_eq!(*image.get_pixel(15, 10), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_redact_region_straddling_edge() {
        let fill = Rgb([9, 9, 9]);
        let mut image = RgbImage::from_pixel(40, 40, Rgb([255, 255, 255]));

        // Extends past the right and bottom edges after expansion
        let regions = vec![region(35, 35, 10, 10)];
        TextRedactor::redact_regions(&mut image, &regions, fill, 5).unwrap();

        assert_rect_filled(&image, 30, 30, 40, 40, fill);
        assert_eq!(*image.get_pixel(29, 29), Rgb([255, 255, 255]));
    }
}
