//! Content bounds detection
//!
//! Single-pass min/max reduction over an RGBA pixel buffer. The
//! reduction is associative and commutative, so rows are scanned in
//! parallel and the per-row extents combined with elementwise min/max.

use image::RgbaImage;
use rayon::prelude::*;

use super::classify::is_content_pixel;
use super::types::CropRect;
use super::DetectOptions;

/// Bytes per RGBA pixel
const BYTES_PER_PIXEL: usize = 4;

/// Extents of the content pixels found so far
#[derive(Debug, Clone, Copy)]
struct ContentExtents {
    min_x: u32,
    max_x: u32,
    min_y: u32,
    max_y: u32,
}

impl ContentExtents {
    fn merge(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Content bounds detector
pub struct ContentBoundsDetector;

impl ContentBoundsDetector {
    /// Find the bounding rectangle of the content pixels in an image
    ///
    /// Every pixel is visited exactly once. If the raw detected region
    /// spans less than `options.min_content_span` in either dimension
    /// (including the case where no content pixel exists at all), the
    /// full-image rectangle is returned instead. Otherwise the region
    /// is padded by `options.padding` per side and clamped to the image
    /// extent.
    ///
    /// The returned rectangle always fits within the image and never
    /// has zero width or height for a positive-extent input. The call
    /// is pure: no state is kept between invocations.
    pub fn find_content_bounds(img: &RgbaImage, options: &DetectOptions) -> CropRect {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return CropRect::full(width, height);
        }
        let stride = width as usize * BYTES_PER_PIXEL;

        let extents = img
            .as_raw()
            .par_chunks_exact(stride)
            .enumerate()
            .filter_map(|(y, row)| Self::scan_row(y as u32, row, options))
            .reduce_with(ContentExtents::merge);

        let Some(found) = extents else {
            // No content pixel anywhere
            return CropRect::full(width, height);
        };

        // A region narrower than the minimum span in either dimension is
        // implausible as real content; keep the whole frame instead.
        let span_x = found.max_x - found.min_x;
        let span_y = found.max_y - found.min_y;
        if span_x < options.min_content_span || span_y < options.min_content_span {
            return CropRect::full(width, height);
        }

        // Pad each side and clamp. The width/height clamp measures from
        // the unpadded minimum to the far edge, not from the padded left
        // edge; this matches the observed production behavior.
        let pad = options.padding;
        CropRect {
            left: found.min_x.saturating_sub(pad),
            top: found.min_y.saturating_sub(pad),
            width: (width - found.min_x).min(span_x + pad * 2),
            height: (height - found.min_y).min(span_y + pad * 2),
        }
    }

    /// Scan one row, returning the extents of its content pixels
    fn scan_row(y: u32, row: &[u8], options: &DetectOptions) -> Option<ContentExtents> {
        let mut min_x = None;
        let mut max_x = 0u32;

        for (x, px) in row.chunks_exact(BYTES_PER_PIXEL).enumerate() {
            if is_content_pixel(px[0], px[1], px[2], options) {
                let x = x as u32;
                if min_x.is_none() {
                    min_x = Some(x);
                }
                max_x = x;
            }
        }

        min_x.map(|min_x| ContentExtents {
            min_x,
            max_x,
            min_y: y,
            max_y: y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);

    /// Gray canvas with a solid red patch at [x0, x0+w) x [y0, y0+h)
    fn patch_image(size: (u32, u32), x0: u32, y0: u32, w: u32, h: u32) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(size.0, size.1, GRAY);
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                img.put_pixel(x, y, RED);
            }
        }
        img
    }

    fn detect(img: &RgbaImage) -> CropRect {
        ContentBoundsDetector::find_content_bounds(img, &DetectOptions::default())
    }

    #[test]
    fn test_uniform_black_falls_back_to_full_image() {
        let img = RgbaImage::from_pixel(300, 200, Rgba([0, 0, 0, 255]));
        assert_eq!(detect(&img), CropRect::full(300, 200));
    }

    #[test]
    fn test_uniform_white_falls_back_to_full_image() {
        let img = RgbaImage::from_pixel(300, 200, Rgba([255, 255, 255, 255]));
        assert_eq!(detect(&img), CropRect::full(300, 200));
    }

    #[test]
    fn test_uniform_gray_falls_back_to_full_image() {
        let img = RgbaImage::from_pixel(300, 200, GRAY);
        assert_eq!(detect(&img), CropRect::full(300, 200));
    }

    #[test]
    fn test_central_patch_detected_with_padding() {
        // Patch covers x in [100, 250), y in [120, 260)
        let img = patch_image((400, 400), 100, 120, 150, 140);
        let bounds = detect(&img);

        assert_eq!(bounds.left, 95);
        assert_eq!(bounds.top, 115);
        // span_x = 149, padded to 159; clamp 400 - 100 = 300 does not bite
        assert_eq!(bounds.width, 159);
        assert_eq!(bounds.height, 149);
        assert!(!bounds.is_full(400, 400));
        assert!(bounds.fits_within(400, 400));
    }

    #[test]
    fn test_small_patch_falls_back_regardless_of_intensity() {
        let img = patch_image((400, 400), 150, 150, 50, 50);
        assert_eq!(detect(&img), CropRect::full(400, 400));
    }

    #[test]
    fn test_span_just_below_minimum_falls_back() {
        // 100 pixels wide means span 99 < 100
        let img = patch_image((400, 400), 50, 50, 100, 300);
        assert_eq!(detect(&img), CropRect::full(400, 400));
    }

    #[test]
    fn test_span_at_minimum_is_kept() {
        // 101 pixels wide means span exactly 100, which passes
        let img = patch_image((400, 400), 50, 50, 101, 300);
        let bounds = detect(&img);
        assert!(!bounds.is_full(400, 400));
        assert_eq!(bounds.width, 110);
    }

    #[test]
    fn test_patch_touching_left_edge_clamps_to_zero() {
        let img = patch_image((400, 400), 0, 50, 120, 120);
        let bounds = detect(&img);

        assert_eq!(bounds.left, 0);
        assert_eq!(bounds.top, 45);
        // span 119 padded to 129; clamp 400 - 0 = 400 does not bite
        assert_eq!(bounds.width, 129);
        assert!(bounds.fits_within(400, 400));
    }

    #[test]
    fn test_patch_touching_right_edge_clamps_width() {
        // Patch covers x in [280, 400), so max_x = 399
        let img = patch_image((400, 400), 280, 50, 120, 120);
        let bounds = detect(&img);

        assert_eq!(bounds.left, 275);
        // padded span would be 129, but only 400 - 280 = 120 remains
        assert_eq!(bounds.width, 120);
        assert!(bounds.fits_within(400, 400));
    }

    #[test]
    fn test_full_frame_content_yields_near_full_rect() {
        let img = RgbaImage::from_pixel(300, 300, RED);
        let bounds = detect(&img);

        assert_eq!(bounds.left, 0);
        assert_eq!(bounds.top, 0);
        assert_eq!(bounds.width, 300);
        assert_eq!(bounds.height, 300);
    }

    #[test]
    fn test_detection_is_idempotent() {
        let img = patch_image((500, 380), 130, 90, 200, 180);
        let first = detect(&img);
        let second = detect(&img);
        assert_eq!(first, second);
    }

    #[test]
    fn test_alpha_is_ignored() {
        let mut img = patch_image((400, 400), 100, 100, 150, 150);
        // Make the patch fully transparent; classification must not change
        for y in 100..250 {
            for x in 100..250 {
                img.put_pixel(x, y, Rgba([255, 0, 0, 0]));
            }
        }
        let bounds = detect(&img);
        assert_eq!(bounds.left, 95);
        assert_eq!(bounds.top, 95);
    }

    #[test]
    fn test_single_pixel_image() {
        let img = RgbaImage::from_pixel(1, 1, RED);
        let bounds = detect(&img);
        assert_eq!(bounds, CropRect::full(1, 1));
    }

    #[test]
    fn test_custom_span_and_padding() {
        let options = DetectOptions::builder()
            .min_content_span(10)
            .padding(2)
            .build();
        let img = patch_image((200, 200), 60, 60, 40, 40);
        let bounds = ContentBoundsDetector::find_content_bounds(&img, &options);

        assert_eq!(bounds.left, 58);
        assert_eq!(bounds.top, 58);
        assert_eq!(bounds.width, 43);
        assert_eq!(bounds.height, 43);
    }
}
