//! Pixel classification
//!
//! Decides, per pixel, whether it belongs to image content or to
//! background / UI chrome. Three filters must all pass:
//!
//! 1. Mean brightness above the dark floor (rejects letterboxing and
//!    near-black canvas)
//! 2. Largest pairwise channel difference above the variation floor
//!    (rejects any flat single-hue region)
//! 3. Not a grayish pixel inside the mid-brightness window (rejects
//!    toolbars, borders, and other flat gray chrome)

use super::DetectOptions;

/// Classify a single pixel as content or background/UI
///
/// Pure and total over the full 0-255 domain of each channel. Alpha is
/// never consulted. The comparisons are strict at every boundary: a
/// pixel sitting exactly on a threshold is not content.
pub fn is_content_pixel(r: u8, g: u8, b: u8, options: &DetectOptions) -> bool {
    // Real-valued average; integer truncation would bias dark pixels
    // toward "not content".
    let brightness = (r as f32 + g as f32 + b as f32) / 3.0;

    let color_variation = r.abs_diff(g).max(g.abs_diff(b)).max(b.abs_diff(r));

    let is_grayish = r.abs_diff(g) < options.grayscale_threshold
        && g.abs_diff(b) < options.grayscale_threshold
        && r.abs_diff(b) < options.grayscale_threshold;

    // Grayish mid-brightness pixels are treated as UI chrome regardless
    // of the other thresholds.
    let is_ui_element = is_grayish
        && brightness < options.ui_brightness_max
        && brightness > options.ui_brightness_min;

    brightness > options.brightness_threshold
        && color_variation > options.color_variation_threshold
        && !is_ui_element
}
