//! Content Bounds Detection module
//!
//! Detects the bounding region of "real content" in a decoded image,
//! trimming surrounding letterboxing, padding, and uniform UI chrome.
//!
//! # Algorithm
//!
//! 1. Classify every pixel as content or background/UI using brightness
//!    and channel-variation thresholds
//! 2. Reduce the content pixels to their min/max row and column indices
//! 3. Pad the detected region and clamp it to the image extent
//! 4. Fall back to the full image when the region is implausibly small
//!
//! # Example
//!
//! ```rust
//! use autocrop::bounds::{ContentBoundsDetector, DetectOptions};
//! use image::RgbaImage;
//!
//! let img = RgbaImage::from_pixel(200, 200, image::Rgba([0, 0, 0, 255]));
//! let bounds = ContentBoundsDetector::find_content_bounds(&img, &DetectOptions::default());
//!
//! // No content in an all-black image, so the full frame comes back.
//! assert_eq!((bounds.width, bounds.height), (200, 200));
//! ```

// Submodules
mod classify;
mod detect;
mod types;

// Re-export public API
pub use classify::is_content_pixel;
pub use detect::ContentBoundsDetector;
pub use types::{CropError, CropRect, Result};

// ============================================================
// Constants
// ============================================================

/// Minimum mean brightness for a content pixel (0-255 scale, exclusive)
const DEFAULT_BRIGHTNESS_THRESHOLD: f32 = 45.0;

/// Minimum largest pairwise channel difference for a content pixel (exclusive)
const DEFAULT_COLOR_VARIATION_THRESHOLD: u8 = 35;

/// Pairwise channel difference below which a pixel counts as grayish
const DEFAULT_GRAYSCALE_THRESHOLD: u8 = 15;

/// Lower edge of the brightness window treated as UI chrome (exclusive)
const DEFAULT_UI_BRIGHTNESS_MIN: f32 = 50.0;

/// Upper edge of the brightness window treated as UI chrome (exclusive)
const DEFAULT_UI_BRIGHTNESS_MAX: f32 = 200.0;

/// Minimum raw content span in either dimension before the full-image fallback
const DEFAULT_MIN_CONTENT_SPAN: u32 = 100;

/// Padding applied around the detected region, pixels per side
const DEFAULT_CONTENT_PADDING: u32 = 5;

// ============================================================
// Options
// ============================================================

/// Content bounds detection options
///
/// The defaults reproduce the tuned production thresholds; each knob can
/// be adjusted independently without changing the algorithm's structure.
#[derive(Debug, Clone)]
pub struct DetectOptions {
    /// Minimum mean brightness for a content pixel (0-255 scale)
    pub brightness_threshold: f32,
    /// Minimum largest pairwise channel difference for a content pixel
    pub color_variation_threshold: u8,
    /// Pairwise channel difference below which a pixel counts as grayish
    pub grayscale_threshold: u8,
    /// Lower edge of the UI-chrome brightness window
    pub ui_brightness_min: f32,
    /// Upper edge of the UI-chrome brightness window
    pub ui_brightness_max: f32,
    /// Minimum raw content span before falling back to the full image
    pub min_content_span: u32,
    /// Padding around the detected region, pixels per side
    pub padding: u32,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            brightness_threshold: DEFAULT_BRIGHTNESS_THRESHOLD,
            color_variation_threshold: DEFAULT_COLOR_VARIATION_THRESHOLD,
            grayscale_threshold: DEFAULT_GRAYSCALE_THRESHOLD,
            ui_brightness_min: DEFAULT_UI_BRIGHTNESS_MIN,
            ui_brightness_max: DEFAULT_UI_BRIGHTNESS_MAX,
            min_content_span: DEFAULT_MIN_CONTENT_SPAN,
            padding: DEFAULT_CONTENT_PADDING,
        }
    }
}

impl DetectOptions {
    /// Create a new options builder
    pub fn builder() -> DetectOptionsBuilder {
        DetectOptionsBuilder::default()
    }
}

/// Builder for DetectOptions
#[derive(Debug, Default)]
pub struct DetectOptionsBuilder {
    options: DetectOptions,
}

impl DetectOptionsBuilder {
    /// Set the brightness threshold
    #[must_use]
    pub fn brightness_threshold(mut self, threshold: f32) -> Self {
        self.options.brightness_threshold = threshold;
        self
    }

    /// Set the color variation threshold
    #[must_use]
    pub fn color_variation_threshold(mut self, threshold: u8) -> Self {
        self.options.color_variation_threshold = threshold;
        self
    }

    /// Set the grayscale detection threshold
    #[must_use]
    pub fn grayscale_threshold(mut self, threshold: u8) -> Self {
        self.options.grayscale_threshold = threshold;
        self
    }

    /// Set the UI-chrome brightness window
    #[must_use]
    pub fn ui_brightness_window(mut self, min: f32, max: f32) -> Self {
        self.options.ui_brightness_min = min;
        self.options.ui_brightness_max = max;
        self
    }

    /// Set the minimum content span
    #[must_use]
    pub fn min_content_span(mut self, span: u32) -> Self {
        self.options.min_content_span = span;
        self
    }

    /// Set the padding per side
    #[must_use]
    pub fn padding(mut self, padding: u32) -> Self {
        self.options.padding = padding;
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> DetectOptions {
        self.options
    }
}
