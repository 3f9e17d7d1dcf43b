//! Common types for the bounds module

use std::path::PathBuf;
use thiserror::Error;

/// Crop pipeline error types
#[derive(Debug, Error)]
pub enum CropError {
    #[error("Image not found: {0}")]
    ImageNotFound(PathBuf),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CropError>;

/// Axis-aligned crop rectangle in pixel coordinates
///
/// Always satisfies `left + width <= image width` and
/// `top + height <= image height` for the image it was detected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    /// Left edge (x coordinate)
    pub left: u32,
    /// Top edge (y coordinate)
    pub top: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl CropRect {
    /// Rectangle covering an entire image
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            width,
            height,
        }
    }

    /// Get the right edge coordinate (exclusive)
    pub fn right(&self) -> u32 {
        self.left + self.width
    }

    /// Get the bottom edge coordinate (exclusive)
    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }

    /// Check if the rectangle covers the whole image
    pub fn is_full(&self, width: u32, height: u32) -> bool {
        self.left == 0 && self.top == 0 && self.width == width && self.height == height
    }

    /// Check if the rectangle fits inside the given image extent
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width && self.bottom() <= height
    }
}
