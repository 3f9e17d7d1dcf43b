//! autocrop - content-aware batch image cropping
//!
//! Detects the bounding region of real content in each image (trimming
//! letterboxing, padding, and uniform UI chrome), crops to it, and
//! writes the results. The detector is a pure single-pass heuristic:
//! a per-pixel content classifier reduced to a padded bounding
//! rectangle with a full-image fallback.
//!
//! # Example
//!
//! ```rust,no_run
//! use autocrop::{CropPipeline, PipelineOptions};
//! use std::path::Path;
//!
//! let pipeline = CropPipeline::new(PipelineOptions::default());
//! let outcome = pipeline
//!     .process_file(Path::new("screenshot.png"), Path::new("cropped"))
//!     .unwrap();
//!
//! println!(
//!     "{}x{} -> {}x{}",
//!     outcome.original_size.0,
//!     outcome.original_size.1,
//!     outcome.cropped_size.0,
//!     outcome.cropped_size.1
//! );
//! ```

pub mod bounds;
pub mod cli;
pub mod config;
pub mod pipeline;

// Re-export public API
pub use bounds::{
    is_content_pixel, ContentBoundsDetector, CropError, CropRect, DetectOptions,
    DetectOptionsBuilder,
};
pub use cli::{exit_codes, Cli, Commands, CropArgs};
pub use config::{CliOverrides, Config, ConfigError};
pub use pipeline::{
    collect_image_files, BatchReport, CropOutcome, CropPipeline, OutputFormat, PipelineOptions,
};
