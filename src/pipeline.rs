//! Batch crop pipeline
//!
//! Decodes each input image, detects its content bounds, crops to the
//! detected rectangle, and writes the result into the output directory
//! as `processed_<name>`. Files are processed in parallel; a file that
//! fails to decode is reported and skipped without aborting the batch.

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, RgbaImage};
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::bounds::{ContentBoundsDetector, CropError, CropRect, DetectOptions, Result};

// ============================================================
// Constants
// ============================================================

/// File extensions accepted as image inputs
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff"];

/// Prefix for output filenames
const OUTPUT_PREFIX: &str = "processed_";

/// Default JPEG quality for exported crops
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

// ============================================================
// Types
// ============================================================

/// Output encoding for cropped images
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Re-encode every crop as JPEG
    #[default]
    Jpeg,
    /// Keep each input's own format
    Preserve,
}

/// Pipeline options
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Content detection options
    pub detect: DetectOptions,
    /// Output encoding
    pub format: OutputFormat,
    /// JPEG quality (1-100), used when the output is JPEG
    pub jpeg_quality: u8,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            detect: DetectOptions::default(),
            format: OutputFormat::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Result of cropping a single file
#[derive(Debug, Clone)]
pub struct CropOutcome {
    /// Source image path
    pub input_path: PathBuf,
    /// Written output path
    pub output_path: PathBuf,
    /// Source dimensions (width, height)
    pub original_size: (u32, u32),
    /// Output dimensions (width, height)
    pub cropped_size: (u32, u32),
    /// Detected content rectangle that was applied
    pub bounds: CropRect,
}

impl CropOutcome {
    /// Check whether detection fell back to the full frame
    pub fn is_unchanged(&self) -> bool {
        self.cropped_size == self.original_size
    }
}

/// Aggregate result of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Successfully cropped files
    pub outcomes: Vec<CropOutcome>,
    /// Files that failed, with their errors
    pub failures: Vec<(PathBuf, CropError)>,
}

impl BatchReport {
    /// Total number of files attempted
    pub fn total(&self) -> usize {
        self.outcomes.len() + self.failures.len()
    }

    /// Number of files cropped successfully
    pub fn succeeded(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of files that failed
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Print the final batch summary
    pub fn print_summary(&self) {
        println!();
        println!("{}", "=".repeat(80));
        println!("Processing Summary");
        println!("{}", "=".repeat(80));
        println!("  Total files:  {}", self.total());
        println!("  Succeeded:    {}", self.succeeded());
        println!("  Errors:       {}", self.failed());
        println!("{}", "=".repeat(80));
        println!();
    }
}

// ============================================================
// File collection
// ============================================================

/// Check whether a path looks like an image file by extension
fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Collect image files from an input path (file or directory)
///
/// Directory entries are filtered by extension and sorted for a stable
/// processing order. Non-image files are silently ignored, mirroring
/// how the front end filters out non-image MIME types before cropping.
pub fn collect_image_files(input: &Path) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();

    if input.is_file() {
        if has_image_extension(input) {
            image_files.push(input.to_path_buf());
        }
    } else if input.is_dir() {
        for entry in fs::read_dir(input)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && has_image_extension(&path) {
                image_files.push(path);
            }
        }
        image_files.sort();
    }

    Ok(image_files)
}

// ============================================================
// Crop Pipeline
// ============================================================

/// Content-aware crop pipeline
pub struct CropPipeline {
    options: PipelineOptions,
}

impl CropPipeline {
    /// Create a pipeline with the given options
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Get the pipeline options
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Compute the output path for an input file
    pub fn output_path(&self, input: &Path, output_dir: &Path) -> PathBuf {
        let name = match self.options.format {
            OutputFormat::Jpeg => {
                let stem = input
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("image");
                format!("{OUTPUT_PREFIX}{stem}.jpg")
            }
            OutputFormat::Preserve => {
                let name = input
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("image");
                format!("{OUTPUT_PREFIX}{name}")
            }
        };
        output_dir.join(name)
    }

    /// Crop a single file and write the result
    pub fn process_file(&self, input: &Path, output_dir: &Path) -> Result<CropOutcome> {
        if !input.exists() {
            return Err(CropError::ImageNotFound(input.to_path_buf()));
        }

        let img = image::open(input).map_err(|e| CropError::InvalidImage(e.to_string()))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        let bounds = ContentBoundsDetector::find_content_bounds(&rgba, &self.options.detect);
        debug!(
            input = %input.display(),
            left = bounds.left,
            top = bounds.top,
            width = bounds.width,
            height = bounds.height,
            "content bounds detected"
        );

        let cropped =
            imageops::crop_imm(&rgba, bounds.left, bounds.top, bounds.width, bounds.height)
                .to_image();

        let output_path = self.output_path(input, output_dir);
        self.export(cropped, &output_path)?;

        Ok(CropOutcome {
            input_path: input.to_path_buf(),
            output_path,
            original_size: (width, height),
            cropped_size: (bounds.width, bounds.height),
            bounds,
        })
    }

    /// Encode and write a cropped image
    fn export(&self, cropped: RgbaImage, path: &Path) -> Result<()> {
        let is_jpeg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg")
            });

        if is_jpeg {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgba8(cropped).to_rgb8();
            let file = fs::File::create(path)?;
            let writer = BufWriter::new(file);
            let encoder = JpegEncoder::new_with_quality(writer, self.options.jpeg_quality);
            rgb.write_with_encoder(encoder)
                .map_err(|e| CropError::InvalidImage(e.to_string()))?;
        } else {
            cropped
                .save(path)
                .map_err(|e| CropError::InvalidImage(e.to_string()))?;
        }

        Ok(())
    }

    /// Crop a batch of files in parallel
    ///
    /// Each failure is logged and collected; the batch always runs to
    /// completion. Successful outcomes keep the input order of `files`.
    pub fn process_batch(
        &self,
        files: &[PathBuf],
        output_dir: &Path,
        progress: Option<&ProgressBar>,
    ) -> BatchReport {
        let results: Vec<(PathBuf, Result<CropOutcome>)> = files
            .par_iter()
            .map(|path| {
                let result = self.process_file(path, output_dir);
                if let Some(bar) = progress {
                    bar.inc(1);
                }
                (path.clone(), result)
            })
            .collect();

        let mut report = BatchReport::default();
        for (path, result) in results {
            match result {
                Ok(outcome) => report.outcomes.push(outcome),
                Err(e) => {
                    warn!(input = %path.display(), error = %e, "failed to crop");
                    report.failures.push((path, e));
                }
            }
        }
        report
    }
}
