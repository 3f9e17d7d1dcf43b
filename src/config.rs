//! Configuration file support
//!
//! Detection thresholds and export settings can be supplied through an
//! optional TOML file: `./autocrop.toml` in the working directory, or
//! `<user config dir>/autocrop/config.toml`. Command-line flags always
//! take precedence over file values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::bounds::DetectOptions;
use crate::pipeline::{OutputFormat, PipelineOptions, DEFAULT_JPEG_QUALITY};

/// Local config filename
const LOCAL_CONFIG: &str = "autocrop.toml";

/// Config filename under the user config directory
const USER_CONFIG: &str = "autocrop/config.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum mean brightness for a content pixel
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
    /// Output encoding
    pub format: OutputFormat,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
    /// Worker threads (None = all cores)
    pub threads: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        let detect = DetectOptions::default();
        Self {
            brightness_threshold: detect.brightness_threshold,
            color_variation_threshold: detect.color_variation_threshold,
            grayscale_threshold: detect.grayscale_threshold,
            ui_brightness_min: detect.ui_brightness_min,
            ui_brightness_max: detect.ui_brightness_max,
            min_content_span: detect.min_content_span,
            padding: detect.padding,
            format: OutputFormat::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            threads: None,
        }
    }
}

/// Command-line overrides applied on top of a config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub brightness_threshold: Option<f32>,
    pub color_variation_threshold: Option<u8>,
    pub grayscale_threshold: Option<u8>,
    pub min_content_span: Option<u32>,
    pub padding: Option<u32>,
    pub format: Option<OutputFormat>,
    pub jpeg_quality: Option<u8>,
    pub threads: Option<usize>,
}

impl CliOverrides {
    /// Create empty overrides
    pub fn new() -> Self {
        Self::default()
    }
}

impl Config {
    /// Load configuration from the default locations
    ///
    /// Checks `./autocrop.toml` first, then the user config directory.
    /// Returns defaults when no config file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.is_file() {
            return Self::load_from_path(&local);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user = config_dir.join(USER_CONFIG);
            if user.is_file() {
                return Self::load_from_path(&user);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Merge CLI overrides into this config (CLI takes precedence)
    pub fn merge_with_cli(&self, overrides: &CliOverrides) -> Self {
        Self {
            brightness_threshold: overrides
                .brightness_threshold
                .unwrap_or(self.brightness_threshold),
            color_variation_threshold: overrides
                .color_variation_threshold
                .unwrap_or(self.color_variation_threshold),
            grayscale_threshold: overrides
                .grayscale_threshold
                .unwrap_or(self.grayscale_threshold),
            ui_brightness_min: self.ui_brightness_min,
            ui_brightness_max: self.ui_brightness_max,
            min_content_span: overrides.min_content_span.unwrap_or(self.min_content_span),
            padding: overrides.padding.unwrap_or(self.padding),
            format: overrides.format.unwrap_or(self.format),
            jpeg_quality: overrides.jpeg_quality.unwrap_or(self.jpeg_quality),
            threads: overrides.threads.or(self.threads),
        }
    }

    /// Build detection options from this config
    pub fn detect_options(&self) -> DetectOptions {
        DetectOptions::builder()
            .brightness_threshold(self.brightness_threshold)
            .color_variation_threshold(self.color_variation_threshold)
            .grayscale_threshold(self.grayscale_threshold)
            .ui_brightness_window(self.ui_brightness_min, self.ui_brightness_max)
            .min_content_span(self.min_content_span)
            .padding(self.padding)
            .build()
    }

    /// Build pipeline options from this config
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            detect: self.detect_options(),
            format: self.format,
            jpeg_quality: self.jpeg_quality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config_matches_detect_defaults() {
        let config = Config::default();
        let detect = DetectOptions::default();

        assert_eq!(config.brightness_threshold, detect.brightness_threshold);
        assert_eq!(config.min_content_span, detect.min_content_span);
        assert_eq!(config.padding, detect.padding);
        assert_eq!(config.jpeg_quality, 95);
        assert_eq!(config.format, OutputFormat::Jpeg);
        assert!(config.threads.is_none());
    }

    #[test]
    fn test_load_from_path_partial_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("autocrop.toml");
        fs::write(
            &path,
            "padding = 10\njpeg_quality = 80\nformat = \"preserve\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.padding, 10);
        assert_eq!(config.jpeg_quality, 80);
        assert_eq!(config.format, OutputFormat::Preserve);
        // Untouched fields keep their defaults
        assert_eq!(config.brightness_threshold, 45.0);
    }

    #[test]
    fn test_load_from_path_missing() {
        let result = Config::load_from_path(Path::new("/nonexistent/autocrop.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_path_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("autocrop.toml");
        fs::write(&path, "padding = [not toml").unwrap();

        let result = Config::load_from_path(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_merge_with_cli_precedence() {
        let config = Config {
            padding: 10,
            jpeg_quality: 80,
            ..Default::default()
        };

        let overrides = CliOverrides {
            padding: Some(3),
            threads: Some(4),
            ..Default::default()
        };

        let merged = config.merge_with_cli(&overrides);
        assert_eq!(merged.padding, 3);
        assert_eq!(merged.threads, Some(4));
        // Not overridden: file value wins
        assert_eq!(merged.jpeg_quality, 80);
    }

    #[test]
    fn test_merge_with_empty_overrides_is_identity() {
        let config = Config {
            min_content_span: 60,
            ..Default::default()
        };
        let merged = config.merge_with_cli(&CliOverrides::new());
        assert_eq!(merged.min_content_span, 60);
        assert_eq!(merged.padding, config.padding);
    }

    #[test]
    fn test_detect_options_roundtrip() {
        let config = Config {
            brightness_threshold: 30.0,
            color_variation_threshold: 20,
            min_content_span: 50,
            padding: 2,
            ..Default::default()
        };

        let detect = config.detect_options();
        assert_eq!(detect.brightness_threshold, 30.0);
        assert_eq!(detect.color_variation_threshold, 20);
        assert_eq!(detect.min_content_span, 50);
        assert_eq!(detect.padding, 2);
    }
}
