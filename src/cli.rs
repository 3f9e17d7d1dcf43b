//! Command-line interface definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::OutputFormat;

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INPUT_NOT_FOUND: i32 = 2;
}

/// autocrop - content-aware batch image cropping
#[derive(Debug, Parser)]
#[command(name = "autocrop", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Crop images to their detected content region
    Crop(CropArgs),
    /// Show version and environment information
    Info,
}

/// Arguments for the crop command
#[derive(Debug, Args)]
pub struct CropArgs {
    /// Input image file or directory
    pub input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "cropped")]
    pub output: PathBuf,

    /// Config file path (default: ./autocrop.toml or user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output encoding
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// JPEG quality (1-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub jpeg_quality: Option<u8>,

    /// Padding around detected content, pixels per side
    #[arg(long)]
    pub padding: Option<u32>,

    /// Minimum detected span before falling back to the full image
    #[arg(long)]
    pub min_content_span: Option<u32>,

    /// Minimum mean brightness for a content pixel (0-255)
    #[arg(long)]
    pub brightness_threshold: Option<f32>,

    /// Minimum channel variation for a content pixel (0-255)
    #[arg(long)]
    pub color_variation_threshold: Option<u8>,

    /// Pairwise channel difference below which a pixel counts as grayish
    #[arg(long)]
    pub grayscale_threshold: Option<u8>,

    /// Worker threads (default: all cores)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// List the files and settings without processing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress the batch summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_crop_defaults() {
        let cli = Cli::parse_from(["autocrop", "crop", "photos/"]);
        let Commands::Crop(args) = cli.command else {
            panic!("expected crop command");
        };

        assert_eq!(args.input, PathBuf::from("photos/"));
        assert_eq!(args.output, PathBuf::from("cropped"));
        assert!(args.format.is_none());
        assert!(!args.dry_run);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_cli_parses_crop_overrides() {
        let cli = Cli::parse_from([
            "autocrop",
            "crop",
            "in.png",
            "-o",
            "out",
            "--format",
            "preserve",
            "--jpeg-quality",
            "80",
            "--padding",
            "8",
            "--threads",
            "2",
            "-vv",
        ]);
        let Commands::Crop(args) = cli.command else {
            panic!("expected crop command");
        };

        assert_eq!(args.output, PathBuf::from("out"));
        assert_eq!(args.format, Some(OutputFormat::Preserve));
        assert_eq!(args.jpeg_quality, Some(80));
        assert_eq!(args.padding, Some(8));
        assert_eq!(args.threads, Some(2));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_rejects_out_of_range_quality() {
        let result = Cli::try_parse_from(["autocrop", "crop", "in.png", "--jpeg-quality", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_info() {
        let cli = Cli::parse_from(["autocrop", "info"]);
        assert!(matches!(cli.command, Commands::Info));
    }
}
