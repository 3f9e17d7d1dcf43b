//! autocrop - content-aware batch image cropping
//!
//! CLI entry point

use autocrop::{
    collect_image_files, exit_codes, Cli, CliOverrides, Commands, Config, CropArgs, CropPipeline,
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::Level;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Crop(args) => {
            init_tracing(args.verbose);
            run_crop(&args)
        }
        Commands::Info => run_info(),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

// ============ Crop Command ============

fn run_crop(args: &CropArgs) -> anyhow::Result<()> {
    let start_time = Instant::now();

    // Validate input path
    if !args.input.exists() {
        eprintln!("Error: Input path does not exist: {}", args.input.display());
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    // Collect image files to process
    let image_files = collect_image_files(&args.input)?;
    if image_files.is_empty() {
        eprintln!("Error: No image files found in input path");
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    // Load config file if specified, otherwise use default locations
    let file_config = match &args.config {
        Some(config_path) => match Config::load_from_path(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                Config::default()
            }
        },
        None => Config::load().unwrap_or_default(),
    };

    // Merge config file with CLI arguments (CLI takes precedence)
    let config = file_config.merge_with_cli(&create_cli_overrides(args));
    let pipeline = CropPipeline::new(config.pipeline_options());

    if args.dry_run {
        print_execution_plan(args, &image_files, &config);
        return Ok(());
    }

    // Create output directory
    std::fs::create_dir_all(&args.output)?;

    // Configure worker threads when explicitly requested
    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let progress = if args.quiet {
        None
    } else {
        let bar = ProgressBar::new(image_files.len() as u64);
        bar.set_style(ProgressStyle::with_template(
            "{bar:40} {pos}/{len} {percent:>3}% {msg}",
        )?);
        Some(bar)
    };

    let report = pipeline.process_batch(&image_files, &args.output, progress.as_ref());

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    let verbose = args.verbose > 0;
    if verbose {
        for outcome in &report.outcomes {
            println!(
                "{} -> {} ({}x{} -> {}x{}{})",
                outcome.input_path.display(),
                outcome.output_path.display(),
                outcome.original_size.0,
                outcome.original_size.1,
                outcome.cropped_size.0,
                outcome.cropped_size.1,
                if outcome.is_unchanged() {
                    ", unchanged"
                } else {
                    ""
                }
            );
        }
    }
    for (path, error) in &report.failures {
        eprintln!("Error processing {}: {}", path.display(), error);
    }

    // Print summary
    if !args.quiet {
        report.print_summary();
        println!("Total time: {:.2}s", start_time.elapsed().as_secs_f64());
    }

    if report.failed() > 0 {
        anyhow::bail!("{} file(s) failed to process", report.failed());
    }

    Ok(())
}

// ============ Helper Functions ============

/// Create CLI overrides from CropArgs
fn create_cli_overrides(args: &CropArgs) -> CliOverrides {
    CliOverrides {
        brightness_threshold: args.brightness_threshold,
        color_variation_threshold: args.color_variation_threshold,
        grayscale_threshold: args.grayscale_threshold,
        min_content_span: args.min_content_span,
        padding: args.padding,
        format: args.format,
        jpeg_quality: args.jpeg_quality,
        threads: args.threads,
    }
}

/// Print execution plan for dry-run mode
fn print_execution_plan(args: &CropArgs, image_files: &[PathBuf], config: &Config) {
    println!("=== Dry Run - Execution Plan ===");
    println!();
    println!("Input: {}", args.input.display());
    println!("Output: {}", args.output.display());
    println!("Files to process: {}", image_files.len());
    println!();
    println!("Detection Thresholds:");
    println!("  Brightness floor:      {}", config.brightness_threshold);
    println!(
        "  Color variation floor: {}",
        config.color_variation_threshold
    );
    println!("  Grayscale threshold:   {}", config.grayscale_threshold);
    println!(
        "  UI brightness window:  ({}, {})",
        config.ui_brightness_min, config.ui_brightness_max
    );
    println!("  Minimum content span:  {}", config.min_content_span);
    println!("  Padding per side:      {}", config.padding);
    println!();
    println!("Export:");
    println!("  Format: {:?}", config.format);
    println!("  JPEG quality: {}", config.jpeg_quality);
    println!();
    println!("Processing Options:");
    println!(
        "  Threads: {}",
        config.threads.unwrap_or_else(num_cpus::get)
    );
    println!("  Verbose: {}", args.verbose);
    println!();
    println!("Files:");
    for (i, file) in image_files.iter().enumerate() {
        println!("  {}. {}", i + 1, file.display());
    }
}

// ============ Info Command ============

fn run_info() -> anyhow::Result<()> {
    println!("autocrop v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("System Information:");
    println!("  Platform: {}", std::env::consts::OS);
    println!("  Arch: {}", std::env::consts::ARCH);
    println!("  CPUs: {}", num_cpus::get());

    println!();
    println!("Config File Locations:");
    println!("  Local: ./autocrop.toml");
    if let Some(config_dir) = dirs::config_dir() {
        println!(
            "  User:  {}",
            config_dir.join("autocrop/config.toml").display()
        );
    }

    Ok(())
}
