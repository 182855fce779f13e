//! textscrub - automated text removal for raster images
//!
//! CLI entry point

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use textscrub::{
    cli::OcrArgs, exit_codes, loader, overlay, AnnotateArgs, CleanArgs, Cli, CliOverrides,
    Commands, Config, ExtractArgs, RedactionPipeline,
};

/// File extensions treated as processable images
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp"];

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Clean(args) => run_clean(&args, cli.verbose, cli.quiet),
        Commands::Extract(args) => run_extract(&args),
        Commands::Annotate(args) => run_annotate(&args),
        Commands::Info => run_info(),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ============ Clean Command ============

fn run_clean(args: &CleanArgs, verbose: u8, quiet: bool) -> Result<()> {
    let start_time = Instant::now();

    if !args.input.exists() {
        eprintln!("Error: Input path does not exist: {}", args.input.display());
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    let image_files = collect_image_files(&args.input)?;
    if image_files.is_empty() {
        eprintln!("Error: No image files found in input path");
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    let file_config = load_config(args.ocr.config.as_deref());
    let pipeline_config = file_config.merge_with_cli(&clean_overrides(args));
    let pipeline = RedactionPipeline::new(pipeline_config);

    if args.dry_run {
        print_execution_plan(args, &image_files, &pipeline);
        return Ok(());
    }

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create output directory {}", args.output.display()))?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .ok();
    }

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(image_files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    };

    let ok_count = AtomicUsize::new(0);
    let skip_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    image_files.par_iter().for_each(|input_path| {
        let output_path = cleaned_output_path(&args.output, input_path);

        if args.skip_existing && !args.force && output_path.exists() {
            if verbose > 0 {
                progress.println(format!("Skipping (exists): {}", input_path.display()));
            }
            skip_count.fetch_add(1, Ordering::Relaxed);
            progress.inc(1);
            return;
        }

        match clean_one(&pipeline, input_path, &output_path) {
            Ok(()) => {
                if verbose > 0 {
                    progress.println(format!(
                        "Processed: {} -> {}",
                        input_path.display(),
                        output_path.display()
                    ));
                }
                ok_count.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                progress.println(format!("Error processing {}: {:#}", input_path.display(), e));
                error_count.fetch_add(1, Ordering::Relaxed);
            }
        }
        progress.inc(1);
    });

    progress.finish_and_clear();

    let ok = ok_count.load(Ordering::Relaxed);
    let skipped = skip_count.load(Ordering::Relaxed);
    let failed = error_count.load(Ordering::Relaxed);

    if !quiet {
        println!(
            "Done: {} processed, {} skipped, {} failed ({:.2}s)",
            ok,
            skipped,
            failed,
            start_time.elapsed().as_secs_f64()
        );
    }

    if failed > 0 {
        bail!("{} file(s) failed to process", failed);
    }

    Ok(())
}

fn clean_one(pipeline: &RedactionPipeline, input: &Path, output: &Path) -> Result<()> {
    let image = loader::load_path(input)?;
    let cleaned = pipeline.clean(&image)?;
    cleaned
        .save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}

/// Output name convention: `processed_<stem>.png`, always PNG
fn cleaned_output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    output_dir.join(format!("processed_{}.png", stem))
}

// ============ Extract Command ============

fn run_extract(args: &ExtractArgs) -> Result<()> {
    if !args.input.is_file() {
        eprintln!("Error: Input file does not exist: {}", args.input.display());
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    let file_config = load_config(args.ocr.config.as_deref());
    let pipeline_config = file_config.merge_with_cli(&ocr_overrides(&args.ocr));
    let pipeline = RedactionPipeline::new(pipeline_config);

    let image = loader::load_path(&args.input)?;
    let transcript = pipeline.extract_text(&image)?;
    print!("{}", transcript);

    Ok(())
}

// ============ Annotate Command ============

fn run_annotate(args: &AnnotateArgs) -> Result<()> {
    if !args.input.is_file() {
        eprintln!("Error: Input file does not exist: {}", args.input.display());
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    let file_config = load_config(args.config.as_deref());
    let pipeline_config = file_config.merge_with_cli(&annotate_overrides(args));
    let pipeline = RedactionPipeline::new(pipeline_config);

    let image = loader::load_path(&args.input)?;
    let annotated = pipeline.annotate(&image, &args.text)?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| edited_output_path(&args.input));
    annotated
        .save(&output_path)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    println!("Saved: {}", output_path.display());
    Ok(())
}

/// Output name convention: `edited_<stem>.png` alongside the input
fn edited_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("edited_{}.png", stem))
}

// ============ Info Command ============

fn run_info() -> Result<()> {
    println!("textscrub v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("System Information:");
    println!("  Platform: {}", std::env::consts::OS);
    println!("  Arch: {}", std::env::consts::ARCH);
    println!("  CPUs: {}", num_cpus::get());

    println!();
    println!("OCR Tools:");
    check_tool_with_version("tesseract", "Tesseract", &["--version"]);

    println!();
    println!("Fonts:");
    match overlay::resolve_font_path(None) {
        Ok(path) => println!("  Default font: {}", path.display()),
        Err(_) => println!("  Default font: Not found (annotate requires --font)"),
    }

    println!();
    println!("Config File Locations:");
    println!("  Local: ./textscrub.toml");
    if let Some(config_dir) = dirs::config_dir() {
        println!(
            "  User:  {}",
            config_dir.join("textscrub/config.toml").display()
        );
    }

    Ok(())
}

fn check_tool_with_version(cmd: &str, name: &str, version_args: &[&str]) {
    match which::which(cmd) {
        Ok(path) => {
            if let Ok(output) = std::process::Command::new(&path).args(version_args).output() {
                let version_str = String::from_utf8_lossy(&output.stdout);
                let first_line = version_str.lines().next().unwrap_or("");
                if !first_line.is_empty() && first_line.len() < 80 {
                    println!("  {}: {} ({})", name, first_line.trim(), path.display());
                } else {
                    println!("  {}: {} (found)", name, path.display());
                }
            } else {
                println!("  {}: {} (found)", name, path.display());
            }
        }
        Err(_) => println!("  {}: Not found", name),
    }
}

// ============ Helper Functions ============

/// Load config from an explicit path or the standard locations
fn load_config(explicit: Option<&Path>) -> Config {
    match explicit {
        Some(path) => match Config::load_from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                Config::default()
            }
        },
        None => Config::load().unwrap_or_default(),
    }
}

fn ocr_overrides(args: &OcrArgs) -> CliOverrides {
    CliOverrides {
        language: args.language.clone(),
        tesseract_binary: args.tesseract.clone(),
        ..CliOverrides::new()
    }
}

fn clean_overrides(args: &CleanArgs) -> CliOverrides {
    CliOverrides {
        min_confidence: args.min_confidence,
        margin: args.margin,
        fill: args.fill,
        ..ocr_overrides(&args.ocr)
    }
}

fn annotate_overrides(args: &AnnotateArgs) -> CliOverrides {
    CliOverrides {
        anchor_x: args.anchor_x,
        anchor_y: args.anchor_y,
        color: args.color,
        scale: args.scale,
        font_path: args.font.clone(),
        ..CliOverrides::new()
    }
}

/// Collect image files from the input path (file or directory)
fn collect_image_files(input: &Path) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();

    if input.is_file() {
        if has_image_extension(input) {
            image_files.push(input.to_path_buf());
        }
    } else if input.is_dir() {
        for entry in std::fs::read_dir(input)? {
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

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Print the execution plan for dry-run mode
fn print_execution_plan(args: &CleanArgs, image_files: &[PathBuf], pipeline: &RedactionPipeline) {
    println!("=== Dry Run - Execution Plan ===");
    println!();
    println!("Input: {}", args.input.display());
    println!("Output: {}", args.output.display());
    println!("Files to process: {}", image_files.len());
    println!();
    println!("Pipeline Configuration:");
    println!("{}", pipeline.config().to_json());
    println!();
    println!("Processing Options:");
    println!("  Threads: {}", args.threads.unwrap_or_else(num_cpus::get));
    println!(
        "  Skip existing: {}",
        if args.skip_existing { "YES" } else { "NO" }
    );
    println!("  Force re-process: {}", if args.force { "YES" } else { "NO" });
    println!();
    println!("Files:");
    for (i, file) in image_files.iter().enumerate() {
        println!("  {}. {}", i + 1, file.display());
    }
}
