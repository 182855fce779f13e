//! Command-line argument definitions

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Automated text removal and re-annotation for raster images
#[derive(Debug, Parser)]
#[command(name = "textscrub", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress the processing summary
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect and erase text from an image file or directory
    Clean(CleanArgs),
    /// Transcribe the text of an image to stdout
    Extract(ExtractArgs),
    /// Composite replacement text onto an image
    Annotate(AnnotateArgs),
    /// Report platform, external tools, and config locations
    Info,
}

/// Arguments shared by every OCR-touching command
#[derive(Debug, Args)]
pub struct OcrArgs {
    /// Config file path (default: ./textscrub.toml, then user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// OCR language (Tesseract -l)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Explicit tesseract binary path
    #[arg(long)]
    pub tesseract: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CleanArgs {
    /// Input image file or directory of images
    pub input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "processed")]
    pub output: PathBuf,

    /// Minimum OCR confidence; tokens must strictly exceed this (0-100)
    #[arg(long)]
    pub min_confidence: Option<i32>,

    /// Pixel margin added around each detected box
    #[arg(long)]
    pub margin: Option<u32>,

    /// Fixed fill color as RRGGBB hex (default: estimated background)
    #[arg(long, value_parser = parse_hex_color)]
    pub fill: Option<[u8; 3]>,

    /// Skip inputs whose output file already exists
    #[arg(long)]
    pub skip_existing: bool,

    /// Re-process even when the output exists
    #[arg(long)]
    pub force: bool,

    /// Print the execution plan without processing
    #[arg(long)]
    pub dry_run: bool,

    /// Worker threads for batch processing (default: all CPUs)
    #[arg(long)]
    pub threads: Option<usize>,

    #[command(flatten)]
    pub ocr: OcrArgs,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Input image file
    pub input: PathBuf,

    #[command(flatten)]
    pub ocr: OcrArgs,
}

#[derive(Debug, Args)]
pub struct AnnotateArgs {
    /// Input image file (typically a cleaned one)
    pub input: PathBuf,

    /// Text to composite onto the image
    #[arg(short, long)]
    pub text: String,

    /// Output file (default: edited_<input name>.png alongside the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Anchor X in pixels
    #[arg(long)]
    pub anchor_x: Option<i32>,

    /// Anchor Y in pixels
    #[arg(long)]
    pub anchor_y: Option<i32>,

    /// Text color as RRGGBB hex
    #[arg(long, value_parser = parse_hex_color)]
    pub color: Option<[u8; 3]>,

    /// Glyph scale in pixels
    #[arg(long)]
    pub scale: Option<f32>,

    /// TTF font file (default: first available system font)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Parse an RRGGBB hex triple
pub fn parse_hex_color(s: &str) -> Result<[u8; 3], String> {
    let s = s.trim_start_matches('#');
    if s.len() != 6 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("'{}' is not an RRGGBB hex color", s));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&s[range], 16).map_err(|e| e.to_string())
    };

    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}
