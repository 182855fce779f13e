//! Tesseract CLI backend
//!
//! Wraps the external `tesseract` binary. Images are encoded to PNG in
//! memory and piped through stdin; results are read from stdout. The
//! structured mode uses Tesseract's `tsv` output (one word-level row per
//! token with bounding geometry and confidence).

use super::engine::OcrEngine;
use super::types::{OcrError, Result, TextRegion};
use image::GrayImage;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Default recognition language
const DEFAULT_LANGUAGE: &str = "eng";

/// Column count of a Tesseract TSV row
const TSV_COLUMNS: usize = 12;

/// Tesseract-based OCR engine
pub struct TesseractEngine {
    binary: PathBuf,
    language: String,
}

impl TesseractEngine {
    /// Locate the `tesseract` binary on PATH.
    ///
    /// Fails with [`OcrError::Unavailable`] if the binary cannot be
    /// found; this is surfaced verbatim to the caller, never degraded
    /// to an empty recognition result.
    pub fn new() -> Result<Self> {
        let binary = which::which("tesseract")
            .map_err(|e| OcrError::Unavailable(format!("tesseract not found on PATH: {}", e)))?;

        Ok(Self {
            binary,
            language: DEFAULT_LANGUAGE.to_string(),
        })
    }

    /// Use an explicit binary path instead of a PATH lookup
    pub fn with_binary(binary: PathBuf) -> Result<Self> {
        if !binary.is_file() {
            return Err(OcrError::Unavailable(format!(
                "tesseract binary not found: {}",
                binary.display()
            )));
        }

        Ok(Self {
            binary,
            language: DEFAULT_LANGUAGE.to_string(),
        })
    }

    /// Set the recognition language (Tesseract `-l` argument)
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Encode a grayscale buffer as in-memory PNG for piping
    fn encode_png(image: &GrayImage) -> Result<Vec<u8>> {
        let mut png_data = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png_data);
        image
            .write_with_encoder(encoder)
            .map_err(|e| OcrError::EngineFailure(format!("PNG encoding failed: {}", e)))?;
        Ok(png_data)
    }

    /// Spawn tesseract with the given trailing arguments and pipe the
    /// image through stdin. Returns stdout on success.
    fn run(&self, image: &GrayImage, extra_args: &[&str]) -> Result<String> {
        let png_data = Self::encode_png(image)?;

        let mut child = Command::new(&self.binary)
            .arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .args(extra_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| OcrError::Unavailable(format!("failed to start tesseract: {}", e)))?;

        // Feed stdin from a separate thread so stdout/stderr drain
        // concurrently with the write; a child that fills either pipe
        // while the image is still being written would deadlock us.
        let stdin = child.stdin.take();
        let writer = std::thread::spawn(move || -> std::io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&png_data)?;
            }
            Ok(())
        });

        let output = child.wait_with_output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::EngineFailure(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        match writer.join() {
            Ok(Ok(())) => {}
            // Broken pipe: the child exited before consuming the image
            Ok(Err(e)) => {
                return Err(OcrError::EngineFailure(format!(
                    "tesseract stopped reading its input: {}",
                    e
                )))
            }
            Err(_) => {
                return Err(OcrError::EngineFailure(
                    "input writer thread panicked".to_string(),
                ))
            }
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize_regions(&self, image: &GrayImage) -> Result<Vec<TextRegion>> {
        let tsv = self.run(image, &["tsv"])?;
        parse_tsv(&tsv)
    }

    fn recognize_text(&self, image: &GrayImage) -> Result<String> {
        self.run(image, &[])
    }
}

/// Parse Tesseract TSV output into text regions.
///
/// The first line is a header. Each following row has twelve tab-
/// separated columns; only rows carrying an actual token (non-negative
/// confidence, non-blank text) become regions. Row order is preserved,
/// which is Tesseract's reading order.
pub(crate) fn parse_tsv(tsv: &str) -> Result<Vec<TextRegion>> {
    let mut regions = Vec::new();

    for (line_no, line) in tsv.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != TSV_COLUMNS {
            return Err(OcrError::MalformedOutput(format!(
                "TSV line {}: expected {} columns, got {}",
                line_no + 1,
                TSV_COLUMNS,
                fields.len()
            )));
        }

        // Non-word rows (page/block/paragraph/line levels) carry -1
        let confidence = fields[10]
            .parse::<f32>()
            .map_err(|_| {
                OcrError::MalformedOutput(format!(
                    "TSV line {}: unparseable confidence '{}'",
                    line_no + 1,
                    fields[10]
                ))
            })?
            .round() as i32;

        if confidence < 0 {
            continue;
        }

        let text = fields[11].trim();
        if text.is_empty() {
            continue;
        }

        let parse_dim = |idx: usize| -> Result<u32> {
            fields[idx].parse::<u32>().map_err(|_| {
                OcrError::MalformedOutput(format!(
                    "TSV line {}: unparseable geometry '{}'",
                    line_no + 1,
                    fields[idx]
                ))
            })
        };

        regions.push(TextRegion {
            text: text.to_string(),
            x: parse_dim(6)?,
            y: parse_dim(7)?,
            width: parse_dim(8)?,
            height: parse_dim(9)?,
            confidence,
        });
    }

    Ok(regions)
}
