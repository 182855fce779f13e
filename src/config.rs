//! Configuration handling
//!
//! Settings come from an optional TOML file merged with explicit CLI
//! overrides (CLI wins). Search order for the file:
//!
//! 1. `./textscrub.toml`
//! 2. `<config dir>/textscrub/config.toml`
//!
//! All resolved settings are read-only after initialization; the
//! pipeline never mutates process-wide state.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to parse config: {0}")]
    ParseFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Local config file name
const LOCAL_CONFIG_FILE: &str = "textscrub.toml";

/// Per-user config file location under the platform config dir
const USER_CONFIG_SUBPATH: &str = "textscrub/config.toml";

// ============================================================
// File config
// ============================================================

/// On-disk configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub redact: RedactSection,
    pub ocr: OcrSection,
    pub overlay: OverlaySection,
}

/// `[redact]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactSection {
    /// Minimum OCR confidence (0-100), strict lower bound
    pub min_confidence: i32,
    /// Pixel margin added around each detected box
    pub margin: u32,
    /// Fixed fill color as RGB; omitted = estimate per image
    pub fill: Option<[u8; 3]>,
}

impl Default for RedactSection {
    fn default() -> Self {
        Self {
            min_confidence: 60,
            margin: 5,
            fill: None,
        }
    }
}

/// `[ocr]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSection {
    /// Recognition language passed to the engine
    pub language: String,
    /// Explicit tesseract binary path; omitted = PATH lookup
    pub binary: Option<PathBuf>,
}

impl Default for OcrSection {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            binary: None,
        }
    }
}

/// `[overlay]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySection {
    pub anchor_x: i32,
    pub anchor_y: i32,
    pub color: [u8; 3],
    pub scale: f32,
    pub font_path: Option<PathBuf>,
}

impl Default for OverlaySection {
    fn default() -> Self {
        Self {
            anchor_x: 10,
            anchor_y: 10,
            color: [0, 0, 0],
            scale: 16.0,
            font_path: None,
        }
    }
}

impl Config {
    /// Load from the standard search locations
    pub fn load() -> Result<Self, ConfigError> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Self::load_from_path(&local);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user = config_dir.join(USER_CONFIG_SUBPATH);
            if user.is_file() {
                return Self::load_from_path(&user);
            }
        }

        Err(ConfigError::FileNotFound(local))
    }

    /// Load from an explicit path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Merge file config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&self, overrides: &CliOverrides) -> PipelineConfig {
        PipelineConfig {
            min_confidence: overrides
                .min_confidence
                .unwrap_or(self.redact.min_confidence),
            margin: overrides.margin.unwrap_or(self.redact.margin),
            fill: overrides.fill.or(self.redact.fill),
            language: overrides
                .language
                .clone()
                .unwrap_or_else(|| self.ocr.language.clone()),
            tesseract_binary: overrides
                .tesseract_binary
                .clone()
                .or_else(|| self.ocr.binary.clone()),
            anchor: (
                overrides.anchor_x.unwrap_or(self.overlay.anchor_x),
                overrides.anchor_y.unwrap_or(self.overlay.anchor_y),
            ),
            color: overrides.color.unwrap_or(self.overlay.color),
            scale: overrides.scale.unwrap_or(self.overlay.scale),
            font_path: overrides
                .font_path
                .clone()
                .or_else(|| self.overlay.font_path.clone()),
        }
    }
}

// ============================================================
// CLI overrides
// ============================================================

/// Values the CLI explicitly set; `None` leaves the file value alone
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub min_confidence: Option<i32>,
    pub margin: Option<u32>,
    pub fill: Option<[u8; 3]>,
    pub language: Option<String>,
    pub tesseract_binary: Option<PathBuf>,
    pub anchor_x: Option<i32>,
    pub anchor_y: Option<i32>,
    pub color: Option<[u8; 3]>,
    pub scale: Option<f32>,
    pub font_path: Option<PathBuf>,
}

impl CliOverrides {
    /// Create empty overrides
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================
// Resolved pipeline config
// ============================================================

/// Fully resolved, read-only pipeline configuration
#[derive(Debug, Clone, Serialize)]
pub struct PipelineConfig {
    pub min_confidence: i32,
    pub margin: u32,
    pub fill: Option<[u8; 3]>,
    pub language: String,
    pub tesseract_binary: Option<PathBuf>,
    pub anchor: (i32, i32),
    pub color: [u8; 3],
    pub scale: f32,
    pub font_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Config::default().merge_with_cli(&CliOverrides::new())
    }
}

impl PipelineConfig {
    /// Serialize for the dry-run execution plan
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
