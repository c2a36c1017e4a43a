use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::drawing::{DocumentHeader, ExtractOptions, PathStyle, RenderOptions};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// App version the converter was written against
    #[serde(default = "default_expected_app_version")]
    pub expected_app_version: String,

    /// Extension of the archive member holding the property list
    #[serde(default = "default_drawing_member_extension")]
    pub drawing_member_extension: String,

    /// Drawing and markup settings
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Page used for standalone documents
    #[serde(default)]
    pub page: PageConfig,

    /// External program settings
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Stroke geometry and style settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DrawingConfig {
    // @field: Canvas height used to flip legacy y coordinates
    #[serde(default = "default_legacy_canvas_height")]
    pub legacy_canvas_height: f64,

    // @field: Stroke color for paths without color metadata
    #[serde(default = "default_stroke_color")]
    pub default_stroke_color: String,

    // @field: Pen name referenced by every path
    #[serde(default = "default_pen_name")]
    pub pen_name: String,

    // @field: Pen width declared in the document style sheet
    #[serde(default = "default_pen_value")]
    pub pen_value: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            legacy_canvas_height: default_legacy_canvas_height(),
            default_stroke_color: default_stroke_color(),
            pen_name: default_pen_name(),
            pen_value: default_pen_value(),
        }
    }
}

/// Page dimensions in Ipe units (PostScript points)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PageConfig {
    #[serde(default = "default_page_width")]
    pub width: f64,

    #[serde(default = "default_page_height")]
    pub height: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width: default_page_width(),
            height: default_page_height(),
        }
    }
}

/// External tool configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolsConfig {
    /// Path or name of the ffmpeg binary
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// Path or name of the ipetoipe binary
    #[serde(default = "default_ipetoipe_path")]
    pub ipetoipe_path: String,

    /// Extension given to extracted audio fragments
    #[serde(default = "default_fragment_extension")]
    pub fragment_extension: String,

    /// libmp3lame VBR quality (0 best, 9 worst)
    #[serde(default = "default_mp3_quality")]
    pub mp3_quality: u8,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            ipetoipe_path: default_ipetoipe_path(),
            fragment_extension: default_fragment_extension(),
            mp3_quality: default_mp3_quality(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_expected_app_version() -> String {
    "5.2.1".to_string()
}

fn default_drawing_member_extension() -> String {
    "xml".to_string()
}

fn default_legacy_canvas_height() -> f64 {
    // Observed on the capture device; no documented derivation
    crate::drawing::extract::DEFAULT_LEGACY_CANVAS_HEIGHT
}

fn default_stroke_color() -> String {
    "black".to_string()
}

fn default_pen_name() -> String {
    "fat".to_string()
}

fn default_pen_value() -> String {
    "1.2".to_string()
}

fn default_page_width() -> f64 {
    595.0 // A4
}

fn default_page_height() -> f64 {
    842.0
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_ipetoipe_path() -> String {
    "ipetoipe".to_string()
}

fn default_fragment_extension() -> String {
    "caf".to_string()
}

fn default_mp3_quality() -> u8 {
    crate::external::ffmpeg::DEFAULT_MP3_QUALITY
}

impl Config {
    /// Load a configuration file, or write and return the defaults if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let height = self.drawing.legacy_canvas_height;
        if !height.is_finite() || height <= 0.0 {
            return Err(anyhow!("Legacy canvas height must be a positive number, got {}", height));
        }

        if !(self.page.width.is_finite() && self.page.width > 0.0 && self.page.height.is_finite() && self.page.height > 0.0) {
            return Err(anyhow!(
                "Page size must be positive, got {}x{}",
                self.page.width, self.page.height
            ));
        }

        if self.drawing_member_extension.trim_start_matches('.').is_empty() {
            return Err(anyhow!("Drawing member extension cannot be empty"));
        }

        if self.drawing.pen_name.trim().is_empty() {
            return Err(anyhow!("Pen name cannot be empty"));
        }

        if self.tools.mp3_quality > 9 {
            return Err(anyhow!("MP3 quality must be between 0 and 9, got {}", self.tools.mp3_quality));
        }

        Ok(())
    }

    /// Pipeline options derived from this configuration
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            extract: ExtractOptions {
                legacy_canvas_height: self.drawing.legacy_canvas_height,
            },
            style: PathStyle {
                pen: self.drawing.pen_name.clone(),
                default_color: self.drawing.default_stroke_color.clone(),
            },
            header: DocumentHeader {
                pen_name: self.drawing.pen_name.clone(),
                pen_value: self.drawing.pen_value.clone(),
            },
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            expected_app_version: default_expected_app_version(),
            drawing_member_extension: default_drawing_member_extension(),
            drawing: DrawingConfig::default(),
            page: PageConfig::default(),
            tools: ToolsConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
