//! Configuration module for P4Lens
//!
//! Holds user preferences: theme, font scale, pipeline layout and logging.
//! Loaded programs and explorer state are never written here; every launch
//! starts with an empty session.
//!
//! # Config Location
//!
//! The config file lives in the platform-appropriate config directory:
//! - **Linux**: `~/.config/dev.p4lens.p4lens/config.toml`
//! - **macOS**: `~/Library/Application Support/dev.p4lens.p4lens/config.toml`
//! - **Windows**: `%APPDATA%\dev.p4lens.p4lens\config.toml`
//!
//! Rolling log files go under the data directory (`.../dev.p4lens.p4lens/logs`).
//!
//! # Example
//!
//! ```ignore
//! use p4lens::config::AppConfig;
//!
//! let (mut config, _load_error) = AppConfig::load_or_default();
//! config.ui.dark_mode = false;
//! config.save()?;
//! ```

use crate::error::{P4LensError, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for config and data directories
pub const APP_ID: &str = "dev.p4lens.p4lens";

/// Config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Log directory name under the data directory
pub const LOG_DIR: &str = "logs";

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,p4lens=debug";

/// Vertical pitch between stages in the original card layout
pub const DEFAULT_STAGE_SPACING: f32 = 320.0;

const MIN_FONT_SCALE: f32 = 0.5;
const MAX_FONT_SCALE: f32 = 3.0;

// ==================== Directories ====================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID))
}

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Get the directory for rolling log files
pub fn log_dir() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(LOG_DIR))
}

/// Get the path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

// ==================== App Config ====================

/// Persistent user preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version for future migration support
    #[serde(default = "default_config_version")]
    pub version: u32,

    #[serde(default)]
    pub ui: UiPreferences,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_config_version() -> u32 {
    1
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            ui: UiPreferences::default(),
            layout: LayoutConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let path = config_path().ok_or_else(|| {
            P4LensError::Config("Could not determine config directory".to_string())
        })?;
        Self::load_from(&path)
    }

    /// Load config from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let mut config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.sanitize();
        Ok(config)
    }

    /// Load config, falling back to defaults on any error.
    ///
    /// The error is handed back instead of logged, since config is read
    /// before the subscriber that would record it exists.
    pub fn load_or_default() -> (Self, Option<P4LensError>) {
        Self::or_default(Self::load())
    }

    /// Like [`AppConfig::load_or_default`] for a specific file
    pub fn load_from_or_default(path: &Path) -> (Self, Option<P4LensError>) {
        Self::or_default(Self::load_from(path))
    }

    fn or_default(result: Result<Self>) -> (Self, Option<P4LensError>) {
        match result {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = config_path().ok_or_else(|| {
            P4LensError::Config("Could not determine config directory".to_string())
        })?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {:?}", dir))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).with_context(|| format!("Failed to write config {:?}", path))?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Clamp values a hand-edited file may have pushed out of range
    fn sanitize(&mut self) {
        if !self.ui.font_scale.is_finite() {
            self.ui.font_scale = 1.0;
        }
        self.ui.font_scale = self.ui.font_scale.clamp(MIN_FONT_SCALE, MAX_FONT_SCALE);
        if !self.layout.stage_spacing.is_finite() || self.layout.stage_spacing <= 0.0 {
            self.layout.stage_spacing = DEFAULT_STAGE_SPACING;
        }
    }
}

/// Theme and text preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Enable dark mode
    #[serde(default = "default_true")]
    pub dark_mode: bool,

    /// Font scale factor
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,
}

fn default_true() -> bool {
    true
}

fn default_font_scale() -> f32 {
    1.0
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_scale: 1.0,
        }
    }
}

/// Direction in which the pipeline flows on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Top to bottom
    #[default]
    Vertical,
    /// Left to right
    Horizontal,
}

impl Orientation {
    pub fn display_name(&self) -> &'static str {
        match self {
            Orientation::Vertical => "Top to bottom",
            Orientation::Horizontal => "Left to right",
        }
    }
}

/// Pipeline canvas layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub orientation: Orientation,

    /// Distance between consecutive stage cards
    #[serde(default = "default_stage_spacing")]
    pub stage_spacing: f32,
}

fn default_stage_spacing() -> f32 {
    DEFAULT_STAGE_SPACING
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            stage_spacing: DEFAULT_STAGE_SPACING,
        }
    }
}

/// Logging preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Also write daily rolling log files
    #[serde(default)]
    pub log_to_file: bool,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            log_to_file: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.ui.dark_mode);
        assert_eq!(config.layout.orientation, Orientation::Vertical);
        assert_eq!(config.layout.stage_spacing, DEFAULT_STAGE_SPACING);
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let mut config = AppConfig::default();
        config.ui.dark_mode = false;
        config.layout.orientation = Orientation::Horizontal;
        config.logging.log_to_file = true;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_and_sanitize() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            "[ui]\nfont_scale = 12.0\n\n[layout]\norientation = \"horizontal\"\nstage_spacing = -5.0\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert!(config.ui.dark_mode);
        assert_eq!(config.ui.font_scale, MAX_FONT_SCALE);
        assert_eq!(config.layout.orientation, Orientation::Horizontal);
        assert_eq!(config.layout.stage_spacing, DEFAULT_STAGE_SPACING);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[ui\ndark_mode = ").unwrap();
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_corrupt_file_falls_back_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "version = \"two\"").unwrap();

        let (config, error) = AppConfig::load_from_or_default(&path);
        assert_eq!(config, AppConfig::default());
        assert!(error.unwrap().to_string().contains("Failed to parse config"));

        let (_, error) = AppConfig::load_from_or_default(&dir.path().join("absent.toml"));
        assert!(error.is_none());
    }
}
