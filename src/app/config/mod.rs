// SPDX-License-Identifier: MPL-2.0
//! Read-only application configuration loaded from a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[page]` - Assets root, navigation breakpoint, reveal threshold
//! - `[video]` - Showreel source and initial volume
//!
//! Every key is optional. Accessors such as [`PageConfig::nav_breakpoint`]
//! resolve missing or out-of-range values to the defaults in [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use film_showcase::app::config;
//!
//! let config = config::load();
//! println!("menu collapses at {}px", config.page.nav_breakpoint());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "zh-CN").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Page layout and behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PageConfig {
    /// Directory that contains the `assets/` tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<PathBuf>,

    /// Width above which the menu is inline and forced closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_breakpoint: Option<f32>,

    /// Reveal threshold measured from the bottom of the viewport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_threshold: Option<f32>,
}

impl PageConfig {
    /// Assets root, falling back to the working directory.
    pub fn assets_dir(&self) -> PathBuf {
        self.assets_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR))
    }

    /// Navigation breakpoint in logical pixels.
    pub fn nav_breakpoint(&self) -> f32 {
        bounded(
            self.nav_breakpoint,
            DEFAULT_NAV_BREAKPOINT,
            MIN_NAV_BREAKPOINT,
            MAX_NAV_BREAKPOINT,
        )
    }

    /// Reveal threshold in logical pixels.
    pub fn reveal_threshold(&self) -> f32 {
        bounded(
            self.reveal_threshold,
            DEFAULT_REVEAL_THRESHOLD,
            MIN_REVEAL_THRESHOLD,
            MAX_REVEAL_THRESHOLD,
        )
    }
}

/// Showreel settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct VideoConfig {
    /// Video file, relative to the assets root unless absolute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    /// Initial volume (0.0 to 1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,

    /// Whether the showreel starts muted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,
}

impl VideoConfig {
    /// Showreel path, relative paths joined onto `assets_dir`.
    pub fn source(&self, assets_dir: &Path) -> PathBuf {
        let source = self
            .source
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_VIDEO_SOURCE));
        if source.is_absolute() {
            source
        } else {
            assets_dir.join(source)
        }
    }

    /// Initial volume in `[0, 1]`.
    pub fn volume(&self) -> f32 {
        bounded(self.volume, DEFAULT_VOLUME, MIN_VOLUME, MAX_VOLUME)
    }

    pub fn muted(&self) -> bool {
        self.muted.unwrap_or(false)
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub page: PageConfig,

    #[serde(default)]
    pub video: VideoConfig,
}

fn bounded(value: Option<f32>, default: f32, min: f32, max: f32) -> f32 {
    match value {
        Some(v) if v.is_finite() => v.clamp(min, max),
        _ => default,
    }
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Load Functions
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default location.
///
/// A missing file yields the defaults silently; an unreadable one yields the
/// defaults and a warning.
pub fn load() -> Config {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> Config {
    let Some(path) = get_config_path_with_override(base_dir) else {
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no settings file, using defaults");
        return Config::default();
    }

    match load_from_path(&path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded settings");
            config
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring unreadable settings file");
            Config::default()
        }
    }
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn load_from_path_reads_all_sections() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(
            &config_path,
            r#"
[general]
language = "zh-CN"
theme_mode = "Dark"

[page]
assets_dir = "/srv/showcase"
nav_breakpoint = 900.0
reveal_threshold = 80.0

[video]
source = "reel.mp4"
volume = 0.4
muted = true
"#,
        )
        .expect("failed to write config");

        let config = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(config.general.language.as_deref(), Some("zh-CN"));
        assert_eq!(config.general.theme_mode, ThemeMode::Dark);
        assert_eq!(config.page.assets_dir(), PathBuf::from("/srv/showcase"));
        assert_eq!(config.page.nav_breakpoint(), 900.0);
        assert_eq!(config.page.reveal_threshold(), 80.0);
        assert_eq!(
            config.video.source(Path::new("/srv/showcase")),
            PathBuf::from("/srv/showcase/reel.mp4")
        );
        assert!((config.video.volume() - 0.4).abs() < f32::EPSILON);
        assert!(config.video.muted());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[general]\nlanguage = \"en-US\"\n")
            .expect("failed to write config");

        let config = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(config.general.theme_mode, ThemeMode::System);
        assert_eq!(config.page.nav_breakpoint(), DEFAULT_NAV_BREAKPOINT);
        assert_eq!(config.page.reveal_threshold(), DEFAULT_REVEAL_THRESHOLD);
        assert_eq!(config.video.volume(), DEFAULT_VOLUME);
        assert!(!config.video.muted());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let page = PageConfig {
            assets_dir: None,
            nav_breakpoint: Some(10.0),
            reveal_threshold: Some(f32::NAN),
        };
        assert_eq!(page.nav_breakpoint(), MIN_NAV_BREAKPOINT);
        assert_eq!(page.reveal_threshold(), DEFAULT_REVEAL_THRESHOLD);

        let video = VideoConfig {
            volume: Some(3.0),
            ..VideoConfig::default()
        };
        assert_eq!(video.volume(), MAX_VOLUME);
    }

    #[test]
    fn absolute_video_source_is_kept() {
        let video = VideoConfig {
            source: Some(PathBuf::from("/media/reel.mp4")),
            ..VideoConfig::default()
        };
        assert_eq!(
            video.source(Path::new("/srv")),
            PathBuf::from("/media/reel.mp4")
        );
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_ignores_invalid_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[page\nbroken")
            .expect("failed to write invalid toml");

        let config = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_without_file_returns_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
    }
}
