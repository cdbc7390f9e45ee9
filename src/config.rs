//! Optional `koans.yaml` configuration.
//!
//! ```yaml
//! # Walk only part of the path. Order still follows the lesson ranks.
//! lessons:
//!   - about_asserts
//!   - about_sets
//! color: auto        # auto | always | never
//! show_source: true  # print the offending lines under "meditate on"
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use termcolor::ColorChoice;
use tracing::debug;

use crate::diagnostics::KoanError;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "koans.yaml";

/// When to color the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolves the mode against the current stdout.
    pub fn choice(self) -> ColorChoice {
        match self {
            ColorMode::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KoansConfig {
    /// Lesson names (without rank) to walk. `None` walks every lesson.
    pub lessons: Option<Vec<String>>,
    pub color: ColorMode,
    pub show_source: bool,
}

impl Default for KoansConfig {
    fn default() -> Self {
        Self {
            lessons: None,
            color: ColorMode::Auto,
            show_source: true,
        }
    }
}

impl KoansConfig {
    /// Parses a config document. `origin` names it in diagnostics.
    pub fn from_yaml(source: &str, origin: &str) -> Result<Self, KoanError> {
        // An empty document is valid and means "all defaults".
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).map_err(|source| KoanError::ConfigParse {
            path: origin.to_string(),
            source,
        })
    }

    /// Loads a config file that must exist.
    pub fn load(path: &Path) -> Result<Self, KoanError> {
        let origin = path.display().to_string();
        let source = fs::read_to_string(path).map_err(|source| KoanError::ConfigRead {
            path: origin.clone(),
            source,
        })?;
        debug!(path = %origin, "loaded config");
        Self::from_yaml(&source, &origin)
    }

    /// Loads `path` if given, otherwise `koans.yaml` when present, otherwise
    /// the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, KoanError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        match fs::read_to_string(default_path) {
            Ok(source) => {
                debug!(path = DEFAULT_CONFIG_PATH, "loaded config");
                Self::from_yaml(&source, DEFAULT_CONFIG_PATH)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(KoanError::ConfigRead {
                path: DEFAULT_CONFIG_PATH.to_string(),
                source,
            }),
        }
    }
}
