//! Extraction options and the CLI settings file.
//!
//! The extractor itself only needs [`ExtractOptions`]. [`Settings`] is the
//! driver's layer: defaults, then an optional JSON file, then CLI flags.

use crate::error::ExtractError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file picked up from the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "hdrdoc.json";

/// Options consumed by the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Keep functions whose name starts with `_` or contains "internal".
    pub include_private: bool,
}

/// Driver settings as read from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub include_private: bool,

    /// `json` or `markdown`; empty means "not set".
    #[serde(default)]
    pub format: String,

    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `path`. A missing explicit file is an I/O error.
    pub fn load(path: &Path) -> Result<Self, ExtractError> {
        let raw = fs::read_to_string(path).map_err(|source| ExtractError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ExtractError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given, otherwise [`DEFAULT_SETTINGS_FILE`] in `cwd`
    /// if it exists, otherwise defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ExtractError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = cwd.join(DEFAULT_SETTINGS_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading settings");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            include_private: self.include_private,
        }
    }
}
