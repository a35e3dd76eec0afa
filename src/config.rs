// src/config.rs

//! Settings file handling.
//!
//! The template installer needs to know where the user's build library
//! lives. That comes from a small TOML settings file:
//!
//! ```toml
//! [library]
//! folder = "/home/user/builds"
//! template_dir = "template"   # optional, defaults to "template"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::errors::{LaunchkitError, Result};

/// Top-level settings as read from a TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// `[library]` section.
    pub library: LibrarySection,
}

/// `[library]` section: where builds and the template tree live.
#[derive(Debug, Clone, Deserialize)]
pub struct LibrarySection {
    /// Root folder of the user's build library.
    pub folder: PathBuf,

    /// Name of the template directory inside the library folder.
    #[serde(default = "default_template_dir")]
    pub template_dir: String,
}

fn default_template_dir() -> String {
    "template".to_string()
}

impl Settings {
    /// Full path of the template directory.
    pub fn template_path(&self) -> PathBuf {
        self.library.folder.join(&self.library.template_dir)
    }
}

/// Load a settings file from a given path and return the raw `Settings`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for
/// semantic checks on top.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading settings file at {:?}", path))?;

    let settings: Settings = toml::from_str(&contents)?;
    Ok(settings)
}

/// Load a settings file and run basic validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Settings> {
    let settings = load_from_path(&path)?;
    validate_settings(&settings)?;
    Ok(settings)
}

fn validate_settings(settings: &Settings) -> Result<()> {
    if settings.library.folder.as_os_str().is_empty() {
        return Err(LaunchkitError::ConfigError(
            "library.folder must not be empty".to_string(),
        ));
    }

    if settings.library.template_dir.trim().is_empty() {
        return Err(LaunchkitError::ConfigError(
            "library.template_dir must not be empty".to_string(),
        ));
    }

    Ok(())
}
