// src/install.rs

//! Template installation.
//!
//! A build library keeps a `template` directory whose contents (startup
//! files, presets) get copied into every freshly downloaded build. Build
//! directories are recognised by their version-numbered names
//! (`4.2.0`, `3.6.14-candidate`, ...).
//!
//! [`install_template`] does the copy synchronously;
//! [`spawn_installer`] runs it on a background worker and signals the
//! outcome over an mpsc channel, so a UI thread can stay responsive.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use fs_extra::dir;
use regex::Regex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::errors::Result;

/// Build directories look like `<major>.<minor>` with an arbitrary suffix.
const VERSIONED_DIR_PATTERN: &str = r"^\d+\.\d+";

fn versioned_dir_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSIONED_DIR_PATTERN).expect("pattern is a valid regex"))
}

/// Outcome of a background template installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallerEvent {
    /// Template contents were copied into `destination`.
    Finished { destination: PathBuf },
    /// No versioned build directory was found; nothing was copied.
    Skipped,
    /// The installation failed; the error is rendered for display.
    Failed { error: String },
}

/// Copy the template tree into the first versioned build directory under
/// `dist`.
///
/// - `template` is created (empty) if it does not exist yet.
/// - The first entry of `dist` whose name matches `^\d+\.\d+` and which is
///   a directory receives a recursive copy of the template *contents*,
///   overwriting files that already exist (the build keeps any files the
///   template does not provide).
/// - Returns the destination directory, or `None` when `dist` has no
///   versioned entry.
pub fn install_template(template: &Path, dist: &Path) -> Result<Option<PathBuf>> {
    fs::create_dir_all(template)
        .with_context(|| format!("creating template directory {:?}", template))?;

    let entries = fs::read_dir(dist)
        .with_context(|| format!("reading distribution directory {:?}", dist))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry of {:?}", dist))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };

        if !versioned_dir_regex().is_match(name) || !entry.path().is_dir() {
            continue;
        }

        let destination = entry.path();

        let mut options = dir::CopyOptions::new();
        options.overwrite = true;
        options.content_only = true;

        dir::copy(template, &destination, &options).with_context(|| {
            format!("copying template {:?} into {:?}", template, destination)
        })?;

        info!(template = ?template, destination = ?destination, "template installed");
        return Ok(Some(destination));
    }

    info!(dist = ?dist, "no versioned build directory found; template not installed");
    Ok(None)
}

/// Run [`install_template`] on a background worker.
///
/// The filesystem work happens on the blocking thread pool; the outcome is
/// reported as a single [`InstallerEvent`] on `tx`. Send failures are
/// ignored (the receiver having gone away means nobody is interested in
/// the outcome any more).
pub fn spawn_installer(
    template: PathBuf,
    dist: PathBuf,
    tx: mpsc::Sender<InstallerEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result =
            tokio::task::spawn_blocking(move || install_template(&template, &dist)).await;

        let event = match result {
            Ok(Ok(Some(destination))) => InstallerEvent::Finished { destination },
            Ok(Ok(None)) => InstallerEvent::Skipped,
            Ok(Err(err)) => {
                error!(error = %err, "template installation failed");
                InstallerEvent::Failed {
                    error: err.to_string(),
                }
            }
            Err(join_err) => {
                error!(error = %join_err, "template installer worker panicked");
                InstallerEvent::Failed {
                    error: join_err.to_string(),
                }
            }
        };

        let _ = tx.send(event).await;
    })
}
