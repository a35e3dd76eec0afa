// src/lib.rs

//! Cross-platform process-launch helpers for a build-launcher application.
//!
//! What lives here:
//!
//! - [`platform`]: host OS detection, bundled-executable detection and the
//!   application working directory, all memoized per process.
//! - [`env`]: the sanitized execution environment for child processes
//!   (reverts the bundler's `LD_LIBRARY_PATH` override).
//! - [`exec`]: the three launch primitives (detached spawn, blocking run,
//!   blocking run with captured output) behind a per-platform [`Launcher`]
//!   strategy.
//! - [`config`] / [`install`]: the build-library settings file and the
//!   background template installer.
//!
//! This crate has no CLI of its own; callers build the actual command
//! lines and decide what a non-zero exit means for them.

pub mod config;
pub mod env;
pub mod errors;
pub mod exec;
pub mod install;
pub mod logging;
pub mod platform;

pub use config::{load_and_validate, load_from_path, Settings};
pub use env::{execution_environment, restore_loader_path};
pub use errors::{LaunchkitError, Result};
pub use exec::{
    native_launcher, run_blocking, run_blocking_capture, run_blocking_capture_text,
    spawn_detached, CommandLine, Launcher,
};
pub use install::{install_template, spawn_installer, InstallerEvent};
pub use platform::{is_bundled, platform_full, working_directory, Platform};
