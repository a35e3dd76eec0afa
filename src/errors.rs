// src/errors.rs

//! Crate-wide error type and `Result` alias.
//!
//! The launch-related variants mirror the three failure modes callers
//! actually need to distinguish:
//!
//! - [`LaunchkitError::Launch`]: the OS could not create the process at all
//!   (missing executable, permission denied). Propagated with the original
//!   `std::io::Error` as source, no recovery attempted.
//! - [`LaunchkitError::NonZeroExit`]: the child ran but exited non-zero.
//!   Callers decide whether that is fatal.
//! - [`LaunchkitError::Encoding`]: captured output was not valid UTF-8.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchkitError {
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Child exited with a non-zero status. A child terminated by a signal
    /// (no exit code) is reported as -1.
    #[error("command `{command}` exited with status {code}")]
    NonZeroExit { command: String, code: i32 },

    #[error("captured output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("empty command line")]
    EmptyCommand,

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, LaunchkitError>;
