// src/exec/command.rs

//! The command a caller wants to run, before any platform-specific
//! rendering.

use std::fmt;

/// A command to execute: either a single shell line or an ordered argv.
///
/// - `Shell` runs through the platform shell (`sh -c` on unix, `cmd /C`
///   on Windows), so pipes, redirects and quoting behave as in a terminal.
/// - `Argv` is executed directly on unix (no shell involved); the first
///   token is the program, the rest its arguments. On Windows both forms
///   go through `cmd /C`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    Shell(String),
    Argv(Vec<String>),
}

impl CommandLine {
    pub fn shell(line: impl Into<String>) -> Self {
        CommandLine::Shell(line.into())
    }

    pub fn argv<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandLine::Argv(tokens.into_iter().map(Into::into).collect())
    }

    /// True for an `Argv` with no tokens (nothing to execute).
    pub fn is_empty(&self) -> bool {
        match self {
            CommandLine::Shell(line) => line.trim().is_empty(),
            CommandLine::Argv(tokens) => tokens.is_empty(),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandLine::Shell(line) => write!(f, "{line}"),
            CommandLine::Argv(tokens) => write!(f, "{}", tokens.join(" ")),
        }
    }
}

impl From<&str> for CommandLine {
    fn from(line: &str) -> Self {
        CommandLine::Shell(line.to_string())
    }
}

impl From<String> for CommandLine {
    fn from(line: String) -> Self {
        CommandLine::Shell(line)
    }
}

impl From<Vec<String>> for CommandLine {
    fn from(tokens: Vec<String>) -> Self {
        CommandLine::Argv(tokens)
    }
}

impl From<&[&str]> for CommandLine {
    fn from(tokens: &[&str]) -> Self {
        CommandLine::argv(tokens.iter().copied())
    }
}
