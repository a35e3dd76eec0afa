// src/exec/mod.rs

//! Process launch layer.
//!
//! Three primitives, all one-shot:
//!
//! - [`spawn_detached`]: start a child that outlives the caller (new
//!   process group / detached console) and return immediately.
//! - [`run_blocking`]: run to completion, stdin/stderr to the null device,
//!   non-zero exit surfaced as an error.
//! - [`run_blocking_capture`]: same, but stdout is captured and returned.
//!
//! Platform differences (shell invocation, creation flags, environment
//! sanitization) are encapsulated in a [`Launcher`] strategy selected once
//! per process by [`native_launcher`]. There is no timeout, cancellation or
//! retry; a caller needing a time bound must enforce it on its own thread.

pub mod command;
pub mod launcher;

pub use command::CommandLine;
pub use launcher::{
    native_launcher, run_blocking, run_blocking_capture, run_blocking_capture_text,
    spawn_detached, Launcher,
};
