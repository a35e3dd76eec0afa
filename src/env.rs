// src/env.rs

//! Execution environment for child processes.
//!
//! Self-contained bundles rewrite `LD_LIBRARY_PATH` so the bundled binary
//! finds its own shared libraries, stashing the user's original value in
//! `LD_LIBRARY_PATH_ORIG`. Children launched from here must not inherit the
//! bundler's override, or unrelated programs end up loading the bundle's
//! libraries. [`restore_loader_path`] undoes the rewrite on a plain map;
//! [`execution_environment`] applies it to a snapshot of the live
//! environment. The process's own environment is never mutated.

use std::collections::HashMap;

/// Dynamic-library search path consulted by the loader on GNU/Linux and *BSD.
pub const LOADER_PATH_VAR: &str = "LD_LIBRARY_PATH";

/// Backup of the pre-bundling loader path, written by the bundler.
pub const LOADER_PATH_BACKUP_VAR: &str = "LD_LIBRARY_PATH_ORIG";

/// Revert the bundler's loader-path override in `env`.
///
/// - If `LD_LIBRARY_PATH_ORIG` is present, its value replaces
///   `LD_LIBRARY_PATH` (the backup entry itself is left in place).
/// - Otherwise `LD_LIBRARY_PATH` is removed: the user's shell had no
///   loader path set, so the children shouldn't see one either.
///
/// Absent variables are no-ops; all other entries pass through untouched.
pub fn restore_loader_path(mut env: HashMap<String, String>) -> HashMap<String, String> {
    match env.get(LOADER_PATH_BACKUP_VAR).cloned() {
        Some(original) => {
            env.insert(LOADER_PATH_VAR.to_string(), original);
        }
        None => {
            env.remove(LOADER_PATH_VAR);
        }
    }

    env
}

/// Snapshot of the current process environment with the loader-path
/// override reverted.
///
/// Variables whose name or value is not valid Unicode are skipped; the
/// loader-path keys this module cares about are plain ASCII.
pub fn execution_environment() -> HashMap<String, String> {
    let env: HashMap<String, String> = std::env::vars().collect();
    restore_loader_path(env)
}
