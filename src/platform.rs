// src/platform.rs

//! Host platform detection.
//!
//! `Platform::current()` classifies the host once and caches the answer for
//! the life of the process. Detection is split into a pure mapping
//! ([`Platform::from_descriptor`]) and a memoized query, so the mapping can
//! be tested without touching process state.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;
use std::sync::OnceLock;

use tracing::debug;

/// Environment markers set when the process runs as a self-contained
/// bundled executable (AppImage-style). Both must be present at once.
const BUNDLE_MARKER_VARS: [&str; 2] = ["APPIMAGE", "APPDIR"];

static CURRENT: OnceLock<Platform> = OnceLock::new();
static FULL: OnceLock<String> = OnceLock::new();
static BUNDLED: OnceLock<bool> = OnceLock::new();

/// Operating-system family of the host.
///
/// Descriptors that don't map to a known family are carried through
/// verbatim in `Other` rather than collapsed into a catch-all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Other(String),
}

impl Platform {
    /// Map a raw OS descriptor to a platform family.
    ///
    /// Accepts both the short names reported by `std::env::consts::OS`
    /// (`"linux"`, `"macos"`, `"windows"`) and the historical descriptor
    /// spellings other toolchains report (`"linux1"`, `"linux2"`,
    /// `"darwin"`, `"win32"`). Anything unrecognized passes through
    /// unchanged.
    pub fn from_descriptor(raw: &str) -> Platform {
        match raw {
            "linux" | "linux1" | "linux2" => Platform::Linux,
            "darwin" | "macos" => Platform::MacOs,
            "win32" | "windows" => Platform::Windows,
            other => Platform::Other(other.to_string()),
        }
    }

    /// Platform of the running process.
    ///
    /// Computed lazily from `std::env::consts::OS` on first use and stable
    /// for the process lifetime; repeated calls return the same cached
    /// value (same reference).
    pub fn current() -> &'static Platform {
        CURRENT.get_or_init(|| {
            let platform = Platform::from_descriptor(std::env::consts::OS);
            debug!(descriptor = std::env::consts::OS, %platform, "detected host platform");
            platform
        })
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Linux => write!(f, "Linux"),
            Platform::MacOs => write!(f, "macOS"),
            Platform::Windows => write!(f, "Windows"),
            Platform::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// Composite human-readable platform string:
/// `"<platform> <os-family> <kernel-release>"`, e.g.
/// `"Linux unix 6.8.0-45-generic"`. Memoized.
pub fn platform_full() -> &'static str {
    FULL.get_or_init(|| {
        format!(
            "{} {} {}",
            Platform::current(),
            std::env::consts::FAMILY,
            kernel_release()
        )
    })
}

/// Kernel / OS release string, best effort. Falls back to `"unknown"` when
/// the query fails; this feeds a display string, nothing load-bearing.
fn kernel_release() -> String {
    #[cfg(unix)]
    let output = Command::new("uname").arg("-r").output();
    #[cfg(windows)]
    let output = Command::new("cmd").args(["/C", "ver"]).output();

    match output {
        Ok(out) if out.status.success() => {
            String::from_utf8_lossy(&out.stdout).trim().to_string()
        }
        _ => "unknown".to_string(),
    }
}

/// Whether the running process is a self-contained bundled executable (as
/// opposed to running from a plain build). True when both bundle marker
/// variables are present in the environment. Memoized.
pub fn is_bundled() -> bool {
    *BUNDLED.get_or_init(|| bundle_markers_present(|key| std::env::var_os(key).is_some()))
}

/// Pure form of the bundled-executable check: `probe` reports whether a
/// given variable is set. Split out so tests can drive it with a fake
/// environment.
pub fn bundle_markers_present(probe: impl Fn(&str) -> bool) -> bool {
    BUNDLE_MARKER_VARS.iter().all(|key| probe(key))
}

/// Directory the application should treat as its working directory:
/// the directory containing the executable when bundled, else the process
/// current dir.
pub fn working_directory() -> PathBuf {
    if is_bundled() {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.to_path_buf();
            }
        }
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
