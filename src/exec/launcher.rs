// src/exec/launcher.rs

use std::process::{Child, Command, ExitStatus, Stdio};

use tracing::{debug, info};

use crate::errors::{LaunchkitError, Result};
use crate::exec::CommandLine;
#[cfg(unix)]
use crate::platform::Platform;

/// Platform launch strategy.
///
/// One implementation exists per OS family; [`native_launcher`] hands out
/// the right one for the running process, so callers never branch on the
/// platform themselves. All flag and encoding differences live behind this
/// trait.
pub trait Launcher: Send + Sync {
    /// Start a process decoupled from the caller: new process group /
    /// detached console, so terminating the caller does not terminate the
    /// child. Returns as soon as the child is started; no output is
    /// captured and nothing waits on the handle.
    fn spawn_detached(&self, command: &CommandLine) -> Result<Child>;

    /// Run a command to completion with stdin and stderr routed to the
    /// null device. Non-zero exit is an error
    /// ([`LaunchkitError::NonZeroExit`]); there is no retry and no timeout.
    fn run_blocking(&self, command: &CommandLine) -> Result<()>;

    /// Same as [`Launcher::run_blocking`] but returns the bytes the child
    /// wrote to stdout.
    ///
    /// stderr handling is intentionally asymmetric, matching observed
    /// behaviour: discarded on unix, merged into the captured output on
    /// Windows.
    fn run_blocking_capture(&self, command: &CommandLine) -> Result<Vec<u8>>;

    /// Captured stdout decoded as UTF-8
    /// ([`LaunchkitError::Encoding`] on invalid bytes).
    fn run_blocking_capture_text(&self, command: &CommandLine) -> Result<String> {
        let bytes = self.run_blocking_capture(command)?;
        Ok(String::from_utf8(bytes)?)
    }
}

/// Launcher for the running platform, selected once from
/// [`Platform::current`].
pub fn native_launcher() -> &'static dyn Launcher {
    #[cfg(unix)]
    {
        static LINUX: LinuxLauncher = LinuxLauncher;
        static MAC: MacLauncher = MacLauncher;

        match Platform::current() {
            Platform::MacOs => &MAC,
            _ => &LINUX,
        }
    }
    #[cfg(windows)]
    {
        static WINDOWS: WindowsLauncher = WindowsLauncher;
        &WINDOWS
    }
}

/// Start a detached process via the native launcher.
pub fn spawn_detached(command: &CommandLine) -> Result<Child> {
    native_launcher().spawn_detached(command)
}

/// Run a command to completion via the native launcher.
pub fn run_blocking(command: &CommandLine) -> Result<()> {
    native_launcher().run_blocking(command)
}

/// Run a command and capture its stdout via the native launcher.
pub fn run_blocking_capture(command: &CommandLine) -> Result<Vec<u8>> {
    native_launcher().run_blocking_capture(command)
}

/// Run a command and capture its stdout as UTF-8 text via the native
/// launcher.
pub fn run_blocking_capture_text(command: &CommandLine) -> Result<String> {
    native_launcher().run_blocking_capture_text(command)
}

fn launch_error(command: &CommandLine, source: std::io::Error) -> LaunchkitError {
    LaunchkitError::Launch {
        command: command.to_string(),
        source,
    }
}

fn check_status(command: &CommandLine, status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }

    // `code()` is `None` when the child was terminated by a signal.
    let code = status.code().unwrap_or(-1);
    debug!(command = %command, exit_code = code, "child exited non-zero");

    Err(LaunchkitError::NonZeroExit {
        command: command.to_string(),
        code,
    })
}

#[cfg(unix)]
mod unix {
    use std::os::unix::process::CommandExt;

    use super::*;
    use crate::env::execution_environment;

    pub(super) fn base_command(command: &CommandLine) -> Result<Command> {
        if command.is_empty() {
            return Err(LaunchkitError::EmptyCommand);
        }

        Ok(match command {
            CommandLine::Shell(line) => {
                let mut cmd = Command::new("sh");
                cmd.arg("-c").arg(line);
                cmd
            }
            CommandLine::Argv(tokens) => {
                let mut cmd = Command::new(&tokens[0]);
                cmd.args(&tokens[1..]);
                cmd
            }
        })
    }

    pub(super) fn spawn_detached(command: &CommandLine) -> Result<Child> {
        let mut cmd = base_command(command)?;

        // New process group, and the sanitized environment so the child
        // does not inherit the bundler's loader-path override.
        cmd.process_group(0)
            .env_clear()
            .envs(execution_environment());

        info!(command = %command, "spawning detached process");
        cmd.spawn().map_err(|e| launch_error(command, e))
    }

    pub(super) fn run_blocking(command: &CommandLine) -> Result<()> {
        let mut cmd = base_command(command)?;
        cmd.stdin(Stdio::null()).stderr(Stdio::null());

        debug!(command = %command, "running blocking command");
        let status = cmd.status().map_err(|e| launch_error(command, e))?;
        check_status(command, status)
    }

    pub(super) fn run_blocking_capture(command: &CommandLine) -> Result<Vec<u8>> {
        let mut cmd = base_command(command)?;
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());

        debug!(command = %command, "running blocking command with capture");
        let output = cmd.output().map_err(|e| launch_error(command, e))?;
        check_status(command, output.status)?;
        Ok(output.stdout)
    }
}

/// Launcher for GNU/Linux hosts.
#[cfg(unix)]
pub struct LinuxLauncher;

#[cfg(unix)]
impl Launcher for LinuxLauncher {
    fn spawn_detached(&self, command: &CommandLine) -> Result<Child> {
        unix::spawn_detached(command)
    }

    fn run_blocking(&self, command: &CommandLine) -> Result<()> {
        unix::run_blocking(command)
    }

    fn run_blocking_capture(&self, command: &CommandLine) -> Result<Vec<u8>> {
        unix::run_blocking_capture(command)
    }
}

/// Launcher for macOS hosts. Launch semantics currently coincide with
/// [`LinuxLauncher`]; the two are kept separate so family-specific
/// behaviour has a home.
#[cfg(unix)]
pub struct MacLauncher;

#[cfg(unix)]
impl Launcher for MacLauncher {
    fn spawn_detached(&self, command: &CommandLine) -> Result<Child> {
        unix::spawn_detached(command)
    }

    fn run_blocking(&self, command: &CommandLine) -> Result<()> {
        unix::run_blocking(command)
    }

    fn run_blocking_capture(&self, command: &CommandLine) -> Result<Vec<u8>> {
        unix::run_blocking_capture(command)
    }
}

/// Launcher for Windows hosts. Everything runs through `cmd /C`; creation
/// flags keep children off the parent's console.
#[cfg(windows)]
pub struct WindowsLauncher;

#[cfg(windows)]
impl Launcher for WindowsLauncher {
    fn spawn_detached(&self, command: &CommandLine) -> Result<Child> {
        use std::os::windows::process::CommandExt;

        const DETACHED_PROCESS: u32 = 0x0000_0008;

        let mut cmd = windows_shell_command(command)?;
        cmd.creation_flags(DETACHED_PROCESS);

        info!(command = %command, "spawning detached process");
        cmd.spawn().map_err(|e| launch_error(command, e))
    }

    fn run_blocking(&self, command: &CommandLine) -> Result<()> {
        use std::os::windows::process::CommandExt;

        let mut cmd = windows_shell_command(command)?;
        cmd.creation_flags(CREATE_NO_WINDOW)
            .stdin(Stdio::null())
            .stderr(Stdio::null());

        debug!(command = %command, "running blocking command");
        let status = cmd.status().map_err(|e| launch_error(command, e))?;
        check_status(command, status)
    }

    fn run_blocking_capture(&self, command: &CommandLine) -> Result<Vec<u8>> {
        use std::os::windows::process::CommandExt;

        let mut cmd = windows_shell_command(command)?;
        cmd.creation_flags(CREATE_NO_WINDOW).stdin(Stdio::null());

        debug!(command = %command, "running blocking command with capture");
        let output = cmd.output().map_err(|e| launch_error(command, e))?;
        check_status(command, output.status)?;

        // stderr merges into the captured stream on this platform.
        let mut captured = output.stdout;
        captured.extend_from_slice(&output.stderr);
        Ok(captured)
    }
}

/// Suppresses console window creation for the child.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

#[cfg(windows)]
fn windows_shell_command(command: &CommandLine) -> Result<Command> {
    if command.is_empty() {
        return Err(LaunchkitError::EmptyCommand);
    }

    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command.to_string());
    Ok(cmd)
}
