#![cfg(unix)]

use std::error::Error;
use std::time::{Duration, Instant};

use launchkit::errors::LaunchkitError;
use launchkit::exec::{
    native_launcher, run_blocking, run_blocking_capture, run_blocking_capture_text,
    spawn_detached, CommandLine,
};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn run_blocking_succeeds_on_zero_exit() -> TestResult {
    run_blocking(&CommandLine::shell("exit 0"))?;
    run_blocking(&CommandLine::argv(["true"]))?;

    Ok(())
}

#[test]
fn run_blocking_reports_non_zero_exit() -> TestResult {
    let err = run_blocking(&CommandLine::shell("exit 1")).unwrap_err();

    match err {
        LaunchkitError::NonZeroExit { code, .. } => assert_eq!(code, 1),
        other => panic!("expected NonZeroExit, got {other:?}"),
    }

    Ok(())
}

#[test]
fn run_blocking_surfaces_launch_failure() -> TestResult {
    let err = run_blocking(&CommandLine::argv(["definitely-not-a-real-binary-4f2a"]))
        .unwrap_err();

    assert!(matches!(err, LaunchkitError::Launch { .. }));

    Ok(())
}

#[test]
fn empty_command_is_rejected_before_spawning() -> TestResult {
    let err = run_blocking(&CommandLine::argv(Vec::<String>::new())).unwrap_err();
    assert!(matches!(err, LaunchkitError::EmptyCommand));

    let err = spawn_detached(&CommandLine::shell("   ")).unwrap_err();
    assert!(matches!(err, LaunchkitError::EmptyCommand));

    Ok(())
}

#[test]
fn capture_returns_exact_child_stdout_bytes() -> TestResult {
    let bytes = run_blocking_capture(&CommandLine::argv(["echo", "hello"]))?;
    assert_eq!(bytes, b"hello\n");

    let text = run_blocking_capture_text(&CommandLine::shell("printf 'a b'"))?;
    assert_eq!(text, "a b");

    Ok(())
}

#[test]
fn capture_discards_child_stderr() -> TestResult {
    let text =
        run_blocking_capture_text(&CommandLine::shell("echo out; echo err 1>&2"))?;
    assert_eq!(text, "out\n");

    Ok(())
}

#[test]
fn capture_fails_on_non_zero_exit() -> TestResult {
    let err = run_blocking_capture(&CommandLine::shell("echo boo; exit 3")).unwrap_err();

    match err {
        LaunchkitError::NonZeroExit { code, .. } => assert_eq!(code, 3),
        other => panic!("expected NonZeroExit, got {other:?}"),
    }

    Ok(())
}

#[test]
fn detached_spawn_returns_before_child_completes() -> TestResult {
    let start = Instant::now();
    let child = spawn_detached(&CommandLine::shell("sleep 5"))?;
    let elapsed = start.elapsed();

    assert!(child.id() > 0);
    assert!(
        elapsed < Duration::from_millis(200),
        "spawn_detached took {elapsed:?}"
    );

    Ok(())
}

#[test]
fn native_launcher_matches_free_functions() -> TestResult {
    let launcher = native_launcher();

    launcher.run_blocking(&CommandLine::shell("exit 0"))?;
    let text = launcher.run_blocking_capture_text(&CommandLine::argv(["echo", "hi"]))?;
    assert_eq!(text, "hi\n");

    Ok(())
}
