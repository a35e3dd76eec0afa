use std::error::Error;
use std::fs;
use std::path::Path;

use tempfile::tempdir;
use tokio::sync::mpsc;

use launchkit::install::{install_template, spawn_installer, InstallerEvent};

type TestResult = Result<(), Box<dyn Error>>;

/// Build a library/template tree with a nested file, and a dist directory
/// containing one versioned build and some decoys.
fn setup_fixture(root: &Path) -> TestResult {
    let template = root.join("library/template");
    fs::create_dir_all(template.join("config"))?;
    fs::write(template.join("startup.txt"), "fresh")?;
    fs::write(template.join("config/settings.dat"), "defaults")?;

    let dist = root.join("dist");
    fs::create_dir_all(dist.join("4.2.0"))?;
    fs::write(dist.join("4.2.0/startup.txt"), "stale")?;
    fs::write(dist.join("4.2.0/keep.me"), "untouched")?;

    // Non-versioned directory and a versioned-looking plain file: neither
    // is a valid destination.
    fs::create_dir_all(dist.join("notes"))?;
    fs::write(dist.join("9.9-not-a-dir"), "")?;

    Ok(())
}

#[test]
fn template_is_copied_into_versioned_build_dir() -> TestResult {
    let dir = tempdir()?;
    setup_fixture(dir.path())?;

    let template = dir.path().join("library/template");
    let dist = dir.path().join("dist");

    let destination = install_template(&template, &dist)?;
    assert_eq!(destination, Some(dist.join("4.2.0")));

    // Template contents land inside the build dir, overwriting collisions
    // and leaving unrelated files alone.
    assert_eq!(fs::read_to_string(dist.join("4.2.0/startup.txt"))?, "fresh");
    assert_eq!(
        fs::read_to_string(dist.join("4.2.0/config/settings.dat"))?,
        "defaults"
    );
    assert_eq!(fs::read_to_string(dist.join("4.2.0/keep.me"))?, "untouched");

    // The non-versioned directory is not a destination.
    assert!(!dist.join("notes/startup.txt").exists());

    Ok(())
}

#[test]
fn missing_template_dir_is_created_and_nothing_is_copied() -> TestResult {
    let dir = tempdir()?;
    let template = dir.path().join("library/template");
    let dist = dir.path().join("dist");
    fs::create_dir_all(dist.join("plain-build"))?;

    let destination = install_template(&template, &dist)?;

    assert_eq!(destination, None);
    assert!(template.is_dir());

    Ok(())
}

#[test]
fn missing_dist_dir_is_an_error() -> TestResult {
    let dir = tempdir()?;
    let template = dir.path().join("library/template");

    let result = install_template(&template, &dir.path().join("no-such-dist"));
    assert!(result.is_err());

    Ok(())
}

#[tokio::test]
async fn installer_worker_signals_finished() -> TestResult {
    let dir = tempdir()?;
    setup_fixture(dir.path())?;

    let template = dir.path().join("library/template");
    let dist = dir.path().join("dist");

    let (tx, mut rx) = mpsc::channel::<InstallerEvent>(1);
    spawn_installer(template, dist.clone(), tx);

    let event = rx.recv().await;
    assert_eq!(
        event,
        Some(InstallerEvent::Finished {
            destination: dist.join("4.2.0")
        })
    );
    assert_eq!(fs::read_to_string(dist.join("4.2.0/startup.txt"))?, "fresh");

    Ok(())
}

#[tokio::test]
async fn installer_worker_signals_skipped_without_versioned_dir() -> TestResult {
    let dir = tempdir()?;
    let template = dir.path().join("library/template");
    let dist = dir.path().join("dist");
    fs::create_dir_all(&dist)?;

    let (tx, mut rx) = mpsc::channel::<InstallerEvent>(1);
    spawn_installer(template, dist, tx);

    assert_eq!(rx.recv().await, Some(InstallerEvent::Skipped));

    Ok(())
}

#[tokio::test]
async fn installer_worker_signals_failure() -> TestResult {
    let dir = tempdir()?;
    let template = dir.path().join("library/template");

    let (tx, mut rx) = mpsc::channel::<InstallerEvent>(1);
    spawn_installer(template, dir.path().join("no-such-dist"), tx);

    match rx.recv().await {
        Some(InstallerEvent::Failed { error }) => assert!(!error.is_empty()),
        other => panic!("expected Failed event, got {other:?}"),
    }

    Ok(())
}
