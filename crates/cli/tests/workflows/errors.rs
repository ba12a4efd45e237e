//! Startup failures and their exit codes

use crate::ontouch;
use anyhow::Result;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_target_is_fatal() -> Result<()> {
    let dir = TempDir::new()?;
    let present = dir.path().join("present.txt");
    fs::write(&present, "x")?;
    let missing = dir.path().join("missing.txt");

    let result = ontouch!(
        dir.path(),
        "-c", "true",
        present.to_str().unwrap(),
        missing.to_str().unwrap()
    )
    .execute()?;

    assert_eq!(result.exit_code, 1);
    assert!(result.contains_stderr("inotify_add_watch"));
    assert!(result.contains_stderr("missing.txt"));
    assert!(result.stdout.is_empty());
    Ok(())
}

#[test]
fn test_no_targets_is_a_usage_error() -> Result<()> {
    let dir = TempDir::new()?;

    let result = ontouch!(dir.path(), "-c", "true").execute()?;

    assert_eq!(result.exit_code, 2);
    assert!(result.contains_stderr("no files to watch"));
    Ok(())
}

#[test]
fn test_unknown_trigger_kind_is_a_usage_error() -> Result<()> {
    let dir = TempDir::new()?;
    let target = dir.path().join("a.txt");
    fs::write(&target, "x")?;

    let result = ontouch!(dir.path(), "--on", "sneeze", target.to_str().unwrap()).execute()?;

    assert_eq!(result.exit_code, 2);
    assert!(result.contains_stderr("sneeze"));
    Ok(())
}

#[test]
fn test_bad_config_file_is_a_usage_error() -> Result<()> {
    let dir = TempDir::new()?;
    let target = dir.path().join("a.txt");
    fs::write(&target, "x")?;
    let config = dir.path().join("ontouch.toml");
    fs::write(&config, "debounce = \"soon\"\n")?;

    let result = ontouch!(
        dir.path(),
        "--config", config.to_str().unwrap(),
        target.to_str().unwrap()
    )
    .execute()?;

    assert_eq!(result.exit_code, 2);
    assert!(result.contains_stderr("ontouch.toml"));
    Ok(())
}

#[test]
fn test_config_file_supplies_targets() -> Result<()> {
    let dir = TempDir::new()?;
    let config = dir.path().join("ontouch.toml");
    fs::write(&config, "targets = [\"gone.txt\"]\n")?;

    // targets resolve relative to the working directory; a missing one proves it was read
    let result = ontouch!(dir.path(), "--config", config.to_str().unwrap()).execute()?;

    assert_eq!(result.exit_code, 1);
    assert!(result.contains_stderr("gone.txt"));
    Ok(())
}
