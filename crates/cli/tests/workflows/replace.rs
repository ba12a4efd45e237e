//! Watch reload after the target is replaced or deleted

use crate::common::{append_to, count_lines, SETTLE};
use crate::ontouch;
use anyhow::Result;
use std::fs;
use std::thread::sleep;
use tempfile::TempDir;

#[test]
fn test_atomic_save_is_rewatched() -> Result<()> {
    let dir = TempDir::new()?;
    let target = dir.path().join("a.txt");
    let other = dir.path().join("b.txt");
    let marker = dir.path().join("runs");
    fs::write(&target, "initial")?;
    fs::write(&other, "initial")?;
    let command = append_to(&marker);

    let mut running = ontouch!(
        dir.path(),
        "-s", "/bin/sh", "-d", "0", "-v", "-c", &command,
        target.to_str().unwrap(),
        other.to_str().unwrap()
    )
    .spawn()?;

    // editor-style save: write a sibling, rename it over the target
    let swap = dir.path().join(".a.txt.swp");
    fs::write(&swap, "saved")?;
    fs::rename(&swap, &target)?;
    sleep(SETTLE);
    assert!(running.is_running());

    let before = count_lines(&marker);
    fs::write(&target, "edited")?;
    sleep(SETTLE);
    assert!(count_lines(&marker) > before);

    // the untouched target is still watched too
    let before = count_lines(&marker);
    fs::write(&other, "edited")?;
    sleep(SETTLE);
    assert!(count_lines(&marker) > before);

    let result = running.interrupt()?;
    assert!(result.success(), "stderr: {}", result.stderr);
    assert!(result.contains_stdout("a.txt: invalidated"));
    Ok(())
}

#[test]
fn test_deleted_target_is_fatal() -> Result<()> {
    let dir = TempDir::new()?;
    let target = dir.path().join("a.txt");
    fs::write(&target, "initial")?;

    let running = ontouch!(dir.path(), target.to_str().unwrap()).spawn()?;

    fs::remove_file(&target)?;
    let result = running.wait()?;

    assert_eq!(result.exit_code, 1);
    assert!(result.contains_stderr("inotify_add_watch"));
    assert!(result.contains_stderr("a.txt"));
    Ok(())
}
