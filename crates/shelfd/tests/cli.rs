//! Integration tests for the shelf CLI commands.
//!
//! Every test runs against an ephemeral catalog and storage root; commands
//! that would prompt use `--accept-defaults`/`--force`.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::tempdir;

// Helper function to create a clean command instance
fn shelf() -> Command { Command::cargo_bin("shelf").unwrap() }

// Helper to get temporary catalog and storage paths
fn temp_paths() -> (tempfile::TempDir, PathBuf, PathBuf) {
  let dir = tempdir().unwrap();
  let catalog = dir.path().join("test.db");
  let storage = dir.path().join("storage");
  (dir, catalog, storage)
}

#[test]
#[serial]
fn test_init_creates_catalog() {
  let (dir, catalog, storage) = temp_paths();

  shelf()
    .arg("init")
    .arg("--path")
    .arg(&catalog)
    .arg("--storage")
    .arg(&storage)
    .assert()
    .success()
    .stdout(predicate::str::contains("initialized successfully"));

  assert!(catalog.exists());
  assert!(storage.exists());
  dir.close().unwrap();
}

#[test]
#[serial]
fn test_add_local_file_and_search() {
  let (dir, catalog, storage) = temp_paths();
  let file = dir.path().join("deep-learning-notes.pdf");
  std::fs::write(&file, b"%PDF-1.4").unwrap();

  shelf()
    .arg("add")
    .arg(&file)
    .arg("--path")
    .arg(&catalog)
    .arg("--storage")
    .arg(&storage)
    .assert()
    .success()
    .stdout(predicate::str::contains("Added \"deep-learning-notes\""));

  shelf()
    .arg("search")
    .arg("learning")
    .arg("--path")
    .arg(&catalog)
    .assert()
    .success()
    .stdout(predicate::str::contains("deep-learning-notes"));

  // Re-adding the same file reports the duplicate instead of inserting.
  shelf()
    .arg("add")
    .arg(&file)
    .arg("--path")
    .arg(&catalog)
    .arg("--storage")
    .arg(&storage)
    .assert()
    .success()
    .stdout(predicate::str::contains("already exists"));

  dir.close().unwrap();
}

#[test]
#[serial]
fn test_folder_management() {
  let (dir, catalog, _storage) = temp_paths();

  shelf()
    .arg("folder")
    .arg("new")
    .arg("Reading")
    .arg("--path")
    .arg(&catalog)
    .assert()
    .success()
    .stdout(predicate::str::contains("Created folder"));

  shelf()
    .arg("folder")
    .arg("list")
    .arg("--path")
    .arg(&catalog)
    .assert()
    .success()
    .stdout(predicate::str::contains("Unsorted").and(predicate::str::contains("Reading")));

  shelf()
    .arg("folder")
    .arg("rm")
    .arg("Reading")
    .arg("--force")
    .arg("--path")
    .arg(&catalog)
    .assert()
    .success()
    .stdout(predicate::str::contains("Deleted folder"));

  dir.close().unwrap();
}

#[test]
#[serial]
fn test_open_with_empty_catalog() {
  let (dir, catalog, _storage) = temp_paths();

  shelf()
    .arg("open")
    .arg("--path")
    .arg(&catalog)
    .assert()
    .success()
    .stdout(predicate::str::contains("empty"));

  dir.close().unwrap();
}

#[test]
#[serial]
fn test_unknown_folder_is_an_error() {
  let (dir, catalog, storage) = temp_paths();
  let file = dir.path().join("notes.pdf");
  std::fs::write(&file, b"%PDF-1.4").unwrap();

  shelf()
    .arg("add")
    .arg(&file)
    .arg("--folder")
    .arg("Missing")
    .arg("--path")
    .arg(&catalog)
    .arg("--storage")
    .arg(&storage)
    .assert()
    .failure();

  dir.close().unwrap();
}
