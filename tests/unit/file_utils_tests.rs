/*!
 * Tests for file utility functions
 */

use std::fs;
use anyhow::Result;
use rpytl::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that ensure_dir creates directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_subdir = temp_dir.path().join("a/b/c");

    FileManager::ensure_dir(&test_subdir)?;

    assert!(test_subdir.is_dir());
    Ok(())
}

/// Test that write_atomic creates missing parents and new files
#[test]
fn test_write_atomic_withNewFile_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out/translations/map.json");

    FileManager::write_atomic(&path, "{}")?;

    assert_eq!(fs::read_to_string(&path)?, "{}");
    Ok(())
}

/// Test that find_files returns paths in sorted order
#[test]
fn test_find_files_shouldReturnSortedPaths() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "game/b.rpy", "")?;
    common::create_test_file(temp_dir.path(), "game/a.rpy", "")?;
    common::create_test_file(temp_dir.path(), "game/notes.txt", "")?;

    let found = FileManager::find_files(temp_dir.path(), ".rpy")?;

    assert_eq!(
        found,
        vec![temp_dir.path().join("game/a.rpy"), temp_dir.path().join("game/b.rpy")]
    );
    Ok(())
}

/// Test that read_to_string reports the path on failure
#[test]
fn test_read_to_string_withMissingFile_shouldMentionPath() {
    let error = FileManager::read_to_string("missing_script.rpy").unwrap_err();
    assert!(error.to_string().contains("missing_script.rpy"));
}
