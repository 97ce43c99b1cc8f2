/*!
 * Tests for translation map persistence
 */

use std::fs;
use anyhow::Result;
use rpytl::TranslationMap;
use crate::common;

#[test]
fn test_saveAndLoad_shouldKeepEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested/game__script_rpy.json");

    let mut map = TranslationMap::new();
    map.insert("Hello", "Bonjour");
    map.insert("Unicode «ok»", "");
    map.save(&path)?;

    let loaded = TranslationMap::load(&path)?;
    assert_eq!(loaded, map);
    assert_eq!(loaded.get("Hello"), Some("Bonjour"));
    assert_eq!(loaded.get("Unicode «ok»"), None);
    Ok(())
}

#[test]
fn test_save_shouldWritePrettyJsonWithoutEscapingUnicode() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("map.json");

    let mut map = TranslationMap::new();
    map.insert("こんにちは", "Bonjour");
    map.save(&path)?;

    let content = fs::read_to_string(&path)?;
    assert!(content.contains("\n  \"こんにちは\": \"Bonjour\""));
    Ok(())
}

#[test]
fn test_load_withInvalidJson_shouldMentionFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;

    let error = TranslationMap::load(&path).unwrap_err();
    assert!(format!("{:#}", error).contains("broken.json"));
    Ok(())
}

#[test]
fn test_load_withMissingFile_shouldFail() {
    assert!(TranslationMap::load("no/such/map.json").is_err());
}
