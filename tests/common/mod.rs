/*!
 * Common test utilities for the rpytl test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Routes library log output through the test harness. Safe to call from every test.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content, creating parent directories
pub fn create_test_file(dir: &Path, relative: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(relative);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// One dialogue record in translation-script layout
pub fn dialogue_record(id: &str, original: &str, translated: &str) -> String {
    format!(
        "# game/script.rpy:{id}\ntranslate french start_{id}:\n\n    # \"{original}\"\n    \"{translated}\"\n",
        id = id,
        original = original,
        translated = translated
    )
}

/// A translation script with several dialogue records and a strings block
pub fn sample_script() -> String {
    let mut script = String::from("# TODO: Translation updated at 2024-01-01 12:00\n\n");
    script.push_str(&dialogue_record("10", "Hi {b}bold{/b}", "Bonjour"));
    script.push('\n');
    script.push_str(&dialogue_record("11", "Wait{w} for it.", "Wait{w} for it."));
    script.push('\n');
    script.push_str(&dialogue_record("12", "{i}Unchanged{/i}", "{i}Unchanged{/i}"));
    script.push_str("\ntranslate french strings:\n\n    # game/screens.rpy:5\n    old \"Start\"\n    new \"Start\"\n");
    script
}

/// Build a map from string pairs
pub fn map_of(entries: &[(&str, &str)]) -> rpytl::TranslationMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
