/*!
 * Tests for checking translated maps without applying them
 */

use anyhow::Result;
use rpytl::{Config, Controller};
use crate::common;

#[test]
fn test_check_shouldCountInvalidTranslations() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(
        root,
        "translations_out/a_rpy_translated.json",
        r#"{"A": "{b}ok{/b}", "B": "{i}broken", "C": ""}"#,
    )?;
    common::create_test_file(
        root,
        "translations_out/b_rpy_translated.json",
        r#"{"D": "{foo}"}"#,
    )?;

    let summary = Controller::with_config(Config::default())?
        .with_progress(false)
        .check(root)?;

    assert_eq!(summary.maps_checked, 2);
    assert_eq!(summary.entries_checked, 3);
    assert_eq!(summary.issues, 2);
    assert!(!summary.passed());
    Ok(())
}

#[test]
fn test_check_withUnreadableMap_shouldFailSummary() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "translations_out/a_rpy_translated.json", "[")?;

    let summary = Controller::with_config(Config::default())?
        .with_progress(false)
        .check(root)?;

    assert_eq!(summary.maps_failed, 1);
    assert!(!summary.passed());
    Ok(())
}

#[test]
fn test_check_withOnlyValidTranslations_shouldPass() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(
        root,
        "translations_out/a_rpy_translated.json",
        r#"{"A": "Salut{w} {b}toi{/b}"}"#,
    )?;

    let summary = Controller::with_config(Config::default())?
        .with_progress(false)
        .check(root)?;

    assert!(summary.passed());
    Ok(())
}
