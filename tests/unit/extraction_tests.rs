/*!
 * Tests for translation template extraction
 */

use rpytl::{Extractor, ReinsertionEngine};
use crate::common::{map_of, sample_script};

#[test]
fn test_extract_withSampleScript_shouldReturnEveryOriginalOnce() {
    let keys = Extractor::extract(&sample_script());
    assert_eq!(
        keys,
        vec!["Hi {b}bold{/b}", "Wait{w} for it.", "{i}Unchanged{/i}", "Start"]
    );
}

#[test]
fn test_extract_keysShouldMatchReinsertionKeys() {
    let script = sample_script();
    let keys = Extractor::extract(&script);

    // Translating every extracted key must change every record
    let translations = map_of(
        &keys
            .iter()
            .map(|k| (k.as_str(), "X"))
            .collect::<Vec<_>>(),
    );
    let output = ReinsertionEngine::reinsert(&script, &translations);

    assert_eq!(output.matches("    \"X\"\n").count(), 3);
    assert!(output.contains("new \"X\""));
}

#[test]
fn test_extract_withNoStrings_shouldReturnEmpty() {
    assert!(Extractor::extract("label start:\n    return\n").is_empty());
}
