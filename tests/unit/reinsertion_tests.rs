/*!
 * Tests for the reinsertion engine
 */

use rpytl::reinsertion::{Outcome, RecordDiagnostic, RecordScanner, ReinsertionEngine};
use rpytl::TranslationMap;
use crate::common::{dialogue_record, map_of, sample_script};

/// Bytes outside translated literals must be identical between input and output
fn assert_pass_through(input: &str, output: &str) {
    let input_records: Vec<_> = RecordScanner::new(input).collect();
    let output_records: Vec<_> = RecordScanner::new(output).collect();
    assert_eq!(input_records.len(), output_records.len());

    let mut in_cursor = 0;
    let mut out_cursor = 0;
    for (a, b) in input_records.iter().zip(output_records.iter()) {
        assert_eq!(
            &input[in_cursor..a.translated_span.start],
            &output[out_cursor..b.translated_span.start]
        );
        in_cursor = a.translated_span.end;
        out_cursor = b.translated_span.end;
    }
    assert_eq!(&input[in_cursor..], &output[out_cursor..]);
}

#[test]
fn test_reinsert_endToEnd_withValidTranslation_shouldSubstitute() {
    let input = dialogue_record("1", "Hi {b}bold{/b}", "Bonjour");
    let translations = map_of(&[("Hi {b}bold{/b}", "Salut {b}fort{/b}")]);

    let output = ReinsertionEngine::reinsert(&input, &translations);

    assert_eq!(output, dialogue_record("1", "Hi {b}bold{/b}", "Salut {b}fort{/b}"));
}

#[test]
fn test_reinsert_endToEnd_withUnclosedTranslation_shouldKeepOriginal() {
    let input = dialogue_record("1", "Hi {b}bold{/b}", "Bonjour");
    let translations = map_of(&[("Hi {b}bold{/b}", "Salut {b}fort")]);

    let output = ReinsertionEngine::reinsert(&input, &translations);

    assert_eq!(output, dialogue_record("1", "Hi {b}bold{/b}", "Hi {b}bold{/b}"));
}

#[test]
fn test_reinsert_withOneInvalidRecord_shouldNotAffectOthers() {
    let input = sample_script();
    let translations = map_of(&[
        ("Hi {b}bold{/b}", "Salut {b}fort"),
        ("Wait{w} for it.", "Attends{w} un peu."),
        ("Start", "Commencer"),
    ]);
    let mut diagnostics: Vec<RecordDiagnostic> = Vec::new();

    let output = ReinsertionEngine::reinsert_with(&input, &translations, &mut diagnostics);

    let expected = input
        .replace("    \"Bonjour\"", "    \"Hi {b}bold{/b}\"")
        .replace("    \"Wait{w} for it.\"", "    \"Attends{w} un peu.\"")
        .replace("new \"Start\"", "new \"Commencer\"");
    assert_eq!(output, expected);

    let outcomes: Vec<_> = diagnostics.iter().map(|d| d.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            Outcome::Fallback,
            Outcome::Translated,
            Outcome::Untranslated,
            Outcome::Translated,
        ]
    );
    assert_eq!(diagnostics[0].original, "Hi {b}bold{/b}");
    assert_eq!(diagnostics[0].candidate.as_deref(), Some("Salut {b}fort"));
    assert!(diagnostics[0].reason.is_some());
}

#[test]
fn test_reinsert_withAnyMap_shouldPreserveBytesOutsideTranslatedLiterals() {
    let input = sample_script();
    let translations = map_of(&[
        ("Hi {b}bold{/b}", "Salut {b}fort{/b}"),
        ("{i}Unchanged{/i}", "{i}Changé{/i}"),
        ("Start", "{bad}"),
    ]);

    let output = ReinsertionEngine::reinsert(&input, &translations);

    assert_pass_through(&input, &output);
}

#[test]
fn test_reinsert_withMalformedFile_shouldReturnInputUnchanged() {
    let input = "# comment\ntranslate french broken:\n    # \"never closed\n    \"also open\n\n\"stray\"\n";
    let translations = map_of(&[("never closed", "x")]);

    assert_eq!(ReinsertionEngine::reinsert(input, &translations), input);
}

#[test]
fn test_reinsert_secondRunWithSameMap_shouldBeByteIdentical() {
    let input = sample_script();
    let translations = map_of(&[
        ("Hi {b}bold{/b}", "Salut {b}fort{/b}"),
        ("Wait{w} for it.", "Attends{w} \"bien\"."),
        ("{i}Unchanged{/i}", "{i}oops"),
    ]);

    let first = ReinsertionEngine::reinsert(&input, &translations);
    let second = ReinsertionEngine::reinsert(&first, &translations);

    assert_eq!(first, second);
}

#[test]
fn test_reinsert_withCrlfFile_shouldKeepLineEndings() {
    let input = dialogue_record("1", "Hello", "Hello").replace('\n', "\r\n");
    let output = ReinsertionEngine::reinsert(&input, &map_of(&[("Hello", "Bonjour")]));

    assert_eq!(output, dialogue_record("1", "Hello", "Bonjour").replace('\n', "\r\n"));
}

#[test]
fn test_reinsert_withTrailingStatementText_shouldKeepIt() {
    let input = "# c\ntranslate french a:\n\n    # \"Boom\" with vpunch\n    \"Boom\" with vpunch\n";
    let output = ReinsertionEngine::reinsert(input, &map_of(&[("Boom", "Bam")]));

    assert_eq!(output, "# c\ntranslate french a:\n\n    # \"Boom\" with vpunch\n    \"Bam\" with vpunch\n");
}

#[test]
fn test_reinsert_withEmptyMap_shouldReturnInput() {
    let input = sample_script();
    assert_eq!(ReinsertionEngine::reinsert(&input, &TranslationMap::new()), input);
}

#[test]
fn test_reinsert_withTrailingBackslashTranslation_shouldKeepEveryRecordScannable() {
    let input = sample_script();
    let translations = map_of(&[("Hi {b}bold{/b}", "Salut\\"), ("Start", "Commencer\\\\")]);

    let output = ReinsertionEngine::reinsert(&input, &translations);

    assert_eq!(
        RecordScanner::new(&output).count(),
        RecordScanner::new(&input).count()
    );
    assert!(output.contains("    \"Salut\\\\\"\n"));
    assert!(output.contains("new \"Commencer\\\\\"\n"));
    assert_pass_through(&input, &output);
}
