/*!
 * Reinsertion of translations into script files.
 *
 * The engine walks the records of a file once, left to right, copying every
 * byte between translated literals unchanged and choosing per record what the
 * translated literal should contain:
 *
 * - no translation available: the literal already in the file
 * - a translation whose markup validates: the translation, made safe for a
 *   one-line literal (`"` turned into `'`, line breaks and a dangling
 *   trailing backslash escaped)
 * - a translation whose markup does not validate: the original text
 *
 * Every decision is reported to a `DiagnosticSink`. Nothing here fails; the
 * worst outcome for a record is keeping the original text.
 */

use std::fmt;

use log::{debug, warn};

use crate::errors::TagSyntaxError;
use crate::translation_map::TranslationMap;
use crate::validation::markup::{TagValidator, ValidationResult};

use super::record::{literal_candidate, RecordKind, RecordScanner, TranslationRecord};

/// What was written into a record's translated literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No translation in the map; the stored literal was kept
    Untranslated,
    /// The mapped translation passed validation and was written
    Translated,
    /// The mapped translation failed validation; the original text was written
    Fallback,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Untranslated => write!(f, "untranslated"),
            Outcome::Translated => write!(f, "translated"),
            Outcome::Fallback => write!(f, "fallback"),
        }
    }
}

/// Per-record report handed to a `DiagnosticSink`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDiagnostic {
    /// 1-based line of the translated literal
    pub line: usize,
    pub kind: RecordKind,
    /// Original text (the map key)
    pub original: String,
    /// Mapped translation after quote rewriting, if there was one
    pub candidate: Option<String>,
    /// Text written into the translated literal
    pub emitted: String,
    pub outcome: Outcome,
    /// Validator reason when the candidate was rejected
    pub reason: Option<TagSyntaxError>,
}

impl RecordDiagnostic {
    /// Whether the candidate passed validation. `None` when there was no candidate.
    pub fn validation_passed(&self) -> Option<bool> {
        self.candidate.as_ref().map(|_| self.reason.is_none())
    }
}

/// Receiver for per-record diagnostics
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: &RecordDiagnostic);
}

/// Sink that writes every diagnostic to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: &RecordDiagnostic) {
        match diagnostic.outcome {
            Outcome::Fallback => warn!(
                "Line {}: invalid translation ({}), keeping original: {:?} (rejected {:?})",
                diagnostic.line,
                diagnostic
                    .reason
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                diagnostic.original,
                diagnostic.candidate.as_deref().unwrap_or_default()
            ),
            Outcome::Translated => debug!(
                "Line {}: {:?} -> {:?} (markup ok)",
                diagnostic.line, diagnostic.original, diagnostic.emitted
            ),
            Outcome::Untranslated => debug!(
                "Line {}: no translation for {:?}, keeping {:?}",
                diagnostic.line, diagnostic.original, diagnostic.emitted
            ),
        }
    }
}

impl DiagnosticSink for Vec<RecordDiagnostic> {
    fn report(&mut self, diagnostic: &RecordDiagnostic) {
        self.push(diagnostic.clone());
    }
}

/// Record counts for one reinsertion pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReinsertStats {
    pub records: usize,
    pub translated: usize,
    pub fallbacks: usize,
    pub untranslated: usize,
}

impl ReinsertStats {
    pub fn add(&mut self, other: &ReinsertStats) {
        self.records += other.records;
        self.translated += other.translated;
        self.fallbacks += other.fallbacks;
        self.untranslated += other.untranslated;
    }
}

/// Sink that counts outcomes and forwards to another sink
pub struct CountingSink<'s, S: DiagnosticSink + ?Sized> {
    inner: &'s mut S,
    pub stats: ReinsertStats,
}

impl<'s, S: DiagnosticSink + ?Sized> CountingSink<'s, S> {
    pub fn new(inner: &'s mut S) -> Self {
        Self {
            inner,
            stats: ReinsertStats::default(),
        }
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for CountingSink<'_, S> {
    fn report(&mut self, diagnostic: &RecordDiagnostic) {
        self.stats.records += 1;
        match diagnostic.outcome {
            Outcome::Translated => self.stats.translated += 1,
            Outcome::Fallback => self.stats.fallbacks += 1,
            Outcome::Untranslated => self.stats.untranslated += 1,
        }
        self.inner.report(diagnostic);
    }
}

/// Result of reinserting into one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReinsertReport {
    pub text: String,
    pub stats: ReinsertStats,
}

/// Replaces translated literals in a file with validated translations
pub struct ReinsertionEngine;

impl ReinsertionEngine {
    /// Reinsert translations, logging each record decision
    pub fn reinsert(file_text: &str, translations: &TranslationMap) -> String {
        Self::reinsert_with(file_text, translations, &mut LogSink)
    }

    /// Reinsert translations and return record counts alongside the new text
    pub fn reinsert_report<S: DiagnosticSink + ?Sized>(
        file_text: &str,
        translations: &TranslationMap,
        sink: &mut S,
    ) -> ReinsertReport {
        let mut counting = CountingSink::new(sink);
        let text = Self::reinsert_with(file_text, translations, &mut counting);
        ReinsertReport {
            text,
            stats: counting.stats,
        }
    }

    /// Reinsert translations, reporting each record decision to `sink`
    pub fn reinsert_with<S: DiagnosticSink + ?Sized>(
        file_text: &str,
        translations: &TranslationMap,
        sink: &mut S,
    ) -> String {
        let mut output = String::with_capacity(file_text.len());
        let mut cursor = 0;

        for record in RecordScanner::new(file_text) {
            let diagnostic = Self::decide(&record, translations);

            output.push_str(&file_text[cursor..record.translated_span.start]);
            output.push_str(&diagnostic.emitted);
            cursor = record.translated_span.end;

            sink.report(&diagnostic);
        }

        output.push_str(&file_text[cursor..]);
        output
    }

    /// Choose the text for a record's translated literal
    fn decide(record: &TranslationRecord<'_>, translations: &TranslationMap) -> RecordDiagnostic {
        let mut diagnostic = RecordDiagnostic {
            line: record.line,
            kind: record.kind,
            original: record.original_text.to_string(),
            candidate: None,
            emitted: record.translated_text.to_string(),
            outcome: Outcome::Untranslated,
            reason: None,
        };

        let Some(translated) = translations.get(record.original_text) else {
            return diagnostic;
        };

        let candidate = literal_candidate(translated);

        match TagValidator::validate(&candidate) {
            ValidationResult::Valid => {
                diagnostic.emitted = candidate.clone();
                diagnostic.outcome = Outcome::Translated;
            }
            ValidationResult::Invalid(reason) => {
                diagnostic.emitted = record.original_text.to_string();
                diagnostic.outcome = Outcome::Fallback;
                diagnostic.reason = Some(reason);
            }
        }
        diagnostic.candidate = Some(candidate);

        diagnostic
    }
}
