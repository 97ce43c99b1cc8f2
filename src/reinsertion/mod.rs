/*!
 * Reinsertion of translations into script files.
 *
 * - `record`: Locates original/translated literal pairs in a file
 * - `engine`: Chooses and writes the translated text for each pair
 */

pub mod record;
pub mod engine;

// Re-export main types
pub use engine::{
    CountingSink, DiagnosticSink, LogSink, Outcome, RecordDiagnostic, ReinsertReport,
    ReinsertStats, ReinsertionEngine,
};
pub use record::{literal_candidate, RecordKind, RecordScanner, TranslationRecord};
