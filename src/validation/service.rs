/*!
 * Validation service that checks whole translation maps.
 *
 * Used ahead of reinsertion to list every translation that would be rejected,
 * without touching any script file.
 */

use log::debug;

use crate::errors::TagSyntaxError;
use crate::reinsertion::record::literal_candidate;
use crate::translation_map::TranslationMap;

use super::markup::{TagValidator, ValidationResult};

/// A translation that would be rejected at reinsertion time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapIssue {
    pub original: String,
    pub translated: String,
    pub reason: TagSyntaxError,
}

impl std::fmt::Display for MapIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {} (translation {:?})", self.original, self.reason, self.translated)
    }
}

/// Result of validating a translation map
#[derive(Debug, Clone, Default)]
pub struct MapValidationResult {
    /// Number of non-empty translations checked
    pub checked: usize,
    /// Translations that failed markup validation
    pub issues: Vec<MapIssue>,
}

impl MapValidationResult {
    /// Check if every translation passed
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Runs the markup validator over translation maps
pub struct ValidationService;

impl ValidationService {
    /// Validate every non-empty translation the way reinsertion would see it
    pub fn validate_map(translations: &TranslationMap) -> MapValidationResult {
        let mut result = MapValidationResult::default();

        for (original, translated) in translations.iter() {
            if translated.is_empty() {
                continue;
            }
            result.checked += 1;

            let candidate = literal_candidate(translated);
            if let ValidationResult::Invalid(reason) = TagValidator::validate(&candidate) {
                result.issues.push(MapIssue {
                    original: original.to_string(),
                    translated: translated.to_string(),
                    reason,
                });
            }
        }

        debug!(
            "Map validation: checked={}, issues={}",
            result.checked,
            result.issues.len()
        );

        result
    }
}
