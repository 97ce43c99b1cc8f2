/*!
 * Extraction of translatable strings from script files.
 *
 * Two kinds of lines produce keys:
 * - commented narrator originals inside dialogue blocks: `# "Hello."`
 * - `old "..."` lines inside string blocks
 *
 * Keys are the raw literal contents, exactly as the reinsertion pass will see
 * them, so a filled-in template maps straight back onto the file.
 */

use std::collections::HashSet;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::reinsertion::record::literal_at;
use crate::translation_map::TranslationMap;

/// Commented original, up to and including the opening quote
static COMMENTED_ORIGINAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*#\s*""#).expect("Invalid commented original regex"));

/// `old "..."` string line, up to and including the opening quote
static OLD_STRING_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*old\s+""#).expect("Invalid old string regex"));

/// Pulls translation keys out of script text
pub struct Extractor;

impl Extractor {
    /// Extract keys in file order, without duplicates
    pub fn extract(text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut keys = Vec::new();

        for line in text.lines() {
            if line.trim_start().starts_with("translate") {
                continue;
            }

            let prefix = COMMENTED_ORIGINAL_REGEX
                .find(line)
                .or_else(|| OLD_STRING_REGEX.find(line));
            let Some(prefix) = prefix else {
                continue;
            };

            if let Some(range) = literal_at(line, prefix.end() - 1) {
                let key = &line[range];
                if seen.insert(key) {
                    keys.push(key.to_string());
                }
            }
        }

        debug!("Extracted {} keys", keys.len());
        keys
    }

    /// Extract keys into a template map with empty translations
    pub fn extract_template(text: &str) -> TranslationMap {
        TranslationMap::template_from_keys(Self::extract(text))
    }
}
