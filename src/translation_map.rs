/*!
 * Translation maps: original text to translated text.
 *
 * On disk a map is a flat JSON object, one entry per original string, in the
 * order the strings appear in the script. An empty value, a `null`, and a
 * missing key all mean "no translation available".
 */

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::file_utils::FileManager;

/// Mapping from original strings to translations, kept in insertion order.
/// Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<String, Option<String>>",
    into = "IndexMap<String, String>"
)]
pub struct TranslationMap {
    entries: IndexMap<String, String>,
}

impl From<IndexMap<String, Option<String>>> for TranslationMap {
    fn from(raw: IndexMap<String, Option<String>>) -> Self {
        let entries = raw
            .into_iter()
            .map(|(original, translated)| (original, translated.unwrap_or_default()))
            .collect();
        Self { entries }
    }
}

impl From<TranslationMap> for IndexMap<String, String> {
    fn from(map: TranslationMap) -> Self {
        map.entries
    }
}

impl FromIterator<(String, String)> for TranslationMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl TranslationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a template with every key mapped to an empty string
    pub fn template_from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        keys.into_iter().map(|key| (key, String::new())).collect()
    }

    /// Translation for `original`, or `None` when absent or empty
    pub fn get(&self, original: &str) -> Option<&str> {
        self.entries
            .get(original)
            .map(String::as_str)
            .filter(|translated| !translated.is_empty())
    }

    /// Insert or update an entry. A new key goes last; an existing key keeps its position.
    pub fn insert(&mut self, original: impl Into<String>, translated: impl Into<String>) {
        self.entries.insert(original.into(), translated.into());
    }

    pub fn contains_key(&self, original: &str) -> bool {
        self.entries.contains_key(original)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries with a non-empty translation
    pub fn translated_count(&self) -> usize {
        self.entries.values().filter(|v| !v.is_empty()).count()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy non-empty translations from `existing` for keys this map already has.
    /// Keys only present in `existing` are dropped and this map's order is kept.
    /// Returns the number of translations carried over.
    pub fn merge_existing(&mut self, existing: &TranslationMap) -> usize {
        let mut carried = 0;
        for (original, translated) in self.entries.iter_mut() {
            if let Some(previous) = existing.get(original) {
                *translated = previous.to_string();
                carried += 1;
            }
        }
        carried
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse translation map")
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize translation map")
    }

    /// Load a map from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = FileManager::read_to_string(&path)?;
        Self::from_json_str(&content)
            .with_context(|| format!("Invalid translation map: {:?}", path.as_ref()))
    }

    /// Save the map as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json_string()?;
        FileManager::write_atomic(path, &json)
    }
}
