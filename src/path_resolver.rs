/*!
 * Correspondence between script paths and flat translation-map file names.
 *
 * A script at `game/chapter.1/intro.rpy` (relative to the project root) has
 * the flat name `game__chapter_1__intro_rpy`: path components joined by `__`,
 * every `.` replaced by `_`. The encoding is lossy, so names are never decoded.
 * Instead the resolver encodes every discovered script and looks the map name
 * up in that index. Two scripts with the same flat name are reported as
 * ambiguous rather than guessed between.
 */

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::errors::PathError;

/// Flat name for a path relative to the project root
pub fn flat_name<P: AsRef<Path>>(relative: P) -> String {
    relative
        .as_ref()
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("__")
        .replace('.', "_")
}

/// Maps a translation-map file name back to the script it belongs to
pub trait PathResolver {
    fn resolve(&self, map_file_name: &str) -> Result<PathBuf, PathError>;
}

/// Resolver backed by an index of known script files
#[derive(Debug, Clone)]
pub struct IndexedPathResolver {
    suffix: String,
    index: HashMap<String, Vec<PathBuf>>,
}

impl IndexedPathResolver {
    /// Build the index from scripts found under `root`
    ///
    /// # Arguments
    /// * `root` - Project root the flat names are relative to
    /// * `scripts` - Script paths; paths outside `root` are encoded as given
    /// * `suffix` - Suffix map file names carry after the flat name
    pub fn new<P: AsRef<Path>>(root: P, scripts: &[PathBuf], suffix: &str) -> Self {
        let root = root.as_ref();
        let mut index: HashMap<String, Vec<PathBuf>> = HashMap::new();

        for script in scripts {
            let relative = script.strip_prefix(root).unwrap_or(script);
            index
                .entry(flat_name(relative))
                .or_default()
                .push(script.clone());
        }

        for candidates in index.values_mut() {
            candidates.sort();
        }

        debug!("Indexed {} script names", index.len());

        Self {
            suffix: suffix.to_string(),
            index,
        }
    }

    /// File name the map for `script` should have
    pub fn map_file_name<P: AsRef<Path>>(relative_script: P, suffix: &str) -> String {
        format!("{}{}", flat_name(relative_script), suffix)
    }
}

impl PathResolver for IndexedPathResolver {
    fn resolve(&self, map_file_name: &str) -> Result<PathBuf, PathError> {
        let name = map_file_name
            .strip_suffix(&self.suffix)
            .ok_or_else(|| PathError::BadSuffix {
                name: map_file_name.to_string(),
                suffix: self.suffix.clone(),
            })?;

        match self.index.get(name).map(Vec::as_slice) {
            Some([single]) => Ok(single.clone()),
            Some(candidates) if !candidates.is_empty() => Err(PathError::Ambiguous {
                name: name.to_string(),
                candidates: candidates.to_vec(),
            }),
            _ => Err(PathError::NotFound {
                name: name.to_string(),
            }),
        }
    }
}
