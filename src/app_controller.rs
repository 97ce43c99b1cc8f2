use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::extraction::Extractor;
use crate::file_utils::FileManager;
use crate::path_resolver::{IndexedPathResolver, PathResolver};
use crate::reinsertion::{LogSink, ReinsertStats, ReinsertionEngine};
use crate::translation_map::TranslationMap;
use crate::validation::ValidationService;

// @module: Application controller for extraction and reinsertion runs

/// Totals for an extraction run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractSummary {
    pub files_written: usize,
    /// Scripts without any translatable string
    pub files_empty: usize,
    pub files_failed: usize,
    pub keys: usize,
    /// Translations kept from templates that already existed
    pub carried_over: usize,
}

/// Totals for a reinsertion run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplySummary {
    pub files_updated: usize,
    pub files_unchanged: usize,
    /// Map files with no matching script
    pub files_skipped: usize,
    pub files_failed: usize,
    pub records: ReinsertStats,
}

/// Totals for a check run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckSummary {
    pub maps_checked: usize,
    pub maps_failed: usize,
    pub entries_checked: usize,
    pub issues: usize,
}

impl CheckSummary {
    pub fn passed(&self) -> bool {
        self.issues == 0 && self.maps_failed == 0
    }
}

/// Result of reinserting into a single script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Whether the new content differs from the old
    pub changed: bool,
    pub stats: ReinsertStats,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Draw progress bars
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            show_progress: true,
        })
    }

    /// Enable or disable progress bars
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Write a translation-map template for every script under `root`
    pub fn extract(&self, root: &Path) -> Result<ExtractSummary> {
        let scripts = self.discover_scripts(root)?;
        let extract_dir = root.join(&self.config.layout.extract_dir);
        info!("Extracting {} script(s) into {:?}", scripts.len(), extract_dir);

        let mut summary = ExtractSummary::default();
        let progress = self.progress_bar(scripts.len(), "scripts");

        for script in &scripts {
            progress.set_message(display_name(script));

            let relative = script.strip_prefix(root).unwrap_or(script);
            let name =
                IndexedPathResolver::map_file_name(relative, &self.config.layout.template_suffix);
            let output = extract_dir.join(name);

            match self.extract_file(script, &output) {
                Ok(None) => summary.files_empty += 1,
                Ok(Some((keys, carried))) => {
                    summary.files_written += 1;
                    summary.keys += keys;
                    summary.carried_over += carried;
                }
                Err(e) => {
                    error!("Failed to extract {:?}: {:#}", script, e);
                    summary.files_failed += 1;
                }
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
        info!(
            "Extraction done: {} written, {} without strings, {} failed, {} keys ({} translations kept)",
            summary.files_written,
            summary.files_empty,
            summary.files_failed,
            summary.keys,
            summary.carried_over
        );
        Ok(summary)
    }

    /// Extract one script. Returns `None` when the script has nothing to translate,
    /// otherwise the key count and the number of translations carried over.
    fn extract_file(&self, script: &Path, output: &Path) -> Result<Option<(usize, usize)>> {
        let content = FileManager::read_to_string(script)?;
        let mut template = Extractor::extract_template(&content);

        if template.is_empty() {
            debug!("No translatable strings in {:?}", script);
            return Ok(None);
        }

        let mut carried = 0;
        if self.config.merge_existing && FileManager::file_exists(output) {
            match TranslationMap::load(output) {
                Ok(existing) => carried = template.merge_existing(&existing),
                Err(e) => warn!("Ignoring unreadable template {:?}: {:#}", output, e),
            }
        }

        template.save(output)?;
        debug!("Wrote {} keys to {:?}", template.len(), output);
        Ok(Some((template.len(), carried)))
    }

    /// Reinsert every filled-in translation map found for scripts under `root`
    pub fn apply(&self, root: &Path) -> Result<ApplySummary> {
        let maps = self.discover_maps(root)?;
        let scripts = self.discover_scripts(root)?;
        let resolver =
            IndexedPathResolver::new(root, &scripts, &self.config.layout.translated_suffix);
        self.apply_with_resolver(&maps, &resolver)
    }

    /// Reinsert the given map files, resolving scripts through `resolver`
    pub fn apply_with_resolver<R: PathResolver + ?Sized>(
        &self,
        maps: &[PathBuf],
        resolver: &R,
    ) -> Result<ApplySummary> {
        info!("Applying {} translation map(s)", maps.len());
        if self.config.dry_run {
            info!("Dry run: no script will be written");
        }

        let mut summary = ApplySummary::default();
        let progress = self.progress_bar(maps.len(), "maps");

        for map_path in maps {
            let file_name = display_name(map_path);
            progress.set_message(file_name.clone());

            let script = match resolver.resolve(&file_name) {
                Ok(script) if FileManager::file_exists(&script) => script,
                Ok(script) => {
                    warn!("Script does not exist: {:?}", script);
                    summary.files_skipped += 1;
                    progress.inc(1);
                    continue;
                }
                Err(e) => {
                    warn!("Skipping {}: {}", file_name, e);
                    summary.files_skipped += 1;
                    progress.inc(1);
                    continue;
                }
            };

            let outcome =
                TranslationMap::load(map_path).and_then(|map| self.apply_file(&script, &map));
            match outcome {
                Ok(outcome) => {
                    summary.records.add(&outcome.stats);
                    if outcome.changed {
                        summary.files_updated += 1;
                        info!("Updated: {:?}", script);
                    } else {
                        summary.files_unchanged += 1;
                        debug!("Unchanged: {:?}", script);
                    }
                }
                Err(e) => {
                    error!("Failed to apply {}: {:#}", file_name, e);
                    summary.files_failed += 1;
                }
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
        info!(
            "Apply done: {} updated, {} unchanged, {} skipped, {} failed; records: {} translated, {} fallback, {} untranslated",
            summary.files_updated,
            summary.files_unchanged,
            summary.files_skipped,
            summary.files_failed,
            summary.records.translated,
            summary.records.fallbacks,
            summary.records.untranslated
        );
        Ok(summary)
    }

    /// Reinsert `translations` into one script. The whole new content is
    /// computed before anything is written, and unchanged files are left alone.
    pub fn apply_file(&self, script: &Path, translations: &TranslationMap) -> Result<FileOutcome> {
        let content = FileManager::read_to_string(script)?;
        let report = ReinsertionEngine::reinsert_report(&content, translations, &mut LogSink);

        if report.stats.records == 0 {
            debug!("No translation records in {:?}", script);
        }

        let changed = report.text != content;
        if changed && !self.config.dry_run {
            FileManager::write_atomic(script, &report.text)?;
        }

        Ok(FileOutcome {
            changed,
            stats: report.stats,
        })
    }

    /// Validate every filled-in map without touching any script
    pub fn check(&self, root: &Path) -> Result<CheckSummary> {
        let maps = self.discover_maps(root)?;
        let mut summary = CheckSummary::default();

        for map_path in &maps {
            let file_name = display_name(map_path);
            let map = match TranslationMap::load(map_path) {
                Ok(map) => map,
                Err(e) => {
                    error!("Failed to read {}: {:#}", file_name, e);
                    summary.maps_failed += 1;
                    continue;
                }
            };

            let result = ValidationService::validate_map(&map);
            summary.maps_checked += 1;
            summary.entries_checked += result.checked;
            summary.issues += result.issues.len();

            for issue in &result.issues {
                warn!("{}: {}", file_name, issue);
            }
        }

        info!(
            "Check done: {} map(s), {} translation(s), {} invalid, {} unreadable",
            summary.maps_checked, summary.entries_checked, summary.issues, summary.maps_failed
        );
        Ok(summary)
    }

    fn discover_scripts(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !FileManager::dir_exists(root) {
            return Err(anyhow!("Project directory does not exist: {:?}", root));
        }
        FileManager::find_files(root, &self.config.script_extension)
    }

    fn discover_maps(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let map_dir = root.join(&self.config.layout.apply_dir);
        if !FileManager::dir_exists(&map_dir) {
            return Err(anyhow!("Translation directory does not exist: {:?}", map_dir));
        }
        FileManager::find_files_with_suffix(&map_dir, &self.config.layout.translated_suffix)
    }

    fn progress_bar(&self, len: usize, unit: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len as u64);
        let template = format!(
            "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}",
            unit
        );
        let style = ProgressStyle::default_bar()
            .template(&template)
            .or_else(|_| {
                ProgressStyle::default_bar()
                    .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}")
            })
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
