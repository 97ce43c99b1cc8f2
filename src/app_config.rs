use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::AppError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Extension of the script files to process, without the dot
    #[serde(default = "default_script_extension")]
    pub script_extension: String,

    /// Where templates and filled-in maps live
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Keep translations from an existing template when extracting again
    #[serde(default = "default_true")]
    pub merge_existing: bool,

    /// Compute changes without writing script files
    #[serde(default)]
    pub dry_run: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Locations of translation-map files, relative to the project root
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Directory extracted templates are written to
    #[serde(default = "default_extract_dir")]
    pub extract_dir: String,

    /// Directory filled-in maps are read from
    #[serde(default = "default_apply_dir")]
    pub apply_dir: String,

    /// Suffix appended to the flat script name for templates
    #[serde(default = "default_template_suffix")]
    pub template_suffix: String,

    /// Suffix appended to the flat script name for filled-in maps
    #[serde(default = "default_translated_suffix")]
    pub translated_suffix: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            extract_dir: default_extract_dir(),
            apply_dir: default_apply_dir(),
            template_suffix: default_template_suffix(),
            translated_suffix: default_translated_suffix(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_script_extension() -> String {
    "rpy".to_string()
}

fn default_extract_dir() -> String {
    "translations".to_string()
}

fn default_apply_dir() -> String {
    "translations_out".to_string()
}

fn default_template_suffix() -> String {
    ".json".to_string()
}

fn default_translated_suffix() -> String {
    "_translated.json".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Save configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path.as_ref(), config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path.as_ref()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.script_extension.trim_start_matches('.').is_empty() {
            return Err(AppError::Config("Script extension must not be empty".to_string()));
        }

        if self.layout.extract_dir.is_empty() || self.layout.apply_dir.is_empty() {
            return Err(AppError::Config("Translation directories must not be empty".to_string()));
        }

        for suffix in [&self.layout.template_suffix, &self.layout.translated_suffix] {
            if !suffix.ends_with(".json") {
                return Err(AppError::Config(format!(
                    "Map file suffix must end with .json: {}",
                    suffix
                )));
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            script_extension: default_script_extension(),
            layout: LayoutConfig::default(),
            merge_existing: default_true(),
            dry_run: false,
            log_level: LogLevel::default(),
        }
    }
}
