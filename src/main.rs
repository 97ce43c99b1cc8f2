// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use rpytl::app_config::{self, Config};
use rpytl::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a translation-map template for every script under ROOT
    Extract {
        /// Project root to scan for scripts
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Overwrite existing templates instead of keeping their translations
        #[arg(short, long)]
        force: bool,
    },

    /// Put filled-in translations back into the scripts under ROOT
    Apply {
        /// Project root containing the scripts and the translated maps
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Report what would change without writing any script
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Validate the markup of every filled-in translation without writing anything
    Check {
        /// Project root containing the translated maps
        #[arg(value_name = "ROOT")]
        root: PathBuf,
    },

    /// Generate shell completions for rpytl
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// rpytl - Ren'Py translation extraction and safe reinsertion
///
/// Extracts dialogue strings from Ren'Py translation scripts into JSON maps
/// and puts validated translations back without breaking text tags.
#[derive(Parser, Debug)]
#[command(name = "rpytl")]
#[command(version)]
#[command(about = "Ren'Py translation extraction and safe reinsertion")]
#[command(long_about = "rpytl extracts translatable strings from Ren'Py scripts and reinserts translations.

EXAMPLES:
    rpytl extract .                  # Write templates to ./translations
    rpytl apply .                    # Reinsert maps from ./translations_out
    rpytl apply -n .                 # Show what would change
    rpytl check .                    # List translations with broken text tags
    rpytl completions bash > rpytl.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

    A translation that fails text tag validation is never written: the record
    keeps the original text instead.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Color and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌"),
            Level::Warn => ("1;33", "🚧"),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍"),
            Level::Trace => ("1;35", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, emoji) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Install the logger at the most verbose level and narrow it with
    // set_max_level once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "rpytl", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = load_config(&cli.config_path)?;
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    match cli.command {
        Commands::Extract { root, force } => {
            if force {
                config.merge_existing = false;
            }
            let summary = Controller::with_config(config)?.extract(&root)?;
            if summary.files_failed > 0 {
                return Err(anyhow!("{} script(s) could not be extracted", summary.files_failed));
            }
        }
        Commands::Apply { root, dry_run } => {
            config.dry_run |= dry_run;
            let summary = Controller::with_config(config)?.apply(&root)?;
            if summary.files_failed > 0 {
                return Err(anyhow!("{} map(s) could not be applied", summary.files_failed));
            }
        }
        Commands::Check { root } => {
            let summary = Controller::with_config(config)?.check(&root)?;
            if !summary.passed() {
                return Err(anyhow!(
                    "{} invalid translation(s), {} unreadable map(s)",
                    summary.issues,
                    summary.maps_failed
                ));
            }
            info!("All translations passed");
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Load the configuration, writing a default one when the file is missing
fn load_config(config_path: &str) -> Result<Config> {
    let config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    // Validate the configuration after loading
    config.validate().context("Configuration validation failed")?;
    Ok(config)
}
