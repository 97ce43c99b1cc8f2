/*!
 * # rpytl - Ren'Py translation extraction and safe reinsertion
 *
 * A Rust library for moving dialogue strings out of Ren'Py translation
 * scripts and putting validated translations back in.
 *
 * ## Features
 *
 * - Extract translatable strings into flat JSON translation maps
 * - Validate inline text tags (`{b}`, `{i}`, `{w}`, ...) in translations
 * - Reinsert translations, replacing only the translated literal of each
 *   record and leaving every other byte of the file untouched
 * - Fall back to the original text when a translation has broken markup
 * - Deterministic mapping between script paths and map file names
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `validation`: Inline markup validation:
 *   - `validation::markup`: Stack-based tag validator
 *   - `validation::service`: Whole-map validation
 * - `reinsertion`: Translation reinsertion:
 *   - `reinsertion::record`: Record scanner
 *   - `reinsertion::engine`: Substitution pass and diagnostics
 * - `extraction`: Translation-map templates from script files
 * - `translation_map`: Translation map type and JSON persistence
 * - `path_resolver`: Script path / map file name correspondence
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod validation;
pub mod reinsertion;
pub mod extraction;
pub mod translation_map;
pub mod path_resolver;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use extraction::Extractor;
pub use reinsertion::{ReinsertionEngine, TranslationRecord};
pub use translation_map::TranslationMap;
pub use validation::{TagValidator, ValidationResult};
pub use errors::{AppError, PathError, TagSyntaxError};
