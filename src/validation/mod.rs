/*!
 * Validation module for translated fragments.
 *
 * # Architecture
 *
 * - `markup`: Validates inline text tag balance in a single fragment
 * - `service`: Runs the markup validator over whole translation maps
 */

pub mod markup;
pub mod service;

// Re-export main types
pub use markup::{MarkupTag, TagValidator, ValidationResult};
pub use service::{MapIssue, MapValidationResult, ValidationService};
