/*!
 * Inline markup validation for script fragments.
 *
 * Fragments carry `{name ...}` / `{/name}` text tags. This module checks that
 * every container tag is closed in LIFO order, that closing tags match what
 * is open, and that no unknown tag names appear. Tag names are compared
 * case-insensitively; the raw braced text is kept for diagnostics.
 */

use std::collections::HashSet;

use log::trace;
use once_cell::sync::Lazy;

use crate::errors::TagSyntaxError;

/// Tags that never need a matching close
static SELF_CLOSING_TAGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "br", "w", "p", "nw", "fast", "slow", "done", "wait", "nobr", "alt", "art", "rt", "rb",
        "vbar", "^",
    ]
    .into_iter()
    .collect()
});

/// Tags that must be opened and later closed
static CONTAINER_TAGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "q", "b", "i", "u", "a", "font", "color", "size", "alpha", "k", "cps", "s", "plain",
        "noalt",
    ]
    .into_iter()
    .collect()
});

/// Parametrized forms that behave as self-closing whatever follows the prefix
const SELF_CLOSING_PREFIXES: [&str; 2] = ["w=", "size="];

/// A single tag found during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupTag {
    /// Lower-cased first token of the tag body, without the leading `/`
    pub name: String,
    /// Whether the tag body started with `/`
    pub is_closing: bool,
    /// The braced text exactly as written
    pub raw: String,
}

impl MarkupTag {
    /// Parse the body of a braced tag. `raw` includes the braces.
    fn parse(raw: &str) -> Self {
        let body = raw[1..raw.len() - 1].trim();
        let (is_closing, rest) = match body.strip_prefix('/') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, body),
        };
        let name = rest
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();

        Self {
            name,
            is_closing,
            raw: raw.to_string(),
        }
    }

    fn is_self_closing(&self) -> bool {
        SELF_CLOSING_TAGS.contains(self.name.as_str())
            || SELF_CLOSING_PREFIXES
                .iter()
                .any(|prefix| self.name.starts_with(prefix))
    }

    fn is_container(&self) -> bool {
        CONTAINER_TAGS.contains(self.name.as_str())
    }
}

/// Outcome of validating one fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Markup is balanced and every tag is known
    Valid,
    /// The first problem found
    Invalid(TagSyntaxError),
}

impl ValidationResult {
    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Reason string for a failed validation
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::Invalid(error) => Some(error.to_string()),
        }
    }

    /// Convert into a `Result`, for callers that want `?`
    pub fn into_result(self) -> Result<(), TagSyntaxError> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(error) => Err(error),
        }
    }
}

/// Stack-based validator for inline text tags
pub struct TagValidator;

impl TagValidator {
    /// Validate the markup of a fragment
    ///
    /// # Arguments
    /// * `text` - The fragment to scan
    ///
    /// # Returns
    /// * `ValidationResult::Valid`, or `Invalid` with the first problem found
    pub fn validate(text: &str) -> ValidationResult {
        match Self::scan(text) {
            Ok(()) => ValidationResult::Valid,
            Err(error) => {
                trace!("Markup rejected ({}): {}", error, text);
                ValidationResult::Invalid(error)
            }
        }
    }

    fn scan(text: &str) -> Result<(), TagSyntaxError> {
        let bytes = text.as_bytes();
        let mut stack: Vec<String> = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            if bytes[pos] != b'{' {
                pos += 1;
                continue;
            }

            // `{{` is a literal brace
            if bytes.get(pos + 1) == Some(&b'{') {
                pos += 2;
                continue;
            }

            let end = text[pos + 1..]
                .find('}')
                .map(|offset| pos + 1 + offset)
                .ok_or(TagSyntaxError::Unterminated)?;

            let tag = MarkupTag::parse(&text[pos..=end]);

            if tag.is_closing {
                let expected = stack.pop().ok_or_else(|| TagSyntaxError::ExtraneousClosing {
                    raw: tag.raw.clone(),
                })?;
                if expected != tag.name {
                    return Err(TagSyntaxError::Mismatched {
                        expected,
                        found: tag.name,
                    });
                }
            } else if tag.is_self_closing() {
                // no stack effect
            } else if tag.is_container() {
                stack.push(tag.name);
            } else {
                return Err(TagSyntaxError::Unknown { raw: tag.raw });
            }

            pos = end + 1;
        }

        if stack.is_empty() {
            Ok(())
        } else {
            stack.reverse();
            Err(TagSyntaxError::Unclosed { names: stack })
        }
    }
}
