/*!
 * Record scanning for translation script files.
 *
 * A dialogue record is four lines:
 *
 * ```text
 * # game/script.rpy:12
 * translate french start_a170b500:
 *
 *     # "Hello there."
 *     "Bonjour."
 * ```
 *
 * A string record is an `old "..."` line followed by a `new "..."` line inside
 * a `translate <lang> strings:` block. Blank lines are allowed between the
 * header and the original line and between the original and translated lines.
 *
 * The scanner only reports byte spans; it never copies or rewrites the text.
 */

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

/// Block header: `translate <anything>:`
static HEADER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^translate\s.*:\s*$").expect("Invalid header regex"));

/// Commented original line, up to and including the opening quote
static ORIGINAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*#\s*""#).expect("Invalid original line regex"));

/// Translated dialogue line, up to and including the opening quote
static TRANSLATED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*""#).expect("Invalid translated line regex"));

/// `old "..."` line of a string block
static OLD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*old\s+""#).expect("Invalid old string regex"));

/// `new "..."` line of a string block
static NEW_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*new\s+""#).expect("Invalid new string regex"));

/// Which layout a record was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Comment, `translate` header, commented original, translated line
    Dialogue,
    /// `old` / `new` pair of a strings block
    StringEntry,
}

/// One original/translated pair located in a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRecord<'a> {
    pub kind: RecordKind,
    /// Leading comment line, without its line terminator
    pub comment: Option<&'a str>,
    /// Block header line, without its line terminator
    pub header: Option<&'a str>,
    /// Content of the original literal, the translation map key
    pub original_text: &'a str,
    /// Content of the translated literal currently in the file
    pub translated_text: &'a str,
    /// Byte span of `original_text` in the file
    pub original_span: Range<usize>,
    /// Byte span of `translated_text` in the file
    pub translated_span: Range<usize>,
    /// 1-based line number of the translated literal
    pub line: usize,
}

#[derive(Debug, Clone, Copy)]
struct Line {
    start: usize,
    /// End of content, excluding `\n` and a preceding `\r`
    end: usize,
}

/// Find the content of a double-quoted literal whose opening quote is at
/// `quote` in `line`. Backslash escapes are honored. Returns the content range
/// relative to `line`.
pub(crate) fn literal_at(line: &str, quote: usize) -> Option<Range<usize>> {
    let bytes = line.as_bytes();
    if bytes.get(quote) != Some(&b'"') {
        return None;
    }

    let start = quote + 1;
    let mut pos = start;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' => return Some(start..pos),
            _ => pos += 1,
        }
    }
    None
}

/// Turn a translation into text that can sit between the quotes of a
/// one-line literal. `"` becomes `'`, line breaks become `\n` escapes, and an
/// odd run of trailing backslashes gets one more so the closing quote is not
/// escaped.
pub fn literal_candidate(translated: &str) -> String {
    let mut candidate = translated
        .replace('"', "'")
        .replace("\r\n", "\\n")
        .replace(['\n', '\r'], "\\n");

    let trailing = candidate.bytes().rev().take_while(|&b| b == b'\\').count();
    if trailing % 2 == 1 {
        candidate.push('\\');
    }
    candidate
}

/// Find the literal right after a regex prefix that ends with the opening quote
fn literal_after(regex: &Regex, line: &str) -> Option<Range<usize>> {
    let prefix = regex.find(line)?;
    literal_at(line, prefix.end() - 1)
}

/// Iterator over the records of a file, in file order
pub struct RecordScanner<'a> {
    text: &'a str,
    lines: Vec<Line>,
    next: usize,
}

impl<'a> RecordScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;
        for raw in text.split_inclusive('\n') {
            let content = raw.strip_suffix('\n').unwrap_or(raw);
            let content = content.strip_suffix('\r').unwrap_or(content);
            lines.push(Line {
                start,
                end: start + content.len(),
            });
            start += raw.len();
        }

        Self {
            text,
            lines,
            next: 0,
        }
    }

    fn content(&self, index: usize) -> &'a str {
        let line = self.lines[index];
        &self.text[line.start..line.end]
    }

    /// Index of the first non-blank line at or after `index`
    fn skip_blank(&self, mut index: usize) -> Option<usize> {
        while index < self.lines.len() {
            if !self.content(index).trim().is_empty() {
                return Some(index);
            }
            index += 1;
        }
        None
    }

    /// Absolute span of a literal found on line `index`
    fn span(&self, index: usize, relative: Range<usize>) -> Range<usize> {
        let base = self.lines[index].start;
        base + relative.start..base + relative.end
    }

    fn slice(&self, span: &Range<usize>) -> &'a str {
        &self.text[span.clone()]
    }

    /// Try to match a dialogue record starting at line `index`.
    /// Returns the record and the index of its last line.
    fn match_dialogue(&self, index: usize) -> Option<(TranslationRecord<'a>, usize)> {
        let comment = self.content(index);
        if !comment.starts_with('#') {
            return None;
        }

        let header_index = index + 1;
        if header_index >= self.lines.len() {
            return None;
        }
        let header = self.content(header_index);
        if !HEADER_REGEX.is_match(header) {
            return None;
        }

        let original_index = self.skip_blank(header_index + 1)?;
        let original = literal_after(&ORIGINAL_REGEX, self.content(original_index))?;

        let translated_index = self.skip_blank(original_index + 1)?;
        let translated = literal_after(&TRANSLATED_REGEX, self.content(translated_index))?;

        let original_span = self.span(original_index, original);
        let translated_span = self.span(translated_index, translated);

        let record = TranslationRecord {
            kind: RecordKind::Dialogue,
            comment: Some(comment),
            header: Some(header),
            original_text: self.slice(&original_span),
            translated_text: self.slice(&translated_span),
            original_span,
            translated_span,
            line: translated_index + 1,
        };
        Some((record, translated_index))
    }

    /// Try to match an `old`/`new` pair starting at line `index`
    fn match_string_entry(&self, index: usize) -> Option<(TranslationRecord<'a>, usize)> {
        let old = literal_after(&OLD_REGEX, self.content(index))?;

        let new_index = self.skip_blank(index + 1)?;
        let new = literal_after(&NEW_REGEX, self.content(new_index))?;

        let original_span = self.span(index, old);
        let translated_span = self.span(new_index, new);

        let record = TranslationRecord {
            kind: RecordKind::StringEntry,
            comment: None,
            header: None,
            original_text: self.slice(&original_span),
            translated_text: self.slice(&translated_span),
            original_span,
            translated_span,
            line: new_index + 1,
        };
        Some((record, new_index))
    }
}

impl<'a> Iterator for RecordScanner<'a> {
    type Item = TranslationRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.lines.len() {
            let index = self.next;
            let found = self
                .match_dialogue(index)
                .or_else(|| self.match_string_entry(index));

            match found {
                Some((record, last)) => {
                    self.next = last + 1;
                    return Some(record);
                }
                None => self.next += 1,
            }
        }
        None
    }
}
