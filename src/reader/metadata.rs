//! Metadata header parsing for Markdown sources.

use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::warn;

/// Document metadata keyed by lowercased field name.
pub type Metadata = BTreeMap<String, String>;

/// Splits a source file into its metadata header and body.
///
/// The text is trimmed first. A header exists only when the first line is a
/// `Key: value` field; it then runs to the first blank line and the body
/// starts right after that line. Indented lines (four spaces or a tab)
/// continue the previous value. A header with no blank line after it
/// consumes the whole text and leaves an empty body.
///
/// # Arguments
///
/// * `text`: Source text with LF line endings
///
/// # Returns
///
/// Parsed metadata and the body slice
pub fn split_header(text: &str) -> (Metadata, &str) {
    let text = text.trim();

    let first_line = text.lines().next().unwrap_or("");
    if parse_field(first_line).is_none() {
        return (Metadata::new(), text);
    }

    let (header, body) = match blank_line(text) {
        Some((header_end, body_start)) => (&text[..header_end], &text[body_start..]),
        None => (text, ""),
    };

    (parse_header(header), body)
}

/// Converts CRLF and lone CR line endings to LF.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Locates the first whitespace-only line.
///
/// Returns the offset where that line starts and the offset just past it.
fn blank_line(text: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            return Some((offset, offset + line.len()));
        }
        offset += line.len();
    }
    None
}

fn parse_header(header: &str) -> Metadata {
    let mut metadata = Metadata::new();
    let mut last_key: Option<String> = None;

    for line in header.lines() {
        if is_continuation(line) {
            match last_key.as_ref().and_then(|key| metadata.get_mut(key)) {
                Some(value) => {
                    value.push('\n');
                    value.push_str(line.trim());
                }
                None => warn!(line, "Skipping continuation line without a field"),
            }
            continue;
        }

        match parse_field(line) {
            Some((key, value)) => {
                metadata.insert(key.clone(), value);
                last_key = Some(key);
            }
            None => {
                warn!(line, "Skipping malformed metadata line");
                last_key = None;
            }
        }
    }

    metadata
}

/// Parses `Key: value` with up to three leading spaces.
fn parse_field(line: &str) -> Option<(String, String)> {
    let indent = line.bytes().take_while(|&b| b == b' ').count();
    if indent > 3 {
        return None;
    }

    let (key, value) = line[indent..].split_once(':')?;
    let valid_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid_key {
        return None;
    }

    Some((key.to_ascii_lowercase(), value.trim().to_string()))
}

fn is_continuation(line: &str) -> bool {
    line.starts_with("    ") || line.starts_with('\t')
}
