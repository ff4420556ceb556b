//! Code block and code span detection.

use pulldown_cmark::{Event, Parser, Tag};
use std::ops::Range;

/// Strategy for deciding whether a link match sits inside code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeDetection {
    /// Parses the document and skips code blocks and inline code spans.
    #[default]
    Scanner,
    /// Counts backticks before the match; an odd count means inside code.
    ///
    /// Misjudges documents mixing fenced blocks with inline spans, kept for
    /// sites that depend on the old behavior.
    BacktickParity,
}

impl CodeDetection {
    /// Prepares a guard answering code membership queries for `text`.
    pub(crate) fn guard(self, text: &str) -> CodeGuard<'_> {
        match self {
            Self::Scanner => CodeGuard::Regions(CodeRegions::scan(text)),
            Self::BacktickParity => CodeGuard::Parity(text),
        }
    }
}

pub(crate) enum CodeGuard<'t> {
    Regions(CodeRegions),
    Parity(&'t str),
}

impl CodeGuard<'_> {
    pub(crate) fn contains(&self, offset: usize) -> bool {
        match self {
            Self::Regions(regions) => regions.contains(offset),
            Self::Parity(text) => {
                let before = &text.as_bytes()[..offset.min(text.len())];
                before.iter().filter(|&&b| b == b'`').count() % 2 == 1
            }
        }
    }
}

/// Byte ranges of a document covered by code blocks or inline code spans.
///
/// Ranges come from the source offsets pulldown-cmark reports for code
/// events, so they are in document order and never overlap. A code block
/// (fenced or indented) covers its whole source including fence lines; an
/// unclosed fence runs to the end of the document. An inline span covers
/// its opening and closing backtick runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeRegions {
    ranges: Vec<Range<usize>>,
}

impl CodeRegions {
    /// Parses text as CommonMark and collects code block and code span ranges.
    pub fn scan(text: &str) -> Self {
        let ranges = Parser::new(text)
            .into_offset_iter()
            .filter_map(|(event, range)| match event {
                Event::Start(Tag::CodeBlock(_)) | Event::Code(_) => Some(range),
                _ => None,
            })
            .collect();

        Self { ranges }
    }

    /// Returns true if the byte offset falls inside any code region.
    pub fn contains(&self, offset: usize) -> bool {
        let idx = self.ranges.partition_point(|r| r.end <= offset);
        self.ranges
            .get(idx)
            .is_some_and(|r| r.start <= offset && offset < r.end)
    }

    /// Code regions in document order.
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }
}
