//! Internal link rewriting for Markdown link and image syntax.

use anyhow::{Context, Result, bail};
use regex::{Captures, Regex};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use tracing::debug;

use super::code::CodeDetection;

/// Marker recognising `{static}`, `{filename}`, `|filename|` and friends.
///
/// The `what` group captures the marker payload (`static`, `filename`).
pub const DEFAULT_MARKER_PATTERN: &str = r"[{|](?P<what>.*?)[|}]";

/// Regex fragment recognising the internal link marker at the start of a link target.
///
/// The fragment is spliced into the link pattern as a non-capturing group,
/// so alternations inside it stay local. It may name a `what` group to
/// expose the marker payload; it must not reuse the names `is_image`,
/// `link`, `path` or `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPattern(String);

impl MarkerPattern {
    /// Creates marker pattern from regex fragment.
    ///
    /// # Errors
    ///
    /// Returns error if fragment is empty or is not a valid regex.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            bail!("Marker pattern must not be empty");
        }

        Regex::new(&pattern).with_context(|| format!("Invalid marker pattern: {}", pattern))?;

        Ok(Self(pattern))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MarkerPattern {
    fn default() -> Self {
        Self(DEFAULT_MARKER_PATTERN.to_string())
    }
}

impl FromStr for MarkerPattern {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for MarkerPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One internal link or image found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    /// Byte range of the whole `[text](target)` syntax, including any `!`
    pub span: Range<usize>,
    pub is_image: bool,
    /// Display text, or alt text for images
    pub link: String,
    /// Raw target, marker included
    pub path: String,
    /// Target with the marker removed
    pub value: String,
    /// Marker payload when the pattern captures one
    pub what: Option<String>,
}

impl LinkMatch {
    fn from_captures(caps: &Captures<'_>) -> Self {
        let group = |name: &str| caps.name(name).map_or("", |m| m.as_str());

        Self {
            span: caps.get(0).map_or(0..0, |m| m.range()),
            is_image: !group("is_image").is_empty(),
            link: group("link").to_string(),
            path: group("path").to_string(),
            value: group("value").to_string(),
            what: caps.name("what").map(|m| m.as_str().to_string()),
        }
    }

    /// Markdown for this link with the marker dropped.
    pub fn replacement(&self) -> String {
        let bang = if self.is_image { "!" } else { "" };
        format!("{}[{}]({})", bang, self.link, self.value)
    }
}

/// Strips internal link markers from Markdown link and image targets.
///
/// Transforms `[a file]({static}/file.pdf)` into `[a file](/file.pdf)` and
/// `![](|filename|/img.png)` into `![](/img.png)`. Links without a marker,
/// marker text outside link syntax, and anything inside code are left
/// untouched. Display text ends at the first `]` and brackets do not nest.
#[derive(Debug, Clone)]
pub struct LinkRewriter {
    regex: Regex,
    code_detection: CodeDetection,
}

impl LinkRewriter {
    /// Creates rewriter for the given marker.
    ///
    /// # Errors
    ///
    /// Returns error if the marker fragment cannot be combined into the link
    /// pattern, for instance when it reuses a reserved group name.
    pub fn new(marker: &MarkerPattern) -> Result<Self> {
        let pattern = format!(
            r"(?P<is_image>!?)\[(?P<link>[^\]\n]*?)\]\((?P<path>(?:{})(?P<value>.*?))\)",
            marker.as_str()
        );
        let regex = Regex::new(&pattern)
            .with_context(|| format!("Failed to build link pattern for marker: {}", marker))?;

        Ok(Self {
            regex,
            code_detection: CodeDetection::default(),
        })
    }

    /// Replaces the code guard used to skip links inside code.
    pub fn with_code_detection(mut self, code_detection: CodeDetection) -> Self {
        self.code_detection = code_detection;
        self
    }

    /// Finds internal links outside code, in document order.
    pub fn matches(&self, text: &str) -> Vec<LinkMatch> {
        let guard = self.code_detection.guard(text);

        self.regex
            .captures_iter(text)
            .filter(|caps| !guard.contains(caps.get(0).map_or(0, |m| m.start())))
            .map(|caps| LinkMatch::from_captures(&caps))
            .collect()
    }

    /// Returns text with internal link markers removed.
    ///
    /// Text without matches is returned byte for byte. Only the leading
    /// marker of each target is removed, so rewriting again is a no-op for
    /// targets carrying a single marker.
    pub fn rewrite(&self, text: &str) -> String {
        let guard = self.code_detection.guard(text);

        self.regex
            .replace_all(text, |caps: &Captures<'_>| {
                let start = caps.get(0).map_or(0, |m| m.start());
                if guard.contains(start) {
                    return caps[0].to_string();
                }

                let found = LinkMatch::from_captures(caps);
                debug!(path = %found.path, value = %found.value, "Rewrote internal link");
                found.replacement()
            })
            .into_owned()
    }
}

/// Rewrites internal links in text using the given marker.
///
/// Convenience for one-off calls; build a [`LinkRewriter`] once when
/// rewriting many documents.
///
/// # Errors
///
/// Returns error if the marker cannot be compiled into the link pattern.
pub fn rewrite_internal_links(text: &str, marker: &MarkerPattern) -> Result<String> {
    Ok(LinkRewriter::new(marker)?.rewrite(text))
}
