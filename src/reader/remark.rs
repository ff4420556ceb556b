//! Reader for `.remark` Markdown slide decks.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use super::metadata::{normalize_newlines, split_header};
use super::{Document, Reader, ReaderRegistry};
use crate::markdown::{CodeDetection, LinkRewriter, MarkerPattern};

/// Extensions claimed by [`RemarkReader`].
pub const FILE_EXTENSIONS: &[&str] = &["remark"];

/// Template assigned to decks whose metadata names none.
pub const DEFAULT_TEMPLATE: &str = "remark";

/// Options for [`RemarkReader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderSettings {
    pub marker_pattern: MarkerPattern,
    pub default_template: String,
    pub code_detection: CodeDetection,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            marker_pattern: MarkerPattern::default(),
            default_template: DEFAULT_TEMPLATE.to_string(),
            code_detection: CodeDetection::default(),
        }
    }
}

/// Reads slide decks as raw Markdown for client-side rendering.
///
/// The deck body is kept as Markdown rather than rendered to HTML, with the
/// metadata header removed and internal link markers stripped so the slide
/// library sees plain site-relative paths.
#[derive(Debug, Clone)]
pub struct RemarkReader {
    rewriter: LinkRewriter,
    default_template: String,
}

impl RemarkReader {
    /// Creates reader from settings.
    ///
    /// # Errors
    ///
    /// Returns error if the marker pattern cannot be compiled into the link pattern.
    pub fn new(settings: ReaderSettings) -> Result<Self> {
        let rewriter = LinkRewriter::new(&settings.marker_pattern)
            .context("Failed to create link rewriter")?
            .with_code_detection(settings.code_detection);

        Ok(Self {
            rewriter,
            default_template: settings.default_template,
        })
    }

    /// Builds document from in-memory source text.
    pub fn read_str(&self, source: &str) -> Document {
        let source = normalize_newlines(source);
        let (mut metadata, body) = split_header(&source);

        metadata
            .entry("template".to_string())
            .or_insert_with(|| self.default_template.clone());

        Document {
            content: self.rewriter.rewrite(body),
            metadata,
        }
    }

    /// Claims the extensions this reader reports, [`FILE_EXTENSIONS`], in `registry`.
    pub fn register(self, registry: &mut ReaderRegistry) {
        let replaced = registry.register_reader(Arc::new(self));
        if replaced > 0 {
            debug!(replaced, "Slide deck reader took over registered extensions");
        }
    }
}

impl Reader for RemarkReader {
    fn file_extensions(&self) -> &[&str] {
        FILE_EXTENSIONS
    }

    fn read(&self, path: &Path) -> Result<Document> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read slide deck: {}", path.display()))?;

        let document = self.read_str(&source);
        debug!(
            path = %path.display(),
            template = document.template().unwrap_or_default(),
            "Read slide deck"
        );

        Ok(document)
    }
}
