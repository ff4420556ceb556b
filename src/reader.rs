//! Content readers producing raw Markdown documents with metadata.
//!
//! Readers are looked up by file extension through [`ReaderRegistry`].
//! [`RemarkReader`] claims `.remark` slide decks, keeps their Markdown
//! source instead of rendering it, and strips internal link markers.

mod metadata;
mod registry;
mod remark;

pub use metadata::{Metadata, normalize_newlines, split_header};
pub use registry::{Reader, ReaderRegistry};
pub use remark::{DEFAULT_TEMPLATE, FILE_EXTENSIONS, ReaderSettings, RemarkReader};

/// Document body and metadata produced by a reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub content: String,
    pub metadata: Metadata,
}

impl Document {
    /// Template named in metadata.
    pub fn template(&self) -> Option<&str> {
        self.metadata.get("template").map(String::as_str)
    }

    /// Serializes document back into header plus body form.
    ///
    /// Metadata fields are written as `key: value` lines with multi-line
    /// values continued on indented lines, followed by a blank line and the
    /// content. Without metadata only the content is written. The output
    /// reads back into an equal document.
    pub fn to_source(&self) -> String {
        if self.metadata.is_empty() {
            return self.content.clone();
        }

        let mut source = String::new();
        for (key, value) in &self.metadata {
            source.push_str(key);
            source.push(':');
            for (idx, line) in value.lines().enumerate() {
                source.push_str(if idx == 0 { " " } else { "\n    " });
                source.push_str(line);
            }
            source.push('\n');
        }
        source.push('\n');
        source.push_str(&self.content);
        source
    }
}
