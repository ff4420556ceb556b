//! Slide deck reader for `.remark` Markdown sources.

mod config;
mod markdown;
mod reader;

pub use config::Config;
pub use markdown::{
    CodeDetection, CodeRegions, DEFAULT_MARKER_PATTERN, LinkMatch, LinkRewriter, MarkerPattern,
    rewrite_internal_links,
};
pub use reader::{
    DEFAULT_TEMPLATE, Document, FILE_EXTENSIONS, Metadata, Reader, ReaderRegistry, ReaderSettings,
    RemarkReader, normalize_newlines, split_header,
};
