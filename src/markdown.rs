//! Markdown source transforms for slide decks.
//!
//! This module strips internal link markers from Markdown link and image
//! targets while leaving fenced code blocks and inline code spans untouched.

mod code;
mod links;

pub use code::{CodeDetection, CodeRegions};
pub use links::{
    DEFAULT_MARKER_PATTERN, LinkMatch, LinkRewriter, MarkerPattern, rewrite_internal_links,
};
