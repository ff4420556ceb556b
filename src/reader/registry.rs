//! Reader dispatch by file extension.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use super::Document;

/// Reads one kind of source file into a [`Document`].
pub trait Reader: Send + Sync {
    /// Extensions this reader claims, without the leading dot.
    fn file_extensions(&self) -> &[&str];

    /// Reads the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or decoded.
    fn read(&self, path: &Path) -> Result<Document>;
}

/// Maps file extensions to readers.
///
/// Registering an extension that is already claimed replaces the previous
/// reader, so later registrations win.
#[derive(Default)]
pub struct ReaderRegistry {
    readers: HashMap<String, Arc<dyn Reader>>,
}

impl ReaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `extension` for `reader`, returning the reader it replaced.
    pub fn register(&mut self, extension: &str, reader: Arc<dyn Reader>) -> Option<Arc<dyn Reader>> {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        let replaced = self.readers.insert(extension.clone(), reader);
        if replaced.is_some() {
            debug!(%extension, "Replaced previously registered reader");
        } else {
            debug!(%extension, "Registered reader");
        }
        replaced
    }

    /// Claims every extension the reader reports through [`Reader::file_extensions`].
    ///
    /// Returns the number of extensions that were already claimed by another reader.
    pub fn register_reader(&mut self, reader: Arc<dyn Reader>) -> usize {
        let mut replaced = 0;
        for extension in reader.file_extensions() {
            if self.register(extension, Arc::clone(&reader)).is_some() {
                replaced += 1;
            }
        }
        replaced
    }

    /// Returns reader registered for the extension of `path`.
    pub fn reader_for(&self, path: &Path) -> Option<&dyn Reader> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        self.readers.get(&extension).map(Arc::as_ref)
    }

    /// Registered extensions in sorted order.
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.readers.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Reads `path` with the reader registered for its extension.
    ///
    /// # Errors
    ///
    /// Returns error if no reader claims the extension or the reader fails.
    pub fn read(&self, path: &Path) -> Result<Document> {
        let reader = self
            .reader_for(path)
            .with_context(|| format!("No reader registered for: {}", path.display()))?;

        reader.read(path)
    }
}
