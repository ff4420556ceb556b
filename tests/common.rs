//! Shared test utilities for integration tests.

#![allow(dead_code)]

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Slide deck with metadata, internal links, and code that must stay untouched.
pub const SAMPLE_DECK: &str = "\
Title: Git Basics
Date: 2020-03-01

class: center, middle
# Git Basics

---

![]({static}/images/git-status.png)

Slides as [PDF]({static}/slides/git.pdf).

---

```markdown
[a file]({static}/file.pdf)
```

Use `[text]({static}/path)` to link site files.
";

/// Writes file under `dir`, creating parent directories as needed.
///
/// # Returns
///
/// Path of the written file
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(dir: &Path, path: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file_path, content)?;
    Ok(file_path)
}
