//! Integration tests for reading slide decks from disk.

mod common;

use anyhow::Result;
use remark_reader::{
    CodeDetection, DEFAULT_TEMPLATE, MarkerPattern, ReaderRegistry, ReaderSettings, RemarkReader,
    split_header,
};
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn registry_with(settings: ReaderSettings) -> Result<ReaderRegistry> {
    let mut registry = ReaderRegistry::new();
    RemarkReader::new(settings)?.register(&mut registry);
    Ok(registry)
}

/// Tests reading deck keeps Markdown, strips markers, and guards code.
#[test]
fn test_read_sample_deck() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let path = common::write_file(dir.path(), "talks/git.remark", common::SAMPLE_DECK)?;
    let registry = registry_with(ReaderSettings::default())?;

    // Act
    let document = registry.read(&path)?;

    // Assert
    assert_eq!(document.template(), Some(DEFAULT_TEMPLATE));
    assert_eq!(
        document.metadata.get("title").map(String::as_str),
        Some("Git Basics")
    );
    assert!(document.content.starts_with("class: center, middle\n# Git Basics"));
    assert!(document.content.contains("![](/images/git-status.png)"));
    assert!(document.content.contains("[PDF](/slides/git.pdf)"));
    assert!(document.content.contains("```markdown\n[a file]({static}/file.pdf)\n```"));
    assert!(document.content.contains("`[text]({static}/path)`"));
    assert!(!document.content.contains("Title:"));

    Ok(())
}

/// Tests uppercase extensions are dispatched to the reader.
#[test]
fn test_read_uppercase_extension() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let path = common::write_file(dir.path(), "DECK.REMARK", "[a]({static}/a.pdf)")?;
    let registry = registry_with(ReaderSettings::default())?;

    // Act
    let document = registry.read(&path)?;

    // Assert
    assert_eq!(document.content, "[a](/a.pdf)");

    Ok(())
}

/// Tests non UTF8 files fail with path context.
#[test]
fn test_read_invalid_utf8_fails() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let path = dir.path().join("binary.remark");
    fs::write(&path, [0xff, 0xfe, 0x00, 0x80])?;
    let registry = registry_with(ReaderSettings::default())?;

    // Act
    let result = registry.read(&path);

    // Assert
    assert!(result.is_err());
    let err_msg = result.unwrap_err().to_string();
    assert!(err_msg.contains("binary.remark"), "{}", err_msg);

    Ok(())
}

/// Tests marker pattern is threaded through settings rather than fixed.
#[test]
fn test_custom_marker_from_settings() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let path = common::write_file(
        dir.path(),
        "deck.remark",
        "Title: Custom\n\n[a]({static}/a.pdf) [b](%root%/b.pdf)",
    )?;
    let settings = ReaderSettings {
        marker_pattern: MarkerPattern::new(r"%(?P<what>\w+)%")?,
        ..ReaderSettings::default()
    };
    let registry = registry_with(settings)?;

    // Act
    let document = registry.read(&path)?;

    // Assert
    assert_eq!(document.content, "[a]({static}/a.pdf) [b](/b.pdf)");

    Ok(())
}

/// Tests legacy parity detection differs from the scanner on fenced blocks.
#[test]
fn test_parity_and_scanner_disagree_on_mixed_code() -> Result<()> {
    // Arrange
    let source = "Title: Mixed\n\n```\nlet tick = '`';\n```\n\n[a]({static}/a.pdf)";
    let scanner = RemarkReader::new(ReaderSettings::default())?;
    let parity = RemarkReader::new(ReaderSettings {
        code_detection: CodeDetection::BacktickParity,
        ..ReaderSettings::default()
    })?;

    // Act
    let scanned = scanner.read_str(source);
    let counted = parity.read_str(source);

    // Assert
    assert!(scanned.content.ends_with("[a](/a.pdf)"));
    assert!(counted.content.ends_with("[a]({static}/a.pdf)"));

    Ok(())
}

/// Tests serialized document reads back to the same metadata and content.
#[test]
fn test_document_source_reads_back() -> Result<()> {
    // Arrange
    let reader = RemarkReader::new(ReaderSettings::default())?;
    let document = reader.read_str(common::SAMPLE_DECK);

    // Act
    let again = reader.read_str(&document.to_source());
    let (metadata, _) = split_header(&document.to_source());

    // Assert
    assert_eq!(again, document);
    assert_eq!(metadata, document.metadata);

    Ok(())
}

/// Tests one reader can be shared across threads.
#[test]
fn test_reader_shared_across_threads() -> Result<()> {
    // Arrange
    let reader = Arc::new(RemarkReader::new(ReaderSettings::default())?);

    // Act
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let reader = Arc::clone(&reader);
            thread::spawn(move || reader.read_str(&format!("[s{i}]({{static}}/s{i}.pdf)")))
        })
        .collect();

    // Assert
    for (i, handle) in handles.into_iter().enumerate() {
        let document = handle.join().expect("Thread should not panic");
        assert_eq!(document.content, format!("[s{i}](/s{i}.pdf)"));
    }

    Ok(())
}
