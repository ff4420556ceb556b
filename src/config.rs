//! Command line configuration.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;

use crate::markdown::{CodeDetection, DEFAULT_MARKER_PATTERN, LinkRewriter, MarkerPattern};
use crate::reader::{DEFAULT_TEMPLATE, ReaderSettings};

/// Command line configuration for remark-reader.
#[derive(Debug, Clone, Parser)]
#[command(name = "remark-reader", version, about, long_about = None)]
pub struct Config {
    /// Slide deck source files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output directory (prints to stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Regex fragment matching the internal link marker
    #[arg(long, default_value = DEFAULT_MARKER_PATTERN)]
    pub marker_pattern: String,

    /// Template assigned to decks without one
    #[arg(long, default_value = DEFAULT_TEMPLATE)]
    pub template: String,

    /// Detect code by backtick parity instead of scanning code blocks
    #[arg(long)]
    pub backtick_parity: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if an input file does not exist, the template name is
    /// empty, or the marker pattern does not compile.
    pub fn validate(&self) -> Result<()> {
        for file in &self.files {
            if !file.is_file() {
                bail!("Input file does not exist: {}", file.display());
            }
        }

        if self.template.trim().is_empty() {
            bail!("Template name must not be empty");
        }

        let marker = self.marker()?;
        LinkRewriter::new(&marker)?;

        Ok(())
    }

    /// Returns reader settings built from command line options.
    ///
    /// # Errors
    ///
    /// Returns error if the marker pattern is invalid.
    pub fn reader_settings(&self) -> Result<ReaderSettings> {
        let code_detection = if self.backtick_parity {
            CodeDetection::BacktickParity
        } else {
            CodeDetection::Scanner
        };

        Ok(ReaderSettings {
            marker_pattern: self.marker()?,
            default_template: self.template.clone(),
            code_detection,
        })
    }

    fn marker(&self) -> Result<MarkerPattern> {
        MarkerPattern::new(self.marker_pattern.as_str()).context("Invalid --marker-pattern")
    }
}
