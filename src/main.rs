use anyhow::{Context, Result, bail};
use remark_reader::{Config, Document, ReaderRegistry, RemarkReader};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Extension of files written to the output directory.
const OUTPUT_EXTENSION: &str = "md";

/// Initializes stderr logging; `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Writes document to `<output>/<stem>.md`, or to stdout without an output directory.
fn emit(path: &Path, document: &Document, output: Option<&Path>) -> Result<()> {
    let source = document.to_source();

    let Some(output) = output else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", source).context("Failed to write to stdout")?;
        return Ok(());
    };

    let stem = path
        .file_stem()
        .with_context(|| format!("Cannot derive output name from: {}", path.display()))?;
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    let target = output.join(name);

    fs::write(&target, source)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    info!(from = %path.display(), to = %target.display(), "Wrote slide deck");

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(config.verbose);
    config.validate().context("Invalid configuration")?;

    let mut registry = ReaderRegistry::new();
    RemarkReader::new(config.reader_settings()?)
        .context("Failed to create reader")?
        .register(&mut registry);

    if let Some(output) = &config.output {
        fs::create_dir_all(output).context("Failed to create output directory")?;
    }

    let mut failures = 0;
    for path in &config.files {
        if registry.reader_for(path).is_none() {
            warn!(
                path = %path.display(),
                extensions = ?registry.extensions(),
                "Skipping file without a registered reader"
            );
            continue;
        }

        let result = registry
            .read(path)
            .and_then(|document| emit(path, &document, config.output.as_deref()));

        if let Err(e) = result {
            error!("{:#}", e);
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{} of {} files failed", failures, config.files.len());
    }

    Ok(())
}
