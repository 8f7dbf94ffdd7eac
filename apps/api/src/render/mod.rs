//! Document Renderer: letter text to PDF or DOCX bytes.
//!
//! Both formats share one segmentation policy: split on a blank line, trim each
//! segment, drop the ones left empty. Single newlines inside a segment are kept
//! as in-paragraph line breaks.
//!
//! Rendering is CPU-bound; async callers go through `tokio::task::spawn_blocking`.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::{OutputFormat, RenderedDocument};

pub mod docx;
pub mod font_metrics;
pub mod line_breaker;
pub mod pdf;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF serialization failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("DOCX packaging failed: {0}")]
    Docx(String),

    #[error("Rendering task failed: {0}")]
    Task(String),

    #[error("Could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Splits letter text into paragraph segments. Shared by both output formats.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}

/// Renders the letter into an in-memory document of the requested format.
pub fn render(text: &str, format: OutputFormat) -> Result<RenderedDocument, RenderError> {
    let bytes = match format {
        OutputFormat::Pdf => pdf::render_pdf(text)?,
        OutputFormat::Docx => docx::render_docx(text)?,
    };
    info!(
        format = ?format,
        bytes = bytes.len(),
        "Letter rendered"
    );
    Ok(RenderedDocument { bytes, format })
}

/// Writes a fully built document to `path` atomically and returns the path.
///
/// Parent directories are created as needed. Bytes go to a temporary file next to the
/// target which is then renamed over it, so a failed write never leaves a truncated file.
pub fn save_to_path(document: &RenderedDocument, path: &Path) -> Result<PathBuf, RenderError> {
    let io_err = |source: std::io::Error| RenderError::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(io_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(io_err)?;
    tmp.write_all(&document.bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    info!(path = %path.display(), bytes = document.bytes.len(), "Letter saved");
    Ok(path.to_path_buf())
}

/// Convenience overload: render then save. Nothing touches the disk until the
/// in-memory document is complete.
pub fn render_to_path(
    text: &str,
    format: OutputFormat,
    path: &Path,
) -> Result<PathBuf, RenderError> {
    let document = render(text, format)?;
    save_to_path(&document, path)
}
