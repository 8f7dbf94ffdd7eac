use tracing::debug;

use super::ExtractError;

/// Returns the text of every page, in page order. Image-only pages come back empty.
///
/// `pdf_extract` panics on some damaged files; a panic is reported as `Malformed`.
pub fn extract_pdf_pages(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let malformed = |reason: String| ExtractError::Malformed {
        format: "pdf",
        reason,
    };
    let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|_| malformed("the file structure is damaged".to_string()))?
        .map_err(|e| malformed(e.to_string()))?;

    let empty = pages.iter().filter(|p| p.trim().is_empty()).count();
    if empty > 0 {
        debug!(pages = pages.len(), empty, "PDF pages without extractable text");
    }
    Ok(pages)
}
