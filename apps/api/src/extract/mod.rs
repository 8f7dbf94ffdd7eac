//! Text Extractor: turns an uploaded résumé into normalized plain text.
//!
//! Both readers produce blocks in document order (pages for PDF, paragraphs for DOCX);
//! `join_blocks` is the single place where blocks are trimmed, filtered and joined,
//! so the two formats share the same normalization.

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{DocumentFormat, ExtractedText, SourceDocument};

mod docx;
mod pdf;

pub use self::docx::extract_docx_paragraphs;
pub use self::pdf::extract_pdf_pages;

/// Separator placed between pages / paragraphs of extracted text.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Signature of an OLE2 compound file, the container of legacy `.doc` files.
const OLE2_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format '{0}'. Please upload a PDF or DOCX file.")]
    UnsupportedFormat(String),

    #[error("The legacy .doc format is not supported. Please save the file as .docx and upload it again.")]
    LegacyFormatUnsupported,

    #[error("The {format} file could not be read: {reason}")]
    Malformed {
        format: &'static str,
        reason: String,
    },
}

/// Extracts normalized text from a résumé.
///
/// The format tag is validated before any parsing happens. A `.docx` upload that is
/// really an OLE2 `.doc` file (renamed by the user) is reported as a legacy format.
pub fn extract(document: SourceDocument) -> Result<ExtractedText, ExtractError> {
    let format = DocumentFormat::from_tag(&document.format_tag)?;
    let size = document.bytes.len();

    let blocks = match format {
        DocumentFormat::Pdf => extract_pdf_pages(&document.bytes)?,
        DocumentFormat::Docx => {
            if document.bytes.starts_with(&OLE2_SIGNATURE) {
                return Err(ExtractError::LegacyFormatUnsupported);
            }
            extract_docx_paragraphs(&document.bytes)?
        }
    };
    debug!(blocks = blocks.len(), "Raw blocks extracted");

    let text = join_blocks(blocks);
    info!(
        format = format.as_str(),
        bytes = size,
        chars = text.char_count(),
        "Résumé text extracted"
    );
    Ok(text)
}

/// Keeps non-blank blocks in order, joins them with a blank line and trims the result.
pub fn join_blocks<I, S>(blocks: I) -> ExtractedText
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let kept: Vec<String> = blocks
        .into_iter()
        .filter(|b| !b.as_ref().trim().is_empty())
        .map(|b| b.as_ref().to_string())
        .collect();
    ExtractedText::new(kept.join(BLOCK_SEPARATOR).trim())
}
