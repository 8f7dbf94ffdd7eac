use serde::{Deserialize, Serialize};

use crate::extract::ExtractError;

/// Input formats the extractor knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Parses a format tag such as `"pdf"`, `".DOCX"` or `"docx"`.
    ///
    /// `doc` is recognised but rejected with `LegacyFormatUnsupported` so the
    /// caller can tell the user to convert the file instead of picking another one.
    pub fn from_tag(tag: &str) -> Result<Self, ExtractError> {
        let normalized = tag.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "doc" => Err(ExtractError::LegacyFormatUnsupported),
            _ => Err(ExtractError::UnsupportedFormat(normalized)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }
}

/// An uploaded résumé: raw bytes plus the declared format tag.
///
/// Lives only as long as extraction takes; it is moved into the extractor and dropped there.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub bytes: Vec<u8>,
    pub format_tag: String,
}

impl SourceDocument {
    pub fn new(bytes: impl Into<Vec<u8>>, format_tag: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            format_tag: format_tag.into(),
        }
    }

    /// Builds a document from an uploaded filename, using its extension as the format tag.
    /// A filename without an extension yields an empty tag (rejected as unsupported).
    pub fn from_filename(bytes: impl Into<Vec<u8>>, filename: &str) -> Self {
        let tag = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::new(bytes, tag)
    }
}

/// Normalized plain text pulled out of a résumé. Paragraphs are separated by `"\n\n"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Character count after trimming; scanned résumés typically land near zero.
    pub fn char_count(&self) -> usize {
        self.0.trim().chars().count()
    }

    pub fn is_near_empty(&self, min_chars: usize) -> bool {
        self.char_count() < min_chars
    }
}
