use serde::{Deserialize, Serialize};

/// Export formats for the finished letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Pdf,
    Docx,
}

impl OutputFormat {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Some(OutputFormat::Pdf),
            "docx" => Some(OutputFormat::Docx),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn suggested_filename(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "lettre_motivation.pdf",
            OutputFormat::Docx => "lettre_motivation.docx",
        }
    }
}

/// An exported letter held in memory. Rebuilt on every export.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
}

impl RenderedDocument {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn suggested_filename(&self) -> &'static str {
        self.format.suggested_filename()
    }
}
