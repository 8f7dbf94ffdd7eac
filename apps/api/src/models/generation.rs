use serde::{Deserialize, Serialize};

/// Output language of the generated letter and recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "fr" => Some(Language::Fr),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// Name of the language as written in the closing instruction of a prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Language::Fr => "français",
            Language::En => "English",
        }
    }
}

/// Which instruction template a request is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKey {
    Letter,
    Recommendations,
}

impl TemplateKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKey::Letter => "letter",
            TemplateKey::Recommendations => "recommendations",
        }
    }
}

/// A fully composed call to the generative service: one system message, one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_instructions: String,
    pub user_content: String,
    pub temperature: f32,
    pub language: Language,
}

/// Completion text returned by the service, already trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GeneratedText(String);

impl GeneratedText {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(text.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
