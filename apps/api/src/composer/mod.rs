//! Prompt Composer: builds the system/user message pair for each generation call.
//!
//! Caller data (résumé text, free-form context) is always fenced between `---` lines
//! so the model can tell it apart from instructions. Only the letter prompt carries
//! the context block.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{ExtractedText, GenerationRequest, Language, TemplateKey};

pub mod prompts;

use prompts::{
    DELIMITER, LETTER_CLOSING, LETTER_CONTEXT_INTRO, LETTER_CV_INTRO, LETTER_TEMPLATE_FILE,
    RECOMMENDATIONS_CLOSING, RECOMMENDATIONS_CV_INTRO, RECOMMENDATIONS_TEMPLATE_FILE,
};

// ────────────────────────────────────────────────────────────────────────────
// Templates
// ────────────────────────────────────────────────────────────────────────────

/// Instruction texts, loaded once at startup and never modified afterwards.
#[derive(Debug, Clone)]
pub struct Templates {
    letter: String,
    recommendations: String,
}

impl Templates {
    pub fn new(letter: impl Into<String>, recommendations: impl Into<String>) -> Result<Self> {
        let letter = letter.into().trim().to_string();
        let recommendations = recommendations.into().trim().to_string();
        if letter.is_empty() {
            bail!("Letter template is empty");
        }
        if recommendations.is_empty() {
            bail!("Recommendations template is empty");
        }
        Ok(Self {
            letter,
            recommendations,
        })
    }

    /// Reads both template files from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path)
                .with_context(|| format!("Cannot read prompt template '{}'", path.display()))
        };
        let templates = Self::new(
            read(LETTER_TEMPLATE_FILE)?,
            read(RECOMMENDATIONS_TEMPLATE_FILE)?,
        )?;
        info!(dir = %dir.display(), "Prompt templates loaded");
        Ok(templates)
    }

    pub fn get(&self, key: TemplateKey) -> &str {
        match key {
            TemplateKey::Letter => &self.letter,
            TemplateKey::Recommendations => &self.recommendations,
        }
    }
}

/// Sampling temperature per template. Recommendations run cooler than letters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperatures {
    pub letter: f32,
    pub recommendations: f32,
}

impl Default for Temperatures {
    fn default() -> Self {
        Self {
            letter: 0.4,
            recommendations: 0.3,
        }
    }
}

impl Temperatures {
    pub fn get(&self, key: TemplateKey) -> f32 {
        match key {
            TemplateKey::Letter => self.letter,
            TemplateKey::Recommendations => self.recommendations,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Composer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PromptComposer {
    templates: Templates,
    temperatures: Temperatures,
}

impl PromptComposer {
    pub fn new(templates: Templates, temperatures: Temperatures) -> Self {
        Self {
            templates,
            temperatures,
        }
    }

    /// Builds a request for `key`. `context` is only used by the letter template;
    /// a missing context on a letter yields an empty fenced block.
    pub fn compose(
        &self,
        key: TemplateKey,
        language: Language,
        cv_text: &ExtractedText,
        context: Option<&str>,
    ) -> GenerationRequest {
        let user_content = match key {
            TemplateKey::Letter => format!(
                "{LETTER_CV_INTRO}\n\n{}\n\n{LETTER_CONTEXT_INTRO}\n{}\n\n{LETTER_CLOSING} {}.",
                fenced(cv_text.as_str()),
                fenced(context.unwrap_or_default().trim()),
                language.label()
            ),
            TemplateKey::Recommendations => format!(
                "{RECOMMENDATIONS_CV_INTRO}\n\n{}\n\n{RECOMMENDATIONS_CLOSING} {}.",
                fenced(cv_text.as_str()),
                language.label()
            ),
        };

        GenerationRequest {
            system_instructions: self.templates.get(key).to_string(),
            user_content,
            temperature: self.temperatures.get(key),
            language,
        }
    }
}

fn fenced(block: &str) -> String {
    format!("{DELIMITER}\n{block}\n{DELIMITER}")
}
