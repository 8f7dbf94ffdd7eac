//! Pipeline Orchestrator: résumé in, editable letter and recommendations out.
//!
//! States: Idle → Extracting → Generating(letter) → Generating(recommendations) → Ready
//!         Ready → Exporting → Ready
//!
//! - A failure while extracting or generating the letter clears any previous result
//!   and returns to Idle. Nothing is partially committed.
//! - A recommendations failure does not discard a letter that was already generated:
//!   the run still reaches Ready, with a `RecommendationsUnavailable` warning.
//! - The letter can only be edited or exported from Ready.
//! - Extraction and rendering are CPU-bound and run on the blocking pool.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::composer::prompts::DELIMITER;
use crate::composer::PromptComposer;
use crate::extract::{self, ExtractError};
use crate::llm_client::{GenerationError, TextGenerator};
use crate::models::{
    DocumentFormat, ExtractedText, Language, OutputFormat, RenderedDocument, SourceDocument,
    TemplateKey,
};
use crate::render::{self, RenderError};

pub mod handlers;
pub mod session;

// ────────────────────────────────────────────────────────────────────────────
// State, warnings, errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Extracting,
    Generating(TemplateKey),
    Ready,
    Exporting,
}

impl PipelineState {
    /// True while a run or an export is under way.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            PipelineState::Extracting | PipelineState::Generating(_) | PipelineState::Exporting
        )
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Idle => write!(f, "idle"),
            PipelineState::Extracting => write!(f, "extracting"),
            PipelineState::Generating(key) => write!(f, "generating ({})", key.as_str()),
            PipelineState::Ready => write!(f, "ready"),
            PipelineState::Exporting => write!(f, "exporting"),
        }
    }
}

/// Non-fatal conditions reported alongside a successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum PipelineWarning {
    /// Very little text came out of the résumé (scanned image, empty template...).
    EmptyExtraction { chars: usize, min_chars: usize },
    /// The letter is available but the recommendations call failed.
    RecommendationsUnavailable { reason: String },
}

impl PipelineWarning {
    pub fn message(&self) -> String {
        match self {
            PipelineWarning::EmptyExtraction { chars, .. } => format!(
                "Only {chars} characters could be extracted from the résumé. \
                 Check that the file is not a scanned image."
            ),
            PipelineWarning::RecommendationsUnavailable { reason } => {
                format!("The letter was generated but the recommendations are unavailable: {reason}")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("{0}")]
    Validation(String),

    #[error("Cannot {action} while the letter is {state}.")]
    InvalidState {
        action: &'static str,
        state: PipelineState,
    },
}

/// Result of a completed run, as held in `Ready`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub letter: String,
    pub recommendations: Option<String>,
    pub warnings: Vec<PipelineWarning>,
    pub language: Language,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

pub struct Pipeline {
    composer: Arc<PromptComposer>,
    generator: Arc<dyn TextGenerator>,
    min_extracted_chars: usize,
    state: PipelineState,
    output: Option<PipelineOutput>,
}

impl Pipeline {
    pub fn new(
        composer: Arc<PromptComposer>,
        generator: Arc<dyn TextGenerator>,
        min_extracted_chars: usize,
    ) -> Self {
        Self {
            composer,
            generator,
            min_extracted_chars,
            state: PipelineState::Idle,
            output: None,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn output(&self) -> Option<&PipelineOutput> {
        self.output.as_ref()
    }

    /// Runs extraction and both generation calls. Overwrites the result of any earlier run.
    pub async fn run(
        &mut self,
        document: SourceDocument,
        context: &str,
        language: Language,
    ) -> Result<PipelineOutput, PipelineError> {
        if self.state.is_busy() {
            return Err(PipelineError::InvalidState {
                action: "start a new generation",
                state: self.state,
            });
        }
        let context = context.trim();
        if context.is_empty() {
            return Err(PipelineError::Validation(
                "Please describe the position, company or offer the letter is for.".to_string(),
            ));
        }

        // Dropping the future mid-run (client gone) must not strand the session in a busy state.
        let mut guard = SettleOnDrop {
            pipeline: self,
            fallback: PipelineState::Idle,
        };
        let result = guard.pipeline.run_stages(document, context, language).await;
        drop(guard);
        result
    }

    async fn run_stages(
        &mut self,
        document: SourceDocument,
        context: &str,
        language: Language,
    ) -> Result<PipelineOutput, PipelineError> {
        self.output = None;
        self.transition(PipelineState::Extracting);
        let cv_text = match extract_blocking(document).await {
            Ok(text) => text,
            Err(e) => return Err(self.abort(e.into())),
        };

        let mut warnings = Vec::new();
        if cv_text.is_near_empty(self.min_extracted_chars) {
            warn!(
                chars = cv_text.char_count(),
                min_chars = self.min_extracted_chars,
                "Extracted résumé text is nearly empty"
            );
            warnings.push(PipelineWarning::EmptyExtraction {
                chars: cv_text.char_count(),
                min_chars: self.min_extracted_chars,
            });
        }

        self.transition(PipelineState::Generating(TemplateKey::Letter));
        let request = self
            .composer
            .compose(TemplateKey::Letter, language, &cv_text, Some(context));
        let letter = match self.generator.generate(&request).await {
            Ok(text) => clean_generated_letter(text.as_str()),
            Err(e) => return Err(self.abort(e.into())),
        };
        if letter.is_empty() {
            return Err(self.abort(
                GenerationError::Service("the generated letter was empty".to_string()).into(),
            ));
        }

        self.transition(PipelineState::Generating(TemplateKey::Recommendations));
        let request = self
            .composer
            .compose(TemplateKey::Recommendations, language, &cv_text, None);
        let recommendations = match self.generator.generate(&request).await {
            Ok(text) => Some(text.into_inner()),
            Err(e) => {
                warn!("Recommendations generation failed, keeping the letter: {e}");
                warnings.push(PipelineWarning::RecommendationsUnavailable {
                    reason: e.to_string(),
                });
                None
            }
        };

        let output = PipelineOutput {
            letter,
            recommendations,
            warnings,
            language,
        };
        self.output = Some(output.clone());
        self.transition(PipelineState::Ready);
        Ok(output)
    }

    /// Replaces the letter with a human-edited version. Only allowed in `Ready`.
    pub fn edit_letter(&mut self, letter: impl Into<String>) -> Result<(), PipelineError> {
        let state = self.state;
        match (&mut self.output, state) {
            (Some(output), PipelineState::Ready) => {
                output.letter = letter.into();
                info!(chars = output.letter.chars().count(), "Letter edited");
                Ok(())
            }
            _ => Err(PipelineError::InvalidState {
                action: "edit the letter",
                state,
            }),
        }
    }

    /// Renders the current letter. Passes through `Exporting` and always returns to `Ready`.
    pub async fn export(&mut self, format: OutputFormat) -> Result<RenderedDocument, PipelineError> {
        let letter = match (&self.output, self.state) {
            (Some(output), PipelineState::Ready) => output.letter.clone(),
            _ => {
                return Err(PipelineError::InvalidState {
                    action: "export the letter",
                    state: self.state,
                })
            }
        };

        let mut guard = SettleOnDrop {
            pipeline: self,
            fallback: PipelineState::Ready,
        };
        guard.pipeline.transition(PipelineState::Exporting);
        let result = tokio::task::spawn_blocking(move || render::render(&letter, format)).await;
        guard.pipeline.transition(PipelineState::Ready);
        drop(guard);

        match result {
            Ok(rendered) => Ok(rendered?),
            Err(e) => Err(PipelineError::Render(RenderError::Task(e.to_string()))),
        }
    }

    fn transition(&mut self, next: PipelineState) {
        info!(from = %self.state, to = %next, "Pipeline state change");
        self.state = next;
    }

    fn abort(&mut self, error: PipelineError) -> PipelineError {
        warn!(state = %self.state, "Pipeline run aborted: {error}");
        self.output = None;
        self.transition(PipelineState::Idle);
        error
    }
}

/// Puts a pipeline left in a busy state back to `fallback` when dropped. A step that
/// completes settles the state itself, so this only fires when the future is cancelled.
struct SettleOnDrop<'a> {
    pipeline: &'a mut Pipeline,
    fallback: PipelineState,
}

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        if !self.pipeline.state.is_busy() {
            return;
        }
        warn!(state = %self.pipeline.state, "Pipeline step cancelled before completion");
        if self.fallback == PipelineState::Idle {
            self.pipeline.output = None;
        }
        self.pipeline.transition(self.fallback);
    }
}

/// Extraction on the blocking pool. A panic inside a parser is reported as a malformed file.
async fn extract_blocking(document: SourceDocument) -> Result<ExtractedText, ExtractError> {
    let format = DocumentFormat::from_tag(&document.format_tag)
        .map(|f| f.as_str())
        .unwrap_or("document");
    tokio::task::spawn_blocking(move || extract::extract(document))
        .await
        .unwrap_or_else(|e| {
            Err(ExtractError::Malformed {
                format,
                reason: format!("the parser stopped unexpectedly ({e})"),
            })
        })
}

/// Strips surrounding code fences and any line made only of the delimiter marker,
/// which models sometimes echo back from the prompt.
pub fn clean_generated_letter(text: &str) -> String {
    let text = strip_code_fences(text);
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| line.trim() != DELIMITER)
        .collect();
    kept.join("\n").trim().to_string()
}

fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    match text.strip_prefix("```") {
        Some(rest) => {
            // Drop an optional language tag on the opening fence line.
            let rest = match rest.split_once('\n') {
                Some((tag, body)) if !tag.contains(' ') => body,
                _ => rest,
            };
            rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::{Temperatures, Templates};
    use crate::models::{GeneratedText, GenerationRequest};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Clone)]
    enum Reply {
        Text(&'static str),
        MissingCredential,
        Service(&'static str),
        /// Never answers, like a service that hangs until the caller gives up.
        Hang,
    }

    /// Answers per template, recording every request it receives.
    struct StubGenerator {
        letter: Reply,
        recommendations: Reply,
        calls: Mutex<Vec<GenerationRequest>>,
    }

    impl StubGenerator {
        fn new(letter: Reply, recommendations: Reply) -> Self {
            Self {
                letter,
                recommendations,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn ok(letter: &'static str, recommendations: &'static str) -> Self {
            Self::new(Reply::Text(letter), Reply::Text(recommendations))
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<GeneratedText, GenerationError> {
            self.calls.lock().unwrap().push(request.clone());
            let reply = if request.system_instructions == "LETTER" {
                &self.letter
            } else {
                &self.recommendations
            };
            match reply {
                Reply::Text(text) => Ok(GeneratedText::new(text)),
                Reply::MissingCredential => Err(GenerationError::MissingCredential),
                Reply::Service(msg) => Err(GenerationError::Service(msg.to_string())),
                Reply::Hang => std::future::pending().await,
            }
        }
    }

    fn composer() -> Arc<PromptComposer> {
        Arc::new(PromptComposer::new(
            Templates::new("LETTER", "RECOMMENDATIONS").unwrap(),
            Temperatures::default(),
        ))
    }

    fn resume_docx() -> SourceDocument {
        let bytes =
            render::docx::render_docx("Jean Dupont\n\nExpérience: 5 ans en développement")
                .unwrap();
        SourceDocument::new(bytes, "docx")
    }

    fn pipeline(generator: Arc<StubGenerator>) -> Pipeline {
        Pipeline::new(composer(), generator, 10)
    }

    #[tokio::test]
    async fn test_run_reaches_ready_with_letter_and_recommendations() {
        let generator = Arc::new(StubGenerator::ok(
            "Madame, Monsieur,\n\nJe postule.",
            "- Ajoutez des résultats chiffrés.",
        ));
        let mut p = pipeline(generator.clone());

        let output = p
            .run(resume_docx(), "Poste de développeur Python chez Acme", Language::Fr)
            .await
            .unwrap();

        assert_eq!(p.state(), PipelineState::Ready);
        assert_eq!(output.letter, "Madame, Monsieur,\n\nJe postule.");
        assert_eq!(
            output.recommendations.as_deref(),
            Some("- Ajoutez des résultats chiffrés.")
        );
        assert!(output.warnings.is_empty());

        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].system_instructions, "LETTER");
        assert!(calls[0].user_content.contains("Jean Dupont\n\nExpérience"));
        assert!(calls[0].user_content.contains("chez Acme"));
        assert_eq!(calls[1].system_instructions, "RECOMMENDATIONS");
        assert!(!calls[1].user_content.contains("Acme"));
    }

    #[tokio::test]
    async fn test_unsupported_format_aborts_before_generation() {
        let generator = Arc::new(StubGenerator::ok("x", "y"));
        let mut p = pipeline(generator.clone());

        let err = p
            .run(SourceDocument::new(b"hello".to_vec(), "txt"), "Poste", Language::Fr)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Extract(ExtractError::UnsupportedFormat(_))));
        assert_eq!(p.state(), PipelineState::Idle);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_legacy_doc_aborts_with_specific_error() {
        let generator = Arc::new(StubGenerator::ok("x", "y"));
        let mut p = pipeline(generator.clone());
        let err = p
            .run(SourceDocument::new(vec![0u8; 16], "doc"), "Poste", Language::Fr)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Extract(ExtractError::LegacyFormatUnsupported)
        ));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_context_is_rejected_without_state_change() {
        let generator = Arc::new(StubGenerator::ok("x", "y"));
        let mut p = pipeline(generator.clone());
        let err = p.run(resume_docx(), "   ", Language::Fr).await.unwrap_err();
        assert!(matches!(err, PipelineError::Validation(_)));
        assert_eq!(p.state(), PipelineState::Idle);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_on_letter_returns_to_idle() {
        let generator = Arc::new(StubGenerator::new(
            Reply::MissingCredential,
            Reply::MissingCredential,
        ));
        let mut p = pipeline(generator.clone());

        let err = p.run(resume_docx(), "Poste", Language::Fr).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Generation(GenerationError::MissingCredential)
        ));
        assert_eq!(p.state(), PipelineState::Idle);
        assert!(p.output().is_none());
        assert_eq!(generator.call_count(), 1, "recommendations are not attempted");
    }

    #[tokio::test]
    async fn test_recommendations_failure_keeps_the_letter() {
        let generator = Arc::new(StubGenerator::new(
            Reply::Text("Madame, Monsieur,"),
            Reply::Service("status 429: rate limited"),
        ));
        let mut p = pipeline(generator.clone());

        let output = p.run(resume_docx(), "Poste", Language::En).await.unwrap();
        assert_eq!(p.state(), PipelineState::Ready);
        assert_eq!(output.letter, "Madame, Monsieur,");
        assert!(output.recommendations.is_none());
        assert!(matches!(
            output.warnings.as_slice(),
            [PipelineWarning::RecommendationsUnavailable { .. }]
        ));
    }

    #[tokio::test]
    async fn test_near_empty_extraction_is_a_warning_not_an_error() {
        let generator = Arc::new(StubGenerator::ok("Lettre", "Conseils"));
        let mut p = Pipeline::new(composer(), generator, 50);
        let bytes = render::docx::render_docx("Jean").unwrap();

        let output = p
            .run(SourceDocument::new(bytes, "docx"), "Poste", Language::Fr)
            .await
            .unwrap();
        assert_eq!(
            output.warnings,
            vec![PipelineWarning::EmptyExtraction {
                chars: 4,
                min_chars: 50
            }]
        );
        assert_eq!(p.state(), PipelineState::Ready);
    }

    #[tokio::test]
    async fn test_failed_rerun_clears_previous_result() {
        let generator = Arc::new(StubGenerator::ok("Lettre", "Conseils"));
        let mut p = pipeline(generator);
        p.run(resume_docx(), "Poste", Language::Fr).await.unwrap();
        assert!(p.output().is_some());

        let err = p
            .run(SourceDocument::new(b"%PDF-broken".to_vec(), "pdf"), "Poste", Language::Fr)
            .await;
        assert!(err.is_err());
        assert_eq!(p.state(), PipelineState::Idle);
        assert!(p.output().is_none());
    }

    #[tokio::test]
    async fn test_edit_only_allowed_in_ready() {
        let generator = Arc::new(StubGenerator::ok("Lettre", "Conseils"));
        let mut p = pipeline(generator);

        assert!(matches!(
            p.edit_letter("trop tôt"),
            Err(PipelineError::InvalidState { state: PipelineState::Idle, .. })
        ));

        p.run(resume_docx(), "Poste", Language::Fr).await.unwrap();
        p.edit_letter("Lettre corrigée\n\nCordialement").unwrap();
        assert_eq!(p.output().unwrap().letter, "Lettre corrigée\n\nCordialement");
    }

    #[tokio::test]
    async fn test_export_uses_edited_letter_and_returns_to_ready() {
        let generator = Arc::new(StubGenerator::ok("Lettre initiale", "Conseils"));
        let mut p = pipeline(generator);
        p.run(resume_docx(), "Poste", Language::Fr).await.unwrap();
        p.edit_letter("Lettre modifiée\n\nCordialement").unwrap();

        let docx = p.export(OutputFormat::Docx).await.unwrap();
        assert_eq!(p.state(), PipelineState::Ready);
        assert_eq!(
            extract::extract_docx_paragraphs(&docx.bytes).unwrap(),
            vec!["Lettre modifiée", "Cordialement"]
        );
    }

    #[tokio::test]
    async fn test_export_before_generation_is_invalid() {
        let generator = Arc::new(StubGenerator::ok("x", "y"));
        let mut p = pipeline(generator);
        assert!(matches!(
            p.export(OutputFormat::Pdf).await,
            Err(PipelineError::InvalidState { .. })
        ));
    }

    #[tokio::test]
    async fn test_end_to_end_letter_has_no_delimiters_and_exports_both_formats() {
        let generator = Arc::new(StubGenerator::ok(
            "---\nMadame, Monsieur,\n\nDéveloppeur depuis 5 ans, je souhaite rejoindre Acme.\n---",
            "Ajoutez vos réalisations chiffrées.",
        ));
        let mut p = pipeline(generator);

        let output = p
            .run(resume_docx(), "Poste de développeur Python chez Acme", Language::Fr)
            .await
            .unwrap();
        assert!(!output.letter.is_empty());
        assert!(output.letter.lines().all(|l| l.trim() != DELIMITER));

        let pdf = p.export(OutputFormat::Pdf).await.unwrap();
        assert!(!pdf.bytes.is_empty());
        assert_eq!(pdf.mime_type(), "application/pdf");

        let docx = p.export(OutputFormat::Docx).await.unwrap();
        assert!(!docx.bytes.is_empty());
        assert_eq!(
            docx.mime_type(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
    }

    #[tokio::test]
    async fn test_end_to_end_from_pdf_resume() {
        let generator = Arc::new(StubGenerator::ok(
            "Madame, Monsieur,\n\nJe souhaite rejoindre Acme.",
            "Ajoutez un résumé de profil.",
        ));
        let mut p = pipeline(generator.clone());
        let pdf = render::pdf::render_pdf("Jean Dupont\n\nExpérience: 5 ans en développement")
            .unwrap();

        let output = p
            .run(
                SourceDocument::new(pdf, "PDF"),
                "Poste de développeur Python chez Acme",
                Language::Fr,
            )
            .await
            .unwrap();
        assert!(!output.letter.contains(DELIMITER));

        let calls = generator.calls.lock().unwrap();
        assert!(calls[0].user_content.contains("Jean Dupont"));
        assert!(calls[0].user_content.contains("Expérience: 5 ans en développement"));
    }

    #[tokio::test]
    async fn test_cancelled_letter_generation_returns_to_idle() {
        let generator = Arc::new(StubGenerator::new(Reply::Hang, Reply::Text("Conseils")));
        let mut p = pipeline(generator);

        let outcome = tokio::time::timeout(
            Duration::from_millis(200),
            p.run(resume_docx(), "Poste", Language::Fr),
        )
        .await;
        assert!(outcome.is_err(), "the run should still be waiting on the service");

        assert_eq!(p.state(), PipelineState::Idle);
        assert!(p.output().is_none());
        assert!(matches!(
            p.edit_letter("x"),
            Err(PipelineError::InvalidState {
                state: PipelineState::Idle,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_cancelled_recommendations_allow_a_new_run() {
        let generator = Arc::new(StubGenerator::new(Reply::Text("Lettre"), Reply::Hang));
        let mut p = pipeline(generator.clone());

        let first = tokio::time::timeout(
            Duration::from_secs(1),
            p.run(resume_docx(), "Poste", Language::Fr),
        )
        .await;
        assert!(first.is_err());
        assert_eq!(p.state(), PipelineState::Idle);
        assert!(p.output().is_none(), "an interrupted run commits nothing");

        // A second run is accepted and reaches the service again instead of being rejected.
        let second = tokio::time::timeout(
            Duration::from_secs(1),
            p.run(resume_docx(), "Poste", Language::Fr),
        )
        .await;
        assert!(second.is_err());
        assert_eq!(generator.call_count(), 4);
        assert_eq!(p.state(), PipelineState::Idle);
    }

    #[tokio::test]
    async fn test_cancelled_export_returns_to_ready() {
        let generator = Arc::new(StubGenerator::ok("Lettre", "Conseils"));
        let mut p = pipeline(generator);
        p.run(resume_docx(), "Poste", Language::Fr).await.unwrap();

        let _ = tokio::time::timeout(Duration::ZERO, p.export(OutputFormat::Pdf)).await;
        assert_eq!(p.state(), PipelineState::Ready);

        p.edit_letter("Lettre revue").unwrap();
        let docx = p.export(OutputFormat::Docx).await.unwrap();
        assert!(!docx.bytes.is_empty());
    }

    #[test]
    fn test_clean_generated_letter_strips_fences_and_delimiters() {
        assert_eq!(
            clean_generated_letter("```text\nMadame,\n---\n\nJe postule.\n```"),
            "Madame,\n\nJe postule."
        );
        assert_eq!(clean_generated_letter("  Madame,\n\n--- \n"), "Madame,");
        assert_eq!(
            clean_generated_letter("Prix : 5 --- 10 k€"),
            "Prix : 5 --- 10 k€",
            "inline dashes are not a delimiter line"
        );
        assert_eq!(clean_generated_letter("---\n---"), "");
    }
}
