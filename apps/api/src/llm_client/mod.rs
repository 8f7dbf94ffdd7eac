/// LLM Client: the single point of entry for generative text calls.
///
/// ARCHITECTURAL RULE: no other module talks to the completion endpoint directly.
/// Callers depend on the `TextGenerator` trait; `ChatCompletionsClient` is the
/// production implementation for any OpenAI-compatible chat-completions API
/// (Groq by default). Endpoint, model and timeout come from configuration.
///
/// One call = one HTTP attempt. Retrying is the caller's decision.
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LlmSettings;
use crate::models::{GeneratedText, GenerationRequest};

/// Longest provider error message forwarded to the caller.
const MAX_ERROR_MESSAGE_CHARS: usize = 300;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("No API key is configured for the text generation service. Set GROQ_API_KEY and restart.")]
    MissingCredential,

    #[error("The text generation service failed: {0}")]
    Service(String),
}

/// Anything that turns a composed request into completion text.
///
/// Carried in `AppState` as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest)
        -> Result<GeneratedText, GenerationError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl ChatCompletionsClient {
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(settings.timeout).build()?,
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            api_key: settings
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Keeps provider messages short and strips the credential if a provider echoes it.
    fn sanitize(&self, message: &str) -> String {
        let mut message: String = message.chars().take(MAX_ERROR_MESSAGE_CHARS).collect();
        if let Some(key) = &self.api_key {
            message = message.replace(key.as_str(), "***");
        }
        message
    }
}

fn transport_error(e: reqwest::Error) -> GenerationError {
    warn!("Generation transport error: {e}");
    let message = if e.is_timeout() {
        "the service did not respond in time"
    } else if e.is_connect() {
        "the service could not be reached"
    } else if e.is_decode() {
        "the service returned an unreadable response"
    } else {
        "the request could not be completed"
    };
    GenerationError::Service(message.to_string())
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedText, GenerationError> {
        // Checked before anything touches the network.
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_instructions,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_content,
                },
            ],
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            let message = self.sanitize(&message);
            warn!("Generation API returned {status}: {message}");
            return Err(GenerationError::Service(format!(
                "status {}: {}",
                status.as_u16(),
                message
            )));
        }

        let completion: ChatResponse = response.json().await.map_err(transport_error)?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Generation call succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                self.model, usage.prompt_tokens, usage.completion_tokens
            );
        }

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(GeneratedText::new)
            .ok_or_else(|| GenerationError::Service("the service returned no completion".into()))?;

        if text.is_empty() {
            return Err(GenerationError::Service(
                "the service returned an empty completion".into(),
            ));
        }
        Ok(text)
    }
}
