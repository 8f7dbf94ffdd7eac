use std::sync::Arc;

use crate::composer::PromptComposer;
use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::pipeline::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Templates and temperatures, fixed for the lifetime of the process.
    pub composer: Arc<PromptComposer>,
    /// Pluggable generation backend. Default: `ChatCompletionsClient`.
    pub generator: Arc<dyn TextGenerator>,
    pub sessions: SessionStore,
}
