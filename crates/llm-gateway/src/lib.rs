//! # LLM gateway
//!
//! Abstraction over third-party chat-completion APIs. [`CompletionProvider`]
//! is the provider seam: one concrete adapter per backend
//! ([`OpenAiProvider`] for OpenAI-compatible endpoints including Groq,
//! [`GeminiProvider`] for the Gemini REST API), selected once at startup.
//!
//! [`LlmGateway`] wraps the chosen provider and is the sole
//! failure-containment boundary in the system: its methods return plain
//! strings and never fail. Provider errors, empty responses, and timeouts are
//! normalized to fixed user-facing messages inside the gateway.

use async_trait::async_trait;
use thiserror::Error;

use conversation::ConversationEntry;

mod gateway;
mod gemini;
mod openai;

pub use gateway::{
    LlmGateway, DEFAULT_TIMEOUT_SECS, DEFAULT_TOPIC_QUESTION, HISTORY_WINDOW, MSG_NO_COMPLETION,
    MSG_PROVIDER_FAILURE,
};
pub use gemini::GeminiProvider;
pub use openai::{OpenAiProvider, GROQ_BASE_URL};

/// Sampling temperature used for every completion request.
pub const TEMPERATURE: f32 = 0.7;

/// Maximum generated output length, in tokens.
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

/// One chat-completion request: a resolved system prompt, a bounded slice of
/// prior conversation, and the current user message. Transient; built by the
/// gateway per call.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub history: Vec<ConversationEntry>,
    pub user_message: String,
}

/// Successful completion: the first generated candidate's text.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub text: String,
}

/// Provider failure classes. The gateway maps each variant to a fixed
/// user-facing string; nothing above the gateway sees these.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport or API failure (network error, non-2xx status, malformed body).
    #[error("provider API error: {0}")]
    Api(String),

    /// The provider answered but produced zero candidates.
    #[error("provider returned no candidates")]
    EmptyResponse,

    /// The call did not finish within the configured deadline.
    #[error("provider call timed out after {0}s")]
    Timeout(u64),
}

/// A chat-completion backend. Implementations own credentials and the model
/// identifier; they translate [`CompletionRequest`] into one API call and
/// report failures explicitly instead of panicking or stringifying.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResponse, ProviderError>;
}

/// Masks an API key for safe logging: first 7 chars + "***" + last 4 chars.
/// Keys of 11 chars or fewer become "***" so no part of them leaks.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}
