//! Gateway over a [`CompletionProvider`]: builds the bounded message window,
//! enforces the request deadline, and converts every failure into a fixed
//! user-facing string.

use std::sync::Arc;
use std::time::Duration;

use conversation::ConversationEntry;
use prompt_catalog::DEFAULT_SYSTEM_PROMPT;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::{CompletionProvider, CompletionRequest, ProviderError};

/// How many trailing history entries are sent with a request. Independent of
/// (and smaller than) the conversation store's own retention cap.
pub const HISTORY_WINDOW: usize = 6;

/// Reply when the provider produced zero candidates.
pub const MSG_NO_COMPLETION: &str = "I couldn't generate a response.";

/// Reply when the provider call failed or timed out.
pub const MSG_PROVIDER_FAILURE: &str = "Sorry, I'm having trouble connecting to my knowledge base right now. 😅\nPlease try again in a moment.";

/// Question substituted when a learning topic is opened without one.
pub const DEFAULT_TOPIC_QUESTION: &str = "Please teach me about this topic.";

/// Default provider-call deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Failure-containment boundary over the configured provider. Methods return
/// displayable strings and never fail; callers above this type see no
/// provider errors.
#[derive(Clone)]
pub struct LlmGateway {
    provider: Arc<dyn CompletionProvider>,
    timeout_secs: u64,
}

impl LlmGateway {
    /// Creates a gateway with the default request deadline.
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Overrides the provider-call deadline.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Requests a completion for `user_message`.
    ///
    /// The request carries the caller's `system_prompt` (the default mentor
    /// persona when `None`) and at most the last [`HISTORY_WINDOW`] entries of
    /// `history`. On success returns the generated text; on any failure
    /// returns one of the fixed fallback strings.
    pub async fn get_completion(
        &self,
        user_message: &str,
        history: &[ConversationEntry],
        system_prompt: Option<&str>,
    ) -> String {
        let window_start = history.len().saturating_sub(HISTORY_WINDOW);
        let request = CompletionRequest {
            system_prompt: system_prompt.unwrap_or(DEFAULT_SYSTEM_PROMPT).to_string(),
            history: history[window_start..].to_vec(),
            user_message: user_message.to_string(),
        };

        info!(
            history_len = request.history.len(),
            message_len = request.user_message.len(),
            "submitting completion request"
        );

        let outcome = match timeout(
            Duration::from_secs(self.timeout_secs),
            self.provider.complete(request),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout_secs)),
        };

        match outcome {
            Ok(response) => response.text,
            Err(ProviderError::EmptyResponse) => {
                warn!("provider returned zero candidates");
                MSG_NO_COMPLETION.to_string()
            }
            Err(e) => {
                error!(error = %e, "completion request failed");
                MSG_PROVIDER_FAILURE.to_string()
            }
        }
    }

    /// Requests learning content for a topic: `topic_prompt` becomes the
    /// system prompt, no history is sent, and an absent `user_question` is
    /// replaced with [`DEFAULT_TOPIC_QUESTION`].
    pub async fn get_learning_response(
        &self,
        topic_prompt: &str,
        user_question: Option<&str>,
    ) -> String {
        let question = user_question.unwrap_or(DEFAULT_TOPIC_QUESTION);
        self.get_completion(question, &[], Some(topic_prompt)).await
    }
}
