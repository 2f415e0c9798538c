//! OpenAI-compatible provider built on [async-openai]. Also serves Groq,
//! whose chat-completions endpoint speaks the same protocol behind a
//! different base URL.

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use conversation::Role;
use tracing::info;

use crate::{
    mask_token, CompletionProvider, CompletionRequest, CompletionResponse, ProviderError,
    MAX_OUTPUT_TOKENS, TEMPERATURE,
};

/// Groq's OpenAI-compatible API base.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Chat-completion provider for OpenAI-protocol endpoints.
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    model: String,
    /// Kept only so request logs can show the masked key.
    api_key_for_logging: String,
}

impl OpenAiProvider {
    /// Builds a provider against the default OpenAI API base.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let config = OpenAIConfig::new().with_api_key(api_key.clone());
        Self {
            client: Client::with_config(config),
            model: model.into(),
            api_key_for_logging: api_key,
        }
    }

    /// Builds a provider against a compatible endpoint (e.g. [`GROQ_BASE_URL`]
    /// or a proxy).
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let api_key = api_key.into();
        let config = OpenAIConfig::new()
            .with_api_key(api_key.clone())
            .with_api_base(base_url);
        Self {
            client: Client::with_config(config),
            model: model.into(),
            api_key_for_logging: api_key,
        }
    }

    fn build_messages(
        request: &CompletionRequest,
    ) -> Result<Vec<ChatCompletionRequestMessage>, ProviderError> {
        let mut messages: Vec<ChatCompletionRequestMessage> =
            Vec::with_capacity(request.history.len() + 2);
        messages.push(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system_prompt.clone())
                .build()
                .map_err(|e| ProviderError::Api(e.to_string()))?
                .into(),
        );
        for entry in &request.history {
            let message: ChatCompletionRequestMessage = match entry.role {
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(entry.content.clone())
                    .build()
                    .map_err(|e| ProviderError::Api(e.to_string()))?
                    .into(),
                Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(entry.content.clone())
                    .build()
                    .map_err(|e| ProviderError::Api(e.to_string()))?
                    .into(),
            };
            messages.push(message);
        }
        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.user_message.clone())
                .build()
                .map_err(|e| ProviderError::Api(e.to_string()))?
                .into(),
        );
        Ok(messages)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let messages = Self::build_messages(&request)?;

        info!(
            model = %self.model,
            message_count = messages.len(),
            api_key = %mask_token(&self.api_key_for_logging),
            "chat completion request"
        );

        let api_request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(messages)
            .temperature(TEMPERATURE)
            .max_tokens(MAX_OUTPUT_TOKENS)
            .build()
            .map_err(|e| ProviderError::Api(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(api_request)
            .await
            .map_err(|e| ProviderError::Api(e.to_string()))?;

        if let Some(ref usage) = response.usage {
            info!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "chat completion usage"
            );
        }

        match response.choices.first() {
            Some(choice) => Ok(CompletionResponse {
                text: choice.message.content.clone().unwrap_or_default(),
            }),
            None => Err(ProviderError::EmptyResponse),
        }
    }
}
