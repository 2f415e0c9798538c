//! Component factory: builds the provider, gateway, and store from config.
//! Isolates assembly logic from the runner; the provider is chosen exactly
//! once here.

use std::sync::Arc;

use conversation::ConversationStore;
use llm_gateway::{
    CompletionProvider, GeminiProvider, LlmGateway, OpenAiProvider, GROQ_BASE_URL,
};
use tracing::info;

use crate::config::{BotConfig, ProviderKind};

/// Core dependencies for the dispatcher, produced by the component factory.
pub struct BotComponents {
    pub gateway: Arc<LlmGateway>,
    pub store: ConversationStore,
}

/// Creates the concrete [`CompletionProvider`] selected by config.
pub fn make_provider(config: &BotConfig) -> Arc<dyn CompletionProvider> {
    match config.provider {
        ProviderKind::Groq => {
            let base_url = config.base_url.as_deref().unwrap_or(GROQ_BASE_URL);
            info!(model = %config.model, base_url, "using Groq provider");
            Arc::new(OpenAiProvider::with_base_url(
                config.api_key.clone(),
                config.model.clone(),
                base_url,
            ))
        }
        ProviderKind::OpenAi => {
            info!(model = %config.model, "using OpenAI provider");
            match config.base_url.as_deref() {
                Some(base_url) => Arc::new(OpenAiProvider::with_base_url(
                    config.api_key.clone(),
                    config.model.clone(),
                    base_url,
                )),
                None => Arc::new(OpenAiProvider::new(
                    config.api_key.clone(),
                    config.model.clone(),
                )),
            }
        }
        ProviderKind::Gemini => {
            info!(model = %config.model, "using Gemini provider");
            let provider = GeminiProvider::new(config.api_key.clone(), config.model.clone());
            match config.base_url.as_deref() {
                Some(base_url) => Arc::new(provider.with_api_base(base_url)),
                None => Arc::new(provider),
            }
        }
    }
}

/// Builds the gateway and conversation store from config.
pub fn build_components(config: &BotConfig) -> BotComponents {
    let provider = make_provider(config);
    let gateway = Arc::new(
        LlmGateway::new(provider).with_timeout_secs(config.llm_timeout_secs),
    );
    let store = ConversationStore::with_cap(config.history_cap());
    BotComponents { gateway, store }
}
