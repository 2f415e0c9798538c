//! Gemini REST provider: one `models/{model}:generateContent` POST per
//! request via reqwest.

use async_trait::async_trait;
use conversation::Role;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::{
    mask_token, CompletionProvider, CompletionRequest, CompletionResponse, ProviderError,
    MAX_OUTPUT_TOKENS, TEMPERATURE,
};

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Chat-completion provider for the Gemini generateContent API.
#[derive(Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiProvider {
    /// Builds a provider for the given key and model. A `models/` prefix on
    /// the model id is stripped; the API addresses models without it.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        let model = model
            .strip_prefix("models/")
            .map(str::to_string)
            .unwrap_or(model);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Overrides the API base URL (proxies, test servers).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn request_body(request: &CompletionRequest) -> Value {
        let mut contents = Vec::with_capacity(request.history.len() + 1);
        for entry in &request.history {
            let role = match entry.role {
                Role::User => "user",
                Role::Assistant => "model",
            };
            contents.push(json!({
                "role": role,
                "parts": [{ "text": entry.content }],
            }));
        }
        contents.push(json!({
            "role": "user",
            "parts": [{ "text": request.user_message }],
        }));

        json!({
            "system_instruction": { "parts": [{ "text": request.system_prompt }] },
            "contents": contents,
            "generationConfig": {
                "temperature": TEMPERATURE,
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
            },
        })
    }

    /// Extracts the first candidate's text parts, concatenated.
    fn extract_text(response: &Value) -> Option<String> {
        let parts = response
            .get("candidates")?
            .as_array()?
            .first()?
            .get("content")?
            .get("parts")?
            .as_array()?;
        let mut text = String::new();
        for part in parts {
            if let Some(chunk) = part.get("text").and_then(Value::as_str) {
                text.push_str(chunk);
            }
        }
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, self.model, self.api_key
        );
        let body = Self::request_body(&request);

        info!(
            model = %self.model,
            history_len = request.history.len(),
            api_key = %mask_token(&self.api_key),
            "generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Api(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!(
                "generateContent returned {}: {}",
                status, error_text
            )));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Api(e.to_string()))?;
        debug!(response = %response_json, "generateContent response");

        match Self::extract_text(&response_json) {
            Some(text) => Ok(CompletionResponse { text }),
            None => Err(ProviderError::EmptyResponse),
        }
    }
}
