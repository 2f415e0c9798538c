//! Bot configuration, loaded once from environment variables at startup.
//!
//! Required: `TELEGRAM_BOT_TOKEN` and the API key of the selected LLM
//! provider. Everything else has a default. Call [`BotConfig::validate`]
//! after [`BotConfig::load`] to fail fast before any component is built.

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use llm_gateway::GROQ_BASE_URL;

/// Which LLM backend the gateway talks to. Selected once at startup via
/// `LLM_PROVIDER`; there is no per-call switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Groq,
    OpenAi,
    Gemini,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "groq",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
        }
    }

    /// Env var holding this provider's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "GROQ_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
        }
    }

    /// Model used when `LLM_MODEL` is not set.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "llama-3.3-70b-versatile",
            ProviderKind::OpenAi => "gpt-4o-mini",
            ProviderKind::Gemini => "gemini-1.5-flash",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "groq" => Ok(ProviderKind::Groq),
            "openai" => Ok(ProviderKind::OpenAi),
            "gemini" => Ok(ProviderKind::Gemini),
            other => anyhow::bail!(
                "LLM_PROVIDER must be one of groq/openai/gemini, got: {}",
                other
            ),
        }
    }
}

/// Application config: Telegram token, LLM provider selection, history and
/// timeout knobs, logging, optional keep-alive port.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// TELEGRAM_BOT_TOKEN
    pub bot_token: String,
    /// LLM_PROVIDER (default groq)
    pub provider: ProviderKind,
    /// Provider API key (GROQ_API_KEY / OPENAI_API_KEY / GEMINI_API_KEY)
    pub api_key: String,
    /// LLM_MODEL, defaulted per provider
    pub model: String,
    /// LLM_BASE_URL; defaults to Groq's endpoint for the groq provider
    pub base_url: Option<String>,
    /// MAX_CONVERSATION_HISTORY: retained exchanges per user (entries = 2x)
    pub max_history_exchanges: usize,
    /// LLM_TIMEOUT_SECS: outbound provider-call deadline
    pub llm_timeout_secs: u64,
    /// LOG_FILE
    pub log_file: String,
    /// PORT; presence enables the keep-alive endpoint
    pub keep_alive_port: Option<u16>,
}

impl BotConfig {
    /// Loads config from environment variables. `token` overrides
    /// `TELEGRAM_BOT_TOKEN` when provided. Missing required credentials are
    /// fatal here, before anything connects.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("TELEGRAM_BOT_TOKEN").context(
                "TELEGRAM_BOT_TOKEN is not set. Set it in your .env file or environment.",
            )?,
        };

        let provider: ProviderKind = env::var("LLM_PROVIDER")
            .unwrap_or_else(|_| "groq".to_string())
            .parse()?;

        let api_key = env::var(provider.api_key_var()).with_context(|| {
            format!(
                "{} is not set but LLM_PROVIDER={}. Set it in your .env file or environment.",
                provider.api_key_var(),
                provider.as_str()
            )
        })?;

        let model =
            env::var("LLM_MODEL").unwrap_or_else(|_| provider.default_model().to_string());

        let base_url = env::var("LLM_BASE_URL").ok().or_else(|| {
            matches!(provider, ProviderKind::Groq).then(|| GROQ_BASE_URL.to_string())
        });

        let max_history_exchanges = env::var("MAX_CONVERSATION_HISTORY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let llm_timeout_secs = env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);

        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/mentor-bot.log".to_string());

        let keep_alive_port = env::var("PORT").ok().and_then(|s| s.parse().ok());

        Ok(Self {
            bot_token,
            provider,
            api_key,
            model,
            base_url,
            max_history_exchanges,
            llm_timeout_secs,
            log_file,
            keep_alive_port,
        })
    }

    /// Validates config before init (base URL must parse when set).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.base_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!("LLM_BASE_URL is set but not a valid URL: {}", url_str);
            }
        }
        if self.max_history_exchanges == 0 {
            anyhow::bail!("MAX_CONVERSATION_HISTORY must be at least 1");
        }
        Ok(())
    }

    /// Store retention cap in entries (two entries per exchange).
    pub fn history_cap(&self) -> usize {
        self.max_history_exchanges * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "TELEGRAM_BOT_TOKEN",
            "LLM_PROVIDER",
            "GROQ_API_KEY",
            "OPENAI_API_KEY",
            "GEMINI_API_KEY",
            "LLM_MODEL",
            "LLM_BASE_URL",
            "MAX_CONVERSATION_HISTORY",
            "LLM_TIMEOUT_SECS",
            "LOG_FILE",
            "PORT",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_load_config_with_defaults() {
        clear_env();
        env::set_var("TELEGRAM_BOT_TOKEN", "test_token");
        env::set_var("GROQ_API_KEY", "test_key");

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.bot_token, "test_token");
        assert_eq!(config.provider, ProviderKind::Groq);
        assert_eq!(config.api_key, "test_key");
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.base_url.as_deref(), Some(GROQ_BASE_URL));
        assert_eq!(config.max_history_exchanges, 10);
        assert_eq!(config.history_cap(), 20);
        assert_eq!(config.llm_timeout_secs, 60);
        assert_eq!(config.log_file, "logs/mentor-bot.log");
        assert!(config.keep_alive_port.is_none());
        config.validate().unwrap();
    }

    #[test]
    #[serial]
    fn test_load_config_missing_bot_token_fails() {
        clear_env();
        env::set_var("GROQ_API_KEY", "test_key");
        assert!(BotConfig::load(None).is_err());
    }

    #[test]
    #[serial]
    fn test_load_config_missing_provider_key_fails() {
        clear_env();
        env::set_var("TELEGRAM_BOT_TOKEN", "test_token");
        env::set_var("LLM_PROVIDER", "gemini");
        let err = BotConfig::load(None).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    #[serial]
    fn test_load_config_token_override_and_custom_values() {
        clear_env();
        env::set_var("LLM_PROVIDER", "openai");
        env::set_var("OPENAI_API_KEY", "custom_key");
        env::set_var("LLM_MODEL", "gpt-4o");
        env::set_var("MAX_CONVERSATION_HISTORY", "3");
        env::set_var("LLM_TIMEOUT_SECS", "5");
        env::set_var("PORT", "8080");

        let config = BotConfig::load(Some("cli_token".to_string())).unwrap();

        assert_eq!(config.bot_token, "cli_token");
        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.model, "gpt-4o");
        assert!(config.base_url.is_none());
        assert_eq!(config.history_cap(), 6);
        assert_eq!(config.llm_timeout_secs, 5);
        assert_eq!(config.keep_alive_port, Some(8080));
    }

    #[test]
    #[serial]
    fn test_validate_rejects_bad_base_url() {
        clear_env();
        env::set_var("TELEGRAM_BOT_TOKEN", "t");
        env::set_var("GROQ_API_KEY", "k");
        env::set_var("LLM_BASE_URL", "not a url");

        let config = BotConfig::load(None).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_unknown_provider_fails() {
        clear_env();
        env::set_var("TELEGRAM_BOT_TOKEN", "t");
        env::set_var("LLM_PROVIDER", "llamafile");
        assert!(BotConfig::load(None).is_err());
    }
}
