//! Main entry: validate config, init logging, start keep-alive when
//! configured, assemble components, then run the Telegram dispatcher.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, instrument};

use crate::components::build_components;
use crate::config::BotConfig;
use crate::core::{init_tracing, Bot};
use crate::handlers::Dispatcher;
use crate::keep_alive;
use crate::telegram::{run_dispatcher, TelegramApi};

/// Runs the bot until the process is stopped.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        provider = config.provider.as_str(),
        model = %config.model,
        history_cap = config.history_cap(),
        "starting mentor bot"
    );

    if let Some(port) = config.keep_alive_port {
        keep_alive::spawn(port);
    }

    let teloxide_bot = teloxide::Bot::new(config.bot_token.clone());
    let api: Arc<dyn Bot> = Arc::new(TelegramApi::new(teloxide_bot.clone()));

    let components = build_components(&config);
    let dispatcher = Arc::new(Dispatcher::new(
        api,
        components.gateway,
        components.store,
    ));

    info!("bot started successfully");
    run_dispatcher(teloxide_bot, dispatcher).await
}
