//! Update runner: builds the dptree handler tree (commands, callback
//! queries, free text) and drives the teloxide dispatcher.
//!
//! Each update is handled on its own spawned task so a slow LLM call stalls
//! only that update. Handler errors are logged here; they never stop the
//! dispatch loop.

use std::sync::Arc;

use anyhow::Result;
use teloxide::{
    dispatching::{Dispatcher as UpdateDispatcher, HandlerExt, UpdateFilterExt},
    dptree,
    error_handlers::LoggingErrorHandler,
    prelude::{Requester, ResponseResult},
    types::{CallbackQuery, Message, Update},
    utils::command::BotCommands,
    Bot,
};
use tracing::{debug, error, info, instrument};

use crate::handlers::Dispatcher;

/// Bot commands, matching the menu registered with BotFather.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "welcome message and introduction")]
    Start,
    #[command(description = "show available commands")]
    Help,
    #[command(description = "browse structured learning topics")]
    Learn,
    #[command(description = "official game rules and resources")]
    Rules,
    #[command(description = "ask a robotics question")]
    Ask(String),
    #[command(description = "clear our conversation history")]
    Clear,
}

fn sender_id(msg: &Message) -> i64 {
    msg.from.as_ref().map(|u| u.id.0 as i64).unwrap_or(0)
}

async fn command_endpoint(
    msg: Message,
    cmd: Command,
    dispatcher: Arc<Dispatcher>,
) -> ResponseResult<()> {
    let user_id = sender_id(&msg);
    let chat_id = msg.chat.id.0;
    let first_name = msg.from.as_ref().map(|u| u.first_name.clone());

    info!(user_id, chat_id, "received command");

    tokio::spawn(async move {
        let result = match cmd {
            Command::Start => {
                dispatcher
                    .handle_start(user_id, chat_id, first_name.as_deref())
                    .await
            }
            Command::Help => dispatcher.handle_help(user_id, chat_id).await,
            Command::Learn => dispatcher.handle_learn(user_id, chat_id).await,
            Command::Rules => dispatcher.handle_rules(user_id, chat_id).await,
            Command::Ask(args) => dispatcher.handle_ask(user_id, chat_id, &args).await,
            Command::Clear => dispatcher.handle_clear(user_id, chat_id).await,
        };
        if let Err(e) = result {
            error!(error = %e, user_id, "command handler failed");
        }
    });

    Ok(())
}

async fn callback_endpoint(
    bot: Bot,
    query: CallbackQuery,
    dispatcher: Arc<Dispatcher>,
) -> ResponseResult<()> {
    // Acknowledge the button press so the client stops its spinner.
    bot.answer_callback_query(query.id.clone()).await?;

    let user_id = query.from.id.0 as i64;
    let target = query
        .message
        .as_ref()
        .map(|m| (m.chat().id.0, m.id().to_string()));
    let data = match query.data {
        Some(d) => d,
        None => return Ok(()),
    };

    let Some((chat_id, message_id)) = target else {
        debug!(user_id, "callback without an attached message; ignoring");
        return Ok(());
    };

    info!(user_id, chat_id, data = %data, "received callback");

    tokio::spawn(async move {
        if let Err(e) = dispatcher
            .handle_callback(user_id, chat_id, &message_id, &data)
            .await
        {
            error!(error = %e, user_id, "callback handler failed");
        }
    });

    Ok(())
}

async fn free_text_endpoint(msg: Message, dispatcher: Arc<Dispatcher>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        debug!(chat_id = msg.chat.id.0, "non-text message; ignoring");
        return Ok(());
    };
    // Unknown /commands fall through the command branch; they are not
    // questions.
    if text.starts_with('/') {
        debug!(chat_id = msg.chat.id.0, "unrecognized command; ignoring");
        return Ok(());
    }

    let user_id = sender_id(&msg);
    let chat_id = msg.chat.id.0;
    let text = text.to_string();

    info!(user_id, chat_id, "received message");

    tokio::spawn(async move {
        if let Err(e) = dispatcher.handle_free_text(user_id, chat_id, &text).await {
            error!(error = %e, user_id, "message handler failed");
        }
    });

    Ok(())
}

/// Starts long polling with the given teloxide Bot and dispatcher. Blocks
/// until the process is stopped.
#[instrument(skip(bot, dispatcher))]
pub async fn run_dispatcher(bot: Bot, dispatcher: Arc<Dispatcher>) -> Result<()> {
    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_endpoint),
        )
        .branch(Update::filter_callback_query().endpoint(callback_endpoint))
        .branch(Update::filter_message().endpoint(free_text_endpoint));

    info!("starting dispatcher with long polling");

    UpdateDispatcher::builder(bot, handler)
        .dependencies(dptree::deps![dispatcher])
        .default_handler(|upd| async move {
            debug!(update = ?upd, "unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text("update handler error"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("dispatcher stopped");
    Ok(())
}
