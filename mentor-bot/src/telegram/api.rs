//! Wraps `teloxide::Bot` and implements [`crate::core::Bot`]. Production
//! code sends through Telegram; tests substitute a recording Bot impl.

use async_trait::async_trait;
use teloxide::{
    payloads::{EditMessageTextSetters, SendMessageSetters},
    prelude::Requester,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId},
};

use crate::core::{parse_message_id, Bot as CoreBot, BotError, Menu, Result};

/// Thin wrapper around `teloxide::Bot` that implements the core Bot trait.
pub struct TelegramApi {
    bot: teloxide::Bot,
}

impl TelegramApi {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }

    fn keyboard(menu: &Menu) -> InlineKeyboardMarkup {
        InlineKeyboardMarkup::new(menu.rows.iter().map(|row| {
            row.iter()
                .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.token.clone()))
                .collect::<Vec<_>>()
        }))
    }
}

#[async_trait]
impl CoreBot for TelegramApi {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text.to_string())
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn send_message_and_return_id(&self, chat_id: i64, text: &str) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat_id), text.to_string())
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn edit_message(&self, chat_id: i64, message_id: &str, text: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(ChatId(chat_id), MessageId(id), text)
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn send_menu(&self, chat_id: i64, text: &str, menu: &Menu) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text.to_string())
            .reply_markup(Self::keyboard(menu))
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn edit_menu(
        &self,
        chat_id: i64,
        message_id: &str,
        text: &str,
        menu: &Menu,
    ) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(ChatId(chat_id), MessageId(id), text)
            .reply_markup(Self::keyboard(menu))
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }
}
