//! Bot abstraction for outbound operations: plain sends, edit-in-place, and
//! inline menus.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in
//! [`crate::telegram`]. Tests substitute recording stubs.

use async_trait::async_trait;

use super::error::{BotError, Result};

/// One inline-menu button: a visible label and the callback token delivered
/// back when it is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
    pub label: String,
    pub token: String,
}

impl MenuButton {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// An inline menu: ordered rows of buttons attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    pub rows: Vec<Vec<MenuButton>>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row of buttons.
    pub fn row(mut self, buttons: Vec<MenuButton>) -> Self {
        self.rows.push(buttons);
        self
    }
}

/// Abstraction for sending and editing messages. Implementations map to a
/// transport (e.g. Telegram); message ids are transport-specific strings.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;

    /// Sends a message and returns its id for a later [`Bot::edit_message`]
    /// (the placeholder → final-text pattern).
    async fn send_message_and_return_id(&self, chat_id: i64, text: &str) -> Result<String>;

    /// Edits an already-sent message in place.
    async fn edit_message(&self, chat_id: i64, message_id: &str, text: &str) -> Result<()>;

    /// Sends a message with an attached inline menu.
    async fn send_menu(&self, chat_id: i64, text: &str, menu: &Menu) -> Result<()>;

    /// Edits a message in place, replacing both text and menu.
    async fn edit_menu(&self, chat_id: i64, message_id: &str, text: &str, menu: &Menu)
        -> Result<()>;
}

/// Parses a transport message id string into an i32. Used by edit operations.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| BotError::Transport(format!("Invalid message_id for edit: {}", s)))
}
