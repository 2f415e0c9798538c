//! Core types and traits: Bot abstraction, menus, error, logger.
//! Transport-agnostic; the Telegram layer implements [`Bot`].

pub mod bot;
pub mod error;
pub mod logger;

pub use bot::{parse_message_id, Bot, Menu, MenuButton};
pub use error::{BotError, Result};
pub use logger::init_tracing;
