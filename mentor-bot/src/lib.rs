//! # Mentor bot application
//!
//! Wires the conversation store, LLM gateway, and prompt catalog behind a
//! Telegram front-end. Loads config from env and runs the dispatcher.

pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod handlers;
pub mod keep_alive;
pub mod runner;
pub mod telegram;

pub use crate::cli::{load_config, Cli, Commands};

pub use crate::core::{init_tracing, parse_message_id, Bot, BotError, Menu, MenuButton, Result};

pub use crate::config::{BotConfig, ProviderKind};
pub use crate::handlers::Dispatcher;
pub use crate::runner::run_bot;
pub use crate::telegram::{run_dispatcher, Command, TelegramApi};

pub use crate::components::{build_components, make_provider, BotComponents};
