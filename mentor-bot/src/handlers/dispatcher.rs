//! The [`Dispatcher`]: routes commands, free-text questions, and menu
//! callbacks to their handlers.
//!
//! Dependencies (bot transport, LLM gateway, conversation store) are
//! injected at construction; there is no ambient global state. The handler
//! methods themselves live in `commands`, `chat`, and `learning`.

use std::sync::Arc;

use conversation::ConversationStore;
use llm_gateway::LlmGateway;

use crate::core::{Bot, Menu, MenuButton};
use prompt_catalog::Level;

/// Callback-token prefix for picking a difficulty level.
pub const CB_LEVEL_PREFIX: &str = "level-select:";
/// Callback-token prefix for picking a topic.
pub const CB_TOPIC_PREFIX: &str = "topic-select:";
/// Callback token for navigating back to the level menu.
pub const CB_BACK_TO_LEVELS: &str = "back-to-levels";

/// Placeholder shown while a chat completion is in flight.
pub const THINKING_MESSAGE: &str = "🤔 Thinking...\nGenerating mentor response...";

/// Placeholder shown while a lesson is generated.
pub const LESSON_THINKING_MESSAGE: &str =
    "🧠 Mentor is thinking...\n\nPreparing your robotics lesson... 🤖";

/// Routes incoming platform events to handlers. One instance serves all
/// users; it is cheap to clone into per-update tasks.
#[derive(Clone)]
pub struct Dispatcher {
    pub(crate) bot: Arc<dyn Bot>,
    pub(crate) gateway: Arc<LlmGateway>,
    pub(crate) store: ConversationStore,
}

impl Dispatcher {
    /// Builds a dispatcher from its injected collaborators.
    pub fn new(bot: Arc<dyn Bot>, gateway: Arc<LlmGateway>, store: ConversationStore) -> Self {
        Self {
            bot,
            gateway,
            store,
        }
    }

    /// The conversation store (exposed for tests and diagnostics).
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Level-select menu: Beginner and Intermediate on one row, Advanced on
    /// the next.
    pub(crate) fn level_menu() -> Menu {
        Menu::new()
            .row(vec![
                Self::level_button(Level::Beginner),
                Self::level_button(Level::Intermediate),
            ])
            .row(vec![Self::level_button(Level::Advanced)])
    }

    fn level_button(level: Level) -> MenuButton {
        MenuButton::new(
            level.button_label(),
            format!("{}{}", CB_LEVEL_PREFIX, level.as_str()),
        )
    }

    /// Topic menu for a level: one topic per row, then a back row.
    pub(crate) fn topic_menu(level: Level) -> Menu {
        let mut menu = Menu::new();
        for topic in prompt_catalog::topics_for(level) {
            menu = menu.row(vec![MenuButton::new(
                topic.title,
                format!("{}{}", CB_TOPIC_PREFIX, topic.id),
            )]);
        }
        menu.row(vec![MenuButton::new("⬅️ Back to Levels", CB_BACK_TO_LEVELS)])
    }

    /// Back row shown under a generated lesson; leads to the topic's parent
    /// level menu.
    pub(crate) fn back_to_topics_menu(level: Level) -> Menu {
        Menu::new().row(vec![MenuButton::new(
            "⬅️ Back to Topics",
            format!("{}{}", CB_LEVEL_PREFIX, level.as_str()),
        )])
    }
}
