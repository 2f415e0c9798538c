//! Learning-path callback handlers: level menus, topic menus, and generated
//! lessons with back navigation.

use prompt_catalog::Level;
use tracing::{debug, info, instrument};

use crate::core::Result;

use super::dispatcher::{
    Dispatcher, CB_BACK_TO_LEVELS, CB_LEVEL_PREFIX, CB_TOPIC_PREFIX, LESSON_THINKING_MESSAGE,
};

const LEVELS_MESSAGE: &str = "\
📚 Learning Paths

Choose your learning level:

🎯 Beginner - New to robotics
⚙️ Intermediate - Ready to dive deeper
🏆 Advanced - Competition preparation

Select a level below! 👇";

const INVALID_LEVEL_MESSAGE: &str = "❌ Invalid learning level.";

impl Dispatcher {
    /// Routes a button callback by its token. Unknown tokens are logged and
    /// ignored; the transport layer has already acknowledged the press.
    #[instrument(skip(self, data))]
    pub async fn handle_callback(
        &self,
        user_id: i64,
        chat_id: i64,
        message_id: &str,
        data: &str,
    ) -> Result<()> {
        if data == CB_BACK_TO_LEVELS {
            return self.show_levels(chat_id, message_id).await;
        }
        if let Some(level) = data.strip_prefix(CB_LEVEL_PREFIX) {
            return self.show_topic_menu(user_id, chat_id, message_id, level).await;
        }
        if let Some(topic_id) = data.strip_prefix(CB_TOPIC_PREFIX) {
            return self
                .show_topic_content(user_id, chat_id, message_id, topic_id)
                .await;
        }
        debug!(user_id, data, "ignoring unknown callback token");
        Ok(())
    }

    /// Replaces the message with the level-select menu.
    async fn show_levels(&self, chat_id: i64, message_id: &str) -> Result<()> {
        self.bot
            .edit_menu(chat_id, message_id, LEVELS_MESSAGE, &Self::level_menu())
            .await
    }

    /// Replaces the message with the topic menu for a level. An unknown
    /// level id gets a visible error, not a crash.
    async fn show_topic_menu(
        &self,
        user_id: i64,
        chat_id: i64,
        message_id: &str,
        level: &str,
    ) -> Result<()> {
        let level: Level = match level.parse() {
            Ok(l) => l,
            Err(()) => {
                return self
                    .bot
                    .edit_message(chat_id, message_id, INVALID_LEVEL_MESSAGE)
                    .await;
            }
        };

        let text = format!("{}\n\nSelect a topic to learn about:", level.title());
        self.bot
            .edit_menu(chat_id, message_id, &text, &Self::topic_menu(level))
            .await?;
        info!(user_id, level = level.as_str(), "user browsing topics");
        Ok(())
    }

    /// Generates lesson content for a topic and replaces the message with it.
    ///
    /// The "back" button leads to the topic's parent level; unknown topic ids
    /// fall back to the Beginner menu and the default persona prompt.
    async fn show_topic_content(
        &self,
        user_id: i64,
        chat_id: i64,
        message_id: &str,
        topic_id: &str,
    ) -> Result<()> {
        self.bot
            .edit_message(chat_id, message_id, LESSON_THINKING_MESSAGE)
            .await?;

        let prompt = prompt_catalog::topic_prompt(topic_id);
        let lesson = self.gateway.get_learning_response(prompt, None).await;

        let back_level = prompt_catalog::level_of(topic_id);
        self.bot
            .edit_menu(
                chat_id,
                message_id,
                &lesson,
                &Self::back_to_topics_menu(back_level),
            )
            .await?;
        info!(user_id, topic_id, "lesson delivered");
        Ok(())
    }
}
