//! Free-text conversation flow: thinking placeholder, gateway call, history
//! update, edit-in-place to the final reply.

use tracing::{error, info, instrument, warn};

use crate::core::Result;

use super::dispatcher::{Dispatcher, THINKING_MESSAGE};

impl Dispatcher {
    /// Any non-command text message. Empty or whitespace-only input is
    /// silently ignored: no reply, no store mutation, no gateway call.
    #[instrument(skip(self, text))]
    pub async fn handle_free_text(&self, user_id: i64, chat_id: i64, text: &str) -> Result<()> {
        let question = text.trim();
        if question.is_empty() {
            return Ok(());
        }
        self.process_question(user_id, chat_id, question).await
    }

    /// The shared question pipeline for `/ask` and free text.
    ///
    /// Exactly two outbound operations per request: the placeholder send,
    /// then one edit carrying either the reply or the gateway's normalized
    /// failure message. The user and assistant entries are appended to the
    /// store in that order before the edit.
    pub(crate) async fn process_question(
        &self,
        user_id: i64,
        chat_id: i64,
        question: &str,
    ) -> Result<()> {
        let placeholder_id = self
            .bot
            .send_message_and_return_id(chat_id, THINKING_MESSAGE)
            .await?;

        let history = self.store.get(user_id).await;
        let reply = self.gateway.get_completion(question, &history, None).await;

        self.store.append_exchange(user_id, question, &reply).await;

        if let Err(e) = self.bot.edit_message(chat_id, &placeholder_id, &reply).await {
            warn!(error = %e, user_id, "placeholder edit failed; sending reply as a new message");
            if let Err(e) = self.bot.send_message(chat_id, &reply).await {
                error!(error = %e, user_id, "failed to deliver reply");
                return Err(e);
            }
        }

        let history_len = self.store.len(user_id).await;
        info!(
            user_id,
            question_len = question.len(),
            history_len,
            "question answered"
        );
        Ok(())
    }
}
