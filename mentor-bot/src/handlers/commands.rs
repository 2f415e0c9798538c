//! Command handlers: /start, /help, /learn, /rules, /ask, /clear.

use tracing::{info, instrument};

use crate::core::Result;

use super::dispatcher::Dispatcher;

const HELP_MESSAGE: &str = "\
📚 FIRST Robotics Mentor Bot - Help

Available Commands:

🏁 /start - Welcome message and introduction

📖 /learn - Browse structured learning topics:
   • Beginner basics (What is FIRST? Robot parts, Team roles)
   • Intermediate topics (Programming, Electronics)
   • Advanced topics (Strategy, Competition prep)

❓ /ask <question> - Ask me any robotics question
   Example: /ask What is a motor controller?

📜 /rules - Official game manual and resources

🔄 /clear - Clear our conversation history

💬 Natural conversation:
You can also just send me any message and I'll respond!
No need to use commands for every question.

Example questions to try:
• How does a robot move?
• What's the difference between FRC and FTC?
• Explain what autonomous mode is
• How do I start learning to program a robot?

Tips:
✅ Ask simple questions to start
✅ Tell me if you need more or less detail
✅ Let me know your experience level

I'm here to help you learn! Don't hesitate to ask anything. 😊";

const LEARN_MESSAGE: &str = "\
📚 Learning Paths

Choose your learning level to explore different topics:

🎯 Beginner - New to robotics? Start here!
   • What is FIRST Robotics?
   • Robot basics and parts
   • Team roles

⚙️ Intermediate - Ready to dive deeper?
   • Programming basics
   • Electronics and wiring
   • Robot mechanisms

🏆 Advanced - Preparing for competition?
   • Competition strategy
   • Autonomous programming
   • Advanced design

Select a level below to get started! 👇";

const RULES_MESSAGE: &str = "\
📜 FTC Game Rules & Resources

Here are the official links for the current season:

🎥 Game Animation & Explanation:
https://youtu.be/LCqWA6gSCXA?feature=shared

📖 Official Game Manual:
https://ftc-resources.firstinspires.org/ftc/game/manual

Make sure to read the manual carefully, especially the game rules part 1 and 2! 🤖";

const ASK_USAGE_MESSAGE: &str = "\
❓ How to use /ask:

Type /ask followed by your question!

Example:
/ask What is a motor controller?

Or just send me any message without a command! 😊";

const CLEAR_MESSAGE: &str = "\
✅ Conversation history cleared! We're starting fresh. 🔄

What would you like to learn about?";

impl Dispatcher {
    /// `/start`: welcome message, personalized with the user's first name.
    #[instrument(skip(self, first_name))]
    pub async fn handle_start(
        &self,
        user_id: i64,
        chat_id: i64,
        first_name: Option<&str>,
    ) -> Result<()> {
        let greeting = match first_name {
            Some(name) => format!("👋 Hi {}! Welcome to the FIRST Robotics Mentor Bot!", name),
            None => "👋 Hi! Welcome to the FIRST Robotics Mentor Bot!".to_string(),
        };
        let welcome = format!(
            "{}\n\n\
            I'm here to help you learn about FIRST Robotics from the ground up. \
            Whether you're brand new to robotics or just getting started with your team, \
            I'll guide you through everything step by step! 🤖\n\n\
            What I can help you with:\n\
            • Understanding what FIRST Robotics is all about\n\
            • Learning robot basics (motors, sensors, mechanisms)\n\
            • Programming concepts for robotics\n\
            • Electronics and wiring\n\
            • Competition strategy\n\
            • Team roles and collaboration\n\n\
            How to use me:\n\
            • Type /learn to explore structured learning paths\n\
            • Type /ask <your question> to ask me anything\n\
            • Or just send me any message with a question!\n\n\
            Ready to start your robotics journey? Let's go! 🚀",
            greeting
        );
        self.bot.send_message(chat_id, &welcome).await?;
        info!(user_id, "user started the bot");
        Ok(())
    }

    /// `/help`: command overview.
    #[instrument(skip(self))]
    pub async fn handle_help(&self, user_id: i64, chat_id: i64) -> Result<()> {
        self.bot.send_message(chat_id, HELP_MESSAGE).await?;
        info!(user_id, "user requested help");
        Ok(())
    }

    /// `/learn`: level-select menu.
    #[instrument(skip(self))]
    pub async fn handle_learn(&self, user_id: i64, chat_id: i64) -> Result<()> {
        self.bot
            .send_menu(chat_id, LEARN_MESSAGE, &Self::level_menu())
            .await?;
        info!(user_id, "user opened learning paths");
        Ok(())
    }

    /// `/rules`: static game-manual resources.
    #[instrument(skip(self))]
    pub async fn handle_rules(&self, user_id: i64, chat_id: i64) -> Result<()> {
        self.bot.send_message(chat_id, RULES_MESSAGE).await?;
        info!(user_id, "user requested rules");
        Ok(())
    }

    /// `/ask <question>`: usage help when the argument is missing, otherwise
    /// the normal question flow. The gateway is never called for an empty
    /// argument.
    #[instrument(skip(self, args))]
    pub async fn handle_ask(&self, user_id: i64, chat_id: i64, args: &str) -> Result<()> {
        let question = args.trim();
        if question.is_empty() {
            self.bot.send_message(chat_id, ASK_USAGE_MESSAGE).await?;
            return Ok(());
        }
        self.process_question(user_id, chat_id, question).await
    }

    /// `/clear`: drop the user's conversation history and confirm.
    #[instrument(skip(self))]
    pub async fn handle_clear(&self, user_id: i64, chat_id: i64) -> Result<()> {
        self.store.clear(user_id).await;
        self.bot.send_message(chat_id, CLEAR_MESSAGE).await?;
        info!(user_id, "user cleared conversation context");
        Ok(())
    }
}
