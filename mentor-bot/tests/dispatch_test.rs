//! Behaviour tests for [`mentor_bot::Dispatcher`].
//!
//! Covers command routing, the placeholder → edit reply pattern, the
//! empty-input no-op, learning-path callbacks with back navigation, and the
//! clear flow. Uses a recording Bot and stub providers; no Telegram, no LLM
//! network calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use conversation::{ConversationStore, Role};
use llm_gateway::{
    CompletionProvider, CompletionRequest, CompletionResponse, LlmGateway, ProviderError,
    DEFAULT_TOPIC_QUESTION, MSG_PROVIDER_FAILURE,
};
use mentor_bot::{Bot, Dispatcher, Menu, Result as BotResult};
use prompt_catalog::DEFAULT_SYSTEM_PROMPT;

const USER: i64 = 123;
const CHAT: i64 = 456;

/// One recorded outbound operation.
#[derive(Debug, Clone, PartialEq)]
enum Op {
    Send { chat_id: i64, text: String },
    SendWithId { chat_id: i64, text: String },
    Edit { chat_id: i64, message_id: String, text: String },
    SendMenu { chat_id: i64, text: String, menu: Menu },
    EditMenu { chat_id: i64, message_id: String, text: String, menu: Menu },
}

/// Recording Bot: no network, returns Ok / sequential message ids.
#[derive(Default)]
struct RecordingBot {
    ops: Mutex<Vec<Op>>,
    next_id: AtomicUsize,
}

impl RecordingBot {
    fn ops(&self) -> Vec<Op> {
        self.ops.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat_id: i64, text: &str) -> BotResult<()> {
        self.ops.lock().unwrap().push(Op::Send {
            chat_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_message_and_return_id(&self, chat_id: i64, text: &str) -> BotResult<String> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.ops.lock().unwrap().push(Op::SendWithId {
            chat_id,
            text: text.to_string(),
        });
        Ok(id.to_string())
    }

    async fn edit_message(&self, chat_id: i64, message_id: &str, text: &str) -> BotResult<()> {
        self.ops.lock().unwrap().push(Op::Edit {
            chat_id,
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_menu(&self, chat_id: i64, text: &str, menu: &Menu) -> BotResult<()> {
        self.ops.lock().unwrap().push(Op::SendMenu {
            chat_id,
            text: text.to_string(),
            menu: menu.clone(),
        });
        Ok(())
    }

    async fn edit_menu(
        &self,
        chat_id: i64,
        message_id: &str,
        text: &str,
        menu: &Menu,
    ) -> BotResult<()> {
        self.ops.lock().unwrap().push(Op::EditMenu {
            chat_id,
            message_id: message_id.to_string(),
            text: text.to_string(),
            menu: menu.clone(),
        });
        Ok(())
    }
}

/// Stub provider: counts calls, records the last request, returns a fixed
/// reply (or a failure when `fail` is set).
struct StubProvider {
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
    reply: String,
    fail: bool,
}

impl StubProvider {
    fn replying(reply: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            reply: reply.to_string(),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::replying("")
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last(&self) -> CompletionRequest {
        self.last_request
            .lock()
            .unwrap()
            .clone()
            .expect("provider was never called")
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        if self.fail {
            Err(ProviderError::Api("boom".to_string()))
        } else {
            Ok(CompletionResponse {
                text: self.reply.clone(),
            })
        }
    }
}

fn make_dispatcher(provider: Arc<StubProvider>) -> (Dispatcher, Arc<RecordingBot>) {
    let bot = Arc::new(RecordingBot::default());
    let gateway = Arc::new(LlmGateway::new(provider));
    let store = ConversationStore::new();
    (
        Dispatcher::new(bot.clone(), gateway, store),
        bot,
    )
}

// --- /ask ---

/// **Test: /ask with no argument sends usage help and never calls the provider.**
#[tokio::test]
async fn test_ask_without_args_sends_usage_only() {
    let provider = Arc::new(StubProvider::replying("unused"));
    let (dispatcher, bot) = make_dispatcher(provider.clone());

    dispatcher.handle_ask(USER, CHAT, "   ").await.unwrap();

    assert_eq!(provider.calls(), 0);
    let ops = bot.ops();
    assert_eq!(ops.len(), 1);
    match &ops[0] {
        Op::Send { text, .. } => assert!(text.contains("How to use /ask")),
        other => panic!("expected usage reply, got {:?}", other),
    }
    assert!(!dispatcher.store().is_tracked(USER).await);
}

/// **Test: /ask with a question runs the normal placeholder → edit flow.**
#[tokio::test]
async fn test_ask_with_args_answers() {
    let provider = Arc::new(StubProvider::replying("motor controllers drive motors"));
    let (dispatcher, bot) = make_dispatcher(provider.clone());

    dispatcher
        .handle_ask(USER, CHAT, "What is a motor controller?")
        .await
        .unwrap();

    assert_eq!(provider.calls(), 1);
    assert_eq!(provider.last().user_message, "What is a motor controller?");
    assert_eq!(bot.ops().len(), 2);
}

// --- free text / end-to-end ---

/// **Test: end-to-end question — one provider call, user+assistant stored in
/// order, exactly two outbound operations (placeholder send, edit-to-final).**
#[tokio::test]
async fn test_free_text_end_to_end() {
    let provider = Arc::new(StubProvider::replying("FIRST is a robotics community."));
    let (dispatcher, bot) = make_dispatcher(provider.clone());

    dispatcher
        .handle_free_text(USER, CHAT, "What is FIRST Robotics?")
        .await
        .unwrap();

    assert_eq!(provider.calls(), 1);

    let history = dispatcher.store().get(USER).await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[0].content, "What is FIRST Robotics?");
    assert_eq!(history[1].role, Role::Assistant);
    assert_eq!(history[1].content, "FIRST is a robotics community.");

    let ops = bot.ops();
    assert_eq!(ops.len(), 2);
    match (&ops[0], &ops[1]) {
        (
            Op::SendWithId { chat_id, text },
            Op::Edit {
                message_id,
                text: final_text,
                ..
            },
        ) => {
            assert_eq!(*chat_id, CHAT);
            assert!(text.contains("Thinking"));
            assert_eq!(message_id, "1");
            assert_eq!(final_text, "FIRST is a robotics community.");
        }
        other => panic!("expected placeholder then edit, got {:?}", other),
    }
}

/// **Test: stored history is sent with the next question.**
#[tokio::test]
async fn test_history_flows_into_next_request() {
    let provider = Arc::new(StubProvider::replying("answer"));
    let (dispatcher, _bot) = make_dispatcher(provider.clone());

    dispatcher.handle_free_text(USER, CHAT, "first question").await.unwrap();
    dispatcher.handle_free_text(USER, CHAT, "second question").await.unwrap();

    let request = provider.last();
    assert_eq!(request.history.len(), 2);
    assert_eq!(request.history[0].content, "first question");
    assert_eq!(request.history[1].content, "answer");
    assert_eq!(request.user_message, "second question");
}

/// **Test: empty or whitespace-only text is silently ignored — no reply, no
/// store mutation, no provider call.**
#[tokio::test]
async fn test_empty_free_text_is_ignored() {
    let provider = Arc::new(StubProvider::replying("unused"));
    let (dispatcher, bot) = make_dispatcher(provider.clone());

    dispatcher.handle_free_text(USER, CHAT, "").await.unwrap();
    dispatcher.handle_free_text(USER, CHAT, "  \n\t ").await.unwrap();

    assert_eq!(provider.calls(), 0);
    assert!(bot.ops().is_empty());
    assert!(!dispatcher.store().is_tracked(USER).await);
}

/// **Test: a failing provider still produces the two-operation pattern, with
/// the apology as the final text — never silence, never a panic.**
#[tokio::test]
async fn test_provider_failure_edits_placeholder_to_apology() {
    let provider = Arc::new(StubProvider::failing());
    let (dispatcher, bot) = make_dispatcher(provider.clone());

    dispatcher
        .handle_free_text(USER, CHAT, "will this fail?")
        .await
        .unwrap();

    let ops = bot.ops();
    assert_eq!(ops.len(), 2);
    match &ops[1] {
        Op::Edit { text, .. } => assert_eq!(text, MSG_PROVIDER_FAILURE),
        other => panic!("expected edit with apology, got {:?}", other),
    }
}

// --- /clear ---

/// **Test: /clear empties the history entirely and confirms to the user.**
#[tokio::test]
async fn test_clear_empties_history_and_confirms() {
    let provider = Arc::new(StubProvider::replying("answer"));
    let (dispatcher, bot) = make_dispatcher(provider.clone());

    dispatcher.handle_free_text(USER, CHAT, "hello").await.unwrap();
    assert!(dispatcher.store().is_tracked(USER).await);

    dispatcher.handle_clear(USER, CHAT).await.unwrap();

    assert!(!dispatcher.store().is_tracked(USER).await);
    match bot.ops().last().unwrap() {
        Op::Send { text, .. } => assert!(text.contains("cleared")),
        other => panic!("expected confirmation send, got {:?}", other),
    }
}

// --- /learn and level callbacks ---

/// **Test: /learn sends the level menu with the three level buttons.**
#[tokio::test]
async fn test_learn_sends_level_menu() {
    let provider = Arc::new(StubProvider::replying("unused"));
    let (dispatcher, bot) = make_dispatcher(provider.clone());

    dispatcher.handle_learn(USER, CHAT).await.unwrap();

    let ops = bot.ops();
    assert_eq!(ops.len(), 1);
    match &ops[0] {
        Op::SendMenu { menu, .. } => {
            let tokens: Vec<&str> = menu
                .rows
                .iter()
                .flatten()
                .map(|b| b.token.as_str())
                .collect();
            assert_eq!(
                tokens,
                vec![
                    "level-select:beginner",
                    "level-select:intermediate",
                    "level-select:advanced"
                ]
            );
        }
        other => panic!("expected level menu, got {:?}", other),
    }
    assert_eq!(provider.calls(), 0);
}

/// **Test: a level callback edits in a topic menu (3 topics + back row), no LLM call.**
#[tokio::test]
async fn test_level_callback_shows_topics() {
    let provider = Arc::new(StubProvider::replying("unused"));
    let (dispatcher, bot) = make_dispatcher(provider.clone());

    dispatcher
        .handle_callback(USER, CHAT, "7", "level-select:advanced")
        .await
        .unwrap();

    assert_eq!(provider.calls(), 0);
    let ops = bot.ops();
    assert_eq!(ops.len(), 1);
    match &ops[0] {
        Op::EditMenu { message_id, menu, .. } => {
            assert_eq!(message_id, "7");
            assert_eq!(menu.rows.len(), 4);
            assert_eq!(menu.rows[0][0].token, "topic-select:competition_strategy");
            assert_eq!(menu.rows[3][0].token, "back-to-levels");
        }
        other => panic!("expected topic menu edit, got {:?}", other),
    }
}

/// **Test: an unknown level id gets a visible invalid-level edit.**
#[tokio::test]
async fn test_invalid_level_callback() {
    let provider = Arc::new(StubProvider::replying("unused"));
    let (dispatcher, bot) = make_dispatcher(provider.clone());

    dispatcher
        .handle_callback(USER, CHAT, "7", "level-select:expert")
        .await
        .unwrap();

    match &bot.ops()[0] {
        Op::Edit { text, .. } => assert!(text.contains("Invalid learning level")),
        other => panic!("expected invalid-level edit, got {:?}", other),
    }
}

/// **Test: back-to-levels re-renders the level menu in place.**
#[tokio::test]
async fn test_back_to_levels_callback() {
    let provider = Arc::new(StubProvider::replying("unused"));
    let (dispatcher, bot) = make_dispatcher(provider.clone());

    dispatcher
        .handle_callback(USER, CHAT, "7", "back-to-levels")
        .await
        .unwrap();

    match &bot.ops()[0] {
        Op::EditMenu { menu, .. } => {
            assert_eq!(menu.rows.len(), 2);
            assert_eq!(menu.rows[1][0].token, "level-select:advanced");
        }
        other => panic!("expected level menu edit, got {:?}", other),
    }
}

// --- topic callbacks ---

/// **Test: a topic callback generates a lesson with the topic prompt, no
/// history, and a back button to the topic's parent level.**
#[tokio::test]
async fn test_topic_callback_generates_lesson_with_back_target() {
    let provider = Arc::new(StubProvider::replying("wiring lesson"));
    let (dispatcher, bot) = make_dispatcher(provider.clone());

    dispatcher
        .handle_callback(USER, CHAT, "9", "topic-select:electronics_basics")
        .await
        .unwrap();

    assert_eq!(provider.calls(), 1);
    let request = provider.last();
    assert_eq!(request.user_message, DEFAULT_TOPIC_QUESTION);
    assert!(request.history.is_empty());
    assert_eq!(
        request.system_prompt,
        prompt_catalog::topic_prompt("electronics_basics")
    );

    let ops = bot.ops();
    assert_eq!(ops.len(), 2);
    match (&ops[0], &ops[1]) {
        (
            Op::Edit { text, .. },
            Op::EditMenu {
                text: lesson, menu, ..
            },
        ) => {
            assert!(text.contains("thinking"));
            assert_eq!(lesson, "wiring lesson");
            // electronics_basics is an intermediate topic.
            assert_eq!(menu.rows[0][0].token, "level-select:intermediate");
        }
        other => panic!("expected thinking edit then lesson, got {:?}", other),
    }
}

/// **Test: an unknown topic id falls back to the default persona and a
/// Beginner back target — a policy, not an error.**
#[tokio::test]
async fn test_unknown_topic_callback_falls_back_to_beginner() {
    let provider = Arc::new(StubProvider::replying("lesson"));
    let (dispatcher, bot) = make_dispatcher(provider.clone());

    dispatcher
        .handle_callback(USER, CHAT, "9", "topic-select:no_such_topic")
        .await
        .unwrap();

    assert_eq!(provider.last().system_prompt, DEFAULT_SYSTEM_PROMPT);
    match bot.ops().last().unwrap() {
        Op::EditMenu { menu, .. } => {
            assert_eq!(menu.rows[0][0].token, "level-select:beginner");
        }
        other => panic!("expected lesson edit, got {:?}", other),
    }
}

/// **Test: unknown callback tokens are ignored without any outbound traffic.**
#[tokio::test]
async fn test_unknown_callback_token_is_ignored() {
    let provider = Arc::new(StubProvider::replying("unused"));
    let (dispatcher, bot) = make_dispatcher(provider.clone());

    dispatcher
        .handle_callback(USER, CHAT, "7", "something-else")
        .await
        .unwrap();

    assert!(bot.ops().is_empty());
    assert_eq!(provider.calls(), 0);
}

// --- /start and /help ---

/// **Test: /start greets the user by first name when available.**
#[tokio::test]
async fn test_start_greets_by_name() {
    let provider = Arc::new(StubProvider::replying("unused"));
    let (dispatcher, bot) = make_dispatcher(provider.clone());

    dispatcher
        .handle_start(USER, CHAT, Some("Ada"))
        .await
        .unwrap();

    match &bot.ops()[0] {
        Op::Send { text, .. } => {
            assert!(text.contains("Hi Ada!"));
            assert!(text.contains("/learn"));
        }
        other => panic!("expected welcome send, got {:?}", other),
    }
}

/// **Test: /help lists the commands.**
#[tokio::test]
async fn test_help_lists_commands() {
    let provider = Arc::new(StubProvider::replying("unused"));
    let (dispatcher, bot) = make_dispatcher(provider.clone());

    dispatcher.handle_help(USER, CHAT).await.unwrap();

    match &bot.ops()[0] {
        Op::Send { text, .. } => {
            for cmd in ["/start", "/learn", "/ask", "/clear"] {
                assert!(text.contains(cmd), "help should mention {}", cmd);
            }
        }
        other => panic!("expected help send, got {:?}", other),
    }
}
