//! # Conversation store
//!
//! In-memory mapping from user id to that user's recent conversation history.
//!
//! Histories are bounded: when an append pushes a history past the configured
//! cap, the oldest entries are dropped first (sliding window). An entry is
//! created lazily on a user's first append and removed entirely by
//! [`ConversationStore::clear`]. Nothing is persisted; state lives for the
//! lifetime of the process.
//!
//! ## Thread safety
//!
//! The store uses `Arc<RwLock<>>` so it can be cloned into concurrently
//! running update tasks. Each operation is atomic under the lock, but a
//! caller's read → LLM call → write sequence is not a transaction: two
//! in-flight requests from the same user may interleave, and both will append
//! when they complete. [`ConversationStore::append_exchange`] keeps the two
//! entries of one exchange contiguous by writing them under a single lock
//! acquisition.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Default retained history length in entries (10 exchanges).
pub const DEFAULT_HISTORY_CAP: usize = 20;

/// Who authored a conversation entry. Maps one-to-one onto chat-API `role`
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// The chat-API `role` string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One turn of a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: Role,
    pub content: String,
}

impl ConversationEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Bounded per-user conversation histories, keyed by user id.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    histories: Arc<RwLock<HashMap<i64, Vec<ConversationEntry>>>>,
    cap: usize,
}

impl ConversationStore {
    /// Creates an empty store with [`DEFAULT_HISTORY_CAP`].
    pub fn new() -> Self {
        Self::with_cap(DEFAULT_HISTORY_CAP)
    }

    /// Creates an empty store retaining at most `cap` entries per user.
    pub fn with_cap(cap: usize) -> Self {
        Self {
            histories: Arc::new(RwLock::new(HashMap::new())),
            cap,
        }
    }

    /// Retained-entry cap per user.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Appends one entry to a user's history, creating the history when the
    /// user is new, then drops the oldest entries beyond the cap.
    pub async fn append(&self, user_id: i64, role: Role, content: impl Into<String>) {
        let mut histories = self.histories.write().await;
        let history = histories.entry(user_id).or_default();
        history.push(ConversationEntry {
            role,
            content: content.into(),
        });
        Self::truncate_front(history, self.cap);
        debug!(user_id, len = history.len(), role = role.as_str(), "history entry appended");
    }

    /// Appends a user question and the assistant answer as one unit, under a
    /// single lock acquisition, so the pair stays contiguous even when other
    /// tasks append concurrently.
    pub async fn append_exchange(
        &self,
        user_id: i64,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) {
        let mut histories = self.histories.write().await;
        let history = histories.entry(user_id).or_default();
        history.push(ConversationEntry::user(question));
        history.push(ConversationEntry::assistant(answer));
        Self::truncate_front(history, self.cap);
        debug!(user_id, len = history.len(), "exchange appended");
    }

    /// Returns a copy of the user's current history; empty when the user is
    /// unknown. Never fails.
    pub async fn get(&self, user_id: i64) -> Vec<ConversationEntry> {
        let histories = self.histories.read().await;
        histories.get(&user_id).cloned().unwrap_or_default()
    }

    /// Removes the user's history entirely. Clearing an unknown user is a
    /// no-op.
    pub async fn clear(&self, user_id: i64) {
        let mut histories = self.histories.write().await;
        if histories.remove(&user_id).is_some() {
            info!(user_id, "conversation history cleared");
        }
    }

    /// Current history length for a user (0 when unknown).
    pub async fn len(&self, user_id: i64) -> usize {
        let histories = self.histories.read().await;
        histories.get(&user_id).map(Vec::len).unwrap_or(0)
    }

    /// Whether the store currently holds a history for the user.
    pub async fn is_tracked(&self, user_id: i64) -> bool {
        let histories = self.histories.read().await;
        histories.contains_key(&user_id)
    }

    fn truncate_front(history: &mut Vec<ConversationEntry>, cap: usize) {
        if history.len() > cap {
            let overflow = history.len() - cap;
            history.drain(..overflow);
        }
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}
