//! The core models for keeping track of a chat with the planner.
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::openai::{Message, Role};

/// A single message in the transcript. Never modified after it's
/// created.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(role: Role, content: &str) -> Self {
        Self {
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }
}

impl From<&ChatTurn> for Message {
    fn from(turn: &ChatTurn) -> Self {
        Message::new(turn.role, &turn.content)
    }
}

/// The last `n` turns (or fewer) of `turns` in their original order.
pub fn recent_turns(turns: &[ChatTurn], n: usize) -> std::slice::Iter<'_, ChatTurn> {
    let start = turns.len().saturating_sub(n);
    turns[start..].iter()
}

/// Append-only history of a single chat session in chronological
/// order. The first turn is always the seeded welcome message.
#[derive(Clone, Debug)]
pub struct Transcript(Vec<ChatTurn>);

impl Transcript {
    pub fn seeded(welcome: ChatTurn) -> Self {
        Self(vec![welcome])
    }

    pub fn append(&mut self, turn: ChatTurn) {
        self.0.push(turn)
    }

    /// The last `n` turns (or fewer) in their original order.
    pub fn recent(&self, n: usize) -> std::slice::Iter<'_, ChatTurn> {
        recent_turns(&self.0, n)
    }

    pub fn all(&self) -> &[ChatTurn] {
        &self.0
    }

    /// Drop everything except the welcome turn.
    pub fn clear_to_seed(&mut self) {
        self.0.truncate(1)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
