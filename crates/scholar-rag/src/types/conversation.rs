//! Conversation types shared with the completion service

use serde::{Deserialize, Serialize};

/// Message author role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Fixed grounding instruction
    System,
    /// End-user query
    User,
    /// Model reply
    Assistant,
}

/// One role-tagged message in a conversation.
///
/// Serializes to the `{ "role": ..., "content": ... }` wire shape used by
/// chat-style completion APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Message author
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ConversationTurn {
    /// Create a system turn
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Answer produced for one chat turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated answer text
    pub answer: String,
    /// Unique source document names behind the answer, best match first
    pub cited_sources: Vec<String>,
}
