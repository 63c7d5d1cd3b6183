//! Prompt assembly for document-grounded chat

use crate::index::SearchResult;
use crate::types::{ConversationTurn, Role};

/// Fixed grounding instruction sent as the system turn of every request
pub const SYSTEM_PROMPT: &str = "You are a precise research assistant. \
Answer the user's question based ONLY on the provided Context. \
If the answer is not in the context, say \"I cannot find this in the documents.\" \
Always cite the source document name.";

/// Builds the context block and the outbound message sequence for a turn
pub struct PromptBuilder;

impl PromptBuilder {
    /// Concatenate retrieved chunks into a labeled context block,
    /// best match first
    pub fn build_context(results: &[SearchResult]) -> String {
        results
            .iter()
            .map(|r| format!("[Source: {}]\n{}", r.entry.source_name, r.entry.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Assemble the system prompt, the trimmed history tail, and the
    /// context-bearing user turn into the outbound message sequence.
    ///
    /// Only the most recent `history_turns` turns are included; older
    /// turns are dropped, not summarized. Without context the user turn
    /// carries the bare query.
    pub fn build_messages(
        query: &str,
        context: &str,
        history: &[ConversationTurn],
        history_turns: usize,
    ) -> Vec<ConversationTurn> {
        let tail_start = history.len().saturating_sub(history_turns);

        let user_content = if context.is_empty() {
            query.to_string()
        } else {
            format!("Context:\n{context}\n\nQuestion: {query}")
        };

        let mut messages = Vec::with_capacity(history.len() - tail_start + 2);
        messages.push(ConversationTurn {
            role: Role::System,
            content: SYSTEM_PROMPT.to_string(),
        });
        messages.extend_from_slice(&history[tail_start..]);
        messages.push(ConversationTurn {
            role: Role::User,
            content: user_content,
        });

        messages
    }
}
