//! Retrieval-augmented chat orchestration

mod prompt;

pub use prompt::{PromptBuilder, SYSTEM_PROMPT};

use std::sync::Arc;

use crate::config::{GenerationOptions, RetrievalConfig};
use crate::error::Result;
use crate::index::VectorIndex;
use crate::providers::{CompletionProvider, EmbeddingProvider};
use crate::types::{ChatResponse, ConversationTurn};

/// Orchestrates one chat turn: retrieve, prompt, complete, record.
///
/// Owns the short-term conversation history. The full history is kept;
/// only the most recent `history_turns` turns travel with each request.
/// One turn runs to completion before the next begins, so no locking is
/// needed beyond the index's own.
pub struct ChatOrchestrator {
    embedder: Arc<dyn EmbeddingProvider>,
    completer: Arc<dyn CompletionProvider>,
    index: Arc<VectorIndex>,
    retrieval: RetrievalConfig,
    generation: GenerationOptions,
    history: Vec<ConversationTurn>,
}

impl ChatOrchestrator {
    /// Create an orchestrator over the shared index and external services
    pub fn new(
        retrieval: RetrievalConfig,
        generation: GenerationOptions,
        embedder: Arc<dyn EmbeddingProvider>,
        completer: Arc<dyn CompletionProvider>,
        index: Arc<VectorIndex>,
    ) -> Self {
        Self {
            embedder,
            completer,
            index,
            retrieval,
            generation,
            history: Vec::new(),
        }
    }

    /// Answer `query` from the indexed documents.
    ///
    /// Returns `Ok(None)` for a whitespace-only query. History is updated
    /// only after the completion service succeeds, so a failed turn
    /// leaves the conversation unchanged and can simply be retried.
    pub async fn answer(&mut self, query: &str) -> Result<Option<ChatResponse>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let query_embedding = self.embedder.embed(query).await?;
        let results = self
            .index
            .search(&query_embedding, self.retrieval.top_k)?;

        let context = PromptBuilder::build_context(&results);
        let messages = PromptBuilder::build_messages(
            query,
            &context,
            &self.history,
            self.retrieval.history_turns,
        );

        tracing::info!(
            "Answering query with {} retrieved chunks",
            results.len()
        );
        let answer = self.completer.complete(&messages, &self.generation).await?;

        self.history.push(ConversationTurn::user(query));
        self.history.push(ConversationTurn::assistant(answer.clone()));

        let mut cited_sources: Vec<String> = Vec::new();
        for result in &results {
            if !cited_sources.contains(&result.entry.source_name) {
                cited_sources.push(result.entry.source_name.clone());
            }
        }

        Ok(Some(ChatResponse {
            answer,
            cited_sources,
        }))
    }

    /// Turns recorded so far, oldest first
    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    /// Forget the recorded conversation
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
