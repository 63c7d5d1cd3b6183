//! Completion provider trait for turning a message sequence into a reply

use async_trait::async_trait;

use crate::config::GenerationOptions;
use crate::error::Result;
use crate::types::ConversationTurn;

/// Progress callback invoked while a model is being (re)initialized,
/// with a fraction in `[0.0, 1.0]`. Generation itself does not stream.
pub type InitProgress = Box<dyn Fn(f32) + Send + Sync>;

/// Trait for chat-style completion backends
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Load the model, optionally reporting download progress.
    /// Repeated calls are no-ops.
    async fn initialize(&self, progress: Option<InitProgress>) -> Result<()>;

    /// Generate a single reply for the supplied role-tagged messages
    async fn complete(
        &self,
        messages: &[ConversationTurn],
        options: &GenerationOptions,
    ) -> Result<String>;

    /// Model identifier in use
    fn model(&self) -> &str;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
