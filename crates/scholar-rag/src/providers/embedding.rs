//! Embedding provider trait for generating text embeddings

use async_trait::async_trait;

use crate::error::Result;

/// Trait for generating text embeddings
///
/// Vectors have fixed dimensionality across all calls within a session;
/// the vector index relies on that invariant.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Load the embedding model. Called once before the first `embed`;
    /// repeated calls are no-ops.
    async fn initialize(&self) -> Result<()>;

    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embedding dimensionality
    fn dimensions(&self) -> usize;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
