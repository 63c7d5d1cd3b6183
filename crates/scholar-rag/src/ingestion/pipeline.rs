//! Ingestion pipeline orchestration

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::index::{EmbeddedChunk, VectorIndex};
use crate::providers::{EmbeddingProvider, ExtractionProvider};
use crate::types::{Chunk, Document};

use super::chunker::TextChunker;

/// Drives one document from raw bytes to committed index entries.
///
/// Extraction and embedding are external services; the pipeline owns the
/// chunking and the commit discipline. Documents are independent: a
/// failure aborts only the document being ingested.
pub struct IngestionPipeline {
    chunker: TextChunker,
    extractor: Arc<dyn ExtractionProvider>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<VectorIndex>,
}

impl IngestionPipeline {
    /// Create a pipeline over the shared index and external services
    pub fn new(
        config: &ChunkingConfig,
        extractor: Arc<dyn ExtractionProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<VectorIndex>,
    ) -> Result<Self> {
        Ok(Self {
            chunker: TextChunker::from_config(config)?,
            extractor,
            embedder,
            index,
        })
    }

    /// Extract text from an uploaded file and ingest it under a fresh
    /// document ID
    pub async fn ingest_file(&self, source_name: &str, file_bytes: &[u8]) -> Result<Document> {
        let full_text = self.extractor.extract(file_bytes).await?;
        self.ingest_text(Uuid::new_v4(), source_name, &full_text)
            .await
    }

    /// Chunk and embed `full_text`, committing all entries as one batch.
    ///
    /// Chunk embeddings are requested sequentially and buffered; any
    /// failure aborts before the commit, so the index never holds a
    /// partial document and the returned chunk count always matches the
    /// entries attributed to `source_name`.
    pub async fn ingest_text(
        &self,
        document_id: Uuid,
        source_name: &str,
        full_text: &str,
    ) -> Result<Document> {
        let chunks = self.chunker.chunk(full_text);
        let total = chunks.len();
        tracing::info!("Chunked '{}' into {} chunks", source_name, total);

        let mut batch = Vec::with_capacity(total);
        for (i, text) in chunks.into_iter().enumerate() {
            let embedding = self.embedder.embed(&text).await?;
            tracing::debug!("Embedded chunk {}/{} of '{}'", i + 1, total, source_name);

            batch.push(EmbeddedChunk {
                chunk: Chunk::new(text, source_name),
                embedding,
            });
        }

        let chunk_count = batch.len() as u32;
        self.index.add_entries(batch);
        tracing::info!("Committed {} entries for '{}'", chunk_count, source_name);

        Ok(Document {
            id: document_id,
            source_name: source_name.to_string(),
            chunk_count,
            ingested_at: Utc::now(),
        })
    }
}
