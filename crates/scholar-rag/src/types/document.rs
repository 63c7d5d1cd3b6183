//! Document and chunk types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A document whose chunks have been committed to the index.
///
/// Immutable once returned by the ingestion pipeline; removal happens
/// wholesale through the index, keyed by `source_name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID
    pub id: Uuid,
    /// Source name as uploaded (used in citations)
    pub source_name: String,
    /// Number of chunks indexed for this document
    pub chunk_count: u32,
    /// Ingestion timestamp
    pub ingested_at: DateTime<Utc>,
}

/// A bounded fragment of a document's text, the atomic retrieval unit.
///
/// Consecutive chunks of one document overlap by design; ordering carries
/// no meaning once chunks are indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content
    pub text: String,
    /// Source document name
    pub source_name: String,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(text: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_name: source_name.into(),
        }
    }
}
