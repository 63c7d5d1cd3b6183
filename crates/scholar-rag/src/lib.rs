//! scholar-rag: document-grounded chat over an in-memory vector index
//!
//! Upload documents, chunk and embed their text, and answer questions by
//! retrieving the most similar chunks and grounding a language model's
//! reply in them, with source citations. Text extraction, embedding, and
//! completion are external services behind provider traits; this crate
//! owns the chunking, the vector index, and the per-turn orchestration.
//!
//! The index lives in memory and is searched by exhaustive cosine
//! similarity. Ingestion commits a document's chunks all-or-nothing, and
//! a chat turn records history only after the model reply arrives, so
//! every failure is recoverable by retrying the triggering action.

pub mod chat;
pub mod config;
pub mod error;
pub mod index;
pub mod ingestion;
pub mod providers;
pub mod types;

pub use chat::{ChatOrchestrator, PromptBuilder};
pub use config::RagConfig;
pub use error::{Error, Result};
pub use index::{EmbeddedChunk, IndexEntry, IndexStats, SearchResult, VectorIndex};
pub use ingestion::{IngestionPipeline, TextChunker};
pub use types::{ChatResponse, Chunk, ConversationTurn, Document, Role};
