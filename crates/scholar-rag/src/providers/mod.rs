//! Provider abstractions for the external extraction, embedding, and
//! completion services
//!
//! The chat core never looks inside these collaborators; it depends only
//! on the call contracts below. The bundled implementations target a
//! local Ollama server.

pub mod completion;
pub mod embedding;
pub mod extraction;
pub mod ollama;

pub use completion::{CompletionProvider, InitProgress};
pub use embedding::EmbeddingProvider;
pub use extraction::{ExtractionProvider, PlainTextExtractor};
pub use ollama::{OllamaChat, OllamaClient, OllamaEmbedder, OllamaProvider};
