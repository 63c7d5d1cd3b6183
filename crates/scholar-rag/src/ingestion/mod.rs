//! Document ingestion: extraction, chunking, embedding, index commit

mod chunker;
mod pipeline;

pub use chunker::TextChunker;
pub use pipeline::IngestionPipeline;
