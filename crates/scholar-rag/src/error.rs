//! Error types for the chat core

use thiserror::Error;

/// Result type alias for chat core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Chat core errors
#[derive(Debug, Error)]
pub enum Error {
    /// Text extraction failed for an uploaded file
    #[error("Text extraction failed: {0}")]
    Extraction(String),

    /// Embedding generation failed
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Completion generation failed
    #[error("Completion generation failed: {0}")]
    Completion(String),

    /// Model (re)initialization failed
    #[error("Model initialization failed: {0}")]
    Initialization(String),

    /// Cosine similarity is undefined for a zero-magnitude query vector
    #[error("Degenerate query vector: magnitude is zero")]
    DegenerateVector,

    /// Chunker parameters under which the window could not advance
    #[error(
        "Invalid chunk parameters: overlap {overlap} must be positive and smaller than chunk size {chunk_size}"
    )]
    InvalidChunkParameters { chunk_size: usize, overlap: usize },

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an extraction error
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction(message.into())
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a completion error
    pub fn completion(message: impl Into<String>) -> Self {
        Self::Completion(message.into())
    }

    /// Create an initialization error
    pub fn initialization(message: impl Into<String>) -> Self {
        Self::Initialization(message.into())
    }
}
