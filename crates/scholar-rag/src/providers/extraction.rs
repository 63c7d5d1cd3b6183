//! Extraction provider trait for pulling plain text out of uploaded files

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Trait for extracting a document's full text from its raw bytes
#[async_trait]
pub trait ExtractionProvider: Send + Sync {
    /// Extract plain text from an uploaded file
    async fn extract(&self, file_bytes: &[u8]) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// Pass-through extractor for files that already are UTF-8 text
pub struct PlainTextExtractor;

#[async_trait]
impl ExtractionProvider for PlainTextExtractor {
    async fn extract(&self, file_bytes: &[u8]) -> Result<String> {
        String::from_utf8(file_bytes.to_vec())
            .map_err(|e| Error::extraction(format!("file is not valid UTF-8: {e}")))
    }

    fn name(&self) -> &str {
        "plain-text"
    }
}
