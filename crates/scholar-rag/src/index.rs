//! In-memory vector index with exhaustive cosine-similarity search

use parking_lot::RwLock;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::Chunk;

/// A chunk paired with its embedding, ready for insertion
#[derive(Debug, Clone)]
pub struct EmbeddedChunk {
    /// The chunk text and source
    pub chunk: Chunk,
    /// Embedding vector for the chunk text
    pub embedding: Vec<f32>,
}

/// An indexed chunk. Owned by the index and never mutated after insertion;
/// entries leave the index only through `remove_by_source` or `clear`.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// Unique entry ID, assigned at insertion
    pub id: Uuid,
    /// Chunk text
    pub text: String,
    /// Embedding vector
    pub embedding: Vec<f32>,
    /// Source document name
    pub source_name: String,
}

/// Search result with entry and similarity
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched entry
    pub entry: IndexEntry,
    /// Cosine similarity against the query (higher is better)
    pub similarity: f32,
}

/// Index counters
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndexStats {
    /// Number of entries currently stored
    pub count: usize,
}

/// In-memory vector store ranked by exhaustive cosine similarity.
///
/// Every search scans every stored embedding; there is no approximate
/// structure. Entries keep insertion order internally, which also breaks
/// score ties. Interior locking lets the index be shared as
/// `Arc<VectorIndex>` between ingestion and retrieval; a search sees all
/// of a batch insertion or none of it.
///
/// Embedding dimensionality is fixed by the embedding service. The index
/// relies on it being uniform but does not enforce it.
#[derive(Default)]
pub struct VectorIndex {
    entries: RwLock<Vec<IndexEntry>>,
}

impl VectorIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a batch of embedded chunks, assigning each a fresh ID
    pub fn add_entries(&self, batch: Vec<EmbeddedChunk>) {
        let mut entries = self.entries.write();
        entries.reserve(batch.len());
        for item in batch {
            entries.push(IndexEntry {
                id: Uuid::new_v4(),
                text: item.chunk.text,
                embedding: item.embedding,
                source_name: item.chunk.source_name,
            });
        }
    }

    /// Remove every entry attributed to `source_name`; no-op when none match
    pub fn remove_by_source(&self, source_name: &str) {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|entry| entry.source_name != source_name);
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!("Removed {} entries for source '{}'", removed, source_name);
        }
    }

    /// Rank all stored entries against `query_embedding` and return the
    /// best `top_k`, sorted by strictly non-increasing similarity.
    ///
    /// An empty index yields an empty result. A zero-magnitude query makes
    /// every score meaningless and fails with [`Error::DegenerateVector`];
    /// a zero-magnitude *stored* embedding instead scores 0.0, so one bad
    /// entry cannot fail a whole search.
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        let entries = self.entries.read();
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        if magnitude(query_embedding) == 0.0 {
            return Err(Error::DegenerateVector);
        }

        let mut results: Vec<SearchResult> = entries
            .iter()
            .map(|entry| SearchResult {
                entry: entry.clone(),
                similarity: cosine_similarity(query_embedding, &entry.embedding),
            })
            .collect();

        // Stable sort keeps insertion order between equal scores.
        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        Ok(results)
    }

    /// Drop all entries
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Current index counters
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            count: self.entries.read().len(),
        }
    }

    /// Check if the index holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Cosine similarity between two vectors.
///
/// A zero-magnitude operand yields 0.0 rather than dividing by zero.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = magnitude(a);
    let norm_b = magnitude(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedded(text: &str, source: &str, embedding: Vec<f32>) -> EmbeddedChunk {
        EmbeddedChunk {
            chunk: Chunk::new(text, source),
            embedding,
        }
    }

    #[test]
    fn test_orthogonal_vectors_rank_by_similarity() {
        let index = VectorIndex::new();
        index.add_entries(vec![
            embedded("first", "a.pdf", vec![1.0, 0.0]),
            embedded("second", "b.pdf", vec![0.0, 1.0]),
        ]);

        let results = index.search(&[1.0, 0.0], 5).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].entry.text, "first");
        assert!((results[0].similarity - 1.0).abs() < 1e-6);
        assert_eq!(results[1].entry.text, "second");
        assert!(results[1].similarity.abs() < 1e-6);
    }

    #[test]
    fn test_empty_index_returns_empty() {
        let index = VectorIndex::new();
        let results = index.search(&[1.0, 0.0], 3).unwrap();
        assert!(results.is_empty());

        // Even a degenerate query is not an error against an empty index.
        let results = index.search(&[0.0, 0.0], 3).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_degenerate_query_fails() {
        let index = VectorIndex::new();
        index.add_entries(vec![embedded("text", "a.pdf", vec![1.0, 0.0])]);

        let err = index.search(&[0.0, 0.0], 3).unwrap_err();
        assert!(matches!(err, Error::DegenerateVector));
    }

    #[test]
    fn test_zero_magnitude_entry_scores_zero() {
        let index = VectorIndex::new();
        index.add_entries(vec![
            embedded("degenerate", "a.pdf", vec![0.0, 0.0]),
            embedded("aligned", "a.pdf", vec![2.0, 0.0]),
        ]);

        let results = index.search(&[1.0, 0.0], 5).unwrap();
        assert_eq!(results[0].entry.text, "aligned");
        assert!((results[0].similarity - 1.0).abs() < 1e-6);
        assert_eq!(results[1].entry.text, "degenerate");
        assert_eq!(results[1].similarity, 0.0);
    }

    #[test]
    fn test_top_k_bounds_result_length() {
        let index = VectorIndex::new();
        index.add_entries(
            (0..5)
                .map(|i| embedded(&format!("t{i}"), "a.pdf", vec![1.0, i as f32]))
                .collect(),
        );

        let results = index.search(&[1.0, 1.0], 2).unwrap();
        assert_eq!(results.len(), 2);
        for pair in results.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let index = VectorIndex::new();
        index.add_entries(vec![
            embedded("t0", "a.pdf", vec![1.0, 0.0]),
            embedded("t1", "a.pdf", vec![1.0, 0.0]),
            embedded("t2", "a.pdf", vec![1.0, 0.0]),
        ]);

        let results = index.search(&[1.0, 0.0], 3).unwrap();
        let texts: Vec<&str> = results.iter().map(|r| r.entry.text.as_str()).collect();
        assert_eq!(texts, vec!["t0", "t1", "t2"]);
    }

    #[test]
    fn test_remove_by_source() {
        let index = VectorIndex::new();
        index.add_entries(vec![
            embedded("a1", "a.pdf", vec![1.0, 0.0]),
            embedded("b1", "b.pdf", vec![1.0, 0.0]),
            embedded("a2", "a.pdf", vec![0.0, 1.0]),
        ]);
        assert_eq!(index.stats().count, 3);

        index.remove_by_source("a.pdf");
        assert_eq!(index.stats().count, 1);

        let results = index.search(&[1.0, 1.0], 10).unwrap();
        assert!(results.iter().all(|r| r.entry.source_name != "a.pdf"));

        // Removing an unknown source is a no-op.
        index.remove_by_source("missing.pdf");
        assert_eq!(index.stats().count, 1);
    }

    #[test]
    fn test_clear() {
        let index = VectorIndex::new();
        index.add_entries(vec![embedded("a1", "a.pdf", vec![1.0])]);
        assert!(!index.is_empty());

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.stats().count, 0);
    }

    #[test]
    fn test_entries_get_unique_ids() {
        let index = VectorIndex::new();
        index.add_entries(vec![
            embedded("a1", "a.pdf", vec![1.0, 0.0]),
            embedded("a2", "a.pdf", vec![1.0, 0.0]),
        ]);

        let results = index.search(&[1.0, 0.0], 2).unwrap();
        assert_ne!(results[0].entry.id, results[1].entry.id);
    }
}
