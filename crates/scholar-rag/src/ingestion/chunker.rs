//! Boundary-aware text chunking
//!
//! Splits a document's full text into overlapping chunks cut at sentence
//! or word boundaries where possible, so retrieval units do not start or
//! end mid-sentence more often than necessary.

use crate::config::ChunkingConfig;
use crate::error::{Error, Result};

/// Width of the trailing sub-window scanned for a natural boundary.
const BOUNDARY_WINDOW: usize = 200;

/// Text chunker with configurable size and overlap
#[derive(Debug, Clone)]
pub struct TextChunker {
    /// Target chunk size in characters
    chunk_size: usize,
    /// Overlap between consecutive chunks
    overlap: usize,
    /// Minimum emitted chunk length
    min_chunk_len: usize,
}

impl TextChunker {
    /// Create a chunker with the default minimum chunk length (50).
    ///
    /// Fails with [`Error::InvalidChunkParameters`] unless
    /// `0 < overlap < chunk_size`, the range in which the window is
    /// guaranteed to advance.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        Self::with_min_chunk_len(chunk_size, overlap, 50)
    }

    /// Create a chunker with an explicit minimum emitted-chunk length
    pub fn with_min_chunk_len(
        chunk_size: usize,
        overlap: usize,
        min_chunk_len: usize,
    ) -> Result<Self> {
        if overlap == 0 || overlap >= chunk_size {
            return Err(Error::InvalidChunkParameters {
                chunk_size,
                overlap,
            });
        }

        Ok(Self {
            chunk_size,
            overlap,
            min_chunk_len,
        })
    }

    /// Build a chunker from configuration
    pub fn from_config(config: &ChunkingConfig) -> Result<Self> {
        Self::with_min_chunk_len(
            config.chunk_size,
            config.chunk_overlap,
            config.min_chunk_size,
        )
    }

    /// Split `text` into overlapping chunks.
    ///
    /// Whitespace runs are collapsed to single spaces before the walk, so
    /// offsets are over the normalized text. Consecutive chunks share
    /// `overlap` characters (not necessarily whole words). Fragments
    /// shorter than the minimum length are dropped. Empty input yields no
    /// chunks; input shorter than the chunk size yields at most one.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let normalized = normalize_whitespace(text);
        let chars: Vec<char> = normalized.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;

        loop {
            let end = start + self.chunk_size;
            if end >= chars.len() {
                self.push_chunk(&mut chunks, &chars[start..]);
                break;
            }

            let cut = self.find_cut(&chars, start, end);
            self.push_chunk(&mut chunks, &chars[start..cut]);
            start = cut - self.overlap;
        }

        chunks
    }

    /// Pick the cut point for the window `[start, end)`.
    ///
    /// Scans the trailing sub-window for the last sentence end (period
    /// followed by space, cut kept after the period), then for the last
    /// plain space, then falls back to a hard cut at the window boundary.
    /// A boundary cut that would not move the next start past the current
    /// one falls through to the next strategy, so the walk always
    /// terminates.
    fn find_cut(&self, chars: &[char], start: usize, end: usize) -> usize {
        let scan_from = end.saturating_sub(BOUNDARY_WINDOW).max(start);
        let window = &chars[scan_from..end];
        let floor = start + self.overlap;

        if let Some(i) = rfind_sentence_end(window) {
            let cut = scan_from + i + 1;
            if cut > floor {
                return cut;
            }
        }

        if let Some(i) = rfind_space(window) {
            let cut = scan_from + i;
            if cut > floor {
                return cut;
            }
        }

        end
    }

    fn push_chunk(&self, chunks: &mut Vec<String>, chars: &[char]) {
        let chunk = chars.iter().collect::<String>().trim().to_string();
        if !chunk.is_empty() && chunk.chars().count() >= self.min_chunk_len {
            chunks.push(chunk);
        }
    }
}

/// Collapse whitespace runs to single spaces and trim the ends
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Index of the period of the last `". "` in `window`
fn rfind_sentence_end(window: &[char]) -> Option<usize> {
    (0..window.len().saturating_sub(1))
        .rev()
        .find(|&i| window[i] == '.' && window[i + 1] == ' ')
}

/// Index of the last space in `window`
fn rfind_space(window: &[char]) -> Option<usize> {
    window.iter().rposition(|&c| c == ' ')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chunker(chunk_size: usize, overlap: usize) -> TextChunker {
        TextChunker::with_min_chunk_len(chunk_size, overlap, 1).unwrap()
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let c = chunker(100, 10);
        assert!(c.chunk("").is_empty());
        assert!(c.chunk("  \n\t  ").is_empty());
    }

    #[test]
    fn test_short_text_yields_single_chunk() {
        let c = chunker(100, 10);
        assert_eq!(c.chunk("Hello world"), vec!["Hello world"]);
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let c = chunker(100, 10);
        assert_eq!(
            c.chunk("hello\n\n  world\tagain "),
            vec!["hello world again"]
        );
    }

    #[test]
    fn test_splits_at_sentence_boundary() {
        let text = "The quick brown fox. It jumped over the lazy dog near here.";
        let c = chunker(30, 5);

        assert_eq!(
            c.chunk(text),
            vec![
                "The quick brown fox.",
                "fox. It jumped over the lazy",
                "lazy dog near here.",
            ]
        );
    }

    #[test]
    fn test_splits_at_word_boundary_without_sentences() {
        let text = "alpha beta gamma delta epsilon zeta eta theta";
        let c = chunker(20, 3);

        assert_eq!(
            c.chunk(text),
            vec!["alpha beta gamma", "mma delta epsilon", "lon zeta eta theta"]
        );
    }

    #[test]
    fn test_hard_cut_without_any_boundary() {
        let text = "a".repeat(100);
        let c = chunker(30, 5);

        let chunks = c.chunk(&text);
        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(|chunk| chunk.len() <= 30));
        assert_eq!(chunks[0].len(), 30);
        assert_eq!(chunks[3].len(), 25);
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let text = "one two three four five six seven eight nine ten eleven twelve";
        let c = chunker(25, 6);

        let chunks = c.chunk(text);
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().rev().take(3).collect();
            let tail: String = tail.chars().rev().collect();
            assert!(
                pair[1].contains(tail.trim()),
                "expected '{}' to share text with '{}'",
                pair[1],
                pair[0]
            );
        }
    }

    #[test]
    fn test_minimum_length_filter_drops_fragments() {
        let c = TextChunker::new(800, 100).unwrap();
        assert!(c.chunk("too short").is_empty());

        let kept = "The quick brown fox. It jumped over the lazy dog near here.";
        assert_eq!(c.chunk(kept).len(), 1);
    }

    #[test]
    fn test_invalid_parameters_fail_fast() {
        assert!(matches!(
            TextChunker::new(100, 100),
            Err(Error::InvalidChunkParameters { .. })
        ));
        assert!(matches!(
            TextChunker::new(100, 150),
            Err(Error::InvalidChunkParameters { .. })
        ));
        assert!(matches!(
            TextChunker::new(100, 0),
            Err(Error::InvalidChunkParameters { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_chunking_is_deterministic(
            text in "\\PC{0,400}",
            (chunk_size, overlap) in (10usize..120).prop_flat_map(|cs| (Just(cs), 1usize..cs)),
        ) {
            let c = TextChunker::with_min_chunk_len(chunk_size, overlap, 1).unwrap();
            prop_assert_eq!(c.chunk(&text), c.chunk(&text));
        }

        #[test]
        fn prop_chunks_are_bounded_substrings(
            text in "\\PC{0,400}",
            (chunk_size, overlap) in (10usize..120).prop_flat_map(|cs| (Just(cs), 1usize..cs)),
        ) {
            let c = TextChunker::with_min_chunk_len(chunk_size, overlap, 1).unwrap();
            let normalized = normalize_whitespace(&text);

            for chunk in c.chunk(&text) {
                prop_assert!(!chunk.is_empty());
                prop_assert!(chunk.chars().count() <= chunk_size);
                prop_assert!(normalized.contains(&chunk));
            }
        }

        #[test]
        fn prop_no_chunk_below_minimum_length(
            text in "\\PC{0,400}",
            min_len in 1usize..80,
        ) {
            let c = TextChunker::with_min_chunk_len(60, 12, min_len).unwrap();
            for chunk in c.chunk(&text) {
                prop_assert!(chunk.chars().count() >= min_len);
            }
        }

        #[test]
        fn prop_normalized_words_are_covered(
            words in proptest::collection::vec("[a-z]{1,12}", 0..120),
        ) {
            let text = words.join(" ");
            let c = TextChunker::with_min_chunk_len(40, 8, 1).unwrap();
            let chunks = c.chunk(&text);
            let joined = chunks.join(" ");

            // Word-boundary and hard cuts never discard content, only
            // duplicate it, so every input word survives somewhere.
            for word in &words {
                prop_assert!(joined.contains(word.as_str()));
            }
        }
    }
}
