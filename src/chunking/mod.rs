//! Sentence-aware chunking.
//!
//! Splits document text into ordered, overlapping chunks that never break
//! a sentence. Chunks are the unit agents cite as evidence.
//!
//! # Algorithm
//!
//! ```text
//! text → sentences (split after . ! ? + whitespace)
//!      → greedy accumulation up to chunk_size characters
//!      → on overflow: close chunk, seed next with the trailing
//!        30% of chunk_size characters + the triggering sentence
//!      → flush remainder
//! ```

pub mod sentence;

pub use sentence::{SentenceChunker, split_sentences};

use crate::core::Chunk;

/// Default chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Fraction of `chunk_size` carried from a closed chunk into the next one,
/// expressed as a ratio of tenths.
pub const OVERLAP_TENTHS: usize = 3;

/// Number of characters carried over between consecutive chunks.
#[must_use]
pub const fn overlap_for(chunk_size: usize) -> usize {
    chunk_size * OVERLAP_TENTHS / 10
}

/// Splits `text` into chunks of roughly `chunk_size` characters.
///
/// Convenience wrapper around [`SentenceChunker::chunk`].
#[must_use]
pub fn extract_chunks(text: &str, chunk_size: usize) -> Vec<Chunk> {
    SentenceChunker::new(chunk_size).chunk(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_for() {
        assert_eq!(overlap_for(1000), 300);
        assert_eq!(overlap_for(100), 30);
        assert_eq!(overlap_for(15), 4);
        assert_eq!(overlap_for(3), 0);
    }

    #[test]
    fn test_extract_chunks_empty() {
        assert!(extract_chunks("", DEFAULT_CHUNK_SIZE).is_empty());
    }
}
