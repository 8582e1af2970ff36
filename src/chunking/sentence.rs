//! Greedy sentence-accumulating chunker.

use std::sync::LazyLock;

use regex::Regex;

use super::overlap_for;
use crate::core::Chunk;
use crate::core::pattern::literal;
use crate::io::last_chars;

/// A sentence ends at `.`, `!` or `?` followed by whitespace.
static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| literal(r"[.!?]\s+"));

/// Page delimiter inserted by the PDF extractor.
static PAGE_MARKER: LazyLock<Regex> = LazyLock::new(|| literal(r"--- Page (\d+) ---"));

/// Splits text into sentences.
///
/// The terminator stays with its sentence; the whitespace run after it is
/// dropped. Text without terminators is a single sentence, and empty text
/// yields one empty sentence.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_BREAK.find_iter(text) {
        // Terminators are single-byte ASCII.
        sentences.push(&text[start..=m.start()]);
        start = m.end();
    }
    sentences.push(&text[start..]);
    sentences
}

/// Chunker that closes chunks only at sentence boundaries.
///
/// A sentence longer than `chunk_size` is never truncated; it forms its
/// own chunk (plus any overlap carried into it).
#[derive(Debug, Clone, Copy)]
pub struct SentenceChunker {
    chunk_size: usize,
}

impl SentenceChunker {
    /// Creates a chunker targeting `chunk_size` characters per chunk.
    #[must_use]
    pub const fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    /// Target chunk size in characters.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Splits `text` into ordered chunks with contiguous ids from 0.
    #[must_use]
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let overlap = overlap_for(self.chunk_size);
        let mut out = ChunkSink::default();

        let mut current = String::new();
        let mut current_size = 0usize;
        let mut current_page: Option<u32> = None;
        let mut chunk_page: Option<u32> = None;

        for sentence in split_sentences(text) {
            let len = sentence.chars().count();

            if current_size + len > self.chunk_size && !current.is_empty() {
                out.push(&current, chunk_page);

                let carried = last_chars(&current, overlap).to_string();
                current = format!("{carried} {sentence}");
                current_size = current.chars().count();
                chunk_page = leading_page(sentence).or(current_page);
            } else {
                if current.is_empty() {
                    chunk_page = leading_page(sentence).or(current_page);
                }
                current.push(' ');
                current.push_str(sentence);
                current_size += len;
            }

            if let Some(page) = last_page(sentence) {
                current_page = Some(page);
            }
        }

        if !current.trim().is_empty() {
            out.push(&current, chunk_page);
        }

        out.chunks
    }
}

/// Accumulates closed chunks and assigns ids and offsets.
#[derive(Default)]
struct ChunkSink {
    chunks: Vec<Chunk>,
    /// Character length of all emitted contents joined with `\n`.
    joined_len: usize,
}

impl ChunkSink {
    fn push(&mut self, raw: &str, page_num: Option<u32>) {
        let content = raw.trim().to_string();
        let start_char = self.joined_len;
        let len = content.chars().count();
        self.joined_len = if self.chunks.is_empty() {
            len
        } else {
            self.joined_len + 1 + len
        };
        self.chunks.push(Chunk {
            content,
            chunk_id: self.chunks.len(),
            page_num,
            start_char,
        });
    }
}

/// Page of a marker that opens the sentence, before any other text.
fn leading_page(sentence: &str) -> Option<u32> {
    let mut rest = sentence.trim_start();
    let mut page = None;
    while let Some(caps) = PAGE_MARKER.captures(rest) {
        let Some(whole) = caps.get(0) else { break };
        if whole.start() != 0 {
            break;
        }
        page = caps.get(1).and_then(|m| m.as_str().parse().ok()).or(page);
        rest = rest[whole.end()..].trim_start();
    }
    page
}

/// Page of the last marker anywhere in the sentence.
fn last_page(sentence: &str) -> Option<u32> {
    PAGE_MARKER
        .captures_iter(sentence)
        .filter_map(|caps| caps.get(1).and_then(|m| m.as_str().parse().ok()))
        .last()
}
