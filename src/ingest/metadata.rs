//! Pattern-based metadata extraction.
//!
//! Every field has a defined fallback, so extraction never fails.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::chunking::{DEFAULT_CHUNK_SIZE, SentenceChunker};
use crate::core::DocumentMetadata;
use crate::core::pattern::literal;
use crate::io::take_chars;

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Maximum number of dataset or metric mentions kept.
pub const MAX_MENTIONS: usize = 3;

/// Separator between joined mentions.
const MENTION_SEPARATOR: &str = "; ";

/// "by Jane Doe", "Authors: A, B".
static AUTHOR_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    literal(r"(?i)\b(?:written\s+by|authors?|by)\b:?\s+([^,\n]+(?:,\s*[^,\n]+)*)")
});

/// Leading "Jane Doe" or "Jane Doe and John Roe".
static NAME_LINE: LazyLock<Regex> = LazyLock::new(|| {
    literal(r"^([A-Z][a-z]+[ \t]+[A-Z][a-z]+(?:[ \t]+and[ \t]+[A-Z][a-z]+[ \t]+[A-Z][a-z]+)*)")
});

static YEAR: LazyLock<Regex> = LazyLock::new(|| literal(r"\b(19\d{2}|20\d{2})\b"));

static DATASET: LazyLock<Regex> = LazyLock::new(|| {
    literal(r"(?i)\b(?:datasets?|benchmarks?|corpus|corpora)\s*[:\-]?\s*([^\n,]+)")
});

static METRIC: LazyLock<Regex> = LazyLock::new(|| {
    literal(r"(?i)\b(?:accuracy|precision|recall|F1|RMSE|MAE|AUC|BLEU)\b[:\s=]+[\d.]+%?")
});

/// Derives [`DocumentMetadata`] from document text.
#[derive(Debug, Clone, Copy)]
pub struct MetadataExtractor {
    chunker: SentenceChunker,
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl MetadataExtractor {
    /// Creates an extractor whose `chunk_count` uses `chunk_size`.
    #[must_use]
    pub const fn new(chunk_size: usize) -> Self {
        Self {
            chunker: SentenceChunker::new(chunk_size),
        }
    }

    /// Extracts all metadata fields, chunking the text to count chunks.
    #[must_use]
    pub fn parse(&self, text: &str, filename: &str) -> DocumentMetadata {
        let chunk_count = self.chunker.chunk(text).len();
        build_metadata(text, filename, chunk_count)
    }
}

/// Extracts metadata with the default chunk size.
#[must_use]
pub fn parse_metadata(text: &str, filename: &str) -> DocumentMetadata {
    MetadataExtractor::default().parse(text, filename)
}

/// Builds metadata when the chunk count is already known.
#[must_use]
pub fn build_metadata(text: &str, filename: &str, chunk_count: usize) -> DocumentMetadata {
    DocumentMetadata {
        filename: filename.to_string(),
        title: extract_title(text, filename),
        authors: extract_authors(text),
        year: extract_year(text),
        datasets: extract_datasets(text),
        metrics: extract_metrics(text),
        word_count: text.split_whitespace().count(),
        chunk_count,
    }
}

/// First line of the text, or the file stem when that line is blank.
#[must_use]
pub fn extract_title(text: &str, filename: &str) -> String {
    let first_line = text.split('\n').next().unwrap_or_default().trim();
    let title = take_chars(first_line, MAX_TITLE_CHARS);
    if !title.is_empty() {
        return title.to_string();
    }

    Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| filename.to_string())
}

/// Explicit author phrase, else a leading capitalized-name line.
#[must_use]
pub fn extract_authors(text: &str) -> Option<String> {
    let explicit = AUTHOR_PHRASE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty());
    if explicit.is_some() {
        return explicit;
    }

    NAME_LINE
        .captures(text.trim_start())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// First 4-digit year between 1900 and 2099.
#[must_use]
pub fn extract_year(text: &str) -> Option<String> {
    YEAR.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Up to three dataset/benchmark/corpus mentions.
#[must_use]
pub fn extract_datasets(text: &str) -> Option<String> {
    let mentions: Vec<&str> = DATASET
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .take(MAX_MENTIONS)
        .collect();
    join_mentions(&mentions)
}

/// Up to three metric readings such as `accuracy: 0.92`.
#[must_use]
pub fn extract_metrics(text: &str) -> Option<String> {
    let mentions: Vec<&str> = METRIC
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .take(MAX_MENTIONS)
        .collect();
    join_mentions(&mentions)
}

fn join_mentions(mentions: &[&str]) -> Option<String> {
    if mentions.is_empty() {
        None
    } else {
        Some(mentions.join(MENTION_SEPARATOR))
    }
}
