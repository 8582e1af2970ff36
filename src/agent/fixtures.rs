//! Shared builders for agent unit tests.

use chrono::{DateTime, Utc};

use super::context::RoundContext;
use super::message::AgentMessage;
use crate::core::{CitationStrictness, Chunk, Corpus, Document, FixedClock};
use crate::ingest::{DocumentProcessor, RawDocument, build_metadata};

pub static CLOCK: FixedClock = FixedClock(DateTime::<Utc>::UNIX_EPOCH);

/// Corpus of synthetic documents, each with exactly the given chunk count.
pub fn corpus(specs: &[(&str, usize)]) -> Corpus {
    let mut corpus = Corpus::default();
    for (i, (filename, n_chunks)) in specs.iter().enumerate() {
        let chunks: Vec<Chunk> = (0..*n_chunks)
            .map(|j| Chunk {
                content: format!("Section {j} of {filename}. {}", "Lorem ipsum dolor. ".repeat(12)),
                chunk_id: j,
                page_num: None,
                start_char: 0,
            })
            .collect();
        let content = chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let metadata = build_metadata(&content, filename, chunks.len());
        corpus.insert(
            Document {
                id: format!("doc_{i}"),
                filename: (*filename).to_string(),
                content,
                chunks,
            },
            metadata,
        );
    }
    corpus
}

/// Corpus ingested from literal texts.
pub fn corpus_from_texts(texts: &[(&str, &str)]) -> Corpus {
    let raws: Vec<RawDocument> = texts
        .iter()
        .map(|(name, text)| RawDocument::text(*name, *text))
        .collect();
    DocumentProcessor::default().ingest_batch(&raws).corpus
}

/// Context for `round` over `prior` with the fixed test clock.
pub fn context(round: u32, prior: &[AgentMessage], seed: u64) -> RoundContext<'_> {
    RoundContext {
        round,
        prior_messages: prior,
        total_rounds: 3,
        citation_strictness: CitationStrictness::default(),
        selection_seed: seed,
        clock: &CLOCK,
    }
}
