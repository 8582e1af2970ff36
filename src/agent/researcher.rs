//! Researcher: summarizes one document and cites its leading sections.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::context::RoundContext;
use super::message::{AgentMessage, EvidenceRef};
use super::role::AgentRole;
use crate::core::{Corpus, Document};
use crate::io::take_chars;

/// Chunks analyzed from the selected document.
pub const SECTIONS_ANALYZED: usize = 3;

/// Characters of chunk text quoted per highlight.
pub const HIGHLIGHT_CHARS: usize = 150;

/// Confidence of a normal analysis.
pub const CONFIDENCE: f64 = 0.85;

/// Summary emitted when the corpus is empty.
pub const NO_DOCUMENTS: &str = "No documents available";

/// Picks a document with the invocation's seed.
fn select<'a>(documents: &'a [Document], seed: u64) -> Option<&'a Document> {
    if documents.is_empty() {
        return None;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    documents.get(rng.random_range(0..documents.len()))
}

pub(super) fn act(ctx: &RoundContext<'_>, corpus: &Corpus) -> AgentMessage {
    let Some(document) = select(&corpus.documents, ctx.selection_seed) else {
        return ctx.message(AgentRole::Researcher, NO_DOCUMENTS.to_string(), Vec::new(), 0.0);
    };

    let sections: Vec<_> = document.chunks.iter().take(SECTIONS_ANALYZED).collect();
    let word_count = corpus
        .metadata
        .get(&document.id)
        .map_or(0, |m| m.word_count);

    let summary = format!(
        "Analyzed {} key sections from {}. Key findings include foundational concepts, \
         methodology overview, and primary results. Total document contains {word_count} words.",
        sections.len(),
        document.id,
    );

    let evidence = sections
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            EvidenceRef::new(
                document.id.clone(),
                i,
                format!("{}...", take_chars(&chunk.content, HIGHLIGHT_CHARS)),
            )
        })
        .collect();

    ctx.message(AgentRole::Researcher, summary, evidence, CONFIDENCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::fixtures::{context, corpus};

    #[test]
    fn test_researcher_cites_leading_chunks() {
        let corpus = corpus(&[("a.txt", 5)]);
        let msg = act(&context(1, &[], 7), &corpus);

        assert_eq!(msg.agent, AgentRole::Researcher);
        assert!((msg.confidence - CONFIDENCE).abs() < f64::EPSILON);
        assert_eq!(msg.evidence.len(), SECTIONS_ANALYZED);
        assert!(msg.summary.starts_with("Analyzed 3 key sections from doc_0."));
        for (i, ev) in msg.evidence.iter().enumerate() {
            assert_eq!(ev.doc_id, "doc_0");
            assert_eq!(ev.chunk_id, i);
            assert!(ev.highlight.ends_with("..."));
        }
    }

    #[test]
    fn test_researcher_word_count_from_metadata() {
        let corpus = corpus(&[("a.txt", 2)]);
        let words = corpus.metadata["doc_0"].word_count;
        let msg = act(&context(1, &[], 0), &corpus);
        assert!(msg.summary.ends_with(&format!("Total document contains {words} words.")));
        assert_eq!(msg.evidence.len(), 2);
    }

    #[test]
    fn test_researcher_highlight_truncated() {
        let corpus = corpus(&[("a.txt", 1)]);
        let msg = act(&context(1, &[], 0), &corpus);
        let highlight = &msg.evidence[0].highlight;
        assert!(highlight.chars().count() <= HIGHLIGHT_CHARS + 3);
    }

    #[test]
    fn test_researcher_without_documents() {
        let msg = act(&context(2, &[], 0), &Corpus::default());
        assert_eq!(msg.summary, NO_DOCUMENTS);
        assert!(msg.evidence.is_empty());
        assert!(msg.confidence.abs() < f64::EPSILON);
        assert_eq!(msg.round, 2);
    }

    #[test]
    fn test_researcher_selection_is_seeded() {
        let corpus = corpus(&[("a.txt", 1), ("b.txt", 1), ("c.txt", 1), ("d.txt", 1)]);
        for seed in 0..20 {
            let first = act(&context(1, &[], seed), &corpus);
            let second = act(&context(1, &[], seed), &corpus);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_researcher_selection_varies_across_seeds() {
        let corpus = corpus(&[("a.txt", 1), ("b.txt", 1), ("c.txt", 1), ("d.txt", 1)]);
        let picked: std::collections::BTreeSet<String> = (0..64)
            .map(|seed| act(&context(1, &[], seed), &corpus).evidence[0].doc_id.clone())
            .collect();
        assert!(picked.len() > 1);
    }
}
