//! Data inspector: compares reported metrics and datasets.

use std::collections::BTreeSet;

use super::context::RoundContext;
use super::message::{AgentMessage, EvidenceRef};
use super::role::AgentRole;
use crate::core::Corpus;

/// Fixed comparability score reported for every corpus.
pub const COMPARABILITY_SCORE: f64 = 0.65;

/// Maximum documents cited.
pub const MAX_CITED: usize = 2;

/// Inspector confidence.
pub const CONFIDENCE: f64 = 0.79;

pub(super) fn act(ctx: &RoundContext<'_>, corpus: &Corpus) -> AgentMessage {
    let metrics: BTreeSet<&str> = corpus
        .metadata
        .values()
        .map(|m| m.metrics_or_none())
        .collect();
    let datasets: BTreeSet<&str> = corpus
        .metadata
        .values()
        .map(|m| m.datasets_or_none())
        .collect();

    let summary = format!(
        "Data audit across {} documents: Metrics identified: {}; Datasets: {}. \
         Comparability score: {COMPARABILITY_SCORE:.2} (heterogeneous evaluation protocols).",
        corpus.len(),
        join(&metrics),
        join(&datasets),
    );

    let evidence = corpus
        .documents
        .iter()
        .filter_map(|doc| {
            let reported = corpus.metadata.get(&doc.id)?.metrics.as_deref()?;
            Some(EvidenceRef::new(
                doc.id.clone(),
                0,
                format!("Reported metrics: {reported}"),
            ))
        })
        .take(MAX_CITED)
        .collect();

    ctx.message(AgentRole::DataInspector, summary, evidence, CONFIDENCE)
}

fn join(values: &BTreeSet<&str>) -> String {
    values.iter().copied().collect::<Vec<_>>().join("; ")
}
