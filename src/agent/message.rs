//! Messages exchanged on the panel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::AgentRole;

/// Pointer from a claim to the chunk that supports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRef {
    /// Cited document id, or a pseudo-id such as `audit`.
    pub doc_id: String,
    /// Cited chunk within the document.
    pub chunk_id: usize,
    /// Short excerpt or description of the cited passage.
    pub highlight: String,
}

impl EvidenceRef {
    /// Creates an evidence reference.
    #[must_use]
    pub fn new(doc_id: impl Into<String>, chunk_id: usize, highlight: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            chunk_id,
            highlight: highlight.into(),
        }
    }
}

/// One agent's contribution in one round. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMessage {
    /// Author role.
    pub agent: AgentRole,
    /// Round the message was produced in (1-based).
    pub round: u32,
    /// Natural-language summary.
    pub summary: String,
    /// Supporting evidence, in citation order.
    pub evidence: Vec<EvidenceRef>,
    /// Self-reported confidence in `[0, 1]`.
    pub confidence: f64,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
}

impl AgentMessage {
    /// Returns `true` if the message cites at least one source.
    #[must_use]
    pub fn is_cited(&self) -> bool {
        !self.evidence.is_empty()
    }

    /// Graph node id for this message: `{agent}_r{round}`.
    #[must_use]
    pub fn node_id(&self) -> String {
        node_id(self.agent, self.round)
    }
}

/// Graph node id for a role in a round.
#[must_use]
pub fn node_id(agent: AgentRole, round: u32) -> String {
    format!("{agent}_r{round}")
}

/// Renders evidence as inline citations: `[doc_0:1] [doc_0:3]`.
#[must_use]
pub fn format_citations(evidence: &[EvidenceRef]) -> String {
    evidence
        .iter()
        .map(|e| format!("[{}:{}]", e.doc_id, e.chunk_id))
        .collect::<Vec<_>>()
        .join(" ")
}
