//! Per-invocation view of the panel state.

use super::message::{AgentMessage, EvidenceRef};
use super::role::AgentRole;
use crate::core::{CitationStrictness, Clock};

/// Immutable snapshot handed to an agent for one invocation.
///
/// Agents never see the orchestrator's history directly, only this
/// borrowed slice of it.
#[derive(Clone, Copy)]
pub struct RoundContext<'a> {
    /// Current round (1-based).
    pub round: u32,
    /// Messages emitted before this invocation.
    pub prior_messages: &'a [AgentMessage],
    /// Configured number of rounds.
    pub total_rounds: u32,
    /// Configured strictness. Carried through; agents do not act on it.
    pub citation_strictness: CitationStrictness,
    /// Seed for any pseudo-random choice made during this invocation.
    pub selection_seed: u64,
    /// Timestamp source for the emitted message.
    pub clock: &'a dyn Clock,
}

impl std::fmt::Debug for RoundContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundContext")
            .field("round", &self.round)
            .field("prior_messages", &self.prior_messages.len())
            .field("total_rounds", &self.total_rounds)
            .field("citation_strictness", &self.citation_strictness)
            .field("selection_seed", &self.selection_seed)
            .finish_non_exhaustive()
    }
}

impl RoundContext<'_> {
    /// Stamps a message with this context's round and the current time.
    #[must_use]
    pub fn message(
        &self,
        agent: AgentRole,
        summary: String,
        evidence: Vec<EvidenceRef>,
        confidence: f64,
    ) -> AgentMessage {
        AgentMessage {
            agent,
            round: self.round,
            summary,
            evidence,
            confidence,
            timestamp: self.clock.now(),
        }
    }
}
