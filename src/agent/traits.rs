//! Agent trait definition.
//!
//! Every panel member implements this trait, which gives the orchestrator
//! a uniform interface. [`AgentRole`] implements it by dispatching to the
//! scripted behaviour of each role.

use super::context::RoundContext;
use super::message::AgentMessage;
use super::role::AgentRole;
use super::{citation, inspector, researcher, reviewer, synthesizer};
use crate::core::Corpus;
use crate::error::AgentError;

/// A panel member.
///
/// Implementations must be pure functions of the context and corpus:
/// they never mutate documents, metadata, or history, so the orchestrator
/// may run a round's agents concurrently.
pub trait Agent: Send + Sync {
    /// Role this agent plays; emitted messages must carry it.
    fn role(&self) -> AgentRole;

    /// Produces this agent's message for the current round.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Fault`] if the agent cannot produce a message.
    /// A fault is fatal to the run.
    fn act(&self, ctx: &RoundContext<'_>, corpus: &Corpus) -> Result<AgentMessage, AgentError>;
}

impl Agent for AgentRole {
    fn role(&self) -> AgentRole {
        *self
    }

    fn act(&self, ctx: &RoundContext<'_>, corpus: &Corpus) -> Result<AgentMessage, AgentError> {
        Ok(match self {
            Self::Researcher => researcher::act(ctx, corpus),
            Self::Reviewer => reviewer::act(ctx, corpus),
            Self::Synthesizer => synthesizer::act(ctx, corpus),
            Self::DataInspector => inspector::act(ctx, corpus),
            Self::CitationGuard => citation::act(ctx, corpus),
        })
    }
}
