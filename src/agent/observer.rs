//! Progress notification.

use std::sync::mpsc::Sender;

use super::role::AgentRole;

/// One agent invocation finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Round of the invocation.
    pub round: u32,
    /// Agent that ran.
    pub agent: AgentRole,
    /// Summary it produced.
    pub summary: String,
}

/// Receives one notification per agent invocation, in history order.
pub trait ProgressObserver {
    /// Called after `agent` emitted its message for `round`.
    fn on_message(&mut self, round: u32, agent: AgentRole, summary: &str);
}

impl<F> ProgressObserver for F
where
    F: FnMut(u32, AgentRole, &str),
{
    fn on_message(&mut self, round: u32, agent: AgentRole, summary: &str) {
        self(round, agent, summary);
    }
}

/// Forwards events over a channel. A disconnected receiver is ignored.
impl ProgressObserver for Sender<ProgressEvent> {
    fn on_message(&mut self, round: u32, agent: AgentRole, summary: &str) {
        let _ = self.send(ProgressEvent {
            round,
            agent,
            summary: summary.to_string(),
        });
    }
}

/// Observer that discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_message(&mut self, _round: u32, _agent: AgentRole, _summary: &str) {}
}
