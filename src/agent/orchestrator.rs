//! Round-synchronized panel orchestration.
//!
//! Drives the enabled agents over the configured number of rounds,
//! accumulates the global message history, notifies the progress observer,
//! and builds the message graph.
//!
//! Rounds are hard barriers: round `r + 1` starts only after every agent of
//! round `r` has been appended to the history.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use super::config::{ExecutionStrategy, PanelConfig};
use super::context::RoundContext;
use super::graph::MessageGraph;
use super::message::AgentMessage;
use super::observer::ProgressObserver;
use super::traits::Agent;
use crate::core::{Clock, Corpus, SystemClock};
use crate::error::AgentError;

/// Lifecycle of an orchestrator.
///
/// `Completed`, `Cancelled` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No run has started.
    NotStarted,
    /// Executing the given round.
    Running(u32),
    /// All rounds finished.
    Completed,
    /// A round deadline expired.
    Cancelled,
    /// An agent faulted or emitted an invalid message in the given round.
    Failed(u32),
}

/// Output of a completed run.
#[derive(Debug, Clone)]
pub struct PanelRun {
    /// Every message, round-major, then in configured agent order.
    pub messages: Vec<AgentMessage>,
    /// Conversation-flow graph over `messages`.
    pub graph: MessageGraph,
}

/// Coordinates the panel over a corpus.
pub struct Orchestrator {
    config: PanelConfig,
    agents: Vec<Box<dyn Agent>>,
    clock: Arc<dyn Clock>,
    state: RunState,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("agents", &self.agents.iter().map(|a| a.role()).collect::<Vec<_>>())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Creates an orchestrator running the roles enabled in `config`.
    #[must_use]
    pub fn new(config: PanelConfig) -> Self {
        let agents = config
            .agents
            .iter()
            .map(|&role| Box::new(role) as Box<dyn Agent>)
            .collect();
        Self::with_agents(config, agents)
    }

    /// Creates an orchestrator running the given agents in order.
    ///
    /// `config.agents` is ignored; everything else applies.
    #[must_use]
    pub fn with_agents(config: PanelConfig, agents: Vec<Box<dyn Agent>>) -> Self {
        Self {
            config,
            agents,
            clock: Arc::new(SystemClock),
            state: RunState::NotStarted,
        }
    }

    /// Replaces the clock used to timestamp messages.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Runs every round over `corpus`.
    ///
    /// The observer is notified once per agent invocation, in history order.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Cancelled`] if a round deadline expires,
    /// [`AgentError::InvalidMessage`] if an agent emits a message that
    /// breaks the message invariants, or any fault an agent reports.
    /// Every error aborts the run. An orchestrator runs once; later calls
    /// return [`AgentError::AlreadyRun`] and leave the state unchanged.
    pub fn run<O>(&mut self, corpus: &Corpus, observer: &mut O) -> Result<PanelRun, AgentError>
    where
        O: ProgressObserver + ?Sized,
    {
        if self.state != RunState::NotStarted {
            return Err(AgentError::AlreadyRun { state: self.state });
        }
        let rounds = self.config.rounds;
        info!(
            agents = self.agents.len(),
            rounds,
            documents = corpus.len(),
            execution = %self.config.execution,
            "Starting panel run"
        );

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut history: Vec<AgentMessage> =
            Vec::with_capacity(self.agents.len() * rounds as usize);
        let mut graph = MessageGraph::default();

        for round in 1..=rounds {
            self.state = RunState::Running(round);
            let _span = info_span!("round", round).entered();

            // Drawn in configured order so both strategies see the same seeds.
            let seeds: Vec<u64> = self.agents.iter().map(|_| rng.random()).collect();

            let emitted = match self.config.execution {
                ExecutionStrategy::Sequential => {
                    self.run_sequential(round, &seeds, corpus, &mut history, &mut graph, observer)
                }
                ExecutionStrategy::Concurrent => {
                    self.run_concurrent(round, &seeds, corpus, &mut history, &mut graph, observer)
                }
            };

            if let Err(e) = emitted {
                self.state = match e {
                    AgentError::Cancelled { .. } => {
                        warn!(error = %e, "Panel run cancelled");
                        RunState::Cancelled
                    }
                    _ => RunState::Failed(round),
                };
                return Err(e);
            }
            debug!(messages = history.len(), "Round complete");
        }

        graph.connect(&history);
        self.state = RunState::Completed;
        info!(
            messages = history.len(),
            edges = graph.edges.len(),
            "Panel run complete"
        );

        Ok(PanelRun {
            messages: history,
            graph,
        })
    }

    fn context<'a>(&'a self, round: u32, prior: &'a [AgentMessage], seed: u64) -> RoundContext<'a> {
        RoundContext {
            round,
            prior_messages: prior,
            total_rounds: self.config.rounds,
            citation_strictness: self.config.citation_strictness,
            selection_seed: seed,
            clock: self.clock.as_ref(),
        }
    }

    /// Each agent sees the history including earlier agents of this round.
    fn run_sequential<O>(
        &self,
        round: u32,
        seeds: &[u64],
        corpus: &Corpus,
        history: &mut Vec<AgentMessage>,
        graph: &mut MessageGraph,
        observer: &mut O,
    ) -> Result<(), AgentError>
    where
        O: ProgressObserver + ?Sized,
    {
        let started = Instant::now();
        for (agent, &seed) in self.agents.iter().zip(seeds) {
            check_deadline(self.config.round_deadline, started, round, agent.as_ref(), history.len())?;
            let message = {
                let ctx = self.context(round, history, seed);
                invoke(agent.as_ref(), &ctx, corpus)?
            };
            record(message, history, graph, observer);
        }
        Ok(())
    }

    /// Every agent sees the round-start snapshot; results are appended in
    /// configured order once the whole round has finished. When several
    /// agents fail, the error of the earliest in configured order wins.
    fn run_concurrent<O>(
        &self,
        round: u32,
        seeds: &[u64],
        corpus: &Corpus,
        history: &mut Vec<AgentMessage>,
        graph: &mut MessageGraph,
        observer: &mut O,
    ) -> Result<(), AgentError>
    where
        O: ProgressObserver + ?Sized,
    {
        let started = Instant::now();
        let snapshot = history.as_slice();
        let completed = snapshot.len();
        let deadline = self.config.round_deadline;

        let outcomes: Vec<Result<AgentMessage, AgentError>> = self
            .agents
            .par_iter()
            .zip(seeds.par_iter())
            .map(|(agent, &seed)| {
                check_deadline(deadline, started, round, agent.as_ref(), completed)?;
                let ctx = self.context(round, snapshot, seed);
                invoke(agent.as_ref(), &ctx, corpus)
            })
            .collect();
        let messages = outcomes.into_iter().collect::<Result<Vec<_>, AgentError>>()?;

        for message in messages {
            record(message, history, graph, observer);
        }
        Ok(())
    }
}

fn check_deadline(
    deadline: Option<Duration>,
    started: Instant,
    round: u32,
    next: &dyn Agent,
    completed: usize,
) -> Result<(), AgentError> {
    match deadline {
        Some(limit) if started.elapsed() >= limit => Err(AgentError::Cancelled {
            round,
            agent: next.role(),
            completed,
        }),
        _ => Ok(()),
    }
}

/// Runs one agent and checks the message it returns.
fn invoke(
    agent: &dyn Agent,
    ctx: &RoundContext<'_>,
    corpus: &Corpus,
) -> Result<AgentMessage, AgentError> {
    let message = agent.act(ctx, corpus)?;
    let role = agent.role();
    let invalid = |reason: String| AgentError::InvalidMessage {
        agent: role,
        round: ctx.round,
        reason,
    };

    if message.agent != role {
        return Err(invalid(format!("message attributed to {}", message.agent)));
    }
    if message.round != ctx.round {
        return Err(invalid(format!("message stamped with round {}", message.round)));
    }
    if !message.confidence.is_finite() || !(0.0..=1.0).contains(&message.confidence) {
        return Err(invalid(format!(
            "confidence {} outside [0, 1]",
            message.confidence
        )));
    }
    Ok(message)
}

fn record<O>(
    message: AgentMessage,
    history: &mut Vec<AgentMessage>,
    graph: &mut MessageGraph,
    observer: &mut O,
) where
    O: ProgressObserver + ?Sized,
{
    debug!(
        agent = %message.agent,
        evidence = message.evidence.len(),
        confidence = message.confidence,
        "Agent message"
    );
    observer.on_message(message.round, message.agent, &message.summary);
    graph.add_node(&message);
    history.push(message);
}
