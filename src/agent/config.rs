//! Panel configuration with builder pattern and environment variable support.
//!
//! Configuration is resolved in order: explicit values → environment variables → defaults.

use std::fmt;
use std::time::Duration;

use tracing::warn;

use super::role::AgentRole;
use crate::chunking::DEFAULT_CHUNK_SIZE;
use crate::core::CitationStrictness;
use crate::error::AgentError;

/// Default number of rounds.
pub const DEFAULT_ROUNDS: u32 = 3;
/// Default seed for document selection.
pub const DEFAULT_SEED: u64 = 42;

/// How agents within one round are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// One agent after another; each sees the messages already emitted
    /// earlier in the same round.
    #[default]
    Sequential,
    /// All agents of a round in parallel over the round-start snapshot.
    Concurrent,
}

impl ExecutionStrategy {
    /// Parses `sequential` or `concurrent` (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Some(Self::Sequential),
            "concurrent" | "parallel" => Some(Self::Concurrent),
            _ => None,
        }
    }

    /// Canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Concurrent => "concurrent",
        }
    }
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a panel run.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Enabled agents in invocation order.
    pub agents: Vec<AgentRole>,
    /// Number of rounds.
    pub rounds: u32,
    /// Citation strictness, passed to agents unchanged.
    pub citation_strictness: CitationStrictness,
    /// Seed for the run's pseudo-random choices.
    pub seed: u64,
    /// Scheduling within a round.
    pub execution: ExecutionStrategy,
    /// Per-round time limit, checked before each agent runs.
    pub round_deadline: Option<Duration>,
    /// Target chunk size for ingestion.
    pub chunk_size: usize,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            agents: AgentRole::DEFAULT_PANEL.to_vec(),
            rounds: DEFAULT_ROUNDS,
            citation_strictness: CitationStrictness::default(),
            seed: DEFAULT_SEED,
            execution: ExecutionStrategy::default(),
            round_deadline: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl PanelConfig {
    /// Creates a new builder for `PanelConfig`.
    #[must_use]
    pub fn builder() -> PanelConfigBuilder {
        PanelConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidConfig`] if the resolved values are invalid.
    pub fn from_env() -> Result<Self, AgentError> {
        Self::builder().from_env().build()
    }

    /// Number of messages a completed run produces.
    #[must_use]
    pub fn expected_messages(&self) -> usize {
        self.agents.len() * self.rounds as usize
    }
}

/// Builder for [`PanelConfig`].
#[derive(Debug, Clone, Default)]
pub struct PanelConfigBuilder {
    agents: Option<Vec<AgentRole>>,
    rounds: Option<u32>,
    citation_strictness: Option<CitationStrictness>,
    seed: Option<u64>,
    execution: Option<ExecutionStrategy>,
    round_deadline: Option<Duration>,
    chunk_size: Option<usize>,
}

impl PanelConfigBuilder {
    /// Populates unset fields from environment variables.
    #[must_use]
    pub fn from_env(self) -> Self {
        self.from_lookup(|key| std::env::var(key).ok())
    }

    /// Populates unset fields from `lookup`, keyed by environment variable name.
    ///
    /// Values that do not parse are ignored with a warning.
    #[must_use]
    pub fn from_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.agents.is_none() {
            self.agents = lookup("PANEL_AGENTS").and_then(|v| {
                AgentRole::parse_list(&v)
                    .inspect_err(|e| warn!(error = %e, "Ignoring PANEL_AGENTS"))
                    .ok()
            });
        }
        if self.rounds.is_none() {
            self.rounds = parse_var(&lookup, "PANEL_ROUNDS");
        }
        if self.citation_strictness.is_none() {
            self.citation_strictness =
                parse_with(&lookup, "PANEL_CITATION_STRICTNESS", CitationStrictness::parse);
        }
        if self.seed.is_none() {
            self.seed = parse_var(&lookup, "PANEL_SEED");
        }
        if self.execution.is_none() {
            self.execution = parse_with(&lookup, "PANEL_EXECUTION", ExecutionStrategy::parse);
        }
        if self.round_deadline.is_none() {
            self.round_deadline =
                parse_var(&lookup, "PANEL_ROUND_DEADLINE_MS").map(Duration::from_millis);
        }
        if self.chunk_size.is_none() {
            self.chunk_size = parse_var(&lookup, "PANEL_CHUNK_SIZE");
        }
        self
    }

    /// Sets the enabled agents, in invocation order.
    #[must_use]
    pub fn agents(mut self, agents: impl Into<Vec<AgentRole>>) -> Self {
        self.agents = Some(agents.into());
        self
    }

    /// Sets the number of rounds.
    #[must_use]
    pub const fn rounds(mut self, n: u32) -> Self {
        self.rounds = Some(n);
        self
    }

    /// Sets the citation strictness.
    #[must_use]
    pub const fn citation_strictness(mut self, strictness: CitationStrictness) -> Self {
        self.citation_strictness = Some(strictness);
        self
    }

    /// Sets the seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the execution strategy.
    #[must_use]
    pub const fn execution(mut self, execution: ExecutionStrategy) -> Self {
        self.execution = Some(execution);
        self
    }

    /// Sets the per-round deadline.
    #[must_use]
    pub const fn round_deadline(mut self, deadline: Duration) -> Self {
        self.round_deadline = Some(deadline);
        self
    }

    /// Sets the chunk size.
    #[must_use]
    pub const fn chunk_size(mut self, n: usize) -> Self {
        self.chunk_size = Some(n);
        self
    }

    /// Builds the [`PanelConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidConfig`] if no agent is enabled, an
    /// agent is listed twice, or rounds or chunk size is zero.
    pub fn build(self) -> Result<PanelConfig, AgentError> {
        let defaults = PanelConfig::default();
        let config = PanelConfig {
            agents: self.agents.unwrap_or(defaults.agents),
            rounds: self.rounds.unwrap_or(defaults.rounds),
            citation_strictness: self
                .citation_strictness
                .unwrap_or(defaults.citation_strictness),
            seed: self.seed.unwrap_or(defaults.seed),
            execution: self.execution.unwrap_or(defaults.execution),
            round_deadline: self.round_deadline,
            chunk_size: self.chunk_size.unwrap_or(defaults.chunk_size),
        };
        validate(&config)?;
        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    parse_with(lookup, key, |v| v.parse().ok())
}

fn parse_with<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = lookup(key)?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        warn!(key, value = %raw, "Ignoring unparseable environment value");
    }
    parsed
}

fn validate(config: &PanelConfig) -> Result<(), AgentError> {
    let invalid = |message: String| Err(AgentError::InvalidConfig { message });

    if config.agents.is_empty() {
        return invalid("at least one agent must be enabled".to_string());
    }
    for (i, role) in config.agents.iter().enumerate() {
        if config.agents[..i].contains(role) {
            return invalid(format!("agent {role} is enabled more than once"));
        }
    }
    if config.rounds == 0 {
        return invalid("rounds must be at least 1".to_string());
    }
    if config.chunk_size == 0 {
        return invalid("chunk size must be at least 1".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_builder_defaults() {
        let config = PanelConfig::builder()
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.agents, AgentRole::DEFAULT_PANEL.to_vec());
        assert_eq!(config.rounds, DEFAULT_ROUNDS);
        assert_eq!(config.citation_strictness, CitationStrictness::Moderate);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.execution, ExecutionStrategy::Sequential);
        assert_eq!(config.round_deadline, None);
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.expected_messages(), 12);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = PanelConfig::builder()
            .agents([AgentRole::CitationGuard, AgentRole::Researcher])
            .rounds(5)
            .citation_strictness(CitationStrictness::VeryStrict)
            .seed(7)
            .execution(ExecutionStrategy::Concurrent)
            .round_deadline(Duration::from_millis(250))
            .chunk_size(400)
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.agents, vec![AgentRole::CitationGuard, AgentRole::Researcher]);
        assert_eq!(config.rounds, 5);
        assert_eq!(config.seed, 7);
        assert_eq!(config.execution, ExecutionStrategy::Concurrent);
        assert_eq!(config.round_deadline, Some(Duration::from_millis(250)));
        assert_eq!(config.chunk_size, 400);
    }

    #[test]
    fn test_builder_rejects_empty_agents() {
        let result = PanelConfig::builder().agents(Vec::<AgentRole>::new()).build();
        assert!(matches!(result, Err(AgentError::InvalidConfig { .. })));
    }

    #[test]
    fn test_builder_rejects_duplicate_agents() {
        let result = PanelConfig::builder()
            .agents([AgentRole::Reviewer, AgentRole::Reviewer])
            .build();
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Reviewer"));
    }

    #[test]
    fn test_builder_rejects_zero_rounds_and_chunk_size() {
        assert!(PanelConfig::builder().rounds(0).build().is_err());
        assert!(PanelConfig::builder().chunk_size(0).build().is_err());
    }

    #[test]
    fn test_lookup_populates_unset_fields() {
        let config = PanelConfig::builder()
            .seed(1)
            .from_lookup(lookup(&[
                ("PANEL_AGENTS", "reviewer, citation-guard"),
                ("PANEL_ROUNDS", "2"),
                ("PANEL_CITATION_STRICTNESS", "very strict"),
                ("PANEL_SEED", "99"),
                ("PANEL_EXECUTION", "Concurrent"),
                ("PANEL_ROUND_DEADLINE_MS", "1500"),
                ("PANEL_CHUNK_SIZE", "800"),
            ]))
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.agents, vec![AgentRole::Reviewer, AgentRole::CitationGuard]);
        assert_eq!(config.rounds, 2);
        assert_eq!(config.citation_strictness, CitationStrictness::VeryStrict);
        assert_eq!(config.seed, 1);
        assert_eq!(config.execution, ExecutionStrategy::Concurrent);
        assert_eq!(config.round_deadline, Some(Duration::from_millis(1500)));
        assert_eq!(config.chunk_size, 800);
    }

    #[test]
    fn test_lookup_ignores_unparseable_values() {
        let config = PanelConfig::builder()
            .from_lookup(lookup(&[("PANEL_ROUNDS", "many"), ("PANEL_AGENTS", "Oracle")]))
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.rounds, DEFAULT_ROUNDS);
        assert_eq!(config.agents, AgentRole::DEFAULT_PANEL.to_vec());
    }

    /// Log sink shared with a test subscriber.
    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if let Ok(mut sink) = self.0.lock() {
                sink.extend_from_slice(buf);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_lookup_warns_on_every_unparseable_value() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let config = tracing::subscriber::with_default(subscriber, || {
            PanelConfig::builder()
                .from_lookup(lookup(&[
                    ("PANEL_CITATION_STRICTNESS", "harsh"),
                    ("PANEL_EXECUTION", "eventually"),
                    ("PANEL_SEED", "x"),
                ]))
                .build()
                .unwrap_or_else(|_| unreachable!())
        });
        assert_eq!(config.citation_strictness, CitationStrictness::default());
        assert_eq!(config.execution, ExecutionStrategy::Sequential);

        let logs = captured
            .0
            .lock()
            .map(|sink| String::from_utf8_lossy(&sink).into_owned())
            .unwrap_or_default();
        assert!(logs.contains("PANEL_CITATION_STRICTNESS"));
        assert!(logs.contains("harsh"));
        assert!(logs.contains("PANEL_EXECUTION"));
        assert!(logs.contains("eventually"));
        assert!(logs.contains("PANEL_SEED"));
    }

    #[test]
    fn test_execution_strategy_parse() {
        assert_eq!(ExecutionStrategy::parse("SEQUENTIAL"), Some(ExecutionStrategy::Sequential));
        assert_eq!(ExecutionStrategy::parse("parallel"), Some(ExecutionStrategy::Concurrent));
        assert_eq!(ExecutionStrategy::parse("eventually"), None);
    }
}
