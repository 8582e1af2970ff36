//! Report synthesis.
//!
//! [`generate`] is a pure function of a finished message history, the
//! corpus it was produced from, and a clock. It never fails: an empty
//! history yields sentinel text and an empty evidence map.

pub mod markdown;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::agent::{AgentMessage, AgentRole, EvidenceRef};
use crate::core::{Clock, Corpus};
use crate::io::take_chars;

/// Opening sentence of every non-empty summary.
pub const SUMMARY_PREFIX: &str = "Multi-agent analysis reveals the following key insights: ";

/// Summary of a report built from no messages.
pub const EMPTY_SUMMARY: &str = "No agent messages were produced; no insights are available.";

/// Hypotheses reported when no synthesis message states one.
pub const FALLBACK_HYPOTHESES: [&str; 3] = [
    "Performance variation correlates with dataset heterogeneity",
    "Standardization of evaluation protocols would improve comparability",
    "Methodological rigor increases with multi-dataset validation",
];

/// Conclusions of every report.
pub const CONCLUSIONS: [&str; 3] = [
    "Comprehensive review of source materials validates core research methodology",
    "Identified areas for improvement in evaluation and validation procedures",
    "Recommended integration of multi-agent analysis in research synthesis workflows",
];

/// Characters of a message summary kept as the claim text.
pub const MAX_CLAIM_CHARS: usize = 200;

const MAX_SUMMARY_FINDINGS: usize = 2;
const FALLBACK_SUMMARY_MESSAGES: usize = 3;
const MAX_HYPOTHESES: usize = 3;

/// Key of an evidence map entry: the message's position in the history.
///
/// Displays and serializes as `claim_{index}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimKey(pub usize);

impl fmt::Display for ClaimKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "claim_{}", self.0)
    }
}

impl Serialize for ClaimKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One claim and the evidence behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceEntry {
    /// Role that made the claim.
    pub agent: AgentRole,
    /// Message summary, truncated.
    pub claim: String,
    /// Evidence attached to the message.
    pub supporting_evidence: Vec<EvidenceRef>,
    /// Message confidence.
    pub confidence: f64,
}

/// Facts about the run a report was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunMetadata {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Documents in the corpus.
    pub num_documents: usize,
    /// Distinct agent roles in the history.
    pub num_agents: usize,
    /// Highest round in the history, 0 if empty.
    pub total_rounds: u32,
    /// Messages in the history.
    pub num_messages: usize,
}

/// Machine-readable projection of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonProjection {
    /// Executive summary.
    pub summary: String,
    /// Key hypotheses.
    pub hypotheses: Vec<String>,
    /// Conclusions.
    pub conclusions: Vec<String>,
    /// Full message history.
    pub agent_messages: Vec<AgentMessage>,
}

/// Synthesized analysis report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Run statistics.
    pub metadata: RunMetadata,
    /// Executive summary.
    pub summary: String,
    /// Key hypotheses, at most three.
    pub hypotheses: Vec<String>,
    /// Fixed conclusions.
    pub conclusions: Vec<String>,
    /// Claims keyed by message position.
    pub evidence_map: BTreeMap<ClaimKey, EvidenceEntry>,
    /// How the analysis was conducted.
    pub methodology: String,
    /// Markdown rendering.
    pub markdown: String,
    /// JSON projection.
    pub json: JsonProjection,
}

/// Builds the report for a finished history.
#[must_use]
pub fn generate(messages: &[AgentMessage], corpus: &Corpus, clock: &dyn Clock) -> Report {
    let metadata = RunMetadata {
        generated_at: clock.now(),
        num_documents: corpus.len(),
        num_agents: distinct_agents(messages),
        total_rounds: max_round(messages),
        num_messages: messages.len(),
    };

    let summary = synthesize_summary(messages);
    let hypotheses = extract_hypotheses(messages);
    let conclusions: Vec<String> = CONCLUSIONS.iter().map(ToString::to_string).collect();
    let evidence_map = build_evidence_map(messages);
    let methodology = format!(
        "Analysis conducted using {} specialized agents over {} rounds. \
         Each agent contributed domain-specific analysis verified through multi-stage evidence review.",
        metadata.num_agents, metadata.total_rounds,
    );
    let markdown = markdown::render(
        &metadata.generated_at,
        &summary,
        &hypotheses,
        &conclusions,
        &evidence_map,
    );

    debug!(
        messages = metadata.num_messages,
        claims = evidence_map.len(),
        hypotheses = hypotheses.len(),
        "Generated report"
    );

    Report {
        json: JsonProjection {
            summary: summary.clone(),
            hypotheses: hypotheses.clone(),
            conclusions: conclusions.clone(),
            agent_messages: messages.to_vec(),
        },
        metadata,
        summary,
        hypotheses,
        conclusions,
        evidence_map,
        methodology,
        markdown,
    }
}

fn distinct_agents(messages: &[AgentMessage]) -> usize {
    messages.iter().map(|m| m.agent).collect::<BTreeSet<_>>().len()
}

fn max_round(messages: &[AgentMessage]) -> u32 {
    messages.iter().map(|m| m.round).max().unwrap_or(0)
}

fn synthesis_summaries(messages: &[AgentMessage]) -> impl Iterator<Item = &str> {
    messages
        .iter()
        .filter(|m| m.agent == AgentRole::Synthesizer)
        .map(|m| m.summary.as_str())
}

fn synthesize_summary(messages: &[AgentMessage]) -> String {
    if messages.is_empty() {
        return EMPTY_SUMMARY.to_string();
    }

    let mut findings: Vec<&str> = synthesis_summaries(messages)
        .take(MAX_SUMMARY_FINDINGS)
        .collect();
    if findings.is_empty() {
        findings = messages
            .iter()
            .take(FALLBACK_SUMMARY_MESSAGES)
            .map(|m| m.summary.as_str())
            .collect();
    }

    format!("{SUMMARY_PREFIX}{}", findings.join(" "))
}

fn extract_hypotheses(messages: &[AgentMessage]) -> Vec<String> {
    let stated: Vec<String> = synthesis_summaries(messages)
        .filter(|s| s.to_lowercase().contains("hypothesis"))
        .take(MAX_HYPOTHESES)
        .map(ToString::to_string)
        .collect();

    if stated.is_empty() {
        FALLBACK_HYPOTHESES.iter().map(ToString::to_string).collect()
    } else {
        stated
    }
}

fn build_evidence_map(messages: &[AgentMessage]) -> BTreeMap<ClaimKey, EvidenceEntry> {
    messages
        .iter()
        .enumerate()
        .map(|(i, m)| {
            (
                ClaimKey(i),
                EvidenceEntry {
                    agent: m.agent,
                    claim: take_chars(&m.summary, MAX_CLAIM_CHARS).to_string(),
                    supporting_evidence: m.evidence.clone(),
                    confidence: m.confidence,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::fixtures::{CLOCK, context};
    use pretty_assertions::assert_eq;

    fn message(agent: AgentRole, round: u32, summary: &str, cited: bool) -> AgentMessage {
        let evidence = if cited {
            vec![EvidenceRef::new("doc_0", 0, "x")]
        } else {
            Vec::new()
        };
        context(round, &[], 0).message(agent, summary.to_string(), evidence, 0.85)
    }

    #[test]
    fn test_empty_history_never_fails() {
        let report = generate(&[], &Corpus::default(), &CLOCK);
        assert_eq!(report.summary, EMPTY_SUMMARY);
        assert_eq!(report.hypotheses, FALLBACK_HYPOTHESES.to_vec());
        assert_eq!(report.conclusions, CONCLUSIONS.to_vec());
        assert!(report.evidence_map.is_empty());
        assert_eq!(report.metadata.total_rounds, 0);
        assert_eq!(report.metadata.num_agents, 0);
        assert_eq!(
            report.methodology,
            "Analysis conducted using 0 specialized agents over 0 rounds. Each agent contributed \
             domain-specific analysis verified through multi-stage evidence review."
        );
    }

    #[test]
    fn test_summary_prefers_first_two_synthesis_messages() {
        let messages = vec![
            message(AgentRole::Researcher, 1, "R1", true),
            message(AgentRole::Synthesizer, 1, "S1", true),
            message(AgentRole::Synthesizer, 2, "S2", true),
            message(AgentRole::Synthesizer, 3, "S3", true),
        ];
        let report = generate(&messages, &Corpus::default(), &CLOCK);
        assert_eq!(report.summary, format!("{SUMMARY_PREFIX}S1 S2"));
    }

    #[test]
    fn test_summary_falls_back_to_first_three_messages() {
        let messages = vec![
            message(AgentRole::Researcher, 1, "A", true),
            message(AgentRole::Reviewer, 1, "B", true),
            message(AgentRole::CitationGuard, 1, "C", true),
            message(AgentRole::Researcher, 2, "D", true),
        ];
        let report = generate(&messages, &Corpus::default(), &CLOCK);
        assert_eq!(report.summary, format!("{SUMMARY_PREFIX}A B C"));
    }

    #[test]
    fn test_hypotheses_from_synthesis_messages() {
        let messages = vec![
            message(AgentRole::Synthesizer, 1, "A HYPOTHESIS here", true),
            message(AgentRole::Reviewer, 1, "hypothesis from a reviewer", true),
            message(AgentRole::Synthesizer, 2, "no claim", true),
            message(AgentRole::Synthesizer, 3, "hypothesis two", true),
            message(AgentRole::Synthesizer, 4, "hypothesis three", true),
            message(AgentRole::Synthesizer, 5, "hypothesis four", true),
        ];
        let report = generate(&messages, &Corpus::default(), &CLOCK);
        assert_eq!(
            report.hypotheses,
            vec!["A HYPOTHESIS here", "hypothesis two", "hypothesis three"]
        );
    }

    #[test]
    fn test_hypotheses_fallback_without_synthesis() {
        let messages = vec![message(AgentRole::Reviewer, 1, "hypothesis", true)];
        let report = generate(&messages, &Corpus::default(), &CLOCK);
        assert_eq!(report.hypotheses.len(), 3);
        assert_eq!(report.hypotheses[0], FALLBACK_HYPOTHESES[0]);
    }

    #[test]
    fn test_evidence_map_keys_and_truncation() {
        let long = "x".repeat(300);
        let messages: Vec<AgentMessage> = (0..12)
            .map(|i| message(AgentRole::Researcher, 1, if i == 0 { long.as_str() } else { "s" }, i % 2 == 0))
            .collect();
        let report = generate(&messages, &Corpus::default(), &CLOCK);

        let keys: Vec<String> = report.evidence_map.keys().map(ToString::to_string).collect();
        assert_eq!(keys[2], "claim_2");
        assert_eq!(keys[10], "claim_10");
        assert_eq!(report.evidence_map[&ClaimKey(0)].claim.len(), MAX_CLAIM_CHARS);
        assert_eq!(report.evidence_map[&ClaimKey(1)].supporting_evidence.len(), 0);
        assert_eq!(report.evidence_map[&ClaimKey(2)].supporting_evidence.len(), 1);
    }

    #[test]
    fn test_metadata_counts() {
        let messages = vec![
            message(AgentRole::Researcher, 1, "a", true),
            message(AgentRole::Reviewer, 1, "b", true),
            message(AgentRole::Researcher, 2, "c", true),
        ];
        let report = generate(&messages, &Corpus::default(), &CLOCK);
        assert_eq!(report.metadata.num_agents, 2);
        assert_eq!(report.metadata.total_rounds, 2);
        assert_eq!(report.metadata.num_messages, 3);
        assert_eq!(report.metadata.generated_at, CLOCK.0);
        assert_eq!(report.json.agent_messages, messages);
    }

    #[test]
    fn test_json_keys_serialize_as_claims() {
        let messages = vec![message(AgentRole::Researcher, 1, "a", true)];
        let report = generate(&messages, &Corpus::default(), &CLOCK);
        let json = serde_json::to_value(&report).unwrap_or_default();
        assert_eq!(json["evidence_map"]["claim_0"]["agent"], "Researcher");
        assert_eq!(json["json"]["agent_messages"][0]["summary"], "a");
        assert_eq!(json["metadata"]["num_messages"], 1);
    }
}
