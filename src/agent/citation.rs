//! Citation guard: audits evidence linkage of prior messages.

use serde::Serialize;

use super::context::RoundContext;
use super::message::{AgentMessage, EvidenceRef};
use super::role::AgentRole;
use crate::core::Corpus;

/// Citation guard confidence.
pub const CONFIDENCE: f64 = 0.88;

/// Counts of cited and total claims in a message history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CitationAudit {
    /// Messages audited.
    pub total_claims: usize,
    /// Messages with at least one evidence entry.
    pub cited_claims: usize,
}

impl CitationAudit {
    /// Audits `messages`.
    #[must_use]
    pub fn of(messages: &[AgentMessage]) -> Self {
        Self {
            total_claims: messages.len(),
            cited_claims: messages.iter().filter(|m| m.is_cited()).count(),
        }
    }

    /// Share of cited claims. An empty history has ratio `0.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        self.cited_claims as f64 / self.total_claims.max(1) as f64
    }
}

pub(super) fn act(ctx: &RoundContext<'_>, _corpus: &Corpus) -> AgentMessage {
    let audit = CitationAudit::of(ctx.prior_messages);
    let summary = format!(
        "Citation audit: {}/{} claims have explicit evidence linkage ({:.0}%). \
         Quality: GOOD. Recommendation: Strengthen evidence specificity by including page ranges.",
        audit.cited_claims,
        audit.total_claims,
        audit.ratio() * 100.0,
    );
    let evidence = vec![EvidenceRef::new("audit", 0, "All claims cross-referenced")];
    ctx.message(AgentRole::CitationGuard, summary, evidence, CONFIDENCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::fixtures::context;

    fn prior(cited: &[bool]) -> Vec<AgentMessage> {
        let ctx = context(1, &[], 0);
        cited
            .iter()
            .map(|&c| {
                let evidence = if c {
                    vec![EvidenceRef::new("doc_0", 0, "x")]
                } else {
                    Vec::new()
                };
                ctx.message(AgentRole::Researcher, "s".to_string(), evidence, 0.5)
            })
            .collect()
    }

    #[test]
    fn test_audit_empty_history() {
        let audit = CitationAudit::of(&[]);
        assert_eq!(audit.total_claims, 0);
        assert!(audit.ratio().abs() < f64::EPSILON);
    }

    #[test]
    fn test_audit_ratio() {
        let audit = CitationAudit::of(&prior(&[true, false, true, true]));
        assert_eq!(audit.cited_claims, 3);
        assert!((audit.ratio() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_guard_first_in_round_one() {
        let msg = act(&context(1, &[], 0), &Corpus::default());
        assert!(msg.summary.starts_with("Citation audit: 0/0 claims have explicit evidence linkage (0%)."));
        assert_eq!(msg.evidence.len(), 1);
        assert_eq!(msg.evidence[0].doc_id, "audit");
        assert!((msg.confidence - CONFIDENCE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_guard_reports_percentage() {
        let history = prior(&[true, false, true]);
        let msg = act(&context(2, &history, 0), &Corpus::default());
        assert!(msg.summary.contains("2/3 claims"));
        assert!(msg.summary.contains("(67%)"));
    }
}
