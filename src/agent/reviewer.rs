//! Reviewer: fixed methodological critique.

use super::context::RoundContext;
use super::message::{AgentMessage, EvidenceRef};
use super::role::AgentRole;
use crate::core::Corpus;

/// Critique points, of which the first two are reported.
pub const CRITIQUE_POINTS: [&str; 3] = [
    "Limited scope: Only analyzed single datasets without cross-validation",
    "Methodological concern: Sample size may be insufficient for statistical significance",
    "Assumption risk: Linear model assumes relationships not validated in domain literature",
];

const REPORTED_POINTS: usize = 2;

/// Reviewer confidence.
pub const CONFIDENCE: f64 = 0.72;

pub(super) fn act(ctx: &RoundContext<'_>, corpus: &Corpus) -> AgentMessage {
    let summary = format!(
        "Critical assessment: {}. Recommendation: Conduct sensitivity analysis and validation on {} additional datasets.",
        CRITIQUE_POINTS[..REPORTED_POINTS].join("; "),
        corpus.len(),
    );

    let evidence = vec![
        EvidenceRef::new("doc_0", 1, "Methods section indicates sample size of N=250"),
        EvidenceRef::new("doc_0", 3, "Linear regression model with three parameters"),
    ];

    ctx.message(AgentRole::Reviewer, summary, evidence, CONFIDENCE)
}
