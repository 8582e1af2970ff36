//! Markdown rendering of a report.
//!
//! Output depends only on its arguments; two reports with equal content
//! render byte-identically apart from the generation timestamp.

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use super::{ClaimKey, EvidenceEntry};

/// Report title line.
pub const TITLE: &str = "# Multi-Agent Research Analysis Report";

/// Closing disclaimer.
pub const DISCLAIMER: &str = "*This report was generated by a multi-agent AI system. \
                              All claims should be verified against original sources.*";

/// Formats a generation timestamp as RFC 3339 with second precision.
#[must_use]
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Renders the report sections in fixed order.
#[must_use]
pub fn render(
    generated_at: &DateTime<Utc>,
    summary: &str,
    hypotheses: &[String],
    conclusions: &[String],
    evidence_map: &BTreeMap<ClaimKey, EvidenceEntry>,
) -> String {
    let mut md = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(md, "{TITLE}\n");
    let _ = writeln!(md, "*Generated: {}*\n", format_timestamp(generated_at));

    md.push_str("## Executive Summary\n\n");
    let _ = writeln!(md, "{summary}\n");

    md.push_str("## Key Hypotheses\n\n");
    numbered(&mut md, hypotheses);

    md.push_str("## Conclusions\n\n");
    numbered(&mut md, conclusions);

    md.push_str("## Evidence Summary\n\n");
    for (key, entry) in evidence_map {
        let _ = writeln!(md, "### {key}");
        let _ = writeln!(md, "- **Agent**: {}", entry.agent);
        let _ = writeln!(md, "- **Confidence**: {:.1}%", entry.confidence * 100.0);
        let _ = writeln!(md, "- **Claim**: {}", entry.claim);
        let _ = writeln!(
            md,
            "- **Evidence**: {} source(s)\n",
            entry.supporting_evidence.len()
        );
    }

    md.push_str("---\n");
    let _ = writeln!(md, "{DISCLAIMER}");
    md
}

fn numbered(md: &mut String, items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(md, "{}. {item}", i + 1);
    }
    md.push('\n');
}
