//! The closed set of panel roles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// A scripted panel member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgentRole {
    /// Summarizes a document and extracts claims.
    Researcher,
    /// Critiques methodology.
    Reviewer,
    /// Aggregates findings across documents.
    Synthesizer,
    /// Compares reported metrics and datasets.
    DataInspector,
    /// Audits evidence linkage of prior messages.
    CitationGuard,
}

impl AgentRole {
    /// Every role, in canonical order.
    pub const ALL: [Self; 5] = [
        Self::Researcher,
        Self::Reviewer,
        Self::Synthesizer,
        Self::DataInspector,
        Self::CitationGuard,
    ];

    /// Roles enabled when nothing is configured.
    pub const DEFAULT_PANEL: [Self; 4] = [
        Self::Researcher,
        Self::Reviewer,
        Self::Synthesizer,
        Self::DataInspector,
    ];

    /// Role name as it appears in messages and graph nodes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Researcher => "Researcher",
            Self::Reviewer => "Reviewer",
            Self::Synthesizer => "Synthesizer",
            Self::DataInspector => "DataInspector",
            Self::CitationGuard => "CitationGuard",
        }
    }

    /// Short description of what the role contributes.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Researcher => "summarizes & extracts claims",
            Self::Reviewer => "critiques & identifies weaknesses",
            Self::Synthesizer => "aggregates & finds consensus",
            Self::DataInspector => "extracts metrics & datasets",
            Self::CitationGuard => "ensures proper citations",
        }
    }

    /// Parses a role name, ignoring case, spaces, `-` and `_`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::UnknownRole`] for unrecognised names.
    pub fn parse(name: &str) -> Result<Self, AgentError> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| AgentError::UnknownRole {
                name: name.to_string(),
            })
    }

    /// Parses a comma-separated list of role names, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::UnknownRole`] for the first unrecognised name.
    pub fn parse_list(list: &str) -> Result<Vec<Self>, AgentError> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::parse)
            .collect()
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
