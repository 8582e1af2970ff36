//! Citation strictness setting.
//!
//! Accepted from configuration and threaded through every round context.
//! No computation reads it yet; it is carried so callers can record the
//! setting a run was made with.

use serde::{Deserialize, Serialize};

/// How strictly claims are expected to be backed by citations.
///
/// Ordered from most permissive to most demanding.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CitationStrictness {
    /// Loose citation expectations.
    Lenient,
    /// Default expectations.
    #[default]
    Moderate,
    /// Every claim should carry evidence.
    Strict,
    /// Every claim should carry specific, page-level evidence.
    #[serde(rename = "Very Strict")]
    VeryStrict,
}

impl CitationStrictness {
    /// All settings in ascending order.
    pub const ALL: [Self; 4] = [Self::Lenient, Self::Moderate, Self::Strict, Self::VeryStrict];

    /// Parses a strictness name (case-insensitive; `very-strict`,
    /// `very_strict` and `very strict` are all accepted).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        match normalized.as_str() {
            "lenient" => Some(Self::Lenient),
            "moderate" => Some(Self::Moderate),
            "strict" => Some(Self::Strict),
            "verystrict" => Some(Self::VeryStrict),
            _ => None,
        }
    }

    /// Returns the display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lenient => "Lenient",
            Self::Moderate => "Moderate",
            Self::Strict => "Strict",
            Self::VeryStrict => "Very Strict",
        }
    }
}

impl std::fmt::Display for CitationStrictness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
