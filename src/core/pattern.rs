//! Compiled-once regular expressions.

use regex::Regex;

/// Compiles a pattern written as a literal in this crate.
///
/// Only called from `LazyLock` initialisers with literal patterns that are
/// covered by unit tests, so compilation cannot fail at runtime.
#[allow(clippy::expect_used)]
pub(crate) fn literal(pattern: &'static str) -> Regex {
    Regex::new(pattern).expect("literal regex pattern must compile")
}
