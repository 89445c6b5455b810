//! Relation evaluators for ordinal and string constraints.
//!
//! Each relation is resolved once, when a rule is compiled, into a function
//! pointer (ordinal) or a specialised closure (string). Evaluation never
//! re-dispatches on the relation tag.

use regex::Regex;
use regex_syntax::hir::{Hir, Look};

use crate::loader::{FilterError, Result};
use crate::predicate::Predicate;
use crate::schema::{OrdinalRelation, StringRelation};

/// Compares a candidate ordinal (left) with the constraint ordinal (right).
pub type OrdinalTest = fn(usize, usize) -> bool;

impl OrdinalRelation {
    /// The comparison function for this relation.
    pub fn evaluator(self) -> OrdinalTest {
        match self {
            OrdinalRelation::LessThan => |a, b| a < b,
            OrdinalRelation::LessThanOrEqual => |a, b| a <= b,
            OrdinalRelation::Equal => |a, b| a == b,
            OrdinalRelation::GreaterThanOrEqual => |a, b| a >= b,
            OrdinalRelation::GreaterThan => |a, b| a > b,
            OrdinalRelation::NotEqual => |a, b| a != b,
        }
    }
}

impl StringRelation {
    /// Build the test for `value` under this relation.
    ///
    /// Ignore-case variants lower-case the constraint once here and the
    /// candidate on every call. `REGEX` must match the whole candidate.
    pub fn compile(self, value: &str) -> Result<Predicate<str>> {
        let test: Predicate<str> = match self {
            StringRelation::Match => {
                let value = value.to_owned();
                Box::new(move |s: &str| s == value)
            }
            StringRelation::StartsWith => {
                let value = value.to_owned();
                Box::new(move |s: &str| s.starts_with(value.as_str()))
            }
            StringRelation::Contains => {
                let value = value.to_owned();
                Box::new(move |s: &str| s.contains(value.as_str()))
            }
            StringRelation::EndsWith => {
                let value = value.to_owned();
                Box::new(move |s: &str| s.ends_with(value.as_str()))
            }
            StringRelation::MatchIgnoreCase => {
                let value = fold_case(value);
                Box::new(move |s: &str| fold_case(s) == value)
            }
            StringRelation::StartsWithIgnoreCase => {
                let value = fold_case(value);
                Box::new(move |s: &str| fold_case(s).starts_with(value.as_str()))
            }
            StringRelation::ContainsIgnoreCase => {
                let value = fold_case(value);
                Box::new(move |s: &str| fold_case(s).contains(value.as_str()))
            }
            StringRelation::EndsWithIgnoreCase => {
                let value = fold_case(value);
                Box::new(move |s: &str| fold_case(s).ends_with(value.as_str()))
            }
            StringRelation::Regex => {
                let regex = full_match_regex(value)?;
                Box::new(move |s: &str| regex.is_match(s))
            }
        };
        Ok(test)
    }
}

/// Locale-independent lower-casing.
fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// Compile `pattern` so that it only matches an entire candidate string.
///
/// The pattern is parsed on its own and anchored on the parsed syntax tree,
/// so nothing in the pattern (unbalanced groups, verbose-mode comments) can
/// reach past the anchors.
fn full_match_regex(pattern: &str) -> Result<Regex> {
    let invalid = |source: Box<dyn std::error::Error + Send + Sync>| FilterError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    };
    let hir = regex_syntax::Parser::new()
        .parse(pattern)
        .map_err(|e| invalid(e.into()))?;
    let anchored = Hir::concat(vec![Hir::look(Look::Start), hir, Hir::look(Look::End)]);
    Regex::new(&anchored.to_string()).map_err(|e| invalid(e.into()))
}

// ── Tests ───────────────────────────────────────────────────────────
