//! Constraint types: ordinal comparables and string comparables with whitelists.

use serde::{Deserialize, Serialize};

/// Ordinal comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrdinalRelation {
    LessThan,
    LessThanOrEqual,
    Equal,
    GreaterThanOrEqual,
    GreaterThan,
    NotEqual,
}

/// An ordinal constraint `{relation, value}` evaluated on ordinal positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparable<T> {
    pub relation: OrdinalRelation,
    pub value: T,
}

/// String comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StringRelation {
    Match,
    StartsWith,
    Contains,
    EndsWith,
    MatchIgnoreCase,
    StartsWithIgnoreCase,
    ContainsIgnoreCase,
    EndsWithIgnoreCase,
    Regex,
}

impl StringRelation {
    pub fn is_ignore_case(self) -> bool {
        matches!(
            self,
            StringRelation::MatchIgnoreCase
                | StringRelation::StartsWithIgnoreCase
                | StringRelation::ContainsIgnoreCase
                | StringRelation::EndsWithIgnoreCase
        )
    }
}

/// A string constraint with an optional whitelist of exceptions.
///
/// Matches when `relation` holds for the field and no whitelist entry holds
/// for the same field. Whitelist entries are evaluated without their own
/// nested whitelist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringComparable {
    pub relation: StringRelation,
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub whitelist: Vec<StringComparable>,
}

impl StringComparable {
    pub fn new(relation: StringRelation, value: impl Into<String>) -> Self {
        Self {
            relation,
            value: value.into(),
            whitelist: Vec::new(),
        }
    }

    /// Attach whitelist entries, builder style.
    pub fn with_whitelist(mut self, whitelist: Vec<StringComparable>) -> Self {
        self.whitelist = whitelist;
        self
    }
}
