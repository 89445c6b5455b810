//! Root document and per-rule field groups.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Comparable, LogLevel, StringComparable};

/// Parameter index → constraint. All entries of one map must hold.
pub type ParameterMatch = BTreeMap<usize, StringComparable>;

/// Root of a loaded filter document.
///
/// Unknown fields are ignored so that newer documents still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Threshold for the unmatched-record diagnostic dump; `NONE` disables it.
    #[serde(default)]
    pub log_events: LogLevel,
    /// Rules in document order; the first match wins.
    #[serde(default)]
    pub rules: Vec<FilterRule>,
}

/// A single suppression rule.
///
/// Groups are AND-combined with each other. Inside a group:
/// - `level` constraints are AND-combined
/// - string comparables are OR-combined
/// - parameter maps are OR-combined, entries within one map AND-combined
///
/// An empty group does not constrain the rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRule {
    #[serde(default)]
    pub level: Vec<Comparable<LogLevel>>,
    #[serde(default)]
    pub logger_name: Vec<StringComparable>,
    #[serde(default)]
    pub thread_name: Vec<StringComparable>,
    #[serde(default)]
    pub throwable_class: Vec<StringComparable>,
    #[serde(default)]
    pub message: Vec<StringComparable>,
    #[serde(default)]
    pub format_message: Vec<StringComparable>,
    #[serde(default)]
    pub parameter_classes: Vec<ParameterMatch>,
    #[serde(default)]
    pub parameter_values: Vec<ParameterMatch>,
    /// Emit a diagnostic entry whenever this rule suppresses a record.
    #[serde(default)]
    pub log_rule_firing: bool,
}

impl FilterRule {
    /// True when no group constrains the rule, i.e. it matches every record.
    pub fn is_unconstrained(&self) -> bool {
        self.level.is_empty()
            && self.logger_name.is_empty()
            && self.thread_name.is_empty()
            && self.throwable_class.is_empty()
            && self.message.is_empty()
            && self.format_message.is_empty()
            && self.parameter_classes.is_empty()
            && self.parameter_values.is_empty()
    }
}
