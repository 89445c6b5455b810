//! Rule compilation: turns a [`FilterRule`] into one composed predicate.
//!
//! A compiled rule is the AND of:
//! 1. a guard rejecting the engine's own diagnostic logger
//! 2. every non-empty field group of the rule
//!
//! Groups are built from the combinators in [`crate::predicate`] and the
//! relation evaluators in [`crate::relations`]. Absent record fields make the
//! constraint that reads them false.

use std::fmt;

use tracing::debug;

use crate::event_filter::DIAGNOSTIC_LOGGER;
use crate::loader::Result;
use crate::predicate::{all, and, any, not, Predicate};
use crate::record::LogRecord;
use crate::schema::{Comparable, Config, FilterRule, LogLevel, ParameterMatch, StringComparable};

/// Reads a single string field of a record.
type Field = fn(&LogRecord) -> Option<&str>;

/// Reads an indexed string field (parameter class or value) of a record.
type IndexedField = fn(&LogRecord, usize) -> Option<&str>;

// ── Compiled output ─────────────────────────────────────────────────

/// A rule compiled into a predicate, plus its diagnostic flag.
pub struct CompiledRule {
    predicate: Predicate<LogRecord>,
    log_rule_firing: bool,
}

impl CompiledRule {
    pub fn matches(&self, record: &LogRecord) -> bool {
        (self.predicate)(record)
    }

    pub fn log_rule_firing(&self) -> bool {
        self.log_rule_firing
    }
}

impl fmt::Debug for CompiledRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledRule")
            .field("log_rule_firing", &self.log_rule_firing)
            .finish_non_exhaustive()
    }
}

/// An immutable, fully compiled filter document.
///
/// Built once per load and shared behind an `Arc`; never mutated afterwards.
#[derive(Debug, Default)]
pub struct RuleSet {
    threshold: LogLevel,
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    pub fn new(threshold: LogLevel, rules: Vec<CompiledRule>) -> Self {
        Self { threshold, rules }
    }

    /// Diagnostic dump threshold (`logEvents`).
    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The first rule in document order matching `record`.
    pub fn first_match(&self, record: &LogRecord) -> Option<(usize, &CompiledRule)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(record))
    }
}

// ── Compilation ─────────────────────────────────────────────────────

/// Compile a whole document. Fails on the first rule that does not compile.
pub fn compile_config(config: &Config) -> Result<RuleSet> {
    let rules = config
        .rules
        .iter()
        .map(compile_rule)
        .collect::<Result<Vec<_>>>()?;
    debug!(rules = rules.len(), threshold = %config.log_events, "compiled filter rules");
    Ok(RuleSet::new(config.log_events, rules))
}

/// Compile a single rule into its AND-composed predicate.
pub fn compile_rule(rule: &FilterRule) -> Result<CompiledRule> {
    let mut groups: Vec<Predicate<LogRecord>> = vec![self_guard()];

    if !rule.level.is_empty() {
        groups.push(level_group(&rule.level));
    }

    push_string_group(&mut groups, &rule.logger_name, LogRecord::logger_name)?;
    push_string_group(&mut groups, &rule.thread_name, LogRecord::thread_name)?;
    push_string_group(&mut groups, &rule.throwable_class, LogRecord::throwable_class)?;
    push_string_group(&mut groups, &rule.message, LogRecord::message)?;
    push_string_group(&mut groups, &rule.format_message, LogRecord::format_message)?;
    push_parameter_group(&mut groups, &rule.parameter_classes, LogRecord::parameter_class)?;
    push_parameter_group(&mut groups, &rule.parameter_values, LogRecord::parameter_value)?;

    Ok(CompiledRule {
        predicate: all(groups),
        log_rule_firing: rule.log_rule_firing,
    })
}

/// Keeps the engine's own diagnostic output out of its rules.
fn self_guard() -> Predicate<LogRecord> {
    Box::new(|record: &LogRecord| record.logger_name != DIAGNOSTIC_LOGGER)
}

fn level_group(levels: &[Comparable<LogLevel>]) -> Predicate<LogRecord> {
    let tests = levels
        .iter()
        .map(|constraint| {
            let test = constraint.relation.evaluator();
            let value = constraint.value.ordinal();
            Box::new(move |record: &LogRecord| test(record.level.ordinal(), value))
                as Predicate<LogRecord>
        })
        .collect();
    all(tests)
}

fn push_string_group(
    groups: &mut Vec<Predicate<LogRecord>>,
    comparables: &[StringComparable],
    field: Field,
) -> Result<()> {
    if comparables.is_empty() {
        return Ok(());
    }
    let matcher = any(
        comparables
            .iter()
            .map(|c| string_matcher(c, true))
            .collect::<Result<Vec<_>>>()?,
    );
    groups.push(Box::new(move |record: &LogRecord| {
        field(record).is_some_and(|value| matcher(value))
    }));
    Ok(())
}

fn push_parameter_group(
    groups: &mut Vec<Predicate<LogRecord>>,
    maps: &[ParameterMatch],
    field: IndexedField,
) -> Result<()> {
    if maps.is_empty() {
        return Ok(());
    }
    let alternatives = maps
        .iter()
        .map(|map| parameter_map(map, field))
        .collect::<Result<Vec<_>>>()?;
    groups.push(any(alternatives));
    Ok(())
}

/// All indexed constraints of one map must hold.
fn parameter_map(map: &ParameterMatch, field: IndexedField) -> Result<Predicate<LogRecord>> {
    let entries = map
        .iter()
        .map(|(&index, comparable)| -> Result<Predicate<LogRecord>> {
            let matcher = string_matcher(comparable, true)?;
            Ok(Box::new(move |record: &LogRecord| {
                field(record, index).is_some_and(|value| matcher(value))
            }))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(all(entries))
}

/// Compile one string constraint.
///
/// With `with_whitelist`, a non-empty whitelist is ANDed in as
/// `not(any(whitelist))`; whitelist entries themselves are compiled without
/// their own whitelist, capping negation at one level.
fn string_matcher(comparable: &StringComparable, with_whitelist: bool) -> Result<Predicate<str>> {
    let test = comparable.relation.compile(&comparable.value)?;
    if !with_whitelist || comparable.whitelist.is_empty() {
        return Ok(test);
    }
    let exceptions = comparable
        .whitelist
        .iter()
        .map(|entry| string_matcher(entry, false))
        .collect::<Result<Vec<_>>>()?;
    Ok(and(test, not(any(exceptions))))
}

// ── Tests ───────────────────────────────────────────────────────────
