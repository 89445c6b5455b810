//! The per-record decision path.
//!
//! [`EventFilter`] holds the active [`RuleSet`] behind a `RwLock<Arc<_>>`.
//! The lock only guards the pointer: readers clone the `Arc` and evaluate
//! against that snapshot, reloads build a complete new set and swap it in.
//! A decision therefore sees either the old set or the new one, never a mix.

use std::sync::{Arc, PoisonError, RwLock};

use crate::compiler::RuleSet;
use crate::record::LogRecord;
use crate::schema::LogLevel;

/// Logger identity (the `tracing` target) of the engine's own diagnostics.
///
/// Records carrying this logger name are never matched by user rules and
/// never dumped, so diagnostics cannot feed back into the filter.
pub const DIAGNOSTIC_LOGGER: &str = "log_filter";

/// Emit a diagnostic event at a level chosen at runtime.
macro_rules! diagnostic {
    ($level:expr, $($arg:tt)+) => {{
        let level: tracing::Level = $level;
        if level == tracing::Level::TRACE {
            tracing::trace!(target: DIAGNOSTIC_LOGGER, $($arg)+);
        } else if level == tracing::Level::DEBUG {
            tracing::debug!(target: DIAGNOSTIC_LOGGER, $($arg)+);
        } else if level == tracing::Level::INFO {
            tracing::info!(target: DIAGNOSTIC_LOGGER, $($arg)+);
        } else if level == tracing::Level::WARN {
            tracing::warn!(target: DIAGNOSTIC_LOGGER, $($arg)+);
        } else {
            tracing::error!(target: DIAGNOSTIC_LOGGER, $($arg)+);
        }
    }};
}

/// What the host should do with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Drop the record.
    Suppress,
    /// No opinion; the host applies its default handling.
    Neutral,
}

/// Why a decision was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Rule `index` (document order) matched first; `logged` when it emitted
    /// a rule-firing diagnostic.
    RuleMatched { index: usize, logged: bool },
    /// No rule matched and the record was dumped as a diagnostic entry.
    Dumped,
    /// No rule matched and dumping is off.
    Unmatched,
}

impl Outcome {
    pub fn decision(self) -> Decision {
        match self {
            Outcome::RuleMatched { .. } | Outcome::Dumped => Decision::Suppress,
            Outcome::Unmatched => Decision::Neutral,
        }
    }
}

/// Holds the active rule set and evaluates records against it.
#[derive(Debug)]
pub struct EventFilter {
    active: RwLock<Arc<RuleSet>>,
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventFilter {
    /// A filter with no rules and dumping disabled (`NONE`).
    pub fn new() -> Self {
        Self::with_rules(RuleSet::default())
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            active: RwLock::new(Arc::new(rules)),
        }
    }

    /// Atomically replace the active rule set, returning the previous one.
    pub fn install(&self, rules: RuleSet) -> Arc<RuleSet> {
        let mut guard = self.active.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(rules))
    }

    /// The currently installed rule set.
    pub fn snapshot(&self) -> Arc<RuleSet> {
        Arc::clone(&self.active.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn threshold(&self) -> LogLevel {
        self.snapshot().threshold()
    }

    pub fn rule_count(&self) -> usize {
        self.snapshot().len()
    }

    /// Decide whether `record` should be suppressed.
    pub fn decide(&self, record: &LogRecord) -> Decision {
        self.evaluate(record).decision()
    }

    /// Evaluate `record` against the active rules, emitting diagnostics.
    ///
    /// 1. The first matching rule suppresses; it logs when `logRuleFiring`.
    /// 2. Otherwise, with a threshold other than `NONE`, the record is dumped
    ///    as a diagnostic entry and suppressed (unless it is our own).
    /// 3. Otherwise the record passes untouched.
    pub fn evaluate(&self, record: &LogRecord) -> Outcome {
        let rules = self.snapshot();
        let threshold = rules.threshold();

        if let Some((index, rule)) = rules.first_match(record) {
            let logged = rule.log_rule_firing();
            if logged {
                diagnostic!(
                    threshold.diagnostic_level(),
                    rule = index,
                    "Filtered message of level {}",
                    record.level
                );
            }
            return Outcome::RuleMatched { index, logged };
        }

        if threshold != LogLevel::None && record.logger_name != DIAGNOSTIC_LOGGER {
            dump_record(threshold, record);
            return Outcome::Dumped;
        }

        Outcome::Unmatched
    }
}

/// One diagnostic entry describing an unmatched record, for rule authoring.
fn dump_record(threshold: LogLevel, record: &LogRecord) {
    diagnostic!(
        threshold.diagnostic_level(),
        record_level = %record.level,
        logger_name = %record.logger_name,
        thread_name = %record.thread_name,
        throwable_class = ?record.throwable_class,
        formatted_message = %record.message,
        format_message = ?record.format_message,
        parameter_classes = ?record.parameter_classes(),
        "Logging event"
    );
}

// ── Tests ───────────────────────────────────────────────────────────
