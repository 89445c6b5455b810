//! Declarative log-event filtering engine.
//!
//! This crate provides:
//! - YAML/JSON rule documents with serde deserialization
//! - Compilation of rules into composed AND/OR predicate trees
//! - A lock-light [`EventFilter`] that decides Suppress/Neutral per record
//! - Filesystem hot-reload via a `notify` watcher with cooperative shutdown

pub mod compiler;
pub mod event_filter;
pub mod loader;
pub mod predicate;
pub mod record;
pub mod relations;
pub mod schema;
pub mod service;

pub use compiler::{compile_config, compile_rule, CompiledRule, RuleSet};
pub use event_filter::{Decision, EventFilter, Outcome, DIAGNOSTIC_LOGGER};
pub use loader::{apply_config, load_config, reload, ConfigWatcher, FilterError, Result};
pub use record::{LogRecord, Parameter};
pub use schema::{Config, FilterRule, LogLevel};
pub use service::FilterService;
