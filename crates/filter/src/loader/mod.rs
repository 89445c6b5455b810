//! Filter document loader with hot-reload via `notify` watcher.
//!
//! Reads a JSON or YAML document, compiles it and installs the result into
//! an [`EventFilter`](crate::EventFilter). The [`ConfigWatcher`] repeats this
//! whenever the file changes; failed reloads keep the previous rule set.

mod core;
mod error;
mod watcher;


pub use self::core::{apply_config, load_config, parse_config, reload, DocumentFormat};
pub use self::error::{FilterError, Result};
pub use self::watcher::{ConfigWatcher, POLL_INTERVAL};
