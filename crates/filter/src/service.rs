//! Bootstrap: initial load plus hot-reload, wired to one shared filter.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::event_filter::{Decision, EventFilter};
use crate::loader::{apply_config, ConfigWatcher};
use crate::record::LogRecord;

/// Default document name, resolved relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "log_filter.json";

/// A running filter: the shared [`EventFilter`] and the watcher feeding it.
///
/// The filter handle is passed explicitly to whoever needs it; there is no
/// process-wide state.
pub struct FilterService {
    config_path: PathBuf,
    filter: Arc<EventFilter>,
    watcher: Option<ConfigWatcher>,
}

impl FilterService {
    /// Load the document once, synchronously, then start watching it.
    ///
    /// Load failures leave the filter empty until a later reload succeeds.
    /// If the watcher cannot start, the error is logged and the initially
    /// loaded rules stay active for the lifetime of the service.
    pub fn start(config_path: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        warn!(path = %config_path.display(), "Log Filter was loaded! Log messages might be removed!");

        let filter = Arc::new(EventFilter::new());
        apply_config(&config_path, &filter);

        let watcher = ConfigWatcher::start(&config_path, {
            let filter = Arc::clone(&filter);
            let path = config_path.clone();
            move || {
                info!(path = %path.display(), "Reloading log filter config.");
                apply_config(&path, &filter);
            }
        });
        let watcher = match watcher {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                error!(path = %config_path.display(), error = %e, "failed to start config watcher, rules will not reload");
                None
            }
        };

        Self {
            config_path,
            filter,
            watcher,
        }
    }

    /// Shared handle to the filter, for attaching to a host.
    pub fn filter(&self) -> Arc<EventFilter> {
        Arc::clone(&self.filter)
    }

    pub fn decide(&self, record: &LogRecord) -> Decision {
        self.filter.decide(record)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// True while changes to the document are being picked up.
    pub fn is_watching(&self) -> bool {
        self.watcher.as_ref().is_some_and(ConfigWatcher::is_running)
    }

    /// Stop the watcher and wait for its thread. The filter keeps working
    /// with whatever rules were last installed.
    pub fn shutdown(&mut self) {
        if let Some(mut watcher) = self.watcher.take() {
            watcher.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::thread;
    use std::time::{Duration, Instant};

    use tempfile::TempDir;

    use super::*;
    use crate::schema::LogLevel;

    const RULES: &str = r#"
rules:
  - loggerName:
      - relation: CONTAINS_IGNORE_CASE
        value: spam
"#;

    fn spam() -> LogRecord {
        LogRecord::new(LogLevel::Info, "io.SpamSender", "buy now")
    }

    #[test]
    fn start_loads_synchronously() {
        let dir = TempDir::new().expect("create tempdir");
        let path = dir.path().join("log_filter.yml");
        fs::write(&path, RULES).unwrap();

        let mut service = FilterService::start(&path);
        assert_eq!(service.config_path(), path.as_path());
        assert!(service.is_watching());
        assert_eq!(service.decide(&spam()), Decision::Suppress);
        assert_eq!(service.filter().rule_count(), 1);

        service.shutdown();
        assert!(!service.is_watching());
        assert_eq!(service.decide(&spam()), Decision::Suppress);
    }

    #[test]
    fn missing_file_starts_empty_and_picks_up_creation() {
        let dir = TempDir::new().expect("create tempdir");
        let path = dir.path().join("log_filter.yml");

        let service = FilterService::start(&path);
        assert_eq!(service.decide(&spam()), Decision::Neutral);

        fs::write(&path, RULES).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while service.decide(&spam()) != Decision::Suppress && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(service.decide(&spam()), Decision::Suppress);
    }

    #[test]
    fn unwatchable_directory_keeps_service_usable() {
        let dir = TempDir::new().expect("create tempdir");
        let path = dir.path().join("missing").join("log_filter.yml");

        let service = FilterService::start(&path);
        assert!(!service.is_watching());
        assert_eq!(service.decide(&spam()), Decision::Neutral);
    }
}
