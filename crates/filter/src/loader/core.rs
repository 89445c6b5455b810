//! Reading, parsing and installing filter documents.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{error, info};

use crate::compiler::compile_config;
use crate::event_filter::EventFilter;
use crate::schema::Config;

use super::error::{FilterError, Result};

/// Serialization format of a filter document, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.json` is JSON; everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            DocumentFormat::Json
        } else {
            DocumentFormat::Yaml
        }
    }
}

/// Parse a document body in the given format.
pub fn parse_config(contents: &str, format: DocumentFormat) -> Result<Config> {
    let config = match format {
        DocumentFormat::Json => serde_json::from_str(contents)?,
        DocumentFormat::Yaml => serde_yaml::from_str(contents)?,
    };
    Ok(config)
}

/// Read and parse the document at `path`.
pub fn load_config(path: &Path) -> Result<Config> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(FilterError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    parse_config(&contents, DocumentFormat::from_path(path))
}

/// Load, compile and install the document at `path`.
///
/// Returns the number of installed rules. Nothing is installed on error, so
/// the previous rule set stays active.
pub fn reload(path: &Path, filter: &EventFilter) -> Result<usize> {
    let config = load_config(path)?;
    let rules = compile_config(&config)?;
    let count = rules.len();
    let threshold = rules.threshold();
    filter.install(rules);
    info!(path = %path.display(), rules = count, log_events = %threshold, "installed log filter rules");
    Ok(count)
}

/// [`reload`], logging failures instead of returning them.
///
/// Returns `true` when a new rule set was installed.
pub fn apply_config(path: &Path, filter: &EventFilter) -> bool {
    match reload(path, filter) {
        Ok(_) => true,
        Err(FilterError::NotFound { path }) => {
            error!(path = %path.display(), "Config file not found, can't add filters!");
            false
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Error while loading config, won't update!");
            false
        }
    }
}
