//! Error types for loading, compiling and watching filter documents.

use std::path::PathBuf;

/// Errors that can occur while loading or watching a filter document.
///
/// None of these ever reach the decision path: reload failures are logged
/// and the previously installed rule set stays active.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// The document does not exist.
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Filesystem I/O error other than a missing file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse/deserialization error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parse/deserialization error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A `REGEX` constraint whose pattern does not compile.
    #[error("invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Filesystem watcher error.
    #[error("Notify watcher error: {0}")]
    Watch(#[from] notify::Error),
}

impl FilterError {
    /// True for malformed-document errors (syntax, enum values, patterns).
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            FilterError::Yaml(_) | FilterError::Json(_) | FilterError::InvalidPattern { .. }
        )
    }
}

/// Result alias for filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;
