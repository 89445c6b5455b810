//! Ordered log level enumeration shared by rules and records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log levels in fixed ordinal order, most verbose first.
///
/// `NONE` is the highest ordinal and doubles as the "do not log" sentinel.
/// Ordinal comparisons in rules only ever look at [`LogLevel::ordinal`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    All,
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    #[default]
    None,
}

impl LogLevel {
    /// Every level in ordinal order.
    pub const VALUES: [LogLevel; 8] = [
        LogLevel::All,
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
        LogLevel::None,
    ];

    /// Position in the fixed ordering (`ALL` = 0, `NONE` = 7).
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Map a native level name onto this enumeration.
    ///
    /// Matching is ASCII case-insensitive and `WARNING` is accepted for
    /// `WARN`. Anything unrecognised maps to `NONE`.
    pub fn from_name(name: &str) -> LogLevel {
        name.parse().unwrap_or(LogLevel::None)
    }

    /// Level used for the engine's own diagnostic entries.
    ///
    /// Levels with no `tracing` counterpart (`ALL`, `FATAL`, `NONE`) fall
    /// back to `INFO`.
    pub fn diagnostic_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::All | LogLevel::Fatal | LogLevel::None => tracing::Level::INFO,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::All => "ALL",
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
            LogLevel::None => "NONE",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "ALL" => Ok(LogLevel::All),
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            "NONE" => Ok(LogLevel::None),
            _ => Err(format!("unknown log level: '{}'", s)),
        }
    }
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        LogLevel::from_name(level.as_str())
    }
}
