//! The log record shape consumed by the engine.

use serde::{Deserialize, Deserializer, Serialize};

use crate::schema::LogLevel;

/// A positional message parameter: its runtime class name and rendered value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub class_name: String,
    pub value: String,
}

impl Parameter {
    pub fn new(class_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            value: value.into(),
        }
    }
}

/// Host levels are matched by name; anything unrecognised becomes `NONE`.
fn native_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LogLevel, D::Error> {
    let name = String::deserialize(deserializer)?;
    Ok(LogLevel::from_name(&name))
}

/// One structured log event as delivered by the host.
///
/// Optional fields are `None` when the host has nothing to report; a null
/// parameter is a `None` entry in `parameters`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    #[serde(default, deserialize_with = "native_level")]
    pub level: LogLevel,
    #[serde(default)]
    pub logger_name: String,
    #[serde(default)]
    pub thread_name: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throwable_class: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Option<Parameter>>,
}

impl LogRecord {
    pub fn new(level: LogLevel, logger_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            logger_name: logger_name.into(),
            thread_name: String::new(),
            message: message.into(),
            format_message: None,
            throwable_class: None,
            parameters: Vec::new(),
        }
    }

    pub fn with_thread(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    pub fn with_format(mut self, format_message: impl Into<String>) -> Self {
        self.format_message = Some(format_message.into());
        self
    }

    pub fn with_throwable(mut self, class_name: impl Into<String>) -> Self {
        self.throwable_class = Some(class_name.into());
        self
    }

    pub fn with_parameter(mut self, parameter: Option<Parameter>) -> Self {
        self.parameters.push(parameter);
        self
    }

    // ── Field accessors used by compiled rules ──────────────────────

    pub fn logger_name(&self) -> Option<&str> {
        Some(&self.logger_name)
    }

    pub fn thread_name(&self) -> Option<&str> {
        Some(&self.thread_name)
    }

    pub fn message(&self) -> Option<&str> {
        Some(&self.message)
    }

    pub fn format_message(&self) -> Option<&str> {
        self.format_message.as_deref()
    }

    pub fn throwable_class(&self) -> Option<&str> {
        self.throwable_class.as_deref()
    }

    /// Parameter at `index`; `None` when out of range or null.
    pub fn parameter(&self, index: usize) -> Option<&Parameter> {
        self.parameters.get(index).and_then(Option::as_ref)
    }

    /// Runtime class name of the parameter at `index`.
    pub fn parameter_class(&self, index: usize) -> Option<&str> {
        self.parameter(index).map(|p| p.class_name.as_str())
    }

    /// Rendered value of the parameter at `index`.
    ///
    /// A null parameter renders as `"null"`; only an out-of-range index is
    /// absent.
    pub fn parameter_value(&self, index: usize) -> Option<&str> {
        match self.parameters.get(index)? {
            Some(p) => Some(p.value.as_str()),
            None => Some(NULL_MARKER),
        }
    }

    /// Class names of all parameters, `"null"` for null ones.
    pub fn parameter_classes(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .map(|p| p.as_ref().map_or(NULL_MARKER, |p| p.class_name.as_str()))
            .collect()
    }
}

/// Rendering of a null parameter.
pub const NULL_MARKER: &str = "null";

#[cfg(test)]
mod tests {
    use super::*;

    fn level_of(json: &str) -> LogLevel {
        serde_json::from_str::<LogRecord>(json).unwrap().level
    }

    #[test]
    fn native_levels_map_by_name() {
        assert_eq!(level_of(r#"{"level":"WARN"}"#), LogLevel::Warn);
        assert_eq!(level_of(r#"{"level":"warn"}"#), LogLevel::Warn);
        assert_eq!(level_of(r#"{"level":"WARNING"}"#), LogLevel::Warn);
        assert_eq!(level_of(r#"{"level":"Error"}"#), LogLevel::Error);
    }

    #[test]
    fn unknown_native_level_becomes_none() {
        assert_eq!(level_of(r#"{"level":"VERBOSE","message":"m"}"#), LogLevel::None);
        assert_eq!(level_of(r#"{"message":"m"}"#), LogLevel::None);
    }

    #[test]
    fn null_parameter_renders_as_null() {
        let record = LogRecord::new(LogLevel::Info, "app", "m")
            .with_parameter(None)
            .with_parameter(Some(Parameter::new("java.lang.String", "x")));
        assert_eq!(record.parameter_value(0), Some(NULL_MARKER));
        assert_eq!(record.parameter_class(0), None);
        assert_eq!(record.parameter_value(2), None);
    }
}
