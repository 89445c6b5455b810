//! Tests for schema types.

use super::*;

const FULL_RULE_YAML: &str = r#"
logEvents: DEBUG
rules:
  - level:
      - relation: GREATER_THAN_OR_EQUAL
        value: WARN
    loggerName:
      - relation: STARTS_WITH
        value: net.minecraft
    message:
      - relation: CONTAINS
        value: error
        whitelist:
          - relation: MATCH
            value: ignorable-error
    parameterClasses:
      - 0:
          relation: MATCH
          value: java.lang.String
        1:
          relation: MATCH
          value: java.lang.Integer
    logRuleFiring: true
  - threadName:
      - relation: REGEX
        value: "Worker-\\d+"
"#;

const FULL_RULE_JSON: &str = r#"
{
  "logEvents": "NONE",
  "rules": [
    {
      "throwableClass": [{ "relation": "ENDS_WITH_IGNORE_CASE", "value": "timeoutexception" }],
      "parameterValues": [{ "2": { "relation": "CONTAINS", "value": "secret" } }]
    }
  ]
}
"#;

#[test]
fn parse_full_yaml_document() {
    let config: Config = serde_yaml::from_str(FULL_RULE_YAML).unwrap();

    assert_eq!(config.log_events, LogLevel::Debug);
    assert_eq!(config.rules.len(), 2);

    let first = &config.rules[0];
    assert_eq!(first.level.len(), 1);
    assert_eq!(first.level[0].relation, OrdinalRelation::GreaterThanOrEqual);
    assert_eq!(first.level[0].value, LogLevel::Warn);
    assert_eq!(first.logger_name[0].relation, StringRelation::StartsWith);
    assert_eq!(first.message[0].whitelist.len(), 1);
    assert_eq!(first.message[0].whitelist[0].value, "ignorable-error");
    assert_eq!(first.parameter_classes.len(), 1);
    assert_eq!(first.parameter_classes[0].len(), 2);
    assert_eq!(first.parameter_classes[0][&1].value, "java.lang.Integer");
    assert!(first.log_rule_firing);

    let second = &config.rules[1];
    assert_eq!(second.thread_name[0].relation, StringRelation::Regex);
    assert_eq!(second.thread_name[0].value, "Worker-\\d+");
    assert!(!second.log_rule_firing);
}

#[test]
fn parse_json_document_with_string_indices() {
    let config: Config = serde_json::from_str(FULL_RULE_JSON).unwrap();

    assert_eq!(config.log_events, LogLevel::None);
    let rule = &config.rules[0];
    assert_eq!(
        rule.throwable_class[0].relation,
        StringRelation::EndsWithIgnoreCase
    );
    assert_eq!(rule.parameter_values[0][&2].value, "secret");
}

#[test]
fn missing_fields_use_defaults() {
    let config: Config = serde_yaml::from_str("rules:\n  - {}\n").unwrap();

    assert_eq!(config.log_events, LogLevel::None);
    assert_eq!(config.rules.len(), 1);
    assert!(config.rules[0].is_unconstrained());
    assert!(!config.rules[0].log_rule_firing);

    let empty: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, Config::default());
}

#[test]
fn unknown_fields_are_ignored() {
    let yaml = r#"
logEvents: INFO
futureSetting: 42
rules:
  - message:
      - relation: MATCH
        value: hello
        priority: high
    someNewGroup: []
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.log_events, LogLevel::Info);
    assert_eq!(config.rules[0].message[0].value, "hello");
}

#[test]
fn unknown_relation_is_rejected() {
    let yaml = r#"
rules:
  - message:
      - relation: SOUNDS_LIKE
        value: hello
"#;
    assert!(serde_yaml::from_str::<Config>(yaml).is_err());
}

#[test]
fn missing_relation_is_rejected() {
    let json = r#"{ "rules": [ { "loggerName": [ { "value": "x" } ] } ] }"#;
    assert!(serde_json::from_str::<Config>(json).is_err());
}

#[test]
fn unknown_level_is_rejected() {
    let yaml = "logEvents: VERBOSE\n";
    assert!(serde_yaml::from_str::<Config>(yaml).is_err());
}

#[test]
fn relation_spellings_round_trip() {
    let spellings = [
        ("MATCH", StringRelation::Match),
        ("STARTS_WITH", StringRelation::StartsWith),
        ("CONTAINS", StringRelation::Contains),
        ("ENDS_WITH", StringRelation::EndsWith),
        ("MATCH_IGNORE_CASE", StringRelation::MatchIgnoreCase),
        ("STARTS_WITH_IGNORE_CASE", StringRelation::StartsWithIgnoreCase),
        ("CONTAINS_IGNORE_CASE", StringRelation::ContainsIgnoreCase),
        ("ENDS_WITH_IGNORE_CASE", StringRelation::EndsWithIgnoreCase),
        ("REGEX", StringRelation::Regex),
    ];
    for (name, relation) in spellings {
        let parsed: StringRelation = serde_json::from_str(&format!("\"{}\"", name)).unwrap();
        assert_eq!(parsed, relation, "spelling {}", name);
    }

    let ordinal: OrdinalRelation = serde_json::from_str("\"LESS_THAN_OR_EQUAL\"").unwrap();
    assert_eq!(ordinal, OrdinalRelation::LessThanOrEqual);
    let ordinal: OrdinalRelation = serde_json::from_str("\"NOT_EQUAL\"").unwrap();
    assert_eq!(ordinal, OrdinalRelation::NotEqual);
}

#[test]
fn level_ordering_and_names() {
    assert!(LogLevel::All < LogLevel::Trace);
    assert!(LogLevel::Fatal < LogLevel::None);
    assert_eq!(LogLevel::All.ordinal(), 0);
    assert_eq!(LogLevel::None.ordinal(), 7);
    for (i, level) in LogLevel::VALUES.iter().enumerate() {
        assert_eq!(level.ordinal(), i);
    }

    assert_eq!(LogLevel::from_name("warn"), LogLevel::Warn);
    assert_eq!(LogLevel::from_name("WARNING"), LogLevel::Warn);
    assert_eq!(LogLevel::from_name("Fatal"), LogLevel::Fatal);
    assert_eq!(LogLevel::from_name("notice"), LogLevel::None);
    assert_eq!(LogLevel::from(tracing::Level::ERROR), LogLevel::Error);
    assert_eq!(LogLevel::Warn.to_string(), "WARN");
}

#[test]
fn diagnostic_level_falls_back_to_info() {
    assert_eq!(LogLevel::Debug.diagnostic_level(), tracing::Level::DEBUG);
    assert_eq!(LogLevel::Error.diagnostic_level(), tracing::Level::ERROR);
    assert_eq!(LogLevel::All.diagnostic_level(), tracing::Level::INFO);
    assert_eq!(LogLevel::Fatal.diagnostic_level(), tracing::Level::INFO);
    assert_eq!(LogLevel::None.diagnostic_level(), tracing::Level::INFO);
}
