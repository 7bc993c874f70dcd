//! Config surface (§6). Parsing config *files* (YAML/JSON/CLI) is out of
//! scope (§1); these types only define the `Deserialize` shape hosts bind
//! their own config format to, the way `opentelemetry_sdk`'s `Resource`
//! builders accept already-parsed values rather than reading files themselves.

use serde::Deserialize;

fn default_false() -> bool {
    false
}

fn default_mode() -> String {
    "enrich".to_string()
}

fn default_operation_name_attribute() -> String {
    "operation.name".to_string()
}

fn default_operation_type_attribute() -> String {
    "operation.type".to_string()
}

fn default_original_name_attribute() -> String {
    "name.original".to_string()
}

/// Top-level processor configuration (§3).
#[derive(Clone, Debug, Deserialize)]
pub struct ProcessorConfig {
    #[serde(default = "default_false")]
    pub enabled: bool,
    #[serde(default = "default_false")]
    pub benchmark: bool,
    #[serde(default)]
    pub span_processing: SpanProcessingConfig,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        ProcessorConfig {
            enabled: false,
            benchmark: false,
            span_processing: SpanProcessingConfig::default(),
        }
    }
}

/// `span_processing.*` configuration (§3, §6).
#[derive(Clone, Debug, Deserialize)]
pub struct SpanProcessingConfig {
    #[serde(default = "default_false")]
    pub enabled: bool,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_operation_name_attribute")]
    pub operation_name_attribute: String,
    #[serde(default = "default_operation_type_attribute")]
    pub operation_type_attribute: String,
    #[serde(default = "default_false")]
    pub preserve_original_name: bool,
    #[serde(default = "default_original_name_attribute")]
    pub original_name_attribute: String,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl Default for SpanProcessingConfig {
    fn default() -> Self {
        SpanProcessingConfig {
            enabled: false,
            mode: default_mode(),
            operation_name_attribute: default_operation_name_attribute(),
            operation_type_attribute: default_operation_type_attribute(),
            preserve_original_name: false,
            original_name_attribute: default_original_name_attribute(),
            rules: Vec::new(),
        }
    }
}

/// One rule as authored by a user, pre-compilation (§3, §6).
#[derive(Clone, Debug, Deserialize)]
pub struct RuleConfig {
    pub id: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub span_kind: Vec<String>,
    pub condition: String,
    pub operation_name: String,
    #[serde(default)]
    pub operation_type: Option<String>,
}

/// Resolved processing mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Enrich,
    Enforce,
}

impl Mode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "enrich" => Some(Mode::Enrich),
            "enforce" => Some(Mode::Enforce),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Enrich => "enrich",
            Mode::Enforce => "enforce",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let cfg = ProcessorConfig::default();
        assert!(!cfg.enabled);
        assert!(!cfg.benchmark);
        assert!(!cfg.span_processing.enabled);
        assert_eq!(cfg.span_processing.mode, "enrich");
        assert_eq!(cfg.span_processing.operation_name_attribute, "operation.name");
        assert_eq!(cfg.span_processing.operation_type_attribute, "operation.type");
        assert!(!cfg.span_processing.preserve_original_name);
        assert_eq!(cfg.span_processing.original_name_attribute, "name.original");
        assert!(cfg.span_processing.rules.is_empty());
    }

    #[test]
    fn deserialize_fills_defaults_for_missing_fields() {
        let json = r#"{ "span_processing": { "enabled": true, "rules": [
            { "id": "r1", "condition": "true", "operation_name": "\"x\"" }
        ] } }"#;
        let cfg: ProcessorConfig = serde_json::from_str(json).unwrap();
        assert!(cfg.span_processing.enabled);
        assert_eq!(cfg.span_processing.mode, "enrich");
        assert_eq!(cfg.span_processing.rules[0].priority, 0);
        assert!(cfg.span_processing.rules[0].span_kind.is_empty());
    }

    #[test]
    fn mode_parse_rejects_unknown() {
        assert_eq!(Mode::parse("enrich"), Some(Mode::Enrich));
        assert_eq!(Mode::parse("enforce"), Some(Mode::Enforce));
        assert_eq!(Mode::parse("whatever"), None);
    }
}
