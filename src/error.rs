//! Error taxonomy (§7): validation errors are fatal at startup, processing
//! errors are recoverable and isolated to a single rule/span.

use thiserror::Error;

/// A specialized `Result` type for rule-compilation operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while compiling a [`crate::config::ProcessorConfig`] into
/// [`crate::rules::CompiledRules`]. All variants are fatal: the host must not
/// start processing spans until compilation succeeds (§4.B, §7).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// `span_processing.rules` was empty while `span_processing.enabled` is true.
    #[error("span_processing.rules must not be empty when span_processing.enabled is true")]
    EmptyRuleSet,

    /// Two rules declared the same `id`.
    #[error("duplicate rule id {0:?}")]
    DuplicateRuleId(String),

    /// A required field on a rule was empty.
    #[error("rule {rule_id:?} has an empty {field}")]
    EmptyField {
        rule_id: String,
        field: &'static str,
    },

    /// `span_processing.mode` was neither `enrich` nor `enforce`.
    #[error("invalid span_processing.mode {0:?}: expected \"enrich\" or \"enforce\"")]
    InvalidMode(String),

    /// A rule's `span_kind` entry did not match a known kind.
    #[error("rule {rule_id:?} has an unknown span_kind {kind:?}")]
    UnknownSpanKind { rule_id: String, kind: String },

    /// The ETL engine failed to compile one of a rule's expressions.
    #[error("rule {rule_id:?} field {field}: {source}")]
    ExpressionCompile {
        rule_id: String,
        field: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Runtime errors recovered from during span evaluation (§7 "Processing" and
/// "attribute-shape" taxonomy). Never surfaced to the host — each variant is
/// logged at debug level and counted, and evaluation continues.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProcessingError {
    /// A rule's condition or value expression failed to evaluate.
    #[error("rule {rule_id:?} field {field}: {source}")]
    ExpressionEval {
        rule_id: String,
        field: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
