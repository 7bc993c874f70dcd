//! A streaming telemetry processor that sits inside an OpenTelemetry-style
//! trace pipeline and rewrites span identity to bound the cardinality of span
//! names: free-form names like `GET /users/12345/profile?x=1` are reduced to
//! a small, stable set of operation names such as `GET /users/{id}/profile`,
//! either attached as an attribute (enrich mode) or substituted into the
//! span name itself (enforce mode), with the original preserved on demand.
//!
//! The core is a priority-ordered, condition-matched rule engine whose
//! conditions and outputs are expressions in an embedded transformation
//! language, extended with four domain-specific functions ([`functions`]).
//! Rule compilation ([`rules`]) happens once at startup; evaluation
//! ([`evaluator`]) runs per span on the hot path with well-defined failure
//! isolation; [`cardinality`] and [`telemetry`] expose the resulting
//! reduction as observable metrics.

pub mod cardinality;
pub mod config;
pub mod error;
pub mod etl;
pub mod evaluator;
pub mod functions;
pub mod internal_log;
pub mod model;
pub mod pipeline;
pub mod rules;
pub mod telemetry;

pub use config::{Mode, ProcessorConfig, RuleConfig, SpanProcessingConfig};
pub use error::{ConfigError, ConfigResult, ProcessingError};
pub use evaluator::SpanEvaluator;
pub use model::{AttributeMap, AttributeValue, ResourceSpans, ScopeSpans, SpanKind, SpanRecord};
pub use pipeline::{Capabilities, LogsProcessor, MetricsProcessor, SemConvProcessor, TracesProcessor};
pub use rules::{CompiledRules, Rule, RuleCompiler};
