//! Module D: the span evaluator (§4.C) — the hot path. `evaluate` runs once
//! per span and is `&self`/re-entrant: compiled rules are read-only, so many
//! threads may call it concurrently across different batches (§5).

use crate::cardinality::CardinalityTracker;
use crate::config::{Mode, ProcessorConfig};
use crate::error::{ConfigResult, ProcessingError};
use crate::etl::{Engine, TransformContext};
use crate::model::SpanRecord;
use crate::rules::{CompiledRules, RuleCompiler};
use crate::telemetry::{ErrorType, Telemetry};
use crate::model::AttributeMap;

/// Owns the compiled rule set, the ETL engine, and (when `benchmark=true`)
/// the cardinality tracker. One instance per processor; shared immutably
/// across every evaluation (§3 "Ownership").
pub struct SpanEvaluator {
    engine: Engine,
    rules: CompiledRules,
    cardinality: Option<CardinalityTracker>,
}

impl std::fmt::Debug for SpanEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanEvaluator")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl SpanEvaluator {
    /// Compiles `config.span_processing` once. Any validation failure is
    /// fatal and must prevent the host from processing spans (§4.B).
    pub fn new(config: &ProcessorConfig) -> ConfigResult<Self> {
        let engine = Engine::new();
        let rules = RuleCompiler::compile(config, &engine)?;
        let cardinality = config.benchmark.then(CardinalityTracker::new);
        Ok(SpanEvaluator {
            engine,
            rules,
            cardinality,
        })
    }

    pub fn cardinality(&self) -> Option<&CardinalityTracker> {
        self.cardinality.as_ref()
    }

    /// Evaluates one span against the compiled rule set, mutating it in
    /// place per §4.C. The caller is responsible for the `enabled` pre-check
    /// (§4.C step 1) — that one gates the whole processor, not just rule
    /// logic, so it lives at the pipeline-adapter level (§4.F).
    pub fn evaluate(
        &self,
        span: &mut SpanRecord,
        scope_attributes: &AttributeMap,
        resource_attributes: &AttributeMap,
        telemetry: &Telemetry,
    ) {
        if !self.rules.span_processing_enabled {
            return;
        }

        if span
            .attributes
            .contains_key(&self.rules.operation_name_attribute)
        {
            return;
        }

        // Recorded regardless of whether any rule ends up matching (§4.C),
        // but only once pre-check 3 above has passed: a span that upstream
        // instrumentation already tagged is a full pass-through and must not
        // be counted.
        if let Some(tracker) = &self.cardinality {
            tracker.observe_original(&span.name, telemetry);
        }

        for rule in &self.rules.rules {
            if !rule.matches_kind(span.kind) {
                continue;
            }

            let ctx = TransformContext {
                name: &span.name,
                kind: span.kind,
                attributes: &span.attributes,
                resource_attributes,
                scope_attributes,
            };

            let matched = match self.engine.evaluate_condition(&rule.condition, &ctx) {
                Ok(matched) => matched,
                Err(source) => {
                    self.log_and_count_eval_error(&rule.id, "condition", source, telemetry);
                    continue;
                }
            };
            if !matched {
                continue;
            }

            let operation_name = match self.engine.evaluate_value(&rule.operation_name, &ctx) {
                Ok(name) => name,
                Err(source) => {
                    self.log_and_count_eval_error(&rule.id, "operation_name", source, telemetry);
                    continue;
                }
            };

            let operation_type = match &rule.operation_type {
                Some(expr) => match self.engine.evaluate_value(expr, &ctx) {
                    Ok(value) => value,
                    Err(source) => {
                        self.log_and_count_eval_error(&rule.id, "operation_type", source, telemetry);
                        String::new()
                    }
                },
                None => String::new(),
            };

            self.apply(span, &operation_name, &operation_type);

            telemetry.record_span_name_enforced(&rule.id, &operation_type, self.rules.mode.as_str());
            if let Some(tracker) = &self.cardinality {
                tracker.observe_produced(&operation_name, telemetry);
            }
            return;
        }
    }

    fn apply(&self, span: &mut SpanRecord, operation_name: &str, operation_type: &str) {
        span.attributes
            .insert(self.rules.operation_name_attribute.clone(), operation_name.to_string());

        if self.rules.mode == Mode::Enforce {
            if self.rules.preserve_original_name && span.name != operation_name {
                span.attributes
                    .insert(self.rules.original_name_attribute.clone(), span.name.clone());
            }
            span.name = operation_name.to_string();
        }

        if !operation_type.is_empty() {
            span.attributes
                .insert_if_absent(self.rules.operation_type_attribute.clone(), operation_type.to_string());
        }
    }

    fn log_and_count_eval_error(
        &self,
        rule_id: &str,
        field: &'static str,
        source: crate::etl::EvalError,
        telemetry: &Telemetry,
    ) {
        let error = ProcessingError::ExpressionEval {
            rule_id: rule_id.to_string(),
            field,
            source: Box::new(source),
        };
        crate::semconv_debug!(name: "rule_evaluation_failed", rule_id = rule_id, error = error.to_string());
        telemetry.record_error(ErrorType::Processing);
    }
}
