//! Module H: the pipeline adapter (§4.F) — the processor contract a host
//! trace/metrics/logs pipeline expects, re-cast at batch granularity from the
//! teacher's per-span `SpanProcessor` trait (`on_start`/`on_end`/
//! `force_flush`/`shutdown`) since this processor receives whole decoded
//! batches rather than individual span start/end events.

use crate::config::ProcessorConfig;
use crate::error::ConfigResult;
use crate::evaluator::SpanEvaluator;
use crate::model::ResourceSpans;
use crate::telemetry::{SignalType, Telemetry};
use opentelemetry::metrics::Meter;
use std::time::Instant;

/// Mirrors the OTel Collector's processor capability struct: whether this
/// processor can mutate the batch it receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub mutates_data: bool,
}

/// A processor for trace batches.
pub trait TracesProcessor: std::fmt::Debug + Send + Sync {
    fn process_traces(&self, batch: &mut ResourceSpans);
    fn capabilities(&self) -> Capabilities;
    fn shutdown(&self);
}

/// A processor for metrics batches. This crate records only duration — no
/// metrics transformation, per §1 non-goals.
pub trait MetricsProcessor: std::fmt::Debug + Send + Sync {
    fn process_metrics(&self, record_count: u64);
    fn shutdown(&self);
}

/// A processor for log batches. Same no-transformation contract as metrics.
pub trait LogsProcessor: std::fmt::Debug + Send + Sync {
    fn process_logs(&self, record_count: u64);
    fn shutdown(&self);
}

/// The single concrete processor instance implementing all three contracts.
/// Owns the compiled rule set/evaluator and the telemetry instrument
/// handles; both are acquired at construction and released at `shutdown`
/// (§9 "Resource acquisition").
pub struct SemConvProcessor {
    enabled: bool,
    evaluator: SpanEvaluator,
    telemetry: Telemetry,
}

impl std::fmt::Debug for SemConvProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemConvProcessor")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl SemConvProcessor {
    /// Compiles `config` and wires instruments from `meter`. Any validation
    /// failure is returned to the caller; the host must not start processing
    /// spans until this succeeds (§4.B, §7).
    pub fn new(config: &ProcessorConfig, meter: &Meter) -> ConfigResult<Self> {
        let evaluator = SpanEvaluator::new(config)?;
        let telemetry = Telemetry::new(meter);
        Ok(SemConvProcessor {
            enabled: config.enabled,
            evaluator,
            telemetry,
        })
    }
}

impl TracesProcessor for SemConvProcessor {
    fn process_traces(&self, batch: &mut ResourceSpans) {
        // Pre-check 1 (§4.C): disabled means a full pass-through, with no
        // timing and no counters at all — distinct from `span_processing`
        // being disabled, which still records batch-level telemetry.
        if !self.enabled {
            return;
        }

        let start = Instant::now();
        let mut span_count: u64 = 0;

        for scope_spans in &mut batch.scope_spans {
            for span in &mut scope_spans.spans {
                self.evaluator.evaluate(
                    span,
                    &scope_spans.scope_attributes,
                    &batch.resource_attributes,
                    &self.telemetry,
                );
                span_count += 1;
            }
        }

        if let Some(tracker) = self.evaluator.cardinality() {
            tracker.record_batch_end(&self.telemetry);
        }

        self.telemetry.record_spans_processed(SignalType::Traces, span_count);
        self.telemetry
            .record_processing_duration(SignalType::Traces, start.elapsed().as_secs_f64() * 1000.0);
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities { mutates_data: true }
    }

    fn shutdown(&self) {}
}

impl MetricsProcessor for SemConvProcessor {
    fn process_metrics(&self, record_count: u64) {
        if !self.enabled {
            return;
        }
        let start = Instant::now();
        self.telemetry.record_spans_processed(SignalType::Metrics, record_count);
        self.telemetry
            .record_processing_duration(SignalType::Metrics, start.elapsed().as_secs_f64() * 1000.0);
    }

    fn shutdown(&self) {}
}

impl LogsProcessor for SemConvProcessor {
    fn process_logs(&self, record_count: u64) {
        if !self.enabled {
            return;
        }
        let start = Instant::now();
        self.telemetry.record_spans_processed(SignalType::Logs, record_count);
        self.telemetry
            .record_processing_duration(SignalType::Logs, start.elapsed().as_secs_f64() * 1000.0);
    }

    fn shutdown(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RuleConfig, SpanProcessingConfig};
    use crate::model::{AttributeMap, ScopeSpans, SpanKind, SpanRecord};
    use opentelemetry::metrics::MeterProvider as _;
    use opentelemetry_sdk::metrics::SdkMeterProvider;

    fn meter() -> Meter {
        let provider = SdkMeterProvider::builder().build();
        provider.meter("test")
    }

    fn config() -> ProcessorConfig {
        ProcessorConfig {
            enabled: true,
            benchmark: false,
            span_processing: SpanProcessingConfig {
                enabled: true,
                rules: vec![RuleConfig {
                    id: "r".to_string(),
                    priority: 0,
                    span_kind: Vec::new(),
                    condition: "true".to_string(),
                    operation_name: "\"op\"".to_string(),
                    operation_type: None,
                }],
                ..SpanProcessingConfig::default()
            },
        }
    }

    #[test]
    fn disabled_processor_leaves_batch_untouched() {
        let mut cfg = config();
        cfg.enabled = false;
        let processor = SemConvProcessor::new(&cfg, &meter()).unwrap();
        let mut span = SpanRecord::new("name", SpanKind::Server);
        let mut batch = ResourceSpans {
            resource_attributes: AttributeMap::new(),
            scope_spans: vec![ScopeSpans {
                scope_attributes: AttributeMap::new(),
                spans: vec![span.clone()],
            }],
        };
        processor.process_traces(&mut batch);
        assert_eq!(batch.scope_spans[0].spans[0], span);
        span.name = "name".to_string();
    }

    #[test]
    fn enabled_processor_mutates_matching_spans() {
        let processor = SemConvProcessor::new(&config(), &meter()).unwrap();
        let mut batch = ResourceSpans {
            resource_attributes: AttributeMap::new(),
            scope_spans: vec![ScopeSpans {
                scope_attributes: AttributeMap::new(),
                spans: vec![SpanRecord::new("name", SpanKind::Server)],
            }],
        };
        processor.process_traces(&mut batch);
        assert_eq!(
            batch.scope_spans[0].spans[0]
                .attributes
                .get("operation.name")
                .unwrap()
                .stringify(),
            "op"
        );
    }

    #[test]
    fn capabilities_report_mutates_data() {
        let processor = SemConvProcessor::new(&config(), &meter()).unwrap();
        assert!(processor.capabilities().mutates_data);
    }
}
