//! Module F (telemetry half): the eight pinned metrics of §4.E, built on
//! `opentelemetry::metrics::Meter` instrument builders — the same
//! `meter.u64_counter("name").with_description(...).build()` convention
//! `opentelemetry-sdk`'s own examples use.
//!
//! Metric names are pinned exactly: downstream dashboards key on them (§6).

use opentelemetry::metrics::{Counter, Gauge, Histogram, Meter};
use opentelemetry::KeyValue;

const DURATION_BOUNDARIES: &[f64] = &[0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 50.0, 100.0];

/// One signal kind a batch can carry through the pipeline adapter (§4.F).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalType {
    Traces,
    Metrics,
    Logs,
}

impl SignalType {
    fn as_str(self) -> &'static str {
        match self {
            SignalType::Traces => "traces",
            SignalType::Metrics => "metrics",
            SignalType::Logs => "logs",
        }
    }
}

/// The two error classes telemetry distinguishes (§7).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorType {
    Validation,
    Processing,
}

impl ErrorType {
    fn as_str(self) -> &'static str {
        match self {
            ErrorType::Validation => "validation",
            ErrorType::Processing => "processing",
        }
    }
}

/// Instrument handles for the processor instance, acquired at startup and
/// held for the instance's lifetime (§9 "resource acquisition" — no
/// process-global singletons).
pub struct Telemetry {
    spans_processed: Counter<u64>,
    span_names_enforced: Counter<u64>,
    processing_duration: Histogram<f64>,
    errors: Counter<u64>,
    original_span_name_count: Gauge<u64>,
    reduced_span_name_count: Gauge<u64>,
    unique_span_names_total: Counter<u64>,
    unique_operation_names_total: Counter<u64>,
    /// Addition beyond §4.E's eight pinned names (see `DESIGN.md`): a
    /// cardinality-tracker-capacity signal, deliberately *not* one of the
    /// metric names dashboards key on.
    cardinality_overflowed: Counter<u64>,
}

impl std::fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telemetry").finish_non_exhaustive()
    }
}

impl Telemetry {
    pub fn new(meter: &Meter) -> Self {
        Telemetry {
            spans_processed: meter
                .u64_counter("processor_semconv_spans_processed")
                .with_description("Spans/metrics/logs records handed to the processor")
                .build(),
            span_names_enforced: meter
                .u64_counter("processor_semconv_span_names_enforced")
                .with_description("Spans whose operation name a rule produced")
                .build(),
            processing_duration: meter
                .f64_histogram("processor_semconv_processing_duration")
                .with_description("Batch evaluation duration")
                .with_unit("ms")
                .with_boundaries(DURATION_BOUNDARIES.to_vec())
                .build(),
            errors: meter
                .u64_counter("processor_semconv_errors")
                .with_description("Validation and processing errors")
                .build(),
            original_span_name_count: meter
                .u64_gauge("processor_semconv_original_span_name_count")
                .with_description("Distinct original span names observed (benchmark mode)")
                .build(),
            reduced_span_name_count: meter
                .u64_gauge("processor_semconv_reduced_span_name_count")
                .with_description("Distinct produced operation names observed (benchmark mode)")
                .build(),
            unique_span_names_total: meter
                .u64_counter("processor_semconv_unique_span_names_total")
                .with_description("Cumulative distinct original span names")
                .build(),
            unique_operation_names_total: meter
                .u64_counter("processor_semconv_unique_operation_names_total")
                .with_description("Cumulative distinct produced operation names")
                .build(),
            cardinality_overflowed: meter
                .u64_counter("processor_semconv_cardinality_overflowed")
                .with_description("Cardinality-tracker inserts dropped after hitting max_tracked_names")
                .build(),
        }
    }

    pub fn record_spans_processed(&self, signal: SignalType, count: u64) {
        self.spans_processed
            .add(count, &[KeyValue::new("signal_type", signal.as_str())]);
    }

    pub fn record_span_name_enforced(&self, rule_id: &str, operation_type: &str, mode: &str) {
        self.span_names_enforced.add(
            1,
            &[
                KeyValue::new("rule_id", rule_id.to_string()),
                KeyValue::new("operation_type", operation_type.to_string()),
                KeyValue::new("mode", mode.to_string()),
            ],
        );
    }

    pub fn record_processing_duration(&self, signal: SignalType, millis: f64) {
        self.processing_duration
            .record(millis, &[KeyValue::new("signal_type", signal.as_str())]);
    }

    pub fn record_error(&self, error_type: ErrorType) {
        self.errors
            .add(1, &[KeyValue::new("error_type", error_type.as_str())]);
    }

    pub fn set_cardinality_gauges(&self, original: u64, reduced: u64) {
        self.original_span_name_count.record(original, &[]);
        self.reduced_span_name_count.record(reduced, &[]);
    }

    pub fn add_unique_span_names(&self, delta: u64) {
        self.unique_span_names_total.add(delta, &[]);
    }

    pub fn add_unique_operation_names(&self, delta: u64) {
        self.unique_operation_names_total.add(delta, &[]);
    }

    pub fn record_cardinality_overflowed(&self) {
        self.cardinality_overflowed.add(1, &[]);
    }
}
