//! [AMBIENT] Internal diagnostic logging, distinct from the telemetry surface
//! in `telemetry.rs`. Mirrors the teacher's `otel_debug!`/`otel_info!`/
//! `otel_warn!`/`otel_error!` macros (`opentelemetry::global::internal_logging`):
//! a `name:` field plus structured key-value pairs over `tracing`, gated
//! behind a feature so hosts that don't want internal logs pay nothing for it.
#![allow(unused_macros)]

/// Logs a debug-level internal event, e.g. a single rule's condition or
/// value expression failing to evaluate for one span (§4.C, §7 "Processing").
#[macro_export]
macro_rules! semconv_debug {
    (name: $name:expr $(,)?) => {
        #[cfg(feature = "internal-logs")]
        { tracing::debug!(name: $name, target: env!("CARGO_PKG_NAME"), "") }
        #[cfg(not(feature = "internal-logs"))]
        { let _ = $name; }
    };
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        { tracing::debug!(name: $name, target: env!("CARGO_PKG_NAME"), $($key = $value),+, "") }
        #[cfg(not(feature = "internal-logs"))]
        { let _ = ($name, $($value),+); }
    };
}

/// Logs an info-level internal event, e.g. the cardinality tracker's
/// per-batch reduction summary (§4.D).
#[macro_export]
macro_rules! semconv_info {
    (name: $name:expr $(,)?) => {
        #[cfg(feature = "internal-logs")]
        { tracing::info!(name: $name, target: env!("CARGO_PKG_NAME"), "") }
        #[cfg(not(feature = "internal-logs"))]
        { let _ = $name; }
    };
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        { tracing::info!(name: $name, target: env!("CARGO_PKG_NAME"), $($key = $value),+, "") }
        #[cfg(not(feature = "internal-logs"))]
        { let _ = ($name, $($value),+); }
    };
}

/// Logs a warn-level internal event, e.g. the cardinality tracker hitting
/// `max_tracked_names` (§9.1).
#[macro_export]
macro_rules! semconv_warn {
    (name: $name:expr $(,)?) => {
        #[cfg(feature = "internal-logs")]
        { tracing::warn!(name: $name, target: env!("CARGO_PKG_NAME"), "") }
        #[cfg(not(feature = "internal-logs"))]
        { let _ = $name; }
    };
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        { tracing::warn!(name: $name, target: env!("CARGO_PKG_NAME"), $($key = $value),+, "") }
        #[cfg(not(feature = "internal-logs"))]
        { let _ = ($name, $($value),+); }
    };
}

/// Logs an error-level internal event, e.g. an attribute-shape error that
/// forced a pass-through (§7 "Attribute-shape errors").
#[macro_export]
macro_rules! semconv_error {
    (name: $name:expr $(,)?) => {
        #[cfg(feature = "internal-logs")]
        { tracing::error!(name: $name, target: env!("CARGO_PKG_NAME"), "") }
        #[cfg(not(feature = "internal-logs"))]
        { let _ = $name; }
    };
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        { tracing::error!(name: $name, target: env!("CARGO_PKG_NAME"), $($key = $value),+, "") }
        #[cfg(not(feature = "internal-logs"))]
        { let _ = ($name, $($value),+); }
    };
}
