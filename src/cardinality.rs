//! Module E: the benchmark-mode cardinality tracker (§4.D). Shared by all
//! concurrent evaluations through a single mutex covering insert + size-read,
//! as §3's "Ownership" note and §5's "shared mutable state" require.

use crate::telemetry::Telemetry;
use std::collections::HashMap;
use std::sync::Mutex;

/// Bounds cardinality-tracker growth (§9.1: "the benchmark tracker grows
/// without bound; decide on a bound before shipping"). Once a map holds this
/// many distinct names, further never-seen names are not inserted; the
/// `*_total` counters still advance, since cardinality is still observed —
/// only the tracker's own memory is capped.
pub const DEFAULT_MAX_TRACKED_NAMES: usize = 100_000;

struct Maps {
    original: HashMap<String, u64>,
    produced: HashMap<String, u64>,
}

/// Tracks distinct original span names and distinct produced operation names
/// when `benchmark=true` (§3 "Cardinality tracker state", §4.D).
pub struct CardinalityTracker {
    max_tracked_names: usize,
    maps: Mutex<Maps>,
}

impl std::fmt::Debug for CardinalityTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardinalityTracker")
            .field("max_tracked_names", &self.max_tracked_names)
            .finish_non_exhaustive()
    }
}

impl CardinalityTracker {
    pub fn new() -> Self {
        Self::with_max_tracked_names(DEFAULT_MAX_TRACKED_NAMES)
    }

    pub fn with_max_tracked_names(max_tracked_names: usize) -> Self {
        CardinalityTracker {
            max_tracked_names,
            maps: Mutex::new(Maps {
                original: HashMap::new(),
                produced: HashMap::new(),
            }),
        }
    }

    /// Records an observation of an original span name, before any rule has
    /// mutated it (§4.C: "Record the original name ... regardless of whether
    /// a rule will match").
    pub fn observe_original(&self, name: &str, telemetry: &Telemetry) {
        let mut maps = self.maps.lock().unwrap_or_else(|e| e.into_inner());
        if observe(&mut maps.original, name, self.max_tracked_names, telemetry) {
            telemetry.add_unique_span_names(1);
        }
    }

    /// Records an observation of a rule-produced operation name.
    pub fn observe_produced(&self, name: &str, telemetry: &Telemetry) {
        let mut maps = self.maps.lock().unwrap_or_else(|e| e.into_inner());
        if observe(&mut maps.produced, name, self.max_tracked_names, telemetry) {
            telemetry.add_unique_operation_names(1);
        }
    }

    /// Publishes the batch-end gauges and, when `original > 0`, an
    /// informational reduction summary (§4.D).
    pub fn record_batch_end(&self, telemetry: &Telemetry) {
        let maps = self.maps.lock().unwrap_or_else(|e| e.into_inner());
        let original = maps.original.len() as u64;
        let reduced = maps.produced.len() as u64;
        telemetry.set_cardinality_gauges(original, reduced);
        if original > 0 {
            let reduction_pct = 100.0 * (1.0 - (reduced as f64 / original as f64));
            crate::semconv_info!(
                name: "cardinality_reduction",
                original = original,
                produced = reduced,
                reduction_pct = reduction_pct,
            );
        }
    }
}

impl Default for CardinalityTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns `true` iff `name` was newly inserted (i.e. the `*_total` counter
/// should advance). A name seen before always bumps its count; a never-seen
/// name is only inserted while the map has room, per `max_tracked_names`.
fn observe(map: &mut HashMap<String, u64>, name: &str, max_tracked_names: usize, telemetry: &Telemetry) -> bool {
    if let Some(count) = map.get_mut(name) {
        *count += 1;
        return false;
    }
    if map.len() >= max_tracked_names {
        crate::semconv_warn!(name: "cardinality_tracker_overflow", max_tracked_names = max_tracked_names);
        telemetry.record_cardinality_overflowed();
        return true;
    }
    map.insert(name.to_string(), 1);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::metrics::MeterProvider as _;
    use opentelemetry_sdk::metrics::SdkMeterProvider;

    fn telemetry() -> Telemetry {
        let provider = SdkMeterProvider::builder().build();
        Telemetry::new(&provider.meter("test"))
    }

    #[test]
    fn repeated_names_do_not_double_count_uniques() {
        let tracker = CardinalityTracker::new();
        let telemetry = telemetry();
        tracker.observe_original("GET /a", &telemetry);
        tracker.observe_original("GET /a", &telemetry);
        tracker.observe_original("GET /b", &telemetry);
        let maps = tracker.maps.lock().unwrap();
        assert_eq!(maps.original.len(), 2);
        assert_eq!(maps.original["GET /a"], 2);
    }

    #[test]
    fn overflow_stops_inserting_new_names_but_keeps_counting_existing() {
        let tracker = CardinalityTracker::with_max_tracked_names(1);
        let telemetry = telemetry();
        tracker.observe_original("a", &telemetry);
        tracker.observe_original("b", &telemetry);
        tracker.observe_original("a", &telemetry);
        let maps = tracker.maps.lock().unwrap();
        assert_eq!(maps.original.len(), 1);
        assert_eq!(maps.original["a"], 2);
    }

    #[test]
    fn batch_end_reports_reduction() {
        let tracker = CardinalityTracker::new();
        let telemetry = telemetry();
        for name in ["GET /users/1", "GET /users/2", "GET /users/3"] {
            tracker.observe_original(name, &telemetry);
        }
        tracker.observe_produced("GET /users/{id}", &telemetry);
        tracker.record_batch_end(&telemetry);
        let maps = tracker.maps.lock().unwrap();
        assert_eq!(maps.original.len(), 3);
        assert_eq!(maps.produced.len(), 1);
    }
}
