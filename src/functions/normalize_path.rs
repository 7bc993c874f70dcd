//! `NormalizePath` — collapse high-cardinality path fragments to `{id}` (§4.A).

use regex::Regex;
use std::sync::LazyLock;

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
        .expect("static UUID regex is valid")
});

/// Replaces high-cardinality fragments in a URL path with `{id}`.
///
/// Steps, applied in this fixed order (each must not undo the previous one):
/// 1. Drop the query string.
/// 2. Replace canonical UUIDs (`8-4-4-4-12` hex) with `{id}`.
/// 3. Replace path segments that are a contiguous run of >=16 hex digits
///    (Mongo ObjectId-style) with `{id}`.
/// 4. Replace purely-decimal path segments with `{id}`.
///
/// Deterministic and idempotent: `normalize_path(normalize_path(s)) == normalize_path(s)`.
pub fn normalize_path(s: &str) -> String {
    let without_query = match s.find('?') {
        Some(idx) => &s[..idx],
        None => s,
    };

    let without_uuids = UUID_RE.replace_all(without_query, "{id}");

    let segments: Vec<&str> = without_uuids.split('/').collect();
    let normalized: Vec<&str> = segments
        .into_iter()
        .map(|segment| {
            if is_long_hex_run(segment) || is_purely_decimal(segment) {
                "{id}"
            } else {
                segment
            }
        })
        .collect();

    normalized.join("/")
}

fn is_long_hex_run(segment: &str) -> bool {
    segment.len() >= 16 && segment.chars().all(|c| c.is_ascii_hexdigit())
}

fn is_purely_decimal(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit())
}
