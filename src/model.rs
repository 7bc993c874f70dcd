//! Span and attribute data model.
//!
//! These types describe the read/write surface the [`crate::evaluator::SpanEvaluator`]
//! operates on (see §3 and §6 of the processor contract). They mirror the
//! `resource -> scope_spans[] -> { scope, spans[] }` shape that OTLP's
//! generated `ResourceSpans`/`ScopeSpans` types use, but are plain owned
//! structs: the processor is protocol-agnostic and never touches wire bytes.

use opentelemetry::Value;
use std::collections::HashMap;
use std::fmt;

/// The kind of a span, as carried on the wire.
///
/// Unlike [`opentelemetry::trace::SpanKind`], which has no "unspecified"
/// variant (the in-process SDK always assigns a kind), this enum keeps
/// `Unspecified` distinct because a processor operating on decoded OTLP
/// batches can observe it directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Unspecified,
    Internal,
    Server,
    Client,
    Producer,
    Consumer,
}

impl SpanKind {
    /// Parses the lowercase names used in `span_processing.rules[].span_kind`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unspecified" => Some(SpanKind::Unspecified),
            "internal" => Some(SpanKind::Internal),
            "server" => Some(SpanKind::Server),
            "client" => Some(SpanKind::Client),
            "producer" => Some(SpanKind::Producer),
            "consumer" => Some(SpanKind::Consumer),
            _ => None,
        }
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SpanKind::Unspecified => "unspecified",
            SpanKind::Internal => "internal",
            SpanKind::Server => "server",
            SpanKind::Client => "client",
            SpanKind::Producer => "producer",
            SpanKind::Consumer => "consumer",
        };
        f.write_str(s)
    }
}

/// An attribute value. A thin newtype over [`opentelemetry::Value`]: that type
/// already has exactly the string/int/double/bool/array variants §3 and §7
/// require, plus the canonical `Display` impl §7 pins stringification to.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeValue(pub Value);

impl AttributeValue {
    /// Deterministic value-to-string per §7: nil becomes the empty string,
    /// everything else uses its canonical textual form.
    pub fn stringify(&self) -> String {
        self.0.to_string()
    }
}

impl From<Value> for AttributeValue {
    fn from(v: Value) -> Self {
        AttributeValue(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue(Value::String(s.to_string().into()))
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue(Value::String(s.into()))
    }
}

/// A string-keyed bag of attribute values.
///
/// Per §4.C, insertion order is not assumed to be preserved, and presence is
/// checked with a single lookup — a plain `HashMap` matches that contract
/// exactly and avoids paying for order-tracking no test relies on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeMap(HashMap<String, AttributeValue>);

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Inserts `value` under `key`, returning the previous value if present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Option<AttributeValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Inserts `value` under `key` only if the key is currently absent.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.0.entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, AttributeValue)> for AttributeMap {
    fn from_iter<T: IntoIterator<Item = (String, AttributeValue)>>(iter: T) -> Self {
        AttributeMap(iter.into_iter().collect())
    }
}

/// A single span, as read and mutated by the evaluator.
#[derive(Clone, Debug, PartialEq)]
pub struct SpanRecord {
    pub name: String,
    pub kind: SpanKind,
    pub attributes: AttributeMap,
}

impl SpanRecord {
    pub fn new(name: impl Into<String>, kind: SpanKind) -> Self {
        SpanRecord {
            name: name.into(),
            kind,
            attributes: AttributeMap::new(),
        }
    }
}

/// Spans sharing one instrumentation scope, read-only apart from [`SpanRecord`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScopeSpans {
    pub scope_attributes: AttributeMap,
    pub spans: Vec<SpanRecord>,
}

/// Spans sharing one resource. Resource attributes are read-only: the engine
/// never mutates resource- or scope-level attributes (§1 non-goals).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceSpans {
    pub resource_attributes: AttributeMap,
    pub scope_spans: Vec<ScopeSpans>,
}
