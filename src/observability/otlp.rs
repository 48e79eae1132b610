//! OTLP JSON encoding of finished spans.
//!
//! One exported batch becomes one JSON document:
//!
//! ```json
//! {
//!   "resourceSpans": [{
//!     "resource": { "attributes": [{"key": "service.name", "value": {"stringValue": "Actionboard"}}] },
//!     "scopeSpans": [{ "scope": {"name": "Actionboard"}, "spans": [...] }]
//!   }]
//! }
//! ```
//!
//! Trace ids are 32 hex characters, span ids 16, and timestamps are decimal
//! strings of nanoseconds since the Unix epoch.

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{Array, KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};
use std::time::SystemTime;

/// Encodes `batch` under `resource` and the instrumentation scope `scope`.
pub fn encode_batch(resource: &Resource, scope: &str, batch: &[SpanData]) -> JsonValue {
    let resource_attributes: Vec<JsonValue> = resource
        .iter()
        .map(|(key, value)| attribute(key.as_str(), value))
        .collect();

    json!({
        "resourceSpans": [{
            "resource": { "attributes": resource_attributes },
            "scopeSpans": [{
                "scope": { "name": scope },
                "spans": batch.iter().map(encode_span).collect::<Vec<_>>(),
            }],
        }],
    })
}

fn encode_span(span: &SpanData) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (code, message) = match &span.status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": kind_code(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "events": span.events.iter().map(encode_event).collect::<Vec<_>>(),
        "links": span.links.iter().map(encode_link).collect::<Vec<_>>(),
        "status": { "code": code, "message": message },
    })
}

fn encode_event(event: &Event) -> JsonValue {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": attributes(&event.attributes),
    })
}

fn encode_link(link: &Link) -> JsonValue {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": attributes(&link.attributes),
    })
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn attributes(pairs: &[KeyValue]) -> Vec<JsonValue> {
    pairs
        .iter()
        .map(|kv| attribute(kv.key.as_str(), &kv.value))
        .collect()
}

fn attribute(key: &str, value: &Value) -> JsonValue {
    json!({ "key": key, "value": any_value(value) })
}

/// OTLP `AnyValue`. 64-bit integers are strings, as the JSON mapping requires.
fn any_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.as_str() }),
        Value::Array(array) => {
            let values: Vec<JsonValue> = match array {
                Array::Bool(items) => items.iter().map(|b| json!({ "boolValue": b })).collect(),
                Array::I64(items) => items
                    .iter()
                    .map(|i| json!({ "intValue": i.to_string() }))
                    .collect(),
                Array::F64(items) => items.iter().map(|f| json!({ "doubleValue": f })).collect(),
                Array::String(items) => items
                    .iter()
                    .map(|s| json!({ "stringValue": s.as_str() }))
                    .collect(),
                #[allow(unreachable_patterns)]
                other => vec![json!({ "stringValue": format!("{other:?}") })],
            };
            json!({ "arrayValue": { "values": values } })
        }
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn integers_are_encoded_as_strings() {
        assert_eq!(any_value(&Value::I64(42)), json!({ "intValue": "42" }));
    }

    #[test]
    fn arrays_keep_their_elements() {
        let value = Value::Array(Array::String(vec!["a".into(), "b".into()]));
        assert_eq!(
            any_value(&value),
            json!({ "arrayValue": { "values": [{ "stringValue": "a" }, { "stringValue": "b" }] } })
        );
    }

    #[test]
    fn timestamps_are_nanoseconds_since_epoch() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_millis(1500);
        assert_eq!(unix_nanos(time), "1500000000");
        assert_eq!(unix_nanos(SystemTime::UNIX_EPOCH - Duration::from_secs(1)), "0");
    }

    #[test]
    fn empty_batch_still_names_the_service() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "Actionboard")]);
        let doc = encode_batch(&resource, "Actionboard", &[]);

        let group = &doc["resourceSpans"][0];
        assert_eq!(group["resource"]["attributes"][0]["key"], "service.name");
        assert_eq!(group["scopeSpans"][0]["scope"]["name"], "Actionboard");
        assert_eq!(group["scopeSpans"][0]["spans"], json!([]));
    }
}
