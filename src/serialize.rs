//! Best-effort text conversion for arbitrary error field values.
//!
//! Applications attach unpredictable metadata to errors. Everything here
//! degrades to a placeholder instead of failing: oversized arrays and
//! objects are summarized, known opaque runtime objects are replaced by a
//! fixed marker, and serialization failures become a generic marker.

use serde_json::{Map, Number, Value as JsonValue};
use tracing::debug;

use crate::constants::{MAX_ARRAY_ITEMS, MAX_SERIALIZED_LEN, MAX_SERIALIZE_DEPTH};
use crate::error::RenderError;

/// Text emitted when a value cannot be serialized.
pub const NON_SERIALIZABLE: &str = "[Object - circular or non-serializable]";
/// Marker upstream serializers leave where they cut a reference cycle.
pub const CIRCULAR_SENTINEL: &str = "[Circular]";
pub const CIRCULAR_PLACEHOLDER: &str = "[Circular Reference]";

/// A recognizable runtime object that is replaced by a fixed placeholder.
#[derive(Clone, Copy)]
pub struct OpaqueShape {
    pub placeholder: &'static str,
    pub matches: fn(&Map<String, JsonValue>) -> bool,
}

/// Opaque shapes checked, in order, before generic serialization.
pub const DEFAULT_OPAQUE_SHAPES: &[OpaqueShape] = &[
    OpaqueShape {
        placeholder: "[HTTP IncomingMessage]",
        matches: is_incoming_message,
    },
    OpaqueShape {
        placeholder: "[HTTP ClientRequest]",
        matches: is_client_request,
    },
];

fn constructor_name(map: &Map<String, JsonValue>) -> Option<&str> {
    map.get("constructor")?.get("name")?.as_str()
}

fn is_incoming_message(map: &Map<String, JsonValue>) -> bool {
    if constructor_name(map) == Some("IncomingMessage") {
        return true;
    }
    map.contains_key("httpVersion")
        && map.contains_key("headers")
        && (map.contains_key("rawHeaders") || map.contains_key("socket"))
}

fn is_client_request(map: &Map<String, JsonValue>) -> bool {
    if constructor_name(map) == Some("ClientRequest") {
        return true;
    }
    map.contains_key("method") && map.contains_key("path") && map.contains_key("_header")
}

#[derive(Clone, Copy)]
/// Limits and substitutions applied while serializing one value.
pub struct SerializePolicy {
    pub max_array_items: usize,
    pub max_serialized_len: usize,
    pub max_depth: usize,
    pub opaque_shapes: &'static [OpaqueShape],
}

impl Default for SerializePolicy {
    fn default() -> Self {
        Self {
            max_array_items: MAX_ARRAY_ITEMS,
            max_serialized_len: MAX_SERIALIZED_LEN,
            max_depth: MAX_SERIALIZE_DEPTH,
            opaque_shapes: DEFAULT_OPAQUE_SHAPES,
        }
    }
}

/// Text for a field value, never failing.
pub fn field_text(value: &JsonValue, policy: &SerializePolicy) -> String {
    match value {
        JsonValue::Array(items) if items.len() > policy.max_array_items => {
            debug!(items = items.len(), "summarizing oversized array field");
            array_placeholder(items.len())
        }
        JsonValue::Array(_) | JsonValue::Object(_) => match safe_stringify(value, policy) {
            Ok(text) if text_len(&text) > policy.max_serialized_len => {
                let keys = key_count(value);
                debug!(keys, len = text_len(&text), "summarizing oversized object field");
                format!("[Object - {keys} keys] (too large to display)")
            }
            Ok(text) => text,
            Err(err) => {
                debug!(error = %err, "field value is not serializable");
                NON_SERIALIZABLE.to_string()
            }
        },
        _ => primitive_text(value),
    }
}

/// Serializes `value` as two-space indented JSON after applying the
/// substitutions of `policy` at every nesting level.
pub fn safe_stringify(value: &JsonValue, policy: &SerializePolicy) -> Result<String, RenderError> {
    let sanitized = sanitize(value, policy, 0)?;
    serde_json::to_string_pretty(&sanitized)
        .map_err(|e| RenderError::SerializationError(e.to_string()))
}

fn sanitize(
    value: &JsonValue,
    policy: &SerializePolicy,
    depth: usize,
) -> Result<JsonValue, RenderError> {
    if depth > policy.max_depth {
        return Err(RenderError::DepthExceeded(policy.max_depth));
    }

    match value {
        JsonValue::Array(items) if items.len() > policy.max_array_items => {
            Ok(JsonValue::String(array_placeholder(items.len())))
        }
        JsonValue::Array(items) => items
            .iter()
            .map(|item| sanitize(item, policy, depth + 1))
            .collect::<Result<Vec<_>, _>>()
            .map(JsonValue::Array),
        JsonValue::Object(map) => {
            if let Some(shape) = policy.opaque_shapes.iter().find(|s| (s.matches)(map)) {
                return Ok(JsonValue::String(shape.placeholder.to_string()));
            }
            let mut out = Map::with_capacity(map.len());
            for (key, child) in map {
                out.insert(key.clone(), sanitize(child, policy, depth + 1)?);
            }
            Ok(JsonValue::Object(out))
        }
        JsonValue::String(s) if s == CIRCULAR_SENTINEL => {
            Ok(JsonValue::String(CIRCULAR_PLACEHOLDER.to_string()))
        }
        JsonValue::Number(n) => Ok(JsonValue::Number(integral_number(n))),
        _ => Ok(value.clone()),
    }
}

/// Length in UTF-16 code units, the unit log viewers downstream measure in.
fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Integral floats as integers, so `1.0` prints as `1` inside objects too.
fn integral_number(n: &Number) -> Number {
    match n.as_f64() {
        Some(f)
            if !(n.is_i64() || n.is_u64())
                && f.fract() == 0.0
                && f.abs() < I64_BOUND =>
        {
            Number::from(f as i64)
        }
        _ => n.clone(),
    }
}

const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Plain text of a scalar, the way a log reader expects it: strings
/// unquoted and integral numbers without a fractional part.
pub fn primitive_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) if !(n.is_i64() || n.is_u64()) => float_text(f),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn float_text(f: f64) -> String {
    if f == 0.0 {
        "0".to_string()
    } else if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

fn array_placeholder(len: usize) -> String {
    format!("[Array with {len} items]")
}

fn key_count(value: &JsonValue) -> usize {
    match value {
        JsonValue::Object(map) => map.len(),
        JsonValue::Array(items) => items.len(),
        _ => 0,
    }
}
