//! Total hit count normalization.
//!
//! Older clusters report `hits.total` as a bare integer; newer ones report
//! `{ "value": n, "relation": "eq" | "gte" }`. The relation is ignored.

use serde_json::Value;

/// Returns the integer total from a raw `hits.total` value.
///
/// Absent, non-numeric, or structured-without-`value` totals yield 0.
pub fn extract_total(raw: Option<&Value>) -> u64 {
    match raw {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::Object(obj)) => obj.get("value").and_then(Value::as_u64).unwrap_or(0),
        _ => 0,
    }
}
