//! Report-sink boundary.
//!
//! Completed results cross this boundary as JSON-safe documents: the wire
//! format cannot represent NaN or infinities, so every non-finite numeric is
//! normalized to null before publishing.

use crate::error::AppResult;
use crate::result::SimulationResult;
use serde_json::Value;

/// External sink for completed simulation results (cloud storage, message
/// queue). The repo ships no implementation; front ends inject their own.
pub trait ReportSink: Send + Sync {
    fn publish(&self, report_id: &str, document: &Value) -> AppResult<()>;
}

/// Render a result as a JSON-safe document for a [`ReportSink`].
pub fn report_document(result: &SimulationResult) -> Value {
    let mut document = serde_json::to_value(result).unwrap_or(Value::Null);
    sanitize(&mut document);
    document
}

fn sanitize(value: &mut Value) {
    match value {
        Value::Number(n) => {
            if n.as_f64().is_some_and(|f| !f.is_finite()) {
                *value = Value::Null;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(sanitize),
        Value::Object(map) => map.values_mut().for_each(sanitize),
        _ => {}
    }
}
