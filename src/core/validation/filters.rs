//! Reusable field filters
//!
//! These filters transform request field values after validation

use serde_json::Value;

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Value + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Value::String(s.trim().to_string())
        } else {
            value
        }
    }
}
