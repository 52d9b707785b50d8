//! Reusable request field validators
//!
//! Each validator receives the field name and the raw JSON value and
//! returns a client-facing message on failure.

use serde_json::Value;

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "A, B, or C"
fn join_choices(allowed: &[&str]) -> String {
    match allowed {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{} or {}", first, second),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}

/// Whether a JSON value counts as "set" (not null, false, 0 or "")
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Validator: field must be present and truthy
pub fn required() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if is_truthy(value) {
            Ok(())
        } else {
            Err(format!("{} is required", capitalize(field)))
        }
    }
}

/// Validator: field must be a string with non-whitespace content
pub fn non_blank_string() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(format!(
            "{} is required and must be a non-empty string",
            capitalize(field)
        )),
    }
}

/// Validator: value must be one of the allowed strings
pub fn in_list(
    allowed: &'static [&'static str],
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if value.as_str().is_some_and(|s| allowed.contains(&s)) {
            Ok(())
        } else {
            Err(format!(
                "Invalid {}. Must be {}",
                field,
                join_choices(allowed)
            ))
        }
    }
}
