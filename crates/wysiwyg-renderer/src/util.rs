//! Shared helpers for reading attribute values.

use std::borrow::Cow;

use serde_json::Value;

/// Convert a scalar JSON value to text.
///
/// Returns `None` for `null`, arrays and objects.
pub(crate) fn value_to_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Resolve a heading level attribute to 1-6.
///
/// Missing or non-numeric values fall back to 1; numbers outside the range
/// are clamped. Numeric strings (`"3"`) are accepted.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn heading_level(value: Option<&Value>) -> u8 {
    let level = value.and_then(|v| match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(f64::trunc).map(clamp_f64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    });

    match level {
        Some(n) if n <= 1 => 1,
        Some(n) if n >= 6 => 6,
        Some(n) => n as u8,
        None => 1,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn clamp_f64(f: f64) -> i64 {
    f.clamp(-1.0, 7.0) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(&json!("x")).as_deref(), Some("x"));
        assert_eq!(value_to_text(&json!(1.5)).as_deref(), Some("1.5"));
        assert_eq!(value_to_text(&json!(false)).as_deref(), Some("false"));
        assert_eq!(value_to_text(&json!(null)), None);
        assert_eq!(value_to_text(&json!([1])), None);
    }

    #[test]
    fn test_heading_level_valid() {
        for n in 1..=6 {
            assert_eq!(heading_level(Some(&json!(n))), u8::try_from(n).unwrap());
        }
    }

    #[test]
    fn test_heading_level_missing() {
        assert_eq!(heading_level(None), 1);
        assert_eq!(heading_level(Some(&json!(null))), 1);
        assert_eq!(heading_level(Some(&json!("big"))), 1);
    }

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(heading_level(Some(&json!(0))), 1);
        assert_eq!(heading_level(Some(&json!(-3))), 1);
        assert_eq!(heading_level(Some(&json!(9))), 6);
        assert_eq!(heading_level(Some(&json!(2.0))), 2);
        assert_eq!(heading_level(Some(&json!(1e30))), 6);
    }

    #[test]
    fn test_heading_level_numeric_string() {
        assert_eq!(heading_level(Some(&json!(" 3 "))), 3);
    }
}
