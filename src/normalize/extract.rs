//! Coercions from loosely-typed JSON values into primitives.
//!
//! The generative model does not reliably honor the requested schema, so a
//! field that should be an integer may arrive as `"3"` and an identifier may
//! arrive as a bare number. These helpers accept those shapes and report
//! anything else as absent (`None`), never as a zero or empty default.

use serde_json::{Number, Value};

/// Trimmed string or stringified finite number. Blank strings are absent.
pub fn to_non_empty_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(number_to_string(n)),
        _ => None,
    }
}

/// Finite number, or a non-blank string that parses to one.
pub fn to_finite_number(value: Option<&Value>) -> Option<f64> {
    let num = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    num.is_finite().then_some(num)
}

/// Truncate toward zero and accept only values inside `[min, max]`.
///
/// Out-of-range input is rejected rather than pulled to the nearest bound:
/// `clamp_int("4", 1, 3)` is `None`, not `Some(3)`.
pub fn clamp_int(value: Option<&Value>, min: i64, max: i64) -> Option<i64> {
    let truncated = to_finite_number(value)?.trunc();
    if truncated < min as f64 || truncated > max as f64 {
        return None;
    }
    Some(truncated as i64)
}

/// Print a JSON number the way it would appear in the source document,
/// with integral floats losing their `.0`.
fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
