//! Loose-typing helpers over [`serde_json::Value`].
//!
//! Handlers and converters see raw, untrusted JSON. These helpers give them
//! one shared notion of emptiness, string form and numeric form.

use serde_json::{Number, Value};

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Returns true for values that count as "not provided": absent, `null`, or
/// a string made only of whitespace.
#[must_use]
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// String form of a value.
///
/// Integral numbers drop their fraction (`4.0` renders as `4`), arrays join
/// their elements with `,` and objects render as compact JSON.
#[must_use]
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => display_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn display_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        // f64's Display never prints a trailing `.0`.
        n.as_f64().map(|f| f.to_string()).unwrap_or_default()
    }
}

/// Numeric form of a value, or `None` when it has none.
///
/// Strings are trimmed first; a blank string is `0`, as are `null` and
/// `false`. `0x`/`0o`/`0b` prefixed integers are accepted. Non-finite
/// results, arrays and objects have no numeric form.
#[must_use]
pub fn to_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_number(s.trim())?,
        Value::Array(_) | Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}

#[allow(clippy::cast_precision_loss)]
fn parse_number(s: &str) -> Option<f64> {
    if s.is_empty() {
        return Some(0.0);
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix).ok().map(|n| n as f64);
    }

    // Rust accepts "inf"/"nan" spellings that are not numbers here.
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Builds a JSON number from `f`, as an integer when it is integral and
/// exactly representable.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn number_value(f: f64) -> Option<Value> {
    if !f.is_finite() {
        return None;
    }
    if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
        return Some(Value::from(f as i64));
    }
    Number::from_f64(f).map(Value::Number)
}
