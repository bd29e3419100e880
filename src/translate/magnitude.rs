//! Arbitrary-precision parsing for token magnitudes
//!
//! Token amounts are counted in base units and routinely exceed 64 bits, so
//! they are parsed into `BigUint` and never pass through a fixed-width or
//! floating-point type.

use num_bigint::BigUint;
use serde_json::Value;

/// Parse a JSON magnitude into a non-negative integer
///
/// # Arguments
/// * `value` - A decimal digit string (e.g. `"123456789012345678901234567890"`)
///   or a JSON integer literal of any length
///
/// # Returns
/// The exact magnitude, or a human-readable reason why the value is not one
pub fn parse_magnitude(value: &Value) -> Result<BigUint, String> {
    match value {
        Value::String(s) => parse_decimal_str(s),
        Value::Number(n) => {
            // with arbitrary_precision the number keeps its source text
            let literal = n.to_string();
            if literal.starts_with('-') {
                Err("magnitude must not be negative".to_string())
            } else if literal.contains(['.', 'e', 'E']) {
                Err("floating-point number cannot carry an exact magnitude; send it as a decimal string or an integer".to_string())
            } else {
                parse_decimal_str(&literal)
            }
        }
        Value::Null => Err("magnitude is missing".to_string()),
        other => Err(format!(
            "expected a decimal string or an integer, got {}",
            json_type_name(other)
        )),
    }
}

/// Parse a base-10 digit string into a non-negative integer
///
/// A fractional part is tolerated only when it is all zeros (`"500.00"`),
/// since the value is then still an exact integer.
pub fn parse_decimal_str(s: &str) -> Result<BigUint, String> {
    if s.is_empty() {
        return Err("magnitude is empty".to_string());
    }
    if s.starts_with('-') {
        return Err("magnitude must not be negative".to_string());
    }

    let (whole, fraction) = match s.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (s, None),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err("not a base-10 integer".to_string());
    }
    if let Some(fraction) = fraction {
        if !fraction.bytes().all(|b| b == b'0') {
            return Err("magnitude has a fractional part".to_string());
        }
    }

    BigUint::parse_bytes(whole.as_bytes(), 10).ok_or_else(|| "not a base-10 integer".to_string())
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
