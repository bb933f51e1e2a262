//! Numeric coercion for stored money amounts.
//!
//! Documents written by older clients may carry pledges or payments as strings,
//! `null`, or nothing at all. Those never fail a read; they collapse to zero.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Maps non-finite values to zero so they cannot poison sums.
pub fn coerce_amount(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Coerces an arbitrary JSON value into an amount, defaulting to zero.
pub fn coerce_value(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().map(coerce_amount).unwrap_or(0.0),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map(coerce_amount)
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().map(coerce_value).unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_malformed_values_to_zero() {
        assert_eq!(coerce_value(&json!(1500)), 1500.0);
        assert_eq!(coerce_value(&json!("2500.5")), 2500.5);
        assert_eq!(coerce_value(&json!(" 10 ")), 10.0);
        assert_eq!(coerce_value(&json!("abc")), 0.0);
        assert_eq!(coerce_value(&json!(null)), 0.0);
        assert_eq!(coerce_value(&json!({"amount": 3})), 0.0);
        assert_eq!(coerce_amount(f64::NAN), 0.0);
        assert_eq!(coerce_amount(f64::INFINITY), 0.0);
    }
}
