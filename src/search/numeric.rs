//! Lenient readers for loosely typed API fields.
//!
//! The Browse API sends most amounts as decimal strings, occasionally as JSON
//! numbers, and sometimes not at all. Anything that does not read as a finite
//! number becomes zero so one bad field never fails a whole page. Text fields
//! get the same treatment: numbers are rendered as text, anything else is
//! treated as absent.

use crate::ebay::types::Amount;
use serde_json::Value;

pub fn f64_or_zero(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Integer reading; fractional inputs are truncated toward zero.
pub fn i64_or_zero(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .map(|v| v as i64)
                })
                .unwrap_or(0)
        }
        _ => 0,
    }
}

pub fn amount_or_zero(amount: Option<&Amount>) -> f64 {
    f64_or_zero(amount.and_then(|a| a.value.as_ref()))
}

/// Text reading; `7000` and `"7000"` give the same string.
pub fn text_or_none(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Rounds to whole cents for budget comparisons.
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}
