//! Typed parameter extraction from `serde_json::Value` objects.
//!
//! Configuration arrives as loose JSON (CLI `--params`, embedding hosts).
//! These helpers never fail: a missing key or wrong type falls back to the
//! supplied default, so a partially specified object always yields a usable
//! parameter set.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if the key is
/// missing or not a number. JSON integers are widened to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, returning `default` if the key is
/// missing or not a boolean.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` unless the
/// value is a non-negative JSON integer.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}
