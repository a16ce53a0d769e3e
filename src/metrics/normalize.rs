//! Recursive rounding of numeric leaves in heterogeneous ship records.
//!
//! Records arrive from different backing stores with uneven float precision.
//! Before a record is classified and assessed, every finite float leaf is
//! rounded to a fixed display precision so that downstream consumers see
//! consistent values regardless of where the record came from.

use serde_json::{Number, Value};

/// Decimal digits kept on every numeric leaf of a normalized record.
pub const LEAF_DECIMALS: u8 = 2;

/// Round `value` to `decimals` decimal digits.
///
/// Uses `f64::round`, i.e. round-half-away-from-zero: `round_to(0.125, 2)`
/// is `0.13` and `round_to(-0.125, 2)` is `-0.13`. This is an observable
/// contract for money and metric display, not an implementation detail.
///
/// Non-finite inputs (NaN, infinities) are returned unchanged.
#[must_use]
pub fn round_to(value: f64, decimals: u8) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let scale = 10f64.powi(i32::from(decimals));
    (value * scale).round() / scale
}

/// Return a copy of `value` with every finite float leaf rounded to
/// [`LEAF_DECIMALS`] digits.
///
/// The output is structurally identical to the input: same key sets, same
/// nesting, same array order and lengths. Integers, strings, booleans, and
/// nulls pass through untouched. The function is total and pure; `Value`
/// trees cannot be cyclic, so recursion always terminates.
#[must_use]
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        Value::Object(map) => Value::Object(map.iter().map(|(key, item)| (key.clone(), normalize(item))).collect()),
        Value::Number(number) => round_number(number),
        other => other.clone(),
    }
}

fn round_number(number: &Number) -> Value {
    // Integer leaves are already exact; only float leaves are rounded.
    if number.is_f64()
        && let Some(float) = number.as_f64()
        && let Some(rounded) = Number::from_f64(round_to(float, LEAF_DECIMALS))
    {
        return Value::Number(rounded);
    }

    Value::Number(number.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_to_half_away_from_zero() {
        // 0.125 is exact in binary, so this genuinely exercises the tie rule
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(-0.125, 2), -0.13);
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(287.413, 2), 287.41);
        assert_eq!(round_to(3736.7999999999997, 1), 3736.8);
    }

    #[test]
    fn test_round_to_non_finite_passthrough() {
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(f64::INFINITY, 2), f64::INFINITY);
        assert_eq!(round_to(f64::NEG_INFINITY, 2), f64::NEG_INFINITY);
    }

    #[test]
    fn test_normalize_rounds_float_leaves() {
        let record = json!({
            "draft_m_median": 12.0666,
            "residual_pct": 0.4150321,
            "speeds": [11.789, 12.3456, 9.0],
        });

        let normalized = normalize(&record);
        assert_eq!(normalized["draft_m_median"], json!(12.07));
        assert_eq!(normalized["residual_pct"], json!(0.42));
        assert_eq!(normalized["speeds"], json!([11.79, 12.35, 9.0]));
    }

    #[test]
    fn test_normalize_leaves_non_floats_untouched() {
        let record = json!({
            "name": "MS Atlantic Explorer",
            "grossTonnage": 45230,
            "active": true,
            "homeport": null,
        });

        assert_eq!(normalize(&record), record);
    }

    #[test]
    fn test_normalize_preserves_structure() {
        let record = json!({
            "outer": { "inner": [1.005, { "deep": 2.675 }] },
            "empty": [],
        });

        let normalized = normalize(&record);
        let outer = normalized["outer"]["inner"].as_array().unwrap();
        assert_eq!(outer.len(), 2);
        assert!(outer[1].as_object().unwrap().contains_key("deep"));
        assert_eq!(normalized["empty"], json!([]));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let record = json!({
            "a": 1.23456,
            "b": [0.125, -0.125],
            "c": { "d": 99.999 },
        });

        let once = normalize(&record);
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }
}
