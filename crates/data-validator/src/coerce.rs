//! Per-field default resolution
//!
//! Each resolver maps one optional raw field to its canonical value. None of
//! them fail: a malformed number becomes 0, a malformed structure becomes the
//! field's documented default.

use crate::sample::{Accelerometer, GpsFix, RawSample};
use chrono::DateTime;
use serde_json::Value;

/// Coerce a JSON value to an integer. Floats round to nearest, anything
/// non-numeric is 0.
pub fn coerce_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64))
            .unwrap_or(0),
        Value::String(s) => parse_numeric(s).map(|f| f.round() as i64).unwrap_or(0),
        _ => 0,
    }
}

/// Coerce a JSON value to a float; non-numeric or non-finite is 0.
pub fn coerce_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_numeric(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

fn parse_numeric(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Epoch milliseconds from a numeric, RFC 3339 or `{seconds, nanoseconds}`
/// timestamp. `None` when absent or unparseable.
pub fn resolve_timestamp(raw: &RawSample) -> Option<i64> {
    match raw.timestamp.as_ref()? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Value::String(s) => {
            let s = s.trim();
            if let Some(ms) = parse_numeric(s) {
                return Some(ms.round() as i64);
            }
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.timestamp_millis())
        }
        Value::Object(map) => {
            let seconds = map.get("seconds").or_else(|| map.get("_seconds"))?;
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .map(coerce_i64)
                .unwrap_or(0);
            Some(
                coerce_i64(seconds)
                    .saturating_mul(1000)
                    .saturating_add(nanos / 1_000_000),
            )
        }
        _ => None,
    }
}

/// Accelerometer reading; missing axes are 0, a missing or non-object
/// reading is all zeros.
pub fn resolve_accelerometer(raw: &RawSample) -> Accelerometer {
    let Some(Value::Object(map)) = raw.accelerometer_value() else {
        return Accelerometer::default();
    };
    let axis = |lower: &str, upper: &str| {
        map.get(lower)
            .or_else(|| map.get(upper))
            .map(coerce_i64)
            .unwrap_or(0)
    };
    Accelerometer::new(axis("x", "X"), axis("y", "Y"), axis("z", "Z"))
}

/// Potentiometer reading; absence is preserved, a present but malformed
/// value is 0.
pub fn resolve_potentiometer(raw: &RawSample) -> Option<i64> {
    raw.potentiometer_value().map(coerce_i64)
}

/// GPS fix; absent unless both coordinates are numeric.
pub fn resolve_gps(raw: &RawSample) -> Option<GpsFix> {
    let Value::Object(map) = raw.gps_value()? else {
        return None;
    };
    let coordinate = |keys: &[&str]| {
        keys.iter()
            .find_map(|k| map.get(*k))
            .and_then(|v| match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => parse_numeric(s),
                _ => None,
            })
            .filter(|f| f.is_finite())
    };
    Some(GpsFix {
        latitude: coordinate(&["latitude", "Latitude", "lat"])?,
        longitude: coordinate(&["longitude", "Longitude", "lng", "lon"])?,
    })
}

/// Heart rate in beats per minute; absence is preserved.
pub fn resolve_heart_rate(raw: &RawSample) -> Option<f64> {
    raw.heart_rate_value().map(coerce_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawSample {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_coerce_i64_variants() {
        assert_eq!(coerce_i64(&json!(42)), 42);
        assert_eq!(coerce_i64(&json!(41.6)), 42);
        assert_eq!(coerce_i64(&json!(" -7 ")), -7);
        assert_eq!(coerce_i64(&json!("abc")), 0);
        assert_eq!(coerce_i64(&json!(true)), 0);
        assert_eq!(coerce_i64(&json!({ "nested": 1 })), 0);
    }

    #[test]
    fn test_coerce_f64_rejects_garbage() {
        assert_eq!(coerce_f64(&json!("72.5")), 72.5);
        assert_eq!(coerce_f64(&json!("NaN")), 0.0);
        assert_eq!(coerce_f64(&json!([1, 2])), 0.0);
    }

    #[test]
    fn test_timestamp_formats() {
        assert_eq!(resolve_timestamp(&raw(json!({ "timestamp": 1000 }))), Some(1000));
        assert_eq!(resolve_timestamp(&raw(json!({ "timestamp": "2500" }))), Some(2500));
        assert_eq!(
            resolve_timestamp(&raw(json!({ "timestamp": "2024-01-01T00:00:01Z" }))),
            Some(1_704_067_201_000)
        );
        assert_eq!(
            resolve_timestamp(&raw(json!({
                "timestamp": { "_seconds": 10, "_nanoseconds": 500_000_000 }
            }))),
            Some(10_500)
        );
    }

    #[test]
    fn test_timestamp_missing_or_garbage() {
        assert_eq!(resolve_timestamp(&raw(json!({}))), None);
        assert_eq!(resolve_timestamp(&raw(json!({ "timestamp": "yesterday" }))), None);
        assert_eq!(resolve_timestamp(&raw(json!({ "timestamp": [1] }))), None);
    }

    #[test]
    fn test_accelerometer_defaults() {
        assert_eq!(resolve_accelerometer(&raw(json!({}))), Accelerometer::default());
        assert_eq!(
            resolve_accelerometer(&raw(json!({ "accelerometer": { "x": 5, "z": "bad" } }))),
            Accelerometer::new(5, 0, 0)
        );
        assert_eq!(
            resolve_accelerometer(&raw(json!({ "accelerometer": 12 }))),
            Accelerometer::default()
        );
    }

    #[test]
    fn test_potentiometer_absence_is_not_zero() {
        assert_eq!(resolve_potentiometer(&raw(json!({}))), None);
        assert_eq!(resolve_potentiometer(&raw(json!({ "potentiometer": "junk" }))), Some(0));
        assert_eq!(resolve_potentiometer(&raw(json!({ "potentiometer": 300 }))), Some(300));
    }

    #[test]
    fn test_gps_requires_both_coordinates() {
        let fix = resolve_gps(&raw(json!({
            "data": { "GPS": { "Latitude": 53.35, "Longitude": -6.26 } }
        })));
        assert_eq!(fix, Some(GpsFix { latitude: 53.35, longitude: -6.26 }));

        assert_eq!(resolve_gps(&raw(json!({ "gps": { "latitude": 1.0 } }))), None);
        assert_eq!(resolve_gps(&raw(json!({ "gps": "here" }))), None);
    }
}
