use fxhash::FxHashMap;
use serde::Serialize;

use super::error::FieldError;

/// Sentinel stored when a timestamp could not be reconstructed, matching the
/// fill value the downstream NetCDF writers expect.
pub const NOT_A_TIME: &str = "NaT";

/// A typed scalar decoded from one wire field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Float(f64),
    Int(i64),
    Str(String),
    Timestamp(String),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Timestamp(s) => Some(s),
            _ => None,
        }
    }
}

/// The decoded key/value result of parsing one tagged segment.
///
/// Keys come from the static per-tag field tables, so they are `'static`.
/// A Record is built once by a tag decoder and never mutated afterwards,
/// except for the weather-station tags whose repeated lines within a frame
/// merge into a single record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Record {
    #[serde(flatten)]
    fields: FxHashMap<&'static str, Value>,
}

impl Record {
    pub fn insert(&mut self, name: &'static str, value: Value) {
        self.fields.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fold another record's fields into this one. Later values win.
    pub fn merge(&mut self, other: Record) {
        self.fields.extend(other.fields);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&&'static str, &Value)> {
        self.fields.iter()
    }
}

/// Parse a float field. A `#` placeholder means the sensor had no value and
/// decodes to NaN rather than an error.
pub fn parse_float(field: &str) -> Result<f64, FieldError> {
    if field.contains('#') {
        return Ok(f64::NAN);
    }
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| FieldError::BadFloat(field.to_string()))
}

pub fn parse_int(field: &str) -> Result<i64, FieldError> {
    field
        .trim()
        .parse::<i64>()
        .map_err(|_| FieldError::BadInt(field.to_string()))
}

/// Round to a fixed number of decimal places.
pub(crate) fn round_places(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_float_is_nan() {
        assert!(parse_float("###").unwrap().is_nan());
        assert!(parse_float("14.1#").unwrap().is_nan());
    }

    #[test]
    fn test_padded_float() {
        assert_eq!(parse_float("   7.3413").unwrap(), 7.3413);
    }

    #[test]
    fn test_bad_float_is_error() {
        assert!(parse_float("abc").is_err());
    }

    #[test]
    fn test_round_places() {
        assert_eq!(round_places(48.661833, 4), 48.6618);
        assert_eq!(round_places(0.553937, 4), 0.5539);
    }
}
