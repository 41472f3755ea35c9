//! JSON-safe normalization of runtime values.
//!
//! [`RawValue`] is the closed set of value kinds the engine produces while
//! building profiles and charts. [`Serializer::to_json`] maps every kind onto a
//! [`serde_json::Value`] without ever failing:
//!
//! | kind                         | output                               |
//! |------------------------------|--------------------------------------|
//! | `Int`, `UInt`                | JSON integer                         |
//! | `Float`                      | number; NaN → `null`; ±∞ → `"inf"`   |
//! | `Bool`                       | boolean                              |
//! | `Array`, `Series`, `List`    | array (series labels dropped)        |
//! | `Table`                      | object of column → array             |
//! | `Map`                        | object with stringified keys         |
//! | `Timestamp`                  | ISO-8601 string                      |
//! | `Missing`                    | `null`                               |
//! | `Complex`                    | string such as `"(1+2j)"`            |
//! | `Opaque`                     | its `Display` string                 |
//!
//! # Example
//!
//! ```rust
//! use sambhar_core::serializer::{RawValue, Serializer};
//!
//! let value = RawValue::map([
//!     ("mean", RawValue::Float(f64::NAN)),
//!     ("max", RawValue::Float(f64::INFINITY)),
//! ]);
//! let json = Serializer::new().to_json(&value);
//! assert_eq!(json, serde_json::json!({"mean": null, "max": "inf"}));
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde_json::{Map, Number, Value as JsonValue};
use tracing::trace;

use crate::dataset::Value;

/// Runtime value kinds understood by the [`Serializer`].
#[derive(Clone)]
pub enum RawValue {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Text(String),
    /// Homogeneous array-like sequence.
    Array(Vec<RawValue>),
    /// One-dimensional labeled sequence; labels are dropped on output.
    Series {
        labels: Vec<String>,
        values: Vec<RawValue>,
    },
    /// Two-dimensional labeled table, column by column.
    Table(Vec<(String, Vec<RawValue>)>),
    /// Key-value mapping with keys of any kind.
    Map(Vec<(RawValue, RawValue)>),
    /// Heterogeneous ordered sequence or fixed tuple.
    List(Vec<RawValue>),
    Timestamp(NaiveDateTime),
    Missing,
    Complex {
        re: f64,
        im: f64,
    },
    /// Anything else; rendered through `Display`.
    Opaque(Arc<dyn fmt::Display + Send + Sync>),
}

impl RawValue {
    /// Builds a mapping from string keys.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, RawValue)>,
    {
        RawValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (RawValue::Text(k.into()), v))
                .collect(),
        )
    }

    /// Builds an array from anything convertible into raw values.
    pub fn array<T, I>(items: I) -> Self
    where
        T: Into<RawValue>,
        I: IntoIterator<Item = T>,
    {
        RawValue::Array(items.into_iter().map(Into::into).collect())
    }

    /// Wraps an arbitrary displayable value.
    pub fn opaque(value: impl fmt::Display + Send + Sync + 'static) -> Self {
        RawValue::Opaque(Arc::new(value))
    }

    fn kind_name(&self) -> &'static str {
        match self {
            RawValue::Int(_) => "integer",
            RawValue::UInt(_) => "unsigned integer",
            RawValue::Float(_) => "float",
            RawValue::Bool(_) => "boolean",
            RawValue::Text(_) => "text",
            RawValue::Array(_) => "array",
            RawValue::Series { .. } => "series",
            RawValue::Table(_) => "table",
            RawValue::Map(_) => "mapping",
            RawValue::List(_) => "list",
            RawValue::Timestamp(_) => "timestamp",
            RawValue::Missing => "missing",
            RawValue::Complex { .. } => "complex",
            RawValue::Opaque(_) => "opaque",
        }
    }

    /// Key text used when this value labels a mapping entry.
    fn key_string(&self) -> String {
        match self {
            RawValue::Text(s) => s.clone(),
            other => match Serializer::new().to_json(other) {
                JsonValue::String(s) => s,
                JsonValue::Null => "null".to_string(),
                json => json.to_string(),
            },
        }
    }
}

impl fmt::Debug for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Int(v) => f.debug_tuple("Int").field(v).finish(),
            RawValue::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            RawValue::Float(v) => f.debug_tuple("Float").field(v).finish(),
            RawValue::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            RawValue::Text(v) => f.debug_tuple("Text").field(v).finish(),
            RawValue::Array(v) => f.debug_tuple("Array").field(v).finish(),
            RawValue::Series { labels, values } => f
                .debug_struct("Series")
                .field("labels", labels)
                .field("values", values)
                .finish(),
            RawValue::Table(v) => f.debug_tuple("Table").field(v).finish(),
            RawValue::Map(v) => f.debug_tuple("Map").field(v).finish(),
            RawValue::List(v) => f.debug_tuple("List").field(v).finish(),
            RawValue::Timestamp(v) => f.debug_tuple("Timestamp").field(v).finish(),
            RawValue::Missing => f.write_str("Missing"),
            RawValue::Complex { re, im } => f
                .debug_struct("Complex")
                .field("re", re)
                .field("im", im)
                .finish(),
            RawValue::Opaque(v) => f.debug_tuple("Opaque").field(&v.to_string()).finish(),
        }
    }
}

/// Strict encoding: succeeds only for values that are already JSON-native.
///
/// Used as the fast probe of [`Serializer::ensure_serializable`].
impl serde::Serialize for RawValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RawValue::Int(v) => serializer.serialize_i64(*v),
            RawValue::UInt(v) => serializer.serialize_u64(*v),
            RawValue::Float(v) if v.is_finite() => serializer.serialize_f64(*v),
            RawValue::Bool(v) => serializer.serialize_bool(*v),
            RawValue::Text(v) => serializer.serialize_str(v),
            RawValue::Missing => serializer.serialize_unit(),
            RawValue::Array(items) | RawValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            RawValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    let RawValue::Text(key) = key else {
                        return Err(S::Error::custom("mapping key is not a string"));
                    };
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            other => Err(S::Error::custom(format!(
                "{} value is not directly JSON-encodable",
                other.kind_name()
            ))),
        }
    }
}

/// Converts runtime values into JSON-safe trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serializer;

impl Serializer {
    pub fn new() -> Self {
        Self
    }

    /// Recursively normalizes `value` into a JSON-safe tree. Never fails.
    pub fn to_json(&self, value: &RawValue) -> JsonValue {
        match value {
            RawValue::Int(v) => JsonValue::from(*v),
            RawValue::UInt(v) => JsonValue::from(*v),
            RawValue::Float(v) => float_to_json(*v),
            RawValue::Bool(v) => JsonValue::Bool(*v),
            RawValue::Array(items) | RawValue::List(items) => self.sequence(items),
            RawValue::Series { values, .. } => self.sequence(values),
            RawValue::Table(columns) => JsonValue::Object(
                columns
                    .iter()
                    .map(|(name, values)| (name.clone(), self.sequence(values)))
                    .collect(),
            ),
            RawValue::Map(entries) => JsonValue::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.key_string(), self.to_json(v)))
                    .collect::<Map<_, _>>(),
            ),
            RawValue::Timestamp(ts) => JsonValue::String(iso8601(ts)),
            RawValue::Missing => JsonValue::Null,
            RawValue::Complex { re, im } => JsonValue::String(complex_to_string(*re, *im)),
            RawValue::Text(v) => JsonValue::String(v.clone()),
            RawValue::Opaque(v) => JsonValue::String(v.to_string()),
        }
    }

    /// Encodes `value` directly when it is already JSON-native and falls back
    /// to [`Serializer::to_json`] otherwise. Both paths agree.
    pub fn ensure_serializable(&self, value: &RawValue) -> JsonValue {
        match serde_json::to_value(value) {
            Ok(json) => json,
            Err(err) => {
                trace!(reason = %err, "Direct encoding failed, normalizing value");
                self.to_json(value)
            }
        }
    }

    fn sequence(&self, items: &[RawValue]) -> JsonValue {
        JsonValue::Array(items.iter().map(|item| self.to_json(item)).collect())
    }
}

/// Float rule shared by every JSON output path.
pub fn float_to_json(v: f64) -> JsonValue {
    if v.is_nan() {
        JsonValue::Null
    } else if v.is_infinite() {
        JsonValue::String(if v > 0.0 { "inf" } else { "-inf" }.to_string())
    } else {
        Number::from_f64(v).map_or(JsonValue::Null, JsonValue::Number)
    }
}

/// ISO-8601 rendering of a timestamp, with fractional seconds only when set.
pub fn iso8601(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

fn complex_to_string(re: f64, im: f64) -> String {
    let sign = if im.is_sign_negative() { '-' } else { '+' };
    format!("({re}{sign}{}j)", im.abs())
}

/// `serialize_with` helper applying the float rule to typed fields.
pub fn json_safe_float<S: serde::Serializer>(v: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match float_to_json(*v) {
        JsonValue::Number(_) => serializer.serialize_f64(*v),
        JsonValue::String(s) => serializer.serialize_str(&s),
        _ => serializer.serialize_unit(),
    }
}

/// `serialize_with` helper rendering timestamps as ISO-8601.
pub fn iso8601_timestamp<S: serde::Serializer>(
    ts: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&iso8601(ts))
}

impl From<&Value> for RawValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => RawValue::Missing,
            Value::Int(v) => RawValue::Int(*v),
            Value::UInt(v) => RawValue::UInt(*v),
            Value::Float(v) => RawValue::Float(*v),
            Value::Bool(v) => RawValue::Bool(*v),
            Value::Text(v) => RawValue::Text(v.clone()),
            Value::Timestamp(v) => RawValue::Timestamp(*v),
        }
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Int(v)
    }
}

impl From<usize> for RawValue {
    fn from(v: usize) -> Self {
        RawValue::UInt(v as u64)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Bool(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(v: NaiveDateTime) -> Self {
        RawValue::Timestamp(v)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(RawValue::Missing, Into::into)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(v: Vec<T>) -> Self {
        RawValue::List(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_scalars() {
        let s = Serializer::new();
        assert_eq!(s.to_json(&RawValue::Int(5)), json!(5));
        assert_eq!(s.to_json(&RawValue::UInt(u64::MAX)), json!(u64::MAX));
        assert_eq!(s.to_json(&RawValue::Float(3.25)), json!(3.25));
        assert_eq!(s.to_json(&RawValue::Float(1e308)), json!(1e308));
        assert_eq!(s.to_json(&RawValue::Bool(true)), json!(true));
        assert_eq!(s.to_json(&RawValue::Missing), JsonValue::Null);
    }

    #[test]
    fn test_special_floats() {
        let s = Serializer::new();
        assert_eq!(s.to_json(&RawValue::Float(f64::NAN)), JsonValue::Null);
        assert_eq!(s.to_json(&RawValue::Float(f64::INFINITY)), json!("inf"));
        assert_eq!(s.to_json(&RawValue::Float(f64::NEG_INFINITY)), json!("-inf"));
    }

    #[test]
    fn test_sequences_drop_labels() {
        let s = Serializer::new();
        assert_eq!(s.to_json(&RawValue::array([1i64, 2, 3])), json!([1, 2, 3]));
        assert_eq!(s.to_json(&RawValue::Array(vec![])), json!([]));

        let series = RawValue::Series {
            labels: vec!["a".into(), "b".into()],
            values: vec![RawValue::Int(4), RawValue::Float(f64::NAN)],
        };
        assert_eq!(s.to_json(&series), json!([4, null]));
    }

    #[test]
    fn test_table_and_map() {
        let s = Serializer::new();
        let table = RawValue::Table(vec![
            ("x".into(), vec![RawValue::Int(1), RawValue::Missing]),
            ("y".into(), vec![RawValue::from("a"), RawValue::from("b")]),
        ]);
        assert_eq!(s.to_json(&table), json!({"x": [1, null], "y": ["a", "b"]}));

        let map = RawValue::Map(vec![
            (RawValue::Int(1), RawValue::from("one")),
            (RawValue::Bool(false), RawValue::Float(0.5)),
            (RawValue::Timestamp(ts(2024, 1, 1)), RawValue::Missing),
        ]);
        assert_eq!(
            s.to_json(&map),
            json!({"1": "one", "false": 0.5, "2024-01-01T00:00:00": null})
        );
    }

    #[test]
    fn test_timestamps_complex_and_opaque() {
        let s = Serializer::new();
        assert_eq!(
            s.to_json(&RawValue::Timestamp(ts(2024, 1, 1))),
            json!("2024-01-01T00:00:00")
        );
        assert_eq!(
            s.to_json(&RawValue::Complex { re: 1.0, im: -2.0 }),
            json!("(1-2j)")
        );
        assert_eq!(s.to_json(&RawValue::opaque(std::net::Ipv4Addr::LOCALHOST)), json!("127.0.0.1"));
    }

    #[test]
    fn test_nested_structure_preserves_text() {
        let s = Serializer::new();
        let nested = RawValue::map([
            ("array", RawValue::array([1i64, 2, 3])),
            (
                "series",
                RawValue::Series {
                    labels: vec![],
                    values: vec![RawValue::Int(4), RawValue::Int(5), RawValue::Int(6)],
                },
            ),
            ("timestamp", RawValue::Timestamp(ts(2024, 1, 1))),
            ("special", RawValue::from("한글 🌟")),
        ]);

        let json = s.to_json(&nested);
        assert_eq!(json["array"], json!([1, 2, 3]));
        assert_eq!(json["series"], json!([4, 5, 6]));
        assert!(json["timestamp"].is_string());
        assert_eq!(json["special"], json!("한글 🌟"));

        let encoded = serde_json::to_string(&json).unwrap();
        let decoded: JsonValue = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, json);
    }

    #[test]
    fn test_ensure_serializable_paths_agree() {
        let s = Serializer::new();
        let native = RawValue::map([
            ("a", RawValue::array([1.5, 2.5])),
            ("b", RawValue::from("text")),
            ("c", RawValue::Missing),
        ]);
        assert!(serde_json::to_value(&native).is_ok());
        assert_eq!(s.ensure_serializable(&native), s.to_json(&native));

        let needs_normalizing = RawValue::map([("bad", RawValue::Float(f64::NAN))]);
        assert!(serde_json::to_value(&needs_normalizing).is_err());
        assert_eq!(s.ensure_serializable(&needs_normalizing), json!({"bad": null}));
    }

    #[test]
    fn test_typed_helpers() {
        #[derive(serde::Serialize)]
        struct Stats {
            #[serde(serialize_with = "json_safe_float")]
            a: f64,
            #[serde(serialize_with = "json_safe_float")]
            b: f64,
            #[serde(serialize_with = "json_safe_float")]
            c: f64,
            #[serde(serialize_with = "iso8601_timestamp")]
            at: NaiveDateTime,
        }

        let stats = Stats {
            a: 2.5,
            b: f64::NAN,
            c: f64::NEG_INFINITY,
            at: ts(2099, 12, 31),
        };
        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            json!({"a": 2.5, "b": null, "c": "-inf", "at": "2099-12-31T00:00:00"})
        );
    }
}
