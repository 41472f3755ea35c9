//! Cell values and column kinds.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Declared kind of a column, assigned once at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Signed or unsigned integers
    Integer,
    /// Floating point numbers
    Float,
    /// Free text
    Text,
    /// Boolean values (true/false)
    Boolean,
    /// Text drawn from a fixed set of categories
    Category,
    /// Date and timestamp values
    Datetime,
    /// Anything the ingestion step could not map
    Unknown,
}

impl ColumnKind {
    /// Label reported as a profile's `data_type`.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Text => "text",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Category => "category",
            ColumnKind::Datetime => "datetime",
            ColumnKind::Unknown => "unknown",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }

    pub fn is_categorical(&self) -> bool {
        matches!(
            self,
            ColumnKind::Text | ColumnKind::Boolean | ColumnKind::Category
        )
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnKind::Datetime)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single cell of a column.
///
/// `Float(NaN)` is the missing marker of float columns and is treated exactly
/// like [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    /// Unsigned value above `i64::MAX`; smaller ones are stored as `Int`.
    UInt(u64),
    Float(f64),
    Bool(bool),
    Text(String),
    Timestamp(NaiveDateTime),
}

/// Hashable identity of a non-null value, used for counting and distinctness.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Int(i64),
    UInt(u64),
    Float(u64),
    Bool(bool),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Returns true for nulls and NaN floats.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Returns true for positive or negative infinity.
    pub fn is_infinite(&self) -> bool {
        matches!(self, Value::Float(v) if v.is_infinite())
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::UInt(v) => Some(*v as f64),
            Value::Float(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Identity used for value counts; `None` for missing values.
    ///
    /// Integral floats share a key with the equal integer, and `-0.0` with `0.0`.
    pub fn key(&self) -> Option<ValueKey> {
        match self {
            Value::Null => None,
            Value::Float(v) if v.is_nan() => None,
            Value::Int(v) => Some(ValueKey::Int(*v)),
            Value::UInt(v) => Some(
                i64::try_from(*v).map_or(ValueKey::UInt(*v), ValueKey::Int),
            ),
            Value::Float(v) => {
                if v.fract() == 0.0 && v.abs() < 9.0e15 {
                    Some(ValueKey::Int(*v as i64))
                } else {
                    Some(ValueKey::Float(v.to_bits()))
                }
            }
            Value::Bool(b) => Some(ValueKey::Bool(*b)),
            Value::Text(s) => Some(ValueKey::Text(s.clone())),
            Value::Timestamp(ts) => Some(ValueKey::Timestamp(*ts)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}"),
            Value::Float(v) if v.is_nan() => f.write_str("nan"),
            Value::Float(v) if v.is_infinite() => {
                f.write_str(if *v > 0.0 { "inf" } else { "-inf" })
            }
            // Debug keeps the trailing `.0` on integral floats.
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Text(s) => f.write_str(s),
            Value::Timestamp(ts) => write!(f, "{ts}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Value::UInt(v), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
