//! Common test fixtures for profiling scenarios.
//!
//! These datasets cover the shapes the engine must handle: a well-behaved
//! mixed table, a table full of edge cases (nulls, infinities, non-ASCII and
//! very long text), and a couple of tiny tables for correlation and
//! degenerate-size checks.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::dataset::{Column, ColumnKind, Dataset, Value};

/// Midnight on the given date.
pub fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// `periods` consecutive days starting at `start`.
pub fn daily_range(start: NaiveDateTime, periods: usize) -> Vec<Option<NaiveDateTime>> {
    (0..periods)
        .map(|i| Some(start + Duration::days(i as i64)))
        .collect()
}

/// Six rows covering every classified column kind, with one gap per column.
///
/// | column        | kind     |
/// |---------------|----------|
/// | `numeric`     | float    |
/// | `categorical` | text     |
/// | `datetime`    | datetime |
/// | `boolean`     | boolean  |
/// | `float`       | float    |
pub fn sample_dataset() -> Dataset {
    Dataset::builder()
        .column(Column::floats(
            "numeric",
            &[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0), None],
        ))
        .column(Column::texts(
            "categorical",
            &[Some("A"), Some("B"), Some("A"), Some("C"), Some("B"), None],
        ))
        .column(Column::timestamps(
            "datetime",
            &daily_range(midnight(2024, 1, 1), 6),
        ))
        .column(Column::booleans(
            "boolean",
            &[Some(true), Some(false), Some(true), Some(true), Some(false), None],
        ))
        .column(Column::floats(
            "float",
            &[Some(1.1), Some(2.2), Some(3.3), None, Some(5.5), Some(6.6)],
        ))
        .build()
        .unwrap_or_default()
}

/// Three rows of awkward data.
pub fn edge_case_dataset() -> Dataset {
    let a = "a".repeat(1000);
    let b = "b".repeat(500);
    let c = "c".repeat(100);

    Dataset::builder()
        .column(Column::texts("all_null", &[None, None, None]))
        .column(Column::floats(
            "extreme_values",
            &[Some(f64::INFINITY), Some(f64::NEG_INFINITY), Some(f64::NAN)],
        ))
        .column(Column::texts(
            "mixed_types",
            &[Some("1"), Some("text"), Some("3.14")],
        ))
        .column(Column::texts(
            "special_chars",
            &[Some("%$#@"), Some("한글"), Some("🌟")],
        ))
        .column(Column::texts(
            "long_text",
            &[Some(a.as_str()), Some(b.as_str()), Some(c.as_str())],
        ))
        .column(Column::timestamps(
            "timestamps",
            &[
                Some(midnight(2024, 1, 1)),
                Some(midnight(1970, 1, 1)),
                Some(midnight(2099, 12, 31)),
            ],
        ))
        .column(Column::texts("empty_col", &[None, None, None]))
        .build()
        .unwrap_or_default()
}

/// Two perfectly correlated numeric columns.
pub fn correlated_dataset() -> Dataset {
    Dataset::builder()
        .column(Column::integers("x", &[Some(1), Some(2), Some(3), Some(4)]))
        .column(Column::floats("y", &[Some(2.0), Some(4.0), Some(6.0), Some(8.0)]))
        .build()
        .unwrap_or_default()
}

/// One row with a numeric, a text and a datetime column.
pub fn single_row_dataset() -> Dataset {
    Dataset::builder()
        .column(Column::integers("numeric", &[Some(1)]))
        .column(Column::texts("text", &[Some("test")]))
        .column(Column::timestamps("date", &[Some(midnight(2024, 1, 1))]))
        .build()
        .unwrap_or_default()
}

/// A numeric-tagged column holding a text literal, which charts cannot plot.
pub fn corrupted_numeric_dataset() -> Dataset {
    Dataset::builder()
        .column(Column::new(
            "numeric",
            ColumnKind::Integer,
            vec![Value::from("not_a_number"), Value::Int(2), Value::Int(3)],
        ))
        .column(Column::integers("other", &[Some(1), Some(2), Some(3)]))
        .build()
        .unwrap_or_default()
}
