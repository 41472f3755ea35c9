//! Per-column statistical profiles.
//!
//! Every column receives base statistics (missing values, distinct count, most
//! frequent values). Columns in the numeric set additionally get descriptive
//! statistics, and columns in the temporal set get their date range.
//!
//! Profiling is total: degenerate columns (no rows, only nulls) produce a
//! minimal profile instead of an error, and all floating point statistics
//! serialize JSON-safely.
//!
//! # Example
//!
//! ```rust
//! use sambhar_core::dataset::{Column, Dataset};
//! use sambhar_core::profiler::ColumnProfiler;
//!
//! let dataset = Dataset::builder()
//!     .column(Column::floats(
//!         "numeric",
//!         &[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0), None],
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let profiles = ColumnProfiler::new().generate_profile(&dataset);
//! let numeric = &profiles["numeric"];
//!
//! assert_eq!(numeric.missing_count, 1);
//! assert_eq!(numeric.numeric_stats.as_ref().unwrap().mean, 3.0);
//! ```

pub mod stats;

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::classifier::ColumnClassification;
use crate::config::ProfilerConfig;
use crate::dataset::{Column, ColumnKind, Dataset, Value};
use crate::log_column;
use crate::logging::LogConfig;
use crate::serializer::{iso8601_timestamp, json_safe_float};

/// Marker appended to truncated `top_values` keys.
pub const ELLIPSIS: &str = "...";

/// Smallest or largest value of a numeric column.
///
/// Integer columns keep their integers; everything else is a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericBound {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl NumericBound {
    fn from_wide(v: i128) -> Self {
        match (i64::try_from(v), u64::try_from(v)) {
            (Ok(n), _) => NumericBound::Int(n),
            (_, Ok(n)) => NumericBound::UInt(n),
            _ => NumericBound::Float(v as f64),
        }
    }
}

impl Serialize for NumericBound {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NumericBound::Int(v) => serializer.serialize_i64(*v),
            NumericBound::UInt(v) => serializer.serialize_u64(*v),
            NumericBound::Float(v) => json_safe_float(v, serializer),
        }
    }
}

/// Descriptive statistics of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    #[serde(serialize_with = "json_safe_float")]
    pub mean: f64,
    #[serde(serialize_with = "json_safe_float")]
    pub std: f64,
    pub min: NumericBound,
    pub max: NumericBound,
    #[serde(serialize_with = "json_safe_float")]
    pub median: f64,
    #[serde(serialize_with = "json_safe_float")]
    pub skewness: f64,
    #[serde(serialize_with = "json_safe_float")]
    pub kurtosis: f64,
}

/// Range of a temporal column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalStats {
    #[serde(serialize_with = "iso8601_timestamp")]
    pub min_date: NaiveDateTime,
    #[serde(serialize_with = "iso8601_timestamp")]
    pub max_date: NaiveDateTime,
    pub date_range_days: i64,
}

/// Statistical profile of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub data_type: String,
    pub missing_count: usize,
    #[serde(serialize_with = "json_safe_float")]
    pub missing_percentage: f64,
    pub unique_count: usize,
    /// Most frequent values, stringified, in descending order of count.
    pub top_values: IndexMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_stats: Option<NumericStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal_stats: Option<TemporalStats>,
}

/// Computes [`ColumnProfile`]s.
#[derive(Debug, Clone, Default)]
pub struct ColumnProfiler {
    config: ProfilerConfig,
    log_config: LogConfig,
}

impl ColumnProfiler {
    /// Creates a profiler with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ColumnProfilerBuilder {
        ColumnProfilerBuilder::default()
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Profiles every column of `dataset`, in column order.
    #[instrument(
        skip(self, dataset),
        fields(columns = dataset.column_count(), rows = dataset.row_count())
    )]
    pub fn generate_profile(&self, dataset: &Dataset) -> IndexMap<String, ColumnProfile> {
        let classification = ColumnClassification::classify(dataset);
        self.generate_profile_with(dataset, &classification)
    }

    /// Profiles every column using an existing classification.
    pub fn generate_profile_with(
        &self,
        dataset: &Dataset,
        classification: &ColumnClassification,
    ) -> IndexMap<String, ColumnProfile> {
        let profiles: IndexMap<String, ColumnProfile> = dataset
            .columns()
            .iter()
            .map(|column| {
                (
                    column.name().to_string(),
                    self.profile_column(column, classification),
                )
            })
            .collect();

        debug!(profiled = profiles.len(), "Generated dataset profile");
        profiles
    }

    /// Profiles a single column. Never fails.
    pub fn profile_column(
        &self,
        column: &Column,
        classification: &ColumnClassification,
    ) -> ColumnProfile {
        let data_type = column.kind().label().to_string();

        if column.is_all_null() {
            log_column!(
                self.log_config,
                column = %column.name(),
                "Column is empty or entirely null"
            );
            return ColumnProfile {
                data_type,
                missing_count: column.len(),
                missing_percentage: 100.0,
                unique_count: 0,
                top_values: IndexMap::new(),
                numeric_stats: None,
                temporal_stats: None,
            };
        }

        let missing_count = column.null_count();
        let missing_percentage = missing_count as f64 / column.len() as f64 * 100.0;

        let numeric_stats = if classification.is_numeric(column.name()) {
            self.numeric_stats(column)
        } else {
            None
        };
        let temporal_stats = if classification.is_temporal(column.name()) {
            self.temporal_stats(column)
        } else {
            None
        };

        log_column!(
            self.log_config,
            column = %column.name(),
            missing = missing_count,
            numeric = numeric_stats.is_some(),
            temporal = temporal_stats.is_some(),
            "Profiled column"
        );

        ColumnProfile {
            data_type,
            missing_count,
            missing_percentage,
            unique_count: column.distinct_count(),
            top_values: self.top_values(column),
            numeric_stats,
            temporal_stats,
        }
    }

    fn top_values(&self, column: &Column) -> IndexMap<String, usize> {
        column
            .value_counts()
            .into_iter()
            .take(self.config.top_values_limit)
            .map(|(value, count)| (self.truncate_key(value), count))
            .collect()
    }

    fn truncate_key(&self, value: &Value) -> String {
        let key = value.to_string();
        let limit = self.config.max_key_length;
        match key.char_indices().nth(limit) {
            None => key,
            Some((idx, _)) => format!("{}{ELLIPSIS}", &key[..idx]),
        }
    }

    fn numeric_stats(&self, column: &Column) -> Option<NumericStats> {
        let values: Vec<f64> = column.non_null().filter_map(Value::as_f64).collect();
        if values.is_empty() {
            return None;
        }

        let (min, max) = integer_bounds(column).unwrap_or((
            NumericBound::Float(stats::min(&values)),
            NumericBound::Float(stats::max(&values)),
        ));

        Some(NumericStats {
            mean: stats::mean(&values),
            std: stats::sample_std(&values),
            min,
            max,
            median: stats::median(&values),
            skewness: stats::skewness(&values),
            kurtosis: stats::kurtosis(&values),
        })
    }

    fn temporal_stats(&self, column: &Column) -> Option<TemporalStats> {
        let stamps = column.non_null().filter_map(Value::as_timestamp);
        let (min_date, max_date) = stamps.fold(None, |range, ts| match range {
            None => Some((ts, ts)),
            Some((lo, hi)) => Some((ts.min(lo), ts.max(hi))),
        })?;

        Some(TemporalStats {
            min_date,
            max_date,
            date_range_days: (max_date - min_date).num_days(),
        })
    }
}

/// Exact bounds of an integer column whose numeric cells are all integers.
fn integer_bounds(column: &Column) -> Option<(NumericBound, NumericBound)> {
    if column.kind() != ColumnKind::Integer {
        return None;
    }

    let mut range: Option<(i128, i128)> = None;
    for value in column.non_null() {
        let v = match value {
            Value::Int(v) => i128::from(*v),
            Value::UInt(v) => i128::from(*v),
            // Non-numeric literals are skipped like everywhere else in profiling.
            Value::Text(_) => continue,
            _ => return None,
        };
        range = Some(range.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))));
    }

    range.map(|(lo, hi)| (NumericBound::from_wide(lo), NumericBound::from_wide(hi)))
}

/// Builder for [`ColumnProfiler`].
#[derive(Debug, Default)]
pub struct ColumnProfilerBuilder {
    config: ProfilerConfig,
    log_config: LogConfig,
}

impl ColumnProfilerBuilder {
    pub fn config(mut self, config: ProfilerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// Sets the number of most frequent values reported.
    pub fn top_values_limit(mut self, limit: usize) -> Self {
        self.config.top_values_limit = limit;
        self
    }

    /// Sets the key length beyond which `top_values` keys are truncated.
    pub fn max_key_length(mut self, length: usize) -> Self {
        self.config.max_key_length = length;
        self
    }

    pub fn build(self) -> ColumnProfiler {
        ColumnProfiler {
            config: self.config,
            log_config: self.log_config,
        }
    }
}
