//! In-memory tabular datasets consumed by the profiling engine.
//!
//! A [`Dataset`] is an ordered list of named [`Column`]s sharing one row count.
//! Every column carries a [`ColumnKind`] tag assigned by whatever ingested the
//! data; the core never inspects runtime types to decide how to treat a
//! column. Datasets are immutable once built.
//!
//! # Example
//!
//! ```rust
//! use sambhar_core::dataset::{Column, Dataset};
//!
//! let dataset = Dataset::builder()
//!     .column(Column::floats("price", &[Some(1.0), Some(2.5), None]))
//!     .column(Column::texts("city", &[Some("Pune"), Some("Delhi"), Some("Pune")]))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(dataset.row_count(), 3);
//! assert_eq!(dataset.column_names(), vec!["price", "city"]);
//! ```

mod from_arrow;
mod value;

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;

use crate::error::{Error, Result};

pub use value::{ColumnKind, Value, ValueKey};

/// A named, kind-tagged sequence of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    values: Vec<Value>,
}

impl Column {
    /// Creates a column from raw cells.
    ///
    /// Cells are not checked against `kind`; a numeric column holding a text
    /// literal is representable and surfaces as a computation error when a
    /// chart needs its numbers.
    pub fn new(name: impl Into<String>, kind: ColumnKind, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    pub fn integers(name: impl Into<String>, values: &[Option<i64>]) -> Self {
        Self::new(name, ColumnKind::Integer, collect_cells(values))
    }

    pub fn floats(name: impl Into<String>, values: &[Option<f64>]) -> Self {
        Self::new(name, ColumnKind::Float, collect_cells(values))
    }

    pub fn texts(name: impl Into<String>, values: &[Option<&str>]) -> Self {
        Self::new(name, ColumnKind::Text, collect_cells(values))
    }

    pub fn categories(name: impl Into<String>, values: &[Option<&str>]) -> Self {
        Self::new(name, ColumnKind::Category, collect_cells(values))
    }

    pub fn booleans(name: impl Into<String>, values: &[Option<bool>]) -> Self {
        Self::new(name, ColumnKind::Boolean, collect_cells(values))
    }

    pub fn timestamps(name: impl Into<String>, values: &[Option<NaiveDateTime>]) -> Self {
        Self::new(name, ColumnKind::Datetime, collect_cells(values))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing cells (nulls and NaN floats).
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// True when the column has no rows or every cell is missing.
    pub fn is_all_null(&self) -> bool {
        self.values.iter().all(Value::is_null)
    }

    /// Iterates over the non-missing cells in row order.
    pub fn non_null(&self) -> impl Iterator<Item = &Value> + '_ {
        self.values.iter().filter(|v| !v.is_null())
    }

    /// Number of distinct non-missing values.
    pub fn distinct_count(&self) -> usize {
        self.values
            .iter()
            .filter_map(Value::key)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Occurrence counts of non-missing values, most frequent first.
    ///
    /// Ties keep the order in which the values first appear in the column.
    /// Each entry holds the first cell seen for that value.
    pub fn value_counts(&self) -> Vec<(&Value, usize)> {
        let mut positions: HashMap<ValueKey, usize> = HashMap::new();
        let mut counts: Vec<(&Value, usize)> = Vec::new();

        for value in &self.values {
            let Some(key) = value.key() else {
                continue;
            };
            match positions.get(&key) {
                Some(&idx) => counts[idx].1 += 1,
                None => {
                    positions.insert(key, counts.len());
                    counts.push((value, 1));
                }
            }
        }

        // Stable sort keeps first-occurrence order among equal counts.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

fn collect_cells<T>(values: &[Option<T>]) -> Vec<Value>
where
    T: Clone + Into<Value>,
{
    values.iter().cloned().map(Value::from).collect()
}

/// Ordered, named columns with a shared row count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Builds a dataset, rejecting duplicate names and ragged columns.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(Error::schema(format!(
                    "duplicate column '{}'",
                    column.name
                )));
            }
            if column.len() != row_count {
                return Err(Error::schema(format!(
                    "column '{}' has {} rows, expected {row_count}",
                    column.name,
                    column.len()
                )));
            }
        }

        Ok(Self { columns, row_count })
    }

    /// A dataset with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by exact (case-sensitive) name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }
}

/// Builder for [`Dataset`].
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    columns: Vec<Column>,
}

impl DatasetBuilder {
    /// Appends a column.
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Validates and builds the dataset.
    pub fn build(self) -> Result<Dataset> {
        Dataset::new(self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_shape() {
        let dataset = Dataset::builder()
            .column(Column::integers("a", &[Some(1), None, Some(3)]))
            .column(Column::texts("b", &[Some("x"), Some("y"), None]))
            .build()
            .unwrap();

        assert_eq!(dataset.row_count(), 3);
        assert_eq!(dataset.column_count(), 2);
        assert_eq!(dataset.column_names(), vec!["a", "b"]);
        assert!(dataset.column("a").is_some());
        assert!(dataset.column("A").is_none());
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::empty();
        assert_eq!(dataset.row_count(), 0);
        assert_eq!(dataset.column_count(), 0);
        assert_eq!(Dataset::new(vec![]).unwrap(), dataset);
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let result = Dataset::builder()
            .column(Column::integers("a", &[Some(1)]))
            .column(Column::integers("a", &[Some(2)]))
            .build();
        assert!(matches!(result, Err(Error::Schema(_))));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let dataset = Dataset::builder()
            .column(Column::integers("a", &[Some(1)]))
            .column(Column::integers("A", &[Some(2)]))
            .build()
            .unwrap();
        assert_eq!(dataset.column_count(), 2);
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let result = Dataset::builder()
            .column(Column::integers("a", &[Some(1), Some(2)]))
            .column(Column::integers("b", &[Some(1)]))
            .build();
        let err = result.unwrap_err();
        assert!(err.to_string().contains("column 'b' has 1 rows, expected 2"));
    }

    #[test]
    fn test_null_accounting() {
        let column = Column::floats("f", &[Some(1.0), None, Some(f64::NAN), Some(2.0)]);
        assert_eq!(column.null_count(), 2);
        assert_eq!(column.non_null().count(), 2);
        assert!(!column.is_all_null());

        let empty = Column::floats("e", &[]);
        assert!(empty.is_empty());
        assert!(empty.is_all_null());
    }

    #[test]
    fn test_value_counts_order() {
        let column = Column::texts(
            "c",
            &[Some("B"), Some("A"), Some("A"), Some("C"), Some("B"), None],
        );
        let counts: Vec<(String, usize)> = column
            .value_counts()
            .into_iter()
            .map(|(v, n)| (v.to_string(), n))
            .collect();

        assert_eq!(
            counts,
            vec![
                ("B".to_string(), 2),
                ("A".to_string(), 2),
                ("C".to_string(), 1)
            ]
        );
        assert_eq!(column.distinct_count(), 3);
    }
}
