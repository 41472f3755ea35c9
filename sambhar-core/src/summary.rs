//! Natural-language description of a dataset.
//!
//! The summary is a sequence of independent clauses joined by single spaces.
//! Only the first clause (shape) is always present:
//!
//! 1. `This dataset has {rows} rows and {cols} columns.`
//! 2. Column counts per classification, zero counts omitted.
//! 3. Presence of free-text columns and of non-ASCII content.
//! 4. Total missing values, when any.
//! 5. Number of zero-length columns, when any.
//! 6. The first strongly correlated pair of numeric columns.
//!
//! # Example
//!
//! ```rust
//! use sambhar_core::classifier::ColumnClassification;
//! use sambhar_core::config::ProfilerConfig;
//! use sambhar_core::dataset::{Column, Dataset};
//! use sambhar_core::summary::SummaryGenerator;
//!
//! let dataset = Dataset::builder()
//!     .column(Column::integers("x", &[Some(1), Some(2), Some(3)]))
//!     .column(Column::floats("y", &[Some(2.0), Some(4.0), Some(6.0)]))
//!     .build()
//!     .unwrap();
//! let classification = ColumnClassification::classify(&dataset);
//! let config = ProfilerConfig::default();
//!
//! let summary = SummaryGenerator::new(&dataset, &classification, &config).generate();
//! assert_eq!(
//!     summary,
//!     "This dataset has 3 rows and 2 columns. It contains 2 numeric columns. \
//!      There is a strong correlation (1.00) between x and y."
//! );
//! ```

use tracing::instrument;

use crate::classifier::ColumnClassification;
use crate::config::ProfilerConfig;
use crate::dataset::{ColumnKind, Dataset, Value};
use crate::profiler::stats;

/// Composes the summary text for one dataset.
#[derive(Debug, Clone, Copy)]
pub struct SummaryGenerator<'a> {
    dataset: &'a Dataset,
    classification: &'a ColumnClassification,
    config: &'a ProfilerConfig,
}

impl<'a> SummaryGenerator<'a> {
    pub fn new(
        dataset: &'a Dataset,
        classification: &'a ColumnClassification,
        config: &'a ProfilerConfig,
    ) -> Self {
        Self {
            dataset,
            classification,
            config,
        }
    }

    /// Builds the full summary. Never fails.
    #[instrument(skip(self), fields(columns = self.dataset.column_count()))]
    pub fn generate(&self) -> String {
        let clauses = [
            Some(self.shape_clause()),
            self.type_clause(),
            self.content_clause(),
            self.missing_clause(),
            self.empty_clause(),
            self.correlation_clause(),
        ];

        clauses.into_iter().flatten().collect::<Vec<_>>().join(" ")
    }

    fn shape_clause(&self) -> String {
        format!(
            "This dataset has {} rows and {} columns.",
            self.dataset.row_count(),
            self.dataset.column_count()
        )
    }

    fn type_clause(&self) -> Option<String> {
        let counts = [
            (self.classification.numeric.len(), "numeric"),
            (self.classification.categorical.len(), "categorical"),
            (self.classification.temporal.len(), "datetime"),
        ];
        let parts: Vec<String> = counts
            .iter()
            .filter(|(n, _)| *n > 0)
            .map(|(n, label)| format!("{n} {label} columns"))
            .collect();

        (!parts.is_empty()).then(|| format!("It contains {}.", parts.join(", ")))
    }

    fn content_clause(&self) -> Option<String> {
        let columns = self.dataset.columns();
        let has_text = columns.iter().any(|c| c.kind() == ColumnKind::Text);
        let has_special = columns
            .iter()
            .flat_map(|c| c.non_null())
            .any(contains_non_ascii);

        let description = match (has_text, has_special) {
            (true, true) => "text and special characters",
            (true, false) => "text",
            (false, true) => "special characters",
            (false, false) => return None,
        };
        Some(format!("The dataset includes {description} data."))
    }

    fn missing_clause(&self) -> Option<String> {
        let missing: usize = self.dataset.columns().iter().map(|c| c.null_count()).sum();
        (missing > 0).then(|| format!("There are {missing} missing values across all columns."))
    }

    fn empty_clause(&self) -> Option<String> {
        let empty = self.dataset.columns().iter().filter(|c| c.is_empty()).count();
        (empty > 0).then(|| format!("There are {empty} empty columns."))
    }

    fn correlation_clause(&self) -> Option<String> {
        let names = &self.classification.numeric;
        if names.len() < 2 || self.dataset.row_count() < 2 {
            return None;
        }

        // Non-numeric literals are treated as missing here; the summary never fails.
        let columns: Vec<Vec<Option<f64>>> = names
            .iter()
            .filter_map(|name| self.dataset.column(name))
            .map(|column| column.values().iter().map(Value::as_f64).collect())
            .collect();
        let matrix = stats::correlation_matrix(&columns);

        for (i, row) in matrix.iter().enumerate() {
            for (j, &r) in row.iter().enumerate() {
                if i != j && r.abs() > self.config.correlation_threshold {
                    return Some(format!(
                        "There is a strong correlation ({r:.2}) between {} and {}.",
                        names[i], names[j]
                    ));
                }
            }
        }
        None
    }
}

fn contains_non_ascii(value: &Value) -> bool {
    match value {
        Value::Text(s) => !s.is_ascii(),
        other => !other.to_string().is_ascii(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Column;
    use crate::test_fixtures::{correlated_dataset, edge_case_dataset, sample_dataset};

    fn summarize(dataset: &Dataset) -> String {
        let classification = ColumnClassification::classify(dataset);
        let config = ProfilerConfig::default();
        SummaryGenerator::new(dataset, &classification, &config).generate()
    }

    #[test]
    fn test_sample_summary() {
        let summary = summarize(&sample_dataset());
        assert!(summary.starts_with("This dataset has 6 rows and 5 columns."));
        assert!(summary.contains(
            "It contains 2 numeric columns, 2 categorical columns, 1 datetime columns."
        ));
        assert!(summary.contains("The dataset includes text data."));
        assert!(summary.contains("There are 4 missing values across all columns."));
        assert!(!summary.contains("empty columns"));
    }

    #[test]
    fn test_special_characters() {
        let summary = summarize(&edge_case_dataset());
        assert!(summary.contains("The dataset includes text and special characters data."));

        let dataset = Dataset::builder()
            .column(Column::categories("city", &[Some("Zürich"), Some("Bern")]))
            .build()
            .unwrap();
        assert!(summarize(&dataset).contains("The dataset includes special characters data."));
    }

    #[test]
    fn test_correlation_clause() {
        let summary = summarize(&correlated_dataset());
        assert!(summary.ends_with("There is a strong correlation (1.00) between x and y."));

        let negative = Dataset::builder()
            .column(Column::integers("up", &[Some(1), Some(2), Some(3)]))
            .column(Column::integers("down", &[Some(3), Some(2), Some(1)]))
            .build()
            .unwrap();
        assert!(summarize(&negative).contains("(-1.00) between up and down"));
    }

    #[test]
    fn test_weak_correlation_not_reported() {
        let dataset = Dataset::builder()
            .column(Column::integers("a", &[Some(1), Some(2), Some(3), Some(4)]))
            .column(Column::integers("b", &[Some(2), Some(1), Some(4), Some(3)]))
            .build()
            .unwrap();
        assert!(!summarize(&dataset).contains("correlation"));
    }

    #[test]
    fn test_correlation_threshold_is_configurable() {
        let dataset = Dataset::builder()
            .column(Column::integers("a", &[Some(1), Some(2), Some(3), Some(4)]))
            .column(Column::integers("b", &[Some(2), Some(1), Some(4), Some(3)]))
            .build()
            .unwrap();
        let classification = ColumnClassification::classify(&dataset);
        let config = ProfilerConfig::builder().correlation_threshold(0.5).build();
        let summary = SummaryGenerator::new(&dataset, &classification, &config).generate();
        assert!(summary.contains("There is a strong correlation (0.60) between a and b."));
    }

    #[test]
    fn test_empty_dataset() {
        assert_eq!(
            summarize(&Dataset::empty()),
            "This dataset has 0 rows and 0 columns."
        );
    }

    #[test]
    fn test_zero_row_columns_are_empty() {
        let dataset = Dataset::builder()
            .column(Column::integers("a", &[]))
            .column(Column::texts("b", &[]))
            .build()
            .unwrap();
        let summary = summarize(&dataset);
        assert!(summary.contains("There are 2 empty columns."));
        assert!(summary.contains("It contains 1 categorical columns."));
        assert!(!summary.contains("missing"));
    }
}
