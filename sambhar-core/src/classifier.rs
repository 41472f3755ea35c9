//! Partitioning of dataset columns into numeric, categorical and temporal sets.

use serde::Serialize;
use tracing::debug;

use crate::dataset::{Column, Dataset};

/// Column names grouped by the statistics and charts they qualify for.
///
/// Computed once per profiling pass. The three sets are disjoint by
/// construction; a column may belong to none of them, in which case its
/// profile only carries base statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnClassification {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
    pub temporal: Vec<String>,
}

impl ColumnClassification {
    /// Classifies every column of `dataset`, preserving column order.
    ///
    /// A numeric-kind column only counts as numeric when it has at least one
    /// non-null value and no infinite value. Columns failing either guard are
    /// left unclassified rather than moved to another set.
    pub fn classify(dataset: &Dataset) -> Self {
        let mut classification = Self::default();

        for column in dataset.columns() {
            let kind = column.kind();
            if kind.is_numeric() {
                if qualifies_as_numeric(column) {
                    classification.numeric.push(column.name().to_string());
                } else {
                    debug!(
                        column = %column.name(),
                        "Numeric column excluded: all null or contains infinity"
                    );
                }
            } else if kind.is_categorical() {
                classification.categorical.push(column.name().to_string());
            } else if kind.is_temporal() {
                classification.temporal.push(column.name().to_string());
            }
        }

        classification
    }

    pub fn is_numeric(&self, column: &str) -> bool {
        self.numeric.iter().any(|c| c == column)
    }

    pub fn is_categorical(&self, column: &str) -> bool {
        self.categorical.iter().any(|c| c == column)
    }

    pub fn is_temporal(&self, column: &str) -> bool {
        self.temporal.iter().any(|c| c == column)
    }
}

fn qualifies_as_numeric(column: &Column) -> bool {
    !column.is_all_null() && !column.non_null().any(|v| v.is_infinite())
}
