use tracing::{error, instrument};

use crate::classifier::ColumnClassification;
use crate::config::ProfilerConfig;
use crate::dataset::{Column, Dataset};
use crate::error::{Error, Result};
use crate::logging::{truncate_field, LogConfig};
use crate::{log_chart, perf_debug};

use super::charts::ChartBuilder;
use super::{VisualizationArtifact, VizType};

/// Builds one requested chart after validating the request.
///
/// Validation happens in a fixed order. The chart type is checked first,
/// then the target column; both fail with [`Error::InvalidArgument`] before
/// any data is inspected. Data-sufficiency and computation failures come
/// last and are reported as [`Error::Visualization`].
///
/// # Example
///
/// ```rust
/// use sambhar_core::classifier::ColumnClassification;
/// use sambhar_core::config::ProfilerConfig;
/// use sambhar_core::dataset::{Column, Dataset};
/// use sambhar_core::visualization::VisualizationDispatcher;
///
/// let dataset = Dataset::builder()
///     .column(Column::integers("n", &[Some(1), Some(1)]))
///     .build()
///     .unwrap();
/// let classification = ColumnClassification::classify(&dataset);
/// let config = ProfilerConfig::default();
/// let dispatcher = VisualizationDispatcher::new(&dataset, &classification, &config);
///
/// let err = dispatcher.generate("pie", &[]).unwrap_err();
/// assert!(err.is_invalid_argument());
///
/// let err = dispatcher.generate("histogram", &["n".to_string()]).unwrap_err();
/// assert!(err.is_insufficient_data());
/// ```
#[derive(Debug)]
pub struct VisualizationDispatcher<'a> {
    dataset: &'a Dataset,
    classification: &'a ColumnClassification,
    config: &'a ProfilerConfig,
    log_config: LogConfig,
}

impl<'a> VisualizationDispatcher<'a> {
    pub fn new(
        dataset: &'a Dataset,
        classification: &'a ColumnClassification,
        config: &'a ProfilerConfig,
    ) -> Self {
        Self {
            dataset,
            classification,
            config,
            log_config: LogConfig::default(),
        }
    }

    pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// Builds a single chart of `viz_type` over `columns[0]`.
    ///
    /// `columns` is ignored for `correlation`, which always covers every
    /// numeric column.
    #[instrument(skip(self))]
    pub fn generate(&self, viz_type: &str, columns: &[String]) -> Result<VisualizationArtifact> {
        let viz_type: VizType = viz_type.parse()?;

        let target = if viz_type.requires_column() {
            Some(self.target_column(columns)?)
        } else {
            None
        };

        self.build(viz_type, target).map_err(|err| {
            error!(viz_type = %viz_type, error = %err, "Error generating visualization");
            err
        })
    }

    fn target_column(&self, columns: &[String]) -> Result<&'a Column> {
        let column = columns.first().and_then(|name| self.dataset.column(name));
        if column.is_none() {
            perf_debug!(
                self.log_config,
                requested = %truncate_field(
                    columns.first().map_or("", String::as_str),
                    self.log_config.max_field_length,
                ),
                "Rejecting chart request without a known column"
            );
        }
        column.ok_or_else(|| Error::invalid_argument("Invalid column specified"))
    }

    fn build(&self, viz_type: VizType, target: Option<&Column>) -> Result<VisualizationArtifact> {
        let charts = ChartBuilder::new(self.config);

        match (viz_type, target) {
            (VizType::Histogram, Some(column)) => {
                require_variation(column)?;
                log_chart!(self.log_config, column = %column.name(), "Building histogram");
                charts.histogram(column)
            }
            (VizType::Bar, Some(column)) => {
                if column.distinct_count() == 0 {
                    return Err(Error::visualization("No data available for visualization"));
                }
                log_chart!(self.log_config, column = %column.name(), "Building bar chart");
                Ok(charts.bar(column))
            }
            (VizType::Line, Some(column)) => {
                require_variation(column)?;
                log_chart!(self.log_config, column = %column.name(), "Building line chart");
                charts.line(column)
            }
            (VizType::Correlation, _) => {
                if self.classification.numeric.len() <= 1 {
                    return Err(Error::visualization(
                        "Insufficient numeric columns for correlation",
                    ));
                }
                if self.dataset.row_count() <= 1 {
                    return Err(Error::visualization("Insufficient data for correlation"));
                }
                log_chart!(
                    self.log_config,
                    columns = self.classification.numeric.len(),
                    "Building correlation heatmap"
                );
                charts.correlation_heatmap(self.dataset, &self.classification.numeric)
            }
            (_, None) => Err(Error::invalid_argument("Invalid column specified")),
        }
    }
}

fn require_variation(column: &Column) -> Result<()> {
    if column.distinct_count() <= 1 {
        return Err(Error::visualization("Insufficient variation for visualization"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{
        correlated_dataset, corrupted_numeric_dataset, edge_case_dataset, sample_dataset,
        single_row_dataset,
    };

    fn dispatch(
        dataset: &Dataset,
        viz_type: &str,
        columns: &[&str],
    ) -> Result<VisualizationArtifact> {
        let classification = ColumnClassification::classify(dataset);
        let config = ProfilerConfig::default();
        let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        VisualizationDispatcher::new(dataset, &classification, &config).generate(viz_type, &columns)
    }

    #[test]
    fn test_unsupported_type_checked_before_columns() {
        let dataset = sample_dataset();
        for columns in [&[][..], &["numeric"][..], &["missing"][..]] {
            let err = dispatch(&dataset, "pie", columns).unwrap_err();
            assert!(err.is_invalid_argument());
            assert_eq!(err.to_string(), "Unsupported visualization type: pie");
        }
    }

    #[test]
    fn test_invalid_column() {
        let dataset = sample_dataset();
        for viz_type in ["histogram", "bar", "line"] {
            let err = dispatch(&dataset, viz_type, &[]).unwrap_err();
            assert!(err.is_invalid_argument());
            assert_eq!(err.to_string(), "Invalid column specified");

            let err = dispatch(&dataset, viz_type, &["nonexistent"]).unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }

    #[test]
    fn test_column_validation_precedes_data_checks() {
        // Only one row: any data check would fail, but the column check wins.
        let dataset = single_row_dataset();
        let err = dispatch(&dataset, "histogram", &["Numeric"]).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_successful_charts() {
        let dataset = sample_dataset();
        let histogram = dispatch(&dataset, "histogram", &["numeric"]).unwrap();
        assert_eq!(histogram.trace_type(), Some("histogram"));

        let bar = dispatch(&dataset, "bar", &["categorical"]).unwrap();
        assert_eq!(bar.trace_type(), Some("bar"));

        let line = dispatch(&dataset, "line", &["datetime"]).unwrap();
        assert_eq!(line.data[0]["x"][0], "2024-01-01T00:00:00");

        let heatmap = dispatch(&dataset, "correlation", &[]).unwrap();
        assert_eq!(heatmap.trace_type(), Some("heatmap"));
    }

    #[test]
    fn test_line_on_numeric_column_keeps_numbers() {
        let line = dispatch(&sample_dataset(), "line", &["numeric"]).unwrap();
        assert_eq!(line.data[0]["x"][0], serde_json::json!(1.0));
    }

    #[test]
    fn test_insufficient_variation() {
        let dataset = single_row_dataset();
        for viz_type in ["histogram", "line"] {
            let err = dispatch(&dataset, viz_type, &["numeric"]).unwrap_err();
            assert!(err.is_insufficient_data());
            assert_eq!(
                err.to_string(),
                "Failed to generate visualization: Insufficient variation for visualization"
            );
        }
    }

    #[test]
    fn test_bar_without_data() {
        let err = dispatch(&edge_case_dataset(), "bar", &["all_null"]).unwrap_err();
        assert!(err.is_insufficient_data());
        assert!(err.to_string().ends_with("No data available for visualization"));
    }

    #[test]
    fn test_correlation_guards() {
        let err = dispatch(&edge_case_dataset(), "correlation", &[]).unwrap_err();
        assert!(err.to_string().ends_with("Insufficient numeric columns for correlation"));

        let one_row = Dataset::builder()
            .column(Column::integers("a", &[Some(1)]))
            .column(Column::integers("b", &[Some(2)]))
            .build()
            .unwrap();
        let err = dispatch(&one_row, "correlation", &[]).unwrap_err();
        assert!(err.is_insufficient_data());
        assert!(err.to_string().ends_with("Insufficient data for correlation"));

        // Columns are ignored for correlation.
        assert!(dispatch(&correlated_dataset(), "correlation", &["nonexistent"]).is_ok());
    }

    #[test]
    fn test_computation_failure_is_wrapped() {
        let err = dispatch(&corrupted_numeric_dataset(), "histogram", &["numeric"]).unwrap_err();
        assert!(err.is_insufficient_data());
        assert!(err.to_string().contains("not_a_number"));
    }
}
