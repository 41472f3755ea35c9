use indexmap::IndexMap;
use tracing::{error, instrument};

use crate::classifier::ColumnClassification;
use crate::config::ProfilerConfig;
use crate::dataset::{Column, Dataset};
use crate::error::{Error, Result};
use crate::log_chart;
use crate::logging::LogConfig;

use super::charts::ChartBuilder;
use super::VisualizationArtifact;

/// Produces every chart a dataset qualifies for.
///
/// | key                   | emitted for                                     |
/// |-----------------------|-------------------------------------------------|
/// | `{col}_histogram`     | numeric columns with more than one distinct value |
/// | `{col}_bar`           | categorical columns with 1..=20 distinct values |
/// | `{col}_line`          | temporal columns with more than one distinct value |
/// | `correlation_heatmap` | at least two numeric columns and two rows       |
#[derive(Debug)]
pub struct VisualizationGenerator<'a> {
    dataset: &'a Dataset,
    classification: &'a ColumnClassification,
    config: &'a ProfilerConfig,
    log_config: LogConfig,
}

impl<'a> VisualizationGenerator<'a> {
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

    /// Builds all applicable charts, keyed by visualization name.
    ///
    /// Any chart failure aborts the batch; no partial map is returned.
    #[instrument(skip(self), fields(columns = self.dataset.column_count()))]
    pub fn generate_visualizations(&self) -> Result<IndexMap<String, VisualizationArtifact>> {
        self.build_all().map_err(|err| {
            error!(error = %err, "Error generating visualizations");
            match err {
                Error::Visualization(cause) => Error::Visualization(cause),
                other => Error::visualization(other.to_string()),
            }
        })
    }

    fn build_all(&self) -> Result<IndexMap<String, VisualizationArtifact>> {
        let charts = ChartBuilder::new(self.config);
        let mut visualizations = IndexMap::new();

        for column in self.columns(&self.classification.numeric) {
            if column.distinct_count() > 1 {
                log_chart!(self.log_config, column = %column.name(), "Building histogram");
                visualizations.insert(
                    format!("{}_histogram", column.name()),
                    charts.histogram(column)?,
                );
            }
        }

        for column in self.columns(&self.classification.categorical) {
            let categories = column.distinct_count();
            if categories > 0 && categories <= self.config.max_bar_categories {
                log_chart!(
                    self.log_config,
                    column = %column.name(),
                    categories,
                    "Building bar chart"
                );
                visualizations.insert(format!("{}_bar", column.name()), charts.bar(column));
            }
        }

        for column in self.columns(&self.classification.temporal) {
            if column.distinct_count() > 1 {
                log_chart!(self.log_config, column = %column.name(), "Building line chart");
                visualizations.insert(format!("{}_line", column.name()), charts.line(column)?);
            }
        }

        if self.classification.numeric.len() > 1 && self.dataset.row_count() > 1 {
            log_chart!(
                self.log_config,
                columns = self.classification.numeric.len(),
                "Building correlation heatmap"
            );
            visualizations.insert(
                "correlation_heatmap".to_string(),
                charts.correlation_heatmap(self.dataset, &self.classification.numeric)?,
            );
        }

        Ok(visualizations)
    }

    fn columns<'n>(&'n self, names: &'n [String]) -> impl Iterator<Item = &'a Column> + 'n {
        names.iter().filter_map(|name| self.dataset.column(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{
        corrupted_numeric_dataset, edge_case_dataset, sample_dataset, single_row_dataset,
    };

    fn generate(dataset: &Dataset) -> Result<IndexMap<String, VisualizationArtifact>> {
        let classification = ColumnClassification::classify(dataset);
        let config = ProfilerConfig::default();
        VisualizationGenerator::new(dataset, &classification, &config).generate_visualizations()
    }

    #[test]
    fn test_sample_dataset_charts() {
        let charts = generate(&sample_dataset()).unwrap();
        let keys: Vec<&str> = charts.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "numeric_histogram",
                "float_histogram",
                "categorical_bar",
                "boolean_bar",
                "datetime_line",
                "correlation_heatmap",
            ]
        );
    }

    #[test]
    fn test_edge_cases_skip_degenerate_columns() {
        let charts = generate(&edge_case_dataset()).unwrap();

        assert!(!charts.contains_key("all_null_bar"));
        assert!(!charts.contains_key("empty_col_bar"));
        assert!(!charts.contains_key("extreme_values_histogram"));
        assert!(charts.contains_key("special_chars_bar"));
        assert!(charts.contains_key("long_text_bar"));
        assert!(charts.contains_key("timestamps_line"));
        assert!(!charts.contains_key("correlation_heatmap"));
    }

    #[test]
    fn test_single_row_has_no_variation() {
        let charts = generate(&single_row_dataset()).unwrap();
        assert!(!charts.contains_key("numeric_histogram"));
        assert!(!charts.contains_key("date_line"));
        assert!(!charts.contains_key("correlation_heatmap"));
        assert!(charts.contains_key("text_bar"));
    }

    #[test]
    fn test_bar_category_ceiling() {
        let many: Vec<String> = (0..21).map(|i| format!("v{i}")).collect();
        let many: Vec<Option<&str>> = many.iter().map(|s| Some(s.as_str())).collect();
        let mut few = vec![Some("a"); 21];
        few[0] = Some("b");

        let dataset = Dataset::builder()
            .column(Column::texts("many", &many))
            .column(Column::texts("few", &few))
            .build()
            .unwrap();
        let charts = generate(&dataset).unwrap();
        assert!(!charts.contains_key("many_bar"));
        assert!(charts.contains_key("few_bar"));
    }

    #[test]
    fn test_failure_aborts_batch() {
        let err = generate(&corrupted_numeric_dataset()).unwrap_err();
        assert!(err.is_insufficient_data());
        assert!(err.to_string().contains("not_a_number"));
    }

    #[test]
    fn test_empty_dataset() {
        assert!(generate(&Dataset::empty()).unwrap().is_empty());
    }
}
