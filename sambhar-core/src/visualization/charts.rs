//! Plotly trace and layout builders.
//!
//! Builders assemble [`RawValue`] trees and hand them to the [`Serializer`],
//! so every number that reaches the artifact has already been made JSON-safe.

use crate::config::ProfilerConfig;
use crate::dataset::{Column, Dataset, Value};
use crate::error::{Error, Result};
use crate::profiler::stats;
use crate::serializer::{iso8601, RawValue, Serializer};

use super::VisualizationArtifact;

/// Builds chart artifacts from dataset columns.
#[derive(Debug, Clone, Copy)]
pub struct ChartBuilder<'a> {
    config: &'a ProfilerConfig,
    serializer: Serializer,
}

impl<'a> ChartBuilder<'a> {
    pub fn new(config: &'a ProfilerConfig) -> Self {
        Self {
            config,
            serializer: Serializer::new(),
        }
    }

    /// Histogram of a column's values.
    ///
    /// Numeric-kind columns get explicit bin edges over their range; other
    /// columns are binned by category on the client side.
    pub fn histogram(&self, column: &Column) -> Result<VisualizationArtifact> {
        let name = column.name();
        let bins = self.config.histogram_bins.max(1);

        let mut trace = vec![
            ("type", RawValue::from("histogram")),
            ("name", RawValue::from(name)),
        ];

        if column.kind().is_numeric() {
            let values = numeric_values(column)?;
            let present: Vec<f64> = values.iter().flatten().copied().collect();
            trace.push(("x", RawValue::array(values)));
            trace.push(("nbinsx", RawValue::from(bins)));

            if !present.is_empty() {
                let start = stats::min(&present);
                let end = stats::max(&present);
                trace.push((
                    "xbins",
                    RawValue::map([
                        ("start", RawValue::Float(start)),
                        ("end", RawValue::Float(end)),
                        ("size", RawValue::Float((end - start) / bins as f64)),
                    ]),
                ));
            }
        } else {
            trace.push(("x", raw_cells(column)));
            trace.push(("nbinsx", RawValue::from(bins)));
        }

        let layout = RawValue::map([
            ("xaxis", axis_title(name)),
            ("yaxis", axis_title("count")),
            ("bargap", RawValue::Float(0.1)),
        ]);

        Ok(self.artifact(RawValue::map(trace), layout))
    }

    /// Bar chart of a column's value counts, most frequent first.
    pub fn bar(&self, column: &Column) -> VisualizationArtifact {
        let (categories, counts): (Vec<RawValue>, Vec<RawValue>) = column
            .value_counts()
            .into_iter()
            .map(|(value, count)| (RawValue::from(value), RawValue::from(count)))
            .unzip();

        let trace = RawValue::map([
            ("type", RawValue::from("bar")),
            ("name", RawValue::from(column.name())),
            ("x", RawValue::Array(categories)),
            ("y", RawValue::Array(counts)),
        ]);
        let layout = RawValue::map([
            ("xaxis", axis_title("category")),
            ("yaxis", axis_title("count")),
        ]);

        self.artifact(trace, layout)
    }

    /// Line chart of a column's values against row position.
    ///
    /// Temporal columns are rendered as ISO-8601 strings; numeric-kind columns
    /// must hold numbers only.
    pub fn line(&self, column: &Column) -> Result<VisualizationArtifact> {
        let x = if column.kind().is_temporal() {
            RawValue::Array(
                column
                    .values()
                    .iter()
                    .map(|value| match value {
                        Value::Timestamp(ts) => RawValue::Text(iso8601(ts)),
                        other if other.is_null() => RawValue::Missing,
                        other => RawValue::from(other),
                    })
                    .collect(),
            )
        } else if column.kind().is_numeric() {
            RawValue::array(numeric_values(column)?)
        } else {
            raw_cells(column)
        };

        let trace = RawValue::map([
            ("type", RawValue::from("scatter")),
            ("mode", RawValue::from("lines")),
            ("name", RawValue::from(column.name())),
            ("x", x),
            ("y", RawValue::array(0..column.len())),
        ]);
        let layout = RawValue::map([
            ("xaxis", axis_title(column.name())),
            ("yaxis", axis_title("index")),
        ]);

        Ok(self.artifact(trace, layout))
    }

    /// Heatmap of the pairwise correlation matrix of `names`.
    pub fn correlation_heatmap(
        &self,
        dataset: &Dataset,
        names: &[String],
    ) -> Result<VisualizationArtifact> {
        let columns = names
            .iter()
            .map(|name| {
                dataset
                    .column(name)
                    .ok_or_else(|| Error::visualization(format!("column '{name}' not found")))
                    .and_then(numeric_values)
            })
            .collect::<Result<Vec<_>>>()?;

        let matrix = stats::correlation_matrix(&columns);
        let z = RawValue::Array(matrix.into_iter().map(RawValue::array).collect());
        let labels = RawValue::array(names.iter().map(String::as_str));

        let trace = RawValue::map([
            ("type", RawValue::from("heatmap")),
            ("z", z),
            ("x", labels.clone()),
            ("y", labels),
            ("zmin", RawValue::Float(-1.0)),
            ("zmax", RawValue::Float(1.0)),
            ("coloraxis", RawValue::from("coloraxis")),
        ]);
        let layout = RawValue::map([
            ("xaxis", axis_title("Features")),
            ("yaxis", axis_title("Features")),
            (
                "coloraxis",
                RawValue::map([("colorbar", RawValue::map([("title", title("Correlation"))]))]),
            ),
        ]);

        Ok(self.artifact(trace, layout))
    }

    fn artifact(&self, trace: RawValue, layout: RawValue) -> VisualizationArtifact {
        VisualizationArtifact::from_raw(&self.serializer, vec![trace], layout)
    }
}

/// Numeric view of a column, `None` for missing cells.
///
/// Fails when a cell holds a non-numeric literal.
pub fn numeric_values(column: &Column) -> Result<Vec<Option<f64>>> {
    column
        .values()
        .iter()
        .map(|value| {
            if value.is_null() {
                return Ok(None);
            }
            value.as_f64().map(Some).ok_or_else(|| {
                Error::visualization(format!(
                    "column '{}' contains non-numeric value '{value}'",
                    column.name()
                ))
            })
        })
        .collect()
}

fn raw_cells(column: &Column) -> RawValue {
    RawValue::Array(column.values().iter().map(RawValue::from).collect())
}

fn title(text: &str) -> RawValue {
    RawValue::map([("text", RawValue::from(text))])
}

fn axis_title(text: &str) -> RawValue {
    RawValue::map([("title", title(text))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{correlated_dataset, corrupted_numeric_dataset, sample_dataset};
    use serde_json::json;

    fn column<'d>(dataset: &'d Dataset, name: &str) -> &'d Column {
        dataset.column(name).unwrap()
    }

    #[test]
    fn test_numeric_histogram() {
        let dataset = sample_dataset();
        let config = ProfilerConfig::default();
        let artifact = ChartBuilder::new(&config)
            .histogram(column(&dataset, "numeric"))
            .unwrap();

        let trace = &artifact.data[0];
        assert_eq!(trace["type"], "histogram");
        assert_eq!(trace["nbinsx"], 30);
        assert_eq!(trace["x"], json!([1.0, 2.0, 3.0, 4.0, 5.0, null]));
        assert_eq!(trace["xbins"]["start"], json!(1.0));
        assert_eq!(trace["xbins"]["end"], json!(5.0));
        assert_eq!(artifact.layout["xaxis"]["title"]["text"], "numeric");
    }

    #[test]
    fn test_categorical_histogram_has_no_bin_edges() {
        let dataset = sample_dataset();
        let config = ProfilerConfig::default();
        let artifact = ChartBuilder::new(&config)
            .histogram(column(&dataset, "categorical"))
            .unwrap();

        let trace = &artifact.data[0];
        assert_eq!(trace["x"], json!(["A", "B", "A", "C", "B", null]));
        assert!(trace.get("xbins").is_none());
    }

    #[test]
    fn test_bar_counts() {
        let dataset = sample_dataset();
        let config = ProfilerConfig::default();
        let artifact = ChartBuilder::new(&config).bar(column(&dataset, "categorical"));

        assert_eq!(artifact.trace_type(), Some("bar"));
        assert_eq!(artifact.data[0]["x"], json!(["A", "B", "C"]));
        assert_eq!(artifact.data[0]["y"], json!([2, 2, 1]));
        assert_eq!(artifact.layout["xaxis"]["title"]["text"], "category");
        assert_eq!(artifact.layout["yaxis"]["title"]["text"], "count");
    }

    #[test]
    fn test_line_iso_normalizes_timestamps() {
        let dataset = sample_dataset();
        let config = ProfilerConfig::default();
        let artifact = ChartBuilder::new(&config)
            .line(column(&dataset, "datetime"))
            .unwrap();

        let trace = &artifact.data[0];
        assert_eq!(trace["type"], "scatter");
        assert_eq!(trace["mode"], "lines");
        assert_eq!(trace["x"][0], "2024-01-01T00:00:00");
        assert_eq!(trace["x"][5], "2024-01-06T00:00:00");
        assert_eq!(trace["y"], json!([0, 1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_correlation_heatmap() {
        let dataset = correlated_dataset();
        let config = ProfilerConfig::default();
        let names = vec!["x".to_string(), "y".to_string()];
        let artifact = ChartBuilder::new(&config)
            .correlation_heatmap(&dataset, &names)
            .unwrap();

        let trace = &artifact.data[0];
        assert_eq!(trace["type"], "heatmap");
        assert_eq!(trace["x"], json!(["x", "y"]));
        assert_eq!(trace["y"], json!(["x", "y"]));
        assert_eq!(trace["z"][0][0], json!(1.0));
        assert!((trace["z"][0][1].as_f64().unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(artifact.layout["xaxis"]["title"]["text"], "Features");
        assert_eq!(
            artifact.layout["coloraxis"]["colorbar"]["title"]["text"],
            "Correlation"
        );
    }

    #[test]
    fn test_constant_column_correlation_is_null() {
        let dataset = Dataset::builder()
            .column(Column::integers("a", &[Some(1), Some(2), Some(3)]))
            .column(Column::integers("b", &[Some(7), Some(7), Some(7)]))
            .build()
            .unwrap();
        let config = ProfilerConfig::default();
        let names = vec!["a".to_string(), "b".to_string()];
        let artifact = ChartBuilder::new(&config)
            .correlation_heatmap(&dataset, &names)
            .unwrap();

        assert!(artifact.data[0]["z"][0][1].is_null());
        assert!(artifact.data[0]["z"][1][1].is_null());
    }

    #[test]
    fn test_non_numeric_literal_fails() {
        let dataset = corrupted_numeric_dataset();
        let config = ProfilerConfig::default();
        let builder = ChartBuilder::new(&config);

        let err = builder.histogram(column(&dataset, "numeric")).unwrap_err();
        assert!(err.is_insufficient_data());
        assert!(err.to_string().contains("not_a_number"));
        assert!(err.to_string().contains("'numeric'"));

        assert!(builder.line(column(&dataset, "numeric")).is_err());
        let names = vec!["numeric".to_string(), "other".to_string()];
        assert!(builder.correlation_heatmap(&dataset, &names).is_err());
    }
}
