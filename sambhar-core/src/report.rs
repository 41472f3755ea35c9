//! Request-level façade tying profiling, charts and summary together.
//!
//! A [`DataProfiler`] classifies its dataset once and shares that
//! classification with every component. It borrows the dataset immutably and
//! holds no other state, so independent requests never need coordination.
//!
//! # Example
//!
//! ```rust
//! use sambhar_core::dataset::{Column, Dataset};
//! use sambhar_core::report::DataProfiler;
//!
//! let dataset = Dataset::builder()
//!     .column(Column::floats(
//!         "numeric",
//!         &[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0), None],
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let profiler = DataProfiler::new(&dataset);
//! let report = profiler.profile_report().unwrap();
//!
//! assert_eq!(report.profile["numeric"].missing_count, 1);
//! assert!(report.visualizations.contains_key("numeric_histogram"));
//! assert!(report.summary.starts_with("This dataset has 6 rows and 1 columns."));
//!
//! let json = report.to_json().unwrap();
//! assert_eq!(json["profile"]["numeric"]["numeric_stats"]["mean"], 3.0);
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{info, instrument};

use crate::classifier::ColumnClassification;
use crate::config::ProfilerConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::logging::LogConfig;
use crate::profiler::{ColumnProfile, ColumnProfiler};
use crate::summary::SummaryGenerator;
use crate::visualization::{VisualizationArtifact, VisualizationDispatcher, VisualizationGenerator};

/// Full profiling response: profile, charts and summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReport {
    pub profile: IndexMap<String, ColumnProfile>,
    pub visualizations: IndexMap<String, VisualizationArtifact>,
    pub summary: String,
}

impl ProfileReport {
    pub fn to_json(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A single on-demand chart plus the requested type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualizationResponse {
    pub plot_data: VisualizationArtifact,
    pub viz_type: String,
}

impl VisualizationResponse {
    pub fn to_json(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Profiles one dataset.
#[derive(Debug)]
pub struct DataProfiler<'a> {
    dataset: &'a Dataset,
    classification: ColumnClassification,
    config: ProfilerConfig,
    log_config: LogConfig,
}

impl<'a> DataProfiler<'a> {
    /// Creates a profiler with default configuration.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self::with_config(dataset, ProfilerConfig::default())
    }

    pub fn with_config(dataset: &'a Dataset, config: ProfilerConfig) -> Self {
        Self {
            dataset,
            classification: ColumnClassification::classify(dataset),
            config,
            log_config: LogConfig::default(),
        }
    }

    pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        self.dataset
    }

    pub fn classification(&self) -> &ColumnClassification {
        &self.classification
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Per-column profiles in column order. Never fails.
    pub fn generate_profile(&self) -> IndexMap<String, ColumnProfile> {
        ColumnProfiler::builder()
            .config(self.config.clone())
            .log_config(self.log_config.clone())
            .build()
            .generate_profile_with(self.dataset, &self.classification)
    }

    /// Every applicable chart.
    pub fn generate_visualizations(&self) -> Result<IndexMap<String, VisualizationArtifact>> {
        VisualizationGenerator::new(self.dataset, &self.classification, &self.config)
            .with_log_config(self.log_config.clone())
            .generate_visualizations()
    }

    /// One validated chart, echoed with its requested type.
    pub fn generate_specific_visualization(
        &self,
        viz_type: &str,
        columns: &[String],
    ) -> Result<VisualizationResponse> {
        let plot_data =
            VisualizationDispatcher::new(self.dataset, &self.classification, &self.config)
                .with_log_config(self.log_config.clone())
                .generate(viz_type, columns)?;

        Ok(VisualizationResponse {
            plot_data,
            viz_type: viz_type.to_string(),
        })
    }

    pub fn generate_summary(&self) -> String {
        SummaryGenerator::new(self.dataset, &self.classification, &self.config).generate()
    }

    /// Profile, charts and summary in one response.
    #[instrument(
        skip(self),
        fields(rows = self.dataset.row_count(), columns = self.dataset.column_count())
    )]
    pub fn profile_report(&self) -> Result<ProfileReport> {
        let profile = self.generate_profile();
        let visualizations = self.generate_visualizations()?;
        let summary = self.generate_summary();

        info!(
            profiled = profile.len(),
            charts = visualizations.len(),
            "Generated profile report"
        );

        Ok(ProfileReport {
            profile,
            visualizations,
            summary,
        })
    }
}
