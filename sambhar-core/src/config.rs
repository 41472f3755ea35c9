//! Tunable limits of the profiling engine.

use serde::{Deserialize, Serialize};

/// Configuration shared by the profiler, chart generators and summary.
///
/// The defaults reproduce the documented behavior; hosts may load overrides
/// from JSON since every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    /// Maximum number of entries in a profile's `top_values`
    pub top_values_limit: usize,
    /// Keys longer than this many characters are truncated
    pub max_key_length: usize,
    /// Number of bins requested for histograms
    pub histogram_bins: usize,
    /// Categorical columns with more distinct values get no bar chart
    pub max_bar_categories: usize,
    /// Absolute correlation above which the summary reports a pair
    pub correlation_threshold: f64,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            top_values_limit: 5,
            max_key_length: 100,
            histogram_bins: 30,
            max_bar_categories: 20,
            correlation_threshold: 0.8,
        }
    }
}

impl ProfilerConfig {
    pub fn builder() -> ProfilerConfigBuilder {
        ProfilerConfigBuilder::default()
    }
}

/// Builder for [`ProfilerConfig`].
///
/// # Example
///
/// ```rust
/// use sambhar_core::config::ProfilerConfig;
///
/// let config = ProfilerConfig::builder()
///     .top_values_limit(10)
///     .correlation_threshold(0.9)
///     .build();
///
/// assert_eq!(config.top_values_limit, 10);
/// assert_eq!(config.histogram_bins, 30);
/// ```
#[derive(Debug, Default)]
pub struct ProfilerConfigBuilder {
    config: ProfilerConfig,
}

impl ProfilerConfigBuilder {
    /// Sets the number of most frequent values reported per column.
    pub fn top_values_limit(mut self, limit: usize) -> Self {
        self.config.top_values_limit = limit;
        self
    }

    /// Sets the maximum key length before truncation.
    pub fn max_key_length(mut self, length: usize) -> Self {
        self.config.max_key_length = length;
        self
    }

    /// Sets the histogram bin count (clamped to at least 1).
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.config.histogram_bins = bins.max(1);
        self
    }

    /// Sets the distinct-value ceiling for bar charts.
    pub fn max_bar_categories(mut self, max: usize) -> Self {
        self.config.max_bar_categories = max;
        self
    }

    /// Sets the correlation magnitude reported in summaries.
    pub fn correlation_threshold(mut self, threshold: f64) -> Self {
        self.config.correlation_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn build(self) -> ProfilerConfig {
        self.config
    }
}
