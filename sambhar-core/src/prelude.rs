//! Prelude for commonly used types in sambhar-core.

pub use crate::classifier::ColumnClassification;
pub use crate::config::ProfilerConfig;
pub use crate::dataset::{Column, ColumnKind, Dataset, Value};
pub use crate::error::{Error, Result};
pub use crate::logging::LogConfig;
pub use crate::profiler::{
    ColumnProfile, ColumnProfiler, NumericBound, NumericStats, TemporalStats,
};
pub use crate::report::{DataProfiler, ProfileReport, VisualizationResponse};
pub use crate::serializer::{RawValue, Serializer};
pub use crate::summary::SummaryGenerator;
pub use crate::visualization::{
    VisualizationArtifact, VisualizationDispatcher, VisualizationGenerator, VizType,
};
