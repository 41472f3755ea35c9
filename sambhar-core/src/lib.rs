//! # Sambhar - Exploratory Data Profiling for Rust
//!
//! Sambhar turns an in-memory table into the three artifacts of a first look
//! at unknown data: a statistical profile per column, a set of chart
//! specifications, and a short natural-language summary. Everything it emits
//! is JSON-safe, so results can be handed straight to a web front end.
//!
//! ## Overview
//!
//! The engine is synchronous and holds no state between requests. A request
//! classifies the dataset's columns once, then fans out:
//!
//! - [`profiler`] computes per-column statistics,
//! - [`visualization`] builds Plotly-compatible chart specifications,
//! - [`summary`] composes the descriptive text,
//! - [`serializer`] normalizes every value into JSON-safe form.
//!
//! [`report::DataProfiler`] wires these together for one dataset.
//!
//! ## Quick Start
//!
//! ```rust
//! use sambhar_core::prelude::*;
//!
//! # fn example() -> Result<()> {
//! let dataset = Dataset::builder()
//!     .column(Column::floats("price", &[Some(9.5), Some(12.0), None, Some(7.25)]))
//!     .column(Column::texts("city", &[Some("Pune"), Some("Delhi"), Some("Pune"), None]))
//!     .build()?;
//!
//! let profiler = DataProfiler::new(&dataset);
//! let report = profiler.profile_report()?;
//!
//! println!("{}", report.summary);
//! println!("{}", report.to_json_string()?);
//!
//! // On-demand chart with request validation
//! let bar = profiler.generate_specific_visualization("bar", &["city".to_string()])?;
//! assert_eq!(bar.viz_type, "bar");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Column Kinds
//!
//! Columns carry a [`dataset::ColumnKind`] tag assigned at ingestion. The tag,
//! together with a few guards on the values, decides which statistics and
//! charts a column receives:
//!
//! | kind                          | classification | extras                          |
//! |-------------------------------|----------------|---------------------------------|
//! | `Integer`, `Float`            | numeric        | moments, histogram, correlation |
//! | `Text`, `Boolean`, `Category` | categorical    | bar chart                       |
//! | `Datetime`                    | temporal       | date range, line chart          |
//! | `Unknown`                     | none           | base statistics only            |
//!
//! Numeric columns that are entirely null or contain an infinity are left
//! unclassified and only get base statistics.
//!
//! ## Arrow Ingestion
//!
//! Datasets can be built from Arrow record batches:
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::Float64Array;
//! use arrow::record_batch::RecordBatch;
//! use arrow::datatypes::{DataType, Field, Schema};
//! use sambhar_core::dataset::Dataset;
//!
//! let schema = Arc::new(Schema::new(vec![Field::new("x", DataType::Float64, true)]));
//! let batch = RecordBatch::try_new(
//!     schema,
//!     vec![Arc::new(Float64Array::from(vec![Some(1.0), None]))],
//! )
//! .unwrap();
//!
//! let dataset = Dataset::try_from(&batch).unwrap();
//! assert_eq!(dataset.row_count(), 2);
//! ```
//!
//! ## Errors
//!
//! Profiling, summaries and serialization never fail. Visualization requests
//! distinguish malformed requests ([`error::Error::InvalidArgument`]) from data
//! that cannot support the chart ([`error::Error::Visualization`]).
//!
//! ## Logging
//!
//! The library emits `tracing` events and spans but never installs a
//! subscriber. Binaries can use [`logging::setup::init_logging`].

pub mod classifier;
pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod profiler;
pub mod report;
pub mod serializer;
pub mod summary;
pub mod visualization;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;
