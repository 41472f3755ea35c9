//! Full profiling report for an Arrow record batch.
//!
//! This example shows how to:
//! - Convert an Arrow `RecordBatch` into a Sambhar dataset
//! - Set up structured logging for the profiling run
//! - Produce the profile, charts and summary as one JSON document
//!
//! Run with:
//! ```bash
//! cargo run --example profile_report
//! RUST_LOG=sambhar_core=debug cargo run --example profile_report
//! ```

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray, TimestampSecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use sambhar_core::dataset::Dataset;
use sambhar_core::logging::setup::{init_logging, LoggingConfig};
use sambhar_core::logging::LogConfig;
use sambhar_core::report::DataProfiler;
use tracing::info;

fn orders_batch() -> Result<RecordBatch, Box<dyn std::error::Error>> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("order_id", DataType::Int64, false),
        Field::new("amount", DataType::Float64, true),
        Field::new("quantity", DataType::Int64, true),
        Field::new("city", DataType::Utf8, true),
        Field::new("express", DataType::Boolean, true),
        Field::new("ordered_at", DataType::Timestamp(TimeUnit::Second, None), true),
    ]));

    let start = NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .ok_or("invalid start date")?
        .and_utc()
        .timestamp();
    let day = 86_400;

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(vec![1001, 1002, 1003, 1004, 1005, 1006, 1007, 1008])),
        Arc::new(Float64Array::from(vec![
            Some(150.50),
            Some(200.00),
            Some(75.25),
            None,
            Some(125.75),
            Some(180.00),
            Some(310.40),
            Some(95.10),
        ])),
        Arc::new(Int64Array::from(vec![
            Some(3),
            Some(4),
            Some(1),
            Some(2),
            Some(2),
            Some(4),
            Some(6),
            None,
        ])),
        Arc::new(StringArray::from(vec![
            Some("Pune"),
            Some("Mumbai"),
            Some("Pune"),
            Some("Bengaluru"),
            None,
            Some("Mumbai"),
            Some("Pune"),
            Some("München"),
        ])),
        Arc::new(BooleanArray::from(vec![
            Some(true),
            Some(false),
            Some(false),
            Some(true),
            Some(false),
            None,
            Some(true),
            Some(false),
        ])),
        Arc::new(TimestampSecondArray::from(
            (0..8).map(|i| Some(start + i * day)).collect::<Vec<_>>(),
        )),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::development())?;

    let batch = orders_batch()?;
    let dataset = Dataset::try_from(&batch)?;
    info!(
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "Loaded orders"
    );

    let profiler = DataProfiler::new(&dataset).with_log_config(LogConfig::verbose());
    let report = profiler.profile_report()?;

    println!("Summary:\n  {}\n", report.summary);
    println!("Charts:");
    for (key, artifact) in &report.visualizations {
        println!("  {key:<24} {}", artifact.trace_type().unwrap_or("?"));
    }

    println!("\nFull report:");
    println!("{}", report.to_json_string()?);

    Ok(())
}
