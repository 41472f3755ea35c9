//! Requesting single charts and handling both error kinds.
//!
//! Run with:
//! ```bash
//! cargo run --example on_demand_chart
//! ```

use chrono::NaiveDate;
use sambhar_core::dataset::{Column, Dataset};
use sambhar_core::error::Error;
use sambhar_core::logging::setup::{init_logging, LoggingConfig};
use sambhar_core::report::DataProfiler;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::default().with_json_format(true))?;

    let days: Vec<_> = (1..=5)
        .map(|d| NaiveDate::from_ymd_opt(2024, 6, d).and_then(|d| d.and_hms_opt(0, 0, 0)))
        .collect();

    let dataset = Dataset::builder()
        .column(Column::floats(
            "temperature",
            &[Some(21.5), Some(23.0), Some(19.5), None, Some(24.5)],
        ))
        .column(Column::floats(
            "humidity",
            &[Some(0.61), Some(0.55), Some(0.70), Some(0.66), Some(0.52)],
        ))
        .column(Column::texts(
            "station",
            &[Some("north"), Some("north"), Some("south"), None, Some("east")],
        ))
        .column(Column::timestamps("measured_on", &days))
        .build()?;

    let profiler = DataProfiler::new(&dataset);

    let requests: [(&str, &[&str]); 6] = [
        ("histogram", &["temperature"]),
        ("bar", &["station"]),
        ("line", &["measured_on"]),
        ("correlation", &[]),
        ("pie", &["station"]),
        ("histogram", &["pressure"]),
    ];

    for (viz_type, columns) in requests {
        let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        match profiler.generate_specific_visualization(viz_type, &columns) {
            Ok(response) => {
                println!(
                    "{viz_type:<12} ok    {}",
                    serde_json::to_string(&response.plot_data.data)?
                );
            }
            Err(err @ Error::InvalidArgument(_)) => {
                println!("{viz_type:<12} 400   invalid request: {err}");
            }
            Err(err) if err.is_client_error() => {
                println!("{viz_type:<12} 400   {err}");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
