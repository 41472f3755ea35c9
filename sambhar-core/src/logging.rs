//! Tracing controls for profiling runs.
//!
//! Library code only emits `tracing` events. How much it emits per column
//! and per chart is decided by a [`LogConfig`] handed to the profiler and
//! the chart generators. Installing a subscriber is left to the host; demos
//! and small tools can use [`setup::init_logging`].

use tracing::Level;

/// Verbosity knobs carried by the profiler and chart generators.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Events below this level are not formatted at all
    pub base_level: Level,
    /// Emit one debug event per profiled column
    pub log_column_details: bool,
    /// Emit one info event per chart built
    pub log_chart_operations: bool,
    /// User-supplied names are cut to this many characters in events
    pub max_field_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            base_level: Level::INFO,
            log_column_details: false,
            log_chart_operations: true,
            max_field_length: 256,
        }
    }
}

impl LogConfig {
    /// Per-column and per-chart events, plus rejected requests.
    pub fn verbose() -> Self {
        Self {
            base_level: Level::DEBUG,
            log_column_details: true,
            log_chart_operations: true,
            max_field_length: 1024,
        }
    }
}

/// `debug!` that is skipped entirely unless the config asks for debug output.
#[macro_export]
macro_rules! perf_debug {
    ($config:expr, $($arg:tt)*) => {
        if $config.base_level >= tracing::Level::DEBUG {
            tracing::debug!($($arg)*);
        }
    };
}

/// Column-level event, gated on `log_column_details`.
#[macro_export]
macro_rules! log_column {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_column_details {
            tracing::debug!($($arg)*);
        }
    };
}

/// Chart-level event, gated on `log_chart_operations`.
#[macro_export]
macro_rules! log_chart {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_chart_operations {
            tracing::info!($($arg)*);
        }
    };
}

/// Cuts `value` after `max_length` characters and marks the cut.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    match value.char_indices().nth(max_length) {
        None => value.to_string(),
        Some((idx, _)) => format!("{}...(truncated)", &value[..idx]),
    }
}

/// Global subscriber installation for binaries.
pub mod setup {
    use tracing::Level;

    /// Output settings for [`init_logging`].
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        /// Level for every crate other than `sambhar_core`
        pub level: Level,
        /// Level for `sambhar_core` events
        pub sambhar_level: Level,
        /// Emit newline-delimited JSON instead of human-readable lines
        pub json_format: bool,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::WARN,
                sambhar_level: Level::INFO,
                json_format: false,
            }
        }
    }

    impl LoggingConfig {
        /// Everything at debug, human-readable.
        pub fn development() -> Self {
            Self {
                level: Level::DEBUG,
                sambhar_level: Level::DEBUG,
                json_format: false,
            }
        }

        pub fn with_json_format(mut self, enabled: bool) -> Self {
            self.json_format = enabled;
            self
        }

        /// Filter directives in `EnvFilter` syntax.
        pub fn directives(&self) -> String {
            format!(
                "{},sambhar_core={}",
                self.level.as_str().to_lowercase(),
                self.sambhar_level.as_str().to_lowercase()
            )
        }
    }

    /// Installs the global subscriber. A set `RUST_LOG` wins over `config`.
    ///
    /// ```rust,no_run
    /// use sambhar_core::logging::setup::{init_logging, LoggingConfig};
    ///
    /// init_logging(LoggingConfig::default().with_json_format(true)).unwrap();
    /// ```
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.directives()));

        let fmt_layer = if config.json_format {
            tracing_subscriber::fmt::layer().json().boxed()
        } else {
            tracing_subscriber::fmt::layer().boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        Ok(())
    }
}
