//! Error types for the Sambhar profiling engine.
//!
//! Profiling and serialization are total and never fail. Errors only arise at
//! dataset construction and at the visualization boundary, where two kinds
//! must stay distinguishable for callers:
//!
//! - [`Error::InvalidArgument`] for a malformed request (unsupported chart type,
//!   missing or unknown column). Raised before any computation.
//! - [`Error::Visualization`] for a well-formed request the data cannot satisfy
//!   (no variation, too few rows or numeric columns, non-numeric literal in a
//!   numeric column). Always carries the underlying cause.

use thiserror::Error;

/// The main error type for the Sambhar core.
#[derive(Error, Debug)]
pub enum Error {
    /// The request itself is invalid: unknown visualization type or column.
    #[error("{0}")]
    InvalidArgument(String),

    /// The request is valid but the data does not support it.
    #[error("Failed to generate visualization: {0}")]
    Visualization(String),

    /// The dataset shape is inconsistent (duplicate names, ragged columns).
    #[error("Invalid dataset: {0}")]
    Schema(String),

    /// Error raised while ingesting Arrow data.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from serialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A type alias for `Result<T, Error>`.
///
/// # Examples
///
/// ```rust
/// use sambhar_core::error::{Error, Result};
///
/// fn require_column(name: Option<&str>) -> Result<&str> {
///     name.ok_or_else(|| Error::invalid_argument("Invalid column specified"))
/// }
///
/// assert!(require_column(None).unwrap_err().is_invalid_argument());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates an invalid argument error with the given message.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates a visualization failure with the given cause.
    pub fn visualization(cause: impl Into<String>) -> Self {
        Self::Visualization(cause.into())
    }

    /// Creates a dataset schema error with the given message.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Returns true for request validation failures.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns true for failures caused by the data rather than the request.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::Visualization(_))
    }

    /// Returns true when a surrounding API should answer with a client error.
    ///
    /// Both visualization error kinds map to the client-error category; the
    /// remaining variants indicate a broken ingestion step.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::Visualization(_) | Self::Schema(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
