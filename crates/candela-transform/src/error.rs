//! Transform error types.

use candela_types::CandelaError;
use thiserror::Error;

/// Errors raised while deriving a column.
#[derive(Error, Debug)]
pub enum TransformError {
    /// The price column is neither a core numeric column nor a derived one.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// The price column holds a value that has no logarithm.
    #[error("column '{column}' contains non-positive value {value} at row {row}")]
    NonPositive {
        /// Column name.
        column: String,
        /// Zero-based row index.
        row: usize,
        /// Offending value.
        value: f64,
    },

    /// The derived column could not be attached to the table.
    #[error(transparent)]
    Table(#[from] CandelaError),
}

impl From<TransformError> for CandelaError {
    fn from(e: TransformError) -> Self {
        match e {
            TransformError::UnknownColumn(_) => Self::Configuration(e.to_string()),
            TransformError::NonPositive { .. } => Self::Format(e.to_string()),
            TransformError::Table(inner) => inner,
        }
    }
}
