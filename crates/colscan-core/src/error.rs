use thiserror::Error;

/// Canonical result for colscan crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Caller-precondition violations the executor can detect cheaply.
///
/// The search and sort primitives themselves never fail; they assume these
/// checks already happened.
#[derive(Debug, Error)]
pub enum Error {
    #[error("column index {index} out of bounds ({columns} columns)")]
    ColumnIndexOutOfBounds { index: usize, columns: usize },

    #[error("column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: u32,
        actual: u32,
    },

    #[error("range {range} exceeds {len} rows")]
    RangeOutOfBounds { range: crate::range::Range, len: u32 },

    #[error("sorted index for column '{column}' has {actual} entries, expected {expected}")]
    IndexLengthMismatch {
        column: String,
        expected: u32,
        actual: u32,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
