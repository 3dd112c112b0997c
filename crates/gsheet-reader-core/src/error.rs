//! Error types for gsheet-reader-core

use thiserror::Error;

use crate::schema::FieldType;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning a grid into records
///
/// Every variant is fatal to a run: the pipeline stops at the first one and
/// emits no records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The grid has no header row
    #[error("Grid is empty: expected a header row")]
    EmptyGrid,

    /// Header row does not match the record shape's column fields
    #[error("Header mismatch: expected {expected:?}, found {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// A cell's text could not be coerced to its field type
    #[error("Row {row}: cannot convert {value:?} in field '{field}' to {expected}")]
    RowConversion {
        /// 1-based sheet row number
        row: usize,
        field: String,
        expected: FieldType,
        value: String,
    },

    /// A row ran out of values before every column field was filled
    #[error("Row {row}: no value for field '{field}'")]
    MissingValue { row: usize, field: String },

    /// A data row has fewer text values than the shape has column fields
    ///
    /// Merging cuts every row to the narrowest one, so a single short row
    /// would leave the whole sheet short.
    #[error("Row {row}: has {width} values, expected at least {expected}")]
    RaggedRow {
        /// 1-based sheet row number
        row: usize,
        width: usize,
        expected: usize,
    },

    /// The record shape itself is unusable
    #[error("Invalid record shape: {0}")]
    InvalidShape(String),
}

impl Error {
    /// Create an invalid-shape error with a message
    pub fn invalid_shape<S: Into<String>>(msg: S) -> Self {
        Error::InvalidShape(msg.into())
    }
}
