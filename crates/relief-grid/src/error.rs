//! Raster grid loading errors.

use std::path::PathBuf;

/// Errors that can occur while loading or parsing a raster grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The grid file does not exist.
    #[error("grid file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The grid file exists but could not be read.
    #[error("failed to read grid file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file ended before a mandatory header line.
    #[error("missing header line {line} ({field})")]
    MissingHeader { line: usize, field: &'static str },

    /// A header line has no value token or the token is not a number.
    #[error("invalid {field} on header line {line}: {token:?}")]
    InvalidHeader {
        line: usize,
        field: &'static str,
        token: String,
    },

    /// A header value is numeric but unusable (zero size, non-positive cell size).
    #[error("invalid {field}: {value}")]
    InvalidDimension { field: &'static str, value: String },

    /// A data token could not be parsed as a number.
    #[error("invalid value at row {row}, column {column}: {token:?}")]
    InvalidValue {
        row: usize,
        column: usize,
        token: String,
    },

    /// A data row does not contain exactly `columns` values.
    #[error("row {row} has {found} values, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The number of data rows does not match the header.
    #[error("expected {expected} data rows, found {found}")]
    RowCount { expected: usize, found: usize },
}

impl GridError {
    /// Returns `true` if this error only means the file is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GridError::NotFound { .. })
    }
}
