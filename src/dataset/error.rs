//! Error types for table construction, dataset loading and splitting.

use thiserror::Error;

/// Errors raised by [`Table`](super::Table) operations and dataset loaders.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A column was referenced by name but does not exist.
    #[error("column not found: '{column}'")]
    ColumnNotFound { column: String },

    /// A column with the same name is already present.
    #[error("duplicate column: '{column}'")]
    DuplicateColumn { column: String },

    /// A column (or row) does not have the expected length.
    #[error("length mismatch for '{column}': expected {expected}, got {got}")]
    LengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },

    /// Row index past the end of the table.
    #[error("row {row} out of bounds for table with {n_rows} rows")]
    RowOutOfBounds { row: usize, n_rows: usize },

    /// Feature rows and labels disagree in length.
    #[error("features have {rows} rows but {labels} labels were given")]
    LabelMismatch { rows: usize, labels: usize },

    /// A CSV field could not be parsed as a number.
    #[error("line {line}: cannot parse '{value}' in column '{column}'")]
    Parse {
        line: u64,
        column: String,
        value: String,
    },

    /// The CSV header does not contain an expected column.
    #[error("CSV header is missing column '{0}'")]
    MissingHeader(String),

    /// Invalid train/test split request.
    #[error("invalid split: {0}")]
    InvalidSplit(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_column_not_found() {
        let err = DatasetError::ColumnNotFound {
            column: "petal_width".to_string(),
        };
        assert_eq!(err.to_string(), "column not found: 'petal_width'");
    }

    #[test]
    fn test_error_display_parse() {
        let err = DatasetError::Parse {
            line: 7,
            column: "sepal_length".to_string(),
            value: "abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: DatasetError = io_err.into();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
