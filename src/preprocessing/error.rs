//! Error types for preprocessing operations.

use crate::dataset::DatasetError;
use thiserror::Error;

/// Error type for preprocessing operations.
#[derive(Debug, Error)]
pub enum PreprocessingError {
    /// A transformer referenced a column that is not in its input table.
    #[error("column not found: '{column}'")]
    ColumnNotFound { column: String },
    /// A transformer tried to create a column that already exists.
    #[error("duplicate column: '{column}'")]
    DuplicateColumn { column: String },
    /// Empty data provided where non-empty was required.
    #[error("empty data: {0}")]
    EmptyData(String),
    /// Invalid hyperparameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// Input columns differ from the columns seen during fit.
    #[error("feature mismatch: expected {expected:?}, got {got:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        got: Vec<String>,
    },
    /// Two pipeline steps were registered under the same name.
    #[error("duplicate pipeline step: '{0}'")]
    DuplicateStep(String),
    /// Any other table error.
    #[error(transparent)]
    Dataset(DatasetError),
}

impl From<DatasetError> for PreprocessingError {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::ColumnNotFound { column } => PreprocessingError::ColumnNotFound { column },
            DatasetError::DuplicateColumn { column } => {
                PreprocessingError::DuplicateColumn { column }
            }
            other => PreprocessingError::Dataset(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_column_not_found() {
        let err = PreprocessingError::ColumnNotFound {
            column: "sl".to_string(),
        };
        assert!(err.to_string().contains("column not found"));
        assert!(err.to_string().contains("sl"));
    }

    #[test]
    fn test_error_display_feature_mismatch() {
        let err = PreprocessingError::FeatureMismatch {
            expected: vec!["a".to_string()],
            got: vec!["b".to_string()],
        };
        assert!(err.to_string().contains("feature mismatch"));
    }

    #[test]
    fn test_error_from_dataset_column_not_found() {
        let err: PreprocessingError = DatasetError::ColumnNotFound {
            column: "x".to_string(),
        }
        .into();
        assert!(matches!(err, PreprocessingError::ColumnNotFound { ref column } if column == "x"));
    }

    #[test]
    fn test_error_from_dataset_other() {
        let err: PreprocessingError = DatasetError::RowOutOfBounds { row: 3, n_rows: 2 }.into();
        assert!(matches!(err, PreprocessingError::Dataset(_)));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = PreprocessingError::InvalidParameter("test".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
