//! Error types for model training and inference.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Training data has no rows or no features.
    #[error("empty data: {0}")]
    EmptyData(String),

    /// Feature rows and labels disagree in length.
    #[error("features have {rows} rows but {labels} labels were given")]
    LabelMismatch { rows: usize, labels: usize },

    /// The model cannot handle missing values; impute them first.
    #[error("missing values in column '{column}'")]
    MissingValues { column: String },

    /// Infinite values cannot be split on.
    #[error("non-finite values in column '{column}'")]
    NonFinite { column: String },

    /// Invalid hyperparameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Prediction input columns differ from the training columns.
    #[error("feature mismatch: expected {expected:?}, got {got:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        got: Vec<String>,
    },

    /// A single prediction row has the wrong width.
    #[error("expected {expected} values per row, got {got}")]
    RowLength { expected: usize, got: usize },
}
