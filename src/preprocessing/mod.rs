//! Data preprocessing transformers for ML pipelines.
//!
//! Transformers follow the same type-state split as the models in this crate:
//! an unfitted value holds hyperparameters, `fit` produces a separate fitted value
//! that can only transform.
//!
//! # Design Philosophy
//!
//! - **Type Safety**: Unfitted and fitted transformers are distinct types
//! - **Named Columns**: Transformers address columns by name, not position
//! - **Copy on Transform**: Inputs are never mutated; every transform returns a new table
//! - **sklearn-compatible**: API familiar to users of scikit-learn
//!
//! # Core Traits
//!
//! - [`Transformer`]: Unfitted transformer with hyperparameters
//! - [`FittedTransformer`]: Fitted transformer ready for inference
//! - [`StatelessTransformer`]: Transformers whose fit learns nothing
//!
//! # Available Transformers
//!
//! - [`MissingFlagger`]: Append a `<column>_missing` indicator column
//! - [`SimpleImputer`]: Fill missing values with mean, median, most_frequent, or constant
//! - [`ColumnTransformer`]: Apply transformers to column subsets, pass the rest through
//! - [`Pipeline`]: Chain named transformers together

pub mod column_transformer;
pub mod error;
pub mod imputation;
pub mod missing_flag;
pub mod pipeline;
pub mod traits;

// Re-export main types
pub use column_transformer::{
    ColumnSelection, ColumnTransformer, FittedColumnTransformer, Remainder,
};
pub use error::PreprocessingError;
pub use imputation::{FittedSimpleImputer, ImputeStrategy, SimpleImputer};
pub use missing_flag::{FittedMissingFlagger, MissingFlagger, MISSING_SUFFIX};
pub use pipeline::{FittedPipeline, FittedStep, Pipeline, PipelineStep};
pub use traits::{FittedTransformer, StatelessTransformer, Transformer};
