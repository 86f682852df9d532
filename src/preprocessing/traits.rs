//! Core traits for preprocessing transformers.
//!
//! This module defines the two central traits:
//! - [`Transformer`]: Used during fitting; has hyperparameters and can learn from data.
//! - [`FittedTransformer`]: After fitting; ready to transform new tables.

use crate::dataset::Table;
use crate::preprocessing::error::PreprocessingError;

/// Trait for unfitted transformers with hyperparameters.
///
/// A transformer learns parameters from training data and can then transform
/// new data using those learned parameters. This trait represents the
/// configurable, unfitted state.
///
/// # Example
/// ```
/// use iris_pipeline::dataset::Table;
/// use iris_pipeline::preprocessing::{FittedTransformer, ImputeStrategy, SimpleImputer, Transformer};
///
/// let data = Table::from_rows(&["x"], &[vec![1.0], vec![f64::NAN], vec![3.0]]).unwrap();
/// let fitted = SimpleImputer::new(ImputeStrategy::Median).fit(&data).unwrap();
/// let imputed = fitted.transform(&data).unwrap();
/// assert_eq!(imputed.column("x").unwrap(), &[1.0, 2.0, 3.0]);
/// ```
pub trait Transformer: Clone {
    /// The fitted transformer type ready for inference.
    type Fitted: FittedTransformer;

    /// Fit the transformer to the training data.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if:
    /// - Data is empty and the transformer needs statistics
    /// - A referenced column does not exist
    fn fit(&self, data: &Table) -> Result<Self::Fitted, PreprocessingError>;

    /// Fit the transformer and transform the data in one step.
    fn fit_transform(&self, data: &Table) -> Result<Table, PreprocessingError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

/// Trait for fitted transformers ready for inference.
///
/// Transforms never mutate their input; they return a new [`Table`].
pub trait FittedTransformer: Clone {
    /// Transform data using learned parameters.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if the input columns do not satisfy what the
    /// transformer saw during fit.
    fn transform(&self, data: &Table) -> Result<Table, PreprocessingError>;

    /// Column names seen during fit, in order.
    fn feature_names_in(&self) -> &[String];

    /// Returns the number of features seen during fit.
    fn n_features_in(&self) -> usize {
        self.feature_names_in().len()
    }
}

/// Marker trait for transformers that don't require fitting.
///
/// Stateless transformers (like [`MissingFlagger`](crate::preprocessing::MissingFlagger))
/// can transform data without learning any parameters.
pub trait StatelessTransformer: Transformer {
    /// Transform data without fitting.
    ///
    /// For stateless transformers, this is equivalent to `fit_transform`
    /// but communicates that no learning occurs.
    fn transform_direct(&self, data: &Table) -> Result<Table, PreprocessingError>;
}

/// Check that `data` has exactly the columns seen during fit.
pub(crate) fn check_feature_names(
    expected: &[String],
    data: &Table,
) -> Result<(), PreprocessingError> {
    let got = data.column_names();
    if got.as_slice() != expected {
        return Err(PreprocessingError::FeatureMismatch {
            expected: expected.to_vec(),
            got,
        });
    }
    Ok(())
}
