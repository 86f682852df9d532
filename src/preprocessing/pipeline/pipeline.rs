//! Pipeline for chaining transformers.
//!
//! A Pipeline chains named transformers together, where the output
//! of one transformer becomes the input to the next.
//!
//! # Example
//! ```
//! use iris_pipeline::dataset::Table;
//! use iris_pipeline::preprocessing::{
//!     FittedTransformer, ImputeStrategy, MissingFlagger, Pipeline, SimpleImputer, Transformer,
//! };
//!
//! let data = Table::from_rows(&["sl", "sw"], &[vec![f64::NAN, 3.0], vec![4.9, 3.0], vec![5.1, 3.5]]).unwrap();
//!
//! let pipeline = Pipeline::new()
//!     .add("flag_sl", MissingFlagger::new("sl")).unwrap()
//!     .add("impute", SimpleImputer::new(ImputeStrategy::Median)).unwrap();
//!
//! let fitted = pipeline.fit(&data).unwrap();
//! let out = fitted.transform(&data).unwrap();
//! assert_eq!(out.column("sl").unwrap(), &[5.0, 4.9, 5.1]);
//! assert_eq!(out.column("sl_missing").unwrap(), &[1.0, 0.0, 0.0]);
//! ```

use crate::dataset::Table;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::pipeline::step::{FittedStep, PipelineStep};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use std::fmt;
use std::sync::Arc;

/// Pipeline transformer (unfitted).
///
/// Steps run in registration order. Step names must be unique.
#[derive(Clone, Default)]
pub struct Pipeline {
    steps: Vec<(String, Arc<dyn PipelineStep>)>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a named step.
    ///
    /// # Errors
    /// Returns [`PreprocessingError::DuplicateStep`] if `name` is already registered.
    pub fn add<T>(mut self, name: impl Into<String>, step: T) -> Result<Self, PreprocessingError>
    where
        T: Transformer + 'static,
        T::Fitted: 'static,
    {
        let name = name.into();
        if self.steps.iter().any(|(n, _)| *n == name) {
            return Err(PreprocessingError::DuplicateStep(name));
        }
        self.steps.push((name, Arc::new(step)));
        Ok(self)
    }

    /// Get the number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|(n, _)| n.as_str()).collect()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.steps.iter().map(|(n, s)| (n, s.step_name())))
            .finish()
    }
}

impl Transformer for Pipeline {
    type Fitted = FittedPipeline;

    /// Fit each step on the output of the previous one.
    fn fit(&self, data: &Table) -> Result<Self::Fitted, PreprocessingError> {
        let mut fitted_steps = Vec::with_capacity(self.steps.len());
        let mut current = data.clone();

        for (name, step) in &self.steps {
            let fitted = step.fit_step(&current)?;
            current = fitted.transform_step(&current)?;
            tracing::debug!(
                step = name.as_str(),
                kind = step.step_name(),
                rows = current.n_rows(),
                columns = current.n_columns(),
                "fitted pipeline step"
            );
            fitted_steps.push((name.clone(), fitted));
        }

        tracing::info!(steps = fitted_steps.len(), "pipeline fitted");

        Ok(FittedPipeline {
            steps: fitted_steps,
            feature_names: data.column_names(),
        })
    }
}

/// Fitted pipeline ready for inference.
#[derive(Clone)]
pub struct FittedPipeline {
    steps: Vec<(String, Arc<dyn FittedStep>)>,
    feature_names: Vec<String>,
}

impl FittedPipeline {
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Look up a fitted step by name and concrete type.
    ///
    /// ```
    /// # use iris_pipeline::dataset::Table;
    /// # use iris_pipeline::preprocessing::*;
    /// let data = Table::from_rows(&["x"], &[vec![1.0], vec![3.0]]).unwrap();
    /// let fitted = Pipeline::new()
    ///     .add("impute", SimpleImputer::new(ImputeStrategy::Mean)).unwrap()
    ///     .fit(&data).unwrap();
    /// let imputer = fitted.step::<FittedSimpleImputer>("impute").unwrap();
    /// assert_eq!(imputer.statistics(), &[2.0]);
    /// ```
    pub fn step<T: 'static>(&self, name: &str) -> Option<&T> {
        self.steps
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, s)| s.as_any().downcast_ref::<T>())
    }

    /// Columns the named step received during fit.
    pub fn step_input_columns(&self, name: &str) -> Option<&[String]> {
        self.steps
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s.input_columns())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Debug for FittedPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.steps
                    .iter()
                    .map(|(n, s)| (n, s.step_name(), s.input_columns())),
            )
            .finish()
    }
}

impl FittedTransformer for FittedPipeline {
    fn transform(&self, data: &Table) -> Result<Table, PreprocessingError> {
        let mut current = data.clone();
        for (name, step) in &self.steps {
            current = step.transform_step(&current)?;
            tracing::debug!(
                step = name.as_str(),
                columns = current.n_columns(),
                "applied pipeline step"
            );
        }
        Ok(current)
    }

    fn feature_names_in(&self) -> &[String] {
        &self.feature_names
    }
}
