//! Trait object interface for pipeline steps.
//!
//! Any [`Transformer`] is usable as an unfitted step and any [`FittedTransformer`]
//! as a fitted step, through the blanket implementations below. This allows
//! storing heterogeneous transformers in one `Vec` without enums.

use crate::dataset::Table;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use std::any::{type_name, Any};
use std::sync::Arc;

/// Unfitted step: something that can be fitted into a [`FittedStep`].
pub trait PipelineStep {
    /// Fit this step on `data`.
    fn fit_step(&self, data: &Table) -> Result<Arc<dyn FittedStep>, PreprocessingError>;

    /// Get the step name for debugging.
    fn step_name(&self) -> &'static str;
}

/// Fitted step: something that transforms a table.
pub trait FittedStep {
    /// Transform the data.
    fn transform_step(&self, data: &Table) -> Result<Table, PreprocessingError>;

    /// Get the step name for debugging.
    fn step_name(&self) -> &'static str;

    /// Column names seen during fit.
    fn input_columns(&self) -> &[String];

    /// Access to the concrete fitted transformer.
    fn as_any(&self) -> &dyn Any;
}

impl<T> PipelineStep for T
where
    T: Transformer + 'static,
    T::Fitted: 'static,
{
    fn fit_step(&self, data: &Table) -> Result<Arc<dyn FittedStep>, PreprocessingError> {
        Ok(Arc::new(self.fit(data)?))
    }

    fn step_name(&self) -> &'static str {
        short_type_name::<T>()
    }
}

impl<T> FittedStep for T
where
    T: FittedTransformer + 'static,
{
    fn transform_step(&self, data: &Table) -> Result<Table, PreprocessingError> {
        self.transform(data)
    }

    fn step_name(&self) -> &'static str {
        short_type_name::<T>()
    }

    fn input_columns(&self) -> &[String] {
        self.feature_names_in()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// "iris_pipeline::preprocessing::imputation::simple::FittedSimpleImputer" -> "FittedSimpleImputer"
fn short_type_name<T: ?Sized>() -> &'static str {
    let full_name = type_name::<T>();
    let before_generic = match full_name.find('<') {
        Some(pos) => &full_name[..pos],
        None => full_name,
    };
    match before_generic.rfind("::") {
        Some(pos) => &before_generic[pos + 2..],
        None => before_generic,
    }
}
