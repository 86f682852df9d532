//! ColumnTransformer implementation.
//!
//! Applies different transformers to different column subsets and concatenates results.

use crate::dataset::Table;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::pipeline::{FittedStep, PipelineStep};
use crate::preprocessing::traits::{check_feature_names, FittedTransformer, Transformer};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Specifies which columns a transformer should be applied to.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnSelection {
    /// Apply to the named columns, in this order.
    Names(Vec<String>),
    /// Apply to all columns.
    All,
}

impl ColumnSelection {
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnSelection::Names(names.into_iter().map(Into::into).collect())
    }

    /// Resolve the selection against the columns of `data`.
    fn resolve(&self, data: &Table) -> Result<Vec<String>, PreprocessingError> {
        match self {
            ColumnSelection::All => Ok(data.column_names()),
            ColumnSelection::Names(names) => {
                for name in names {
                    if !data.has_column(name) {
                        return Err(PreprocessingError::ColumnNotFound {
                            column: name.clone(),
                        });
                    }
                }
                Ok(names.clone())
            }
        }
    }
}

/// What happens to columns no step selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Remainder {
    /// Append them unchanged after the transformed columns.
    #[default]
    Passthrough,
    /// Leave them out of the output.
    Drop,
}

#[derive(Clone)]
struct Step {
    name: String,
    selection: ColumnSelection,
    transformer: Arc<dyn PipelineStep>,
}

/// Applies transformers to column subsets (unfitted).
///
/// # Example
/// ```
/// use iris_pipeline::dataset::Table;
/// use iris_pipeline::preprocessing::{
///     ColumnSelection, ColumnTransformer, ImputeStrategy, SimpleImputer, Transformer,
/// };
///
/// let data = Table::from_rows(&["a", "b", "flag"], &[vec![f64::NAN, 1.0, 1.0], vec![2.0, 2.0, 0.0]]).unwrap();
/// let ct = ColumnTransformer::new()
///     .add("impute", SimpleImputer::new(ImputeStrategy::Median), ColumnSelection::names(["a", "b"]))
///     .unwrap();
/// let out = ct.fit_transform(&data).unwrap();
/// assert_eq!(out.column_names(), vec!["a", "b", "flag"]);
/// assert_eq!(out.column("a").unwrap(), &[2.0, 2.0]);
/// ```
#[derive(Clone, Default)]
pub struct ColumnTransformer {
    steps: Vec<Step>,
    remainder: Remainder,
}

impl ColumnTransformer {
    /// Create a new empty ColumnTransformer with a passthrough remainder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named transformer for the selected columns.
    pub fn add<T>(
        mut self,
        name: impl Into<String>,
        transformer: T,
        selection: ColumnSelection,
    ) -> Result<Self, PreprocessingError>
    where
        T: Transformer + 'static,
        T::Fitted: 'static,
    {
        let name = name.into();
        if self.steps.iter().any(|s| s.name == name) {
            return Err(PreprocessingError::DuplicateStep(name));
        }
        self.steps.push(Step {
            name,
            selection,
            transformer: Arc::new(transformer),
        });
        Ok(self)
    }

    pub fn with_remainder(mut self, remainder: Remainder) -> Self {
        self.remainder = remainder;
        self
    }

    pub fn remainder(&self) -> Remainder {
        self.remainder
    }

    /// Get the number of transformer steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Debug for ColumnTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnTransformer")
            .field(
                "steps",
                &self
                    .steps
                    .iter()
                    .map(|s| (&s.name, &s.selection))
                    .collect::<Vec<_>>(),
            )
            .field("remainder", &self.remainder)
            .finish()
    }
}

impl Transformer for ColumnTransformer {
    type Fitted = FittedColumnTransformer;

    fn fit(&self, data: &Table) -> Result<Self::Fitted, PreprocessingError> {
        if self.steps.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "Cannot fit empty ColumnTransformer".to_string(),
            ));
        }

        let mut claimed: HashSet<String> = HashSet::new();
        let mut fitted_steps = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let columns = step.selection.resolve(data)?;
            for col in &columns {
                if !claimed.insert(col.clone()) {
                    return Err(PreprocessingError::InvalidParameter(format!(
                        "column '{}' is selected by more than one step",
                        col
                    )));
                }
            }

            let subset = data.select(&columns)?;
            let fitted = step.transformer.fit_step(&subset)?;
            tracing::debug!(
                step = step.name.as_str(),
                columns = ?columns,
                "fitted column transformer step"
            );
            fitted_steps.push(FittedColumnStep {
                name: step.name.clone(),
                columns,
                fitted,
            });
        }

        let remainder_columns = match self.remainder {
            Remainder::Passthrough => data
                .column_names()
                .into_iter()
                .filter(|c| !claimed.contains(c))
                .collect(),
            Remainder::Drop => Vec::new(),
        };

        Ok(FittedColumnTransformer {
            steps: fitted_steps,
            remainder_columns,
            feature_names: data.column_names(),
        })
    }
}

#[derive(Clone)]
struct FittedColumnStep {
    name: String,
    columns: Vec<String>,
    fitted: Arc<dyn FittedStep>,
}

/// Fitted ColumnTransformer ready for inference.
#[derive(Clone)]
pub struct FittedColumnTransformer {
    steps: Vec<FittedColumnStep>,
    remainder_columns: Vec<String>,
    feature_names: Vec<String>,
}

impl FittedColumnTransformer {
    /// Step names with the columns each step consumes.
    pub fn step_columns(&self) -> Vec<(&str, &[String])> {
        self.steps
            .iter()
            .map(|s| (s.name.as_str(), s.columns.as_slice()))
            .collect()
    }

    /// Columns passed through untouched.
    pub fn remainder_columns(&self) -> &[String] {
        &self.remainder_columns
    }

    /// Look up a fitted step by name and concrete type.
    pub fn step<T: 'static>(&self, name: &str) -> Option<&T> {
        self.steps
            .iter()
            .find(|s| s.name == name)
            .and_then(|s| s.fitted.as_any().downcast_ref::<T>())
    }
}

impl fmt::Debug for FittedColumnTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FittedColumnTransformer")
            .field("steps", &self.step_columns())
            .field("remainder_columns", &self.remainder_columns)
            .finish()
    }
}

impl FittedTransformer for FittedColumnTransformer {
    fn transform(&self, data: &Table) -> Result<Table, PreprocessingError> {
        check_feature_names(&self.feature_names, data)?;

        // Transform each step and concatenate outputs horizontally
        let mut output = data.select::<&str>(&[])?;
        for step in &self.steps {
            let subset = data.select(&step.columns)?;
            let transformed = step.fitted.transform_step(&subset)?;
            output = output.hstack(&transformed)?;
        }

        if !self.remainder_columns.is_empty() {
            output = output.hstack(&data.select(&self.remainder_columns)?)?;
        }

        Ok(output)
    }

    fn feature_names_in(&self) -> &[String] {
        &self.feature_names
    }
}
