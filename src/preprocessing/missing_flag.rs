//! Missing-value indicator.
//!
//! [`MissingFlagger`] appends a `<column>_missing` column holding `1.0` where the
//! source cell is missing and `0.0` elsewhere. Place it before an imputer so the
//! model can still see which values were filled in.
//!
//! # Example
//! ```
//! use iris_pipeline::dataset::Table;
//! use iris_pipeline::preprocessing::{FittedTransformer, MissingFlagger, Transformer};
//!
//! let data = Table::from_rows(&["sl", "sw"], &[vec![f64::NAN, f64::NAN], vec![4.9, 3.0]]).unwrap();
//! let flagged = MissingFlagger::new("sl").fit_transform(&data).unwrap();
//! assert_eq!(flagged.column_names(), vec!["sl", "sw", "sl_missing"]);
//! assert_eq!(flagged.column("sl_missing").unwrap(), &[1.0, 0.0]);
//! ```

use crate::dataset::{is_missing, Table};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, StatelessTransformer, Transformer};

/// Suffix appended to the source column name to form the indicator column name.
pub const MISSING_SUFFIX: &str = "_missing";

/// Flags missing values of one column (unfitted).
#[derive(Clone, Debug)]
pub struct MissingFlagger {
    column: String,
}

impl MissingFlagger {
    /// Create a flagger for `column`.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Name of the column this flagger appends.
    pub fn indicator_name(&self) -> String {
        indicator_name(&self.column)
    }
}

fn indicator_name(column: &str) -> String {
    format!("{}{}", column, MISSING_SUFFIX)
}

fn flag(data: &Table, column: &str) -> Result<Table, PreprocessingError> {
    let indicator: Vec<f64> = data
        .column(column)?
        .iter()
        .map(|&v| if is_missing(v) { 1.0 } else { 0.0 })
        .collect();
    Ok(data.with_column(indicator_name(column), indicator)?)
}

impl Transformer for MissingFlagger {
    type Fitted = FittedMissingFlagger;

    /// Nothing is learned; the target column is only checked for existence.
    fn fit(&self, data: &Table) -> Result<Self::Fitted, PreprocessingError> {
        if !data.has_column(&self.column) {
            return Err(PreprocessingError::ColumnNotFound {
                column: self.column.clone(),
            });
        }
        Ok(FittedMissingFlagger {
            column: self.column.clone(),
            columns_in: data.column_names(),
        })
    }
}

impl StatelessTransformer for MissingFlagger {
    fn transform_direct(&self, data: &Table) -> Result<Table, PreprocessingError> {
        flag(data, &self.column)
    }
}

/// Fitted MissingFlagger. Holds the target column and the schema seen at fit.
#[derive(Clone, Debug)]
pub struct FittedMissingFlagger {
    column: String,
    columns_in: Vec<String>,
}

impl FittedMissingFlagger {
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn indicator_name(&self) -> String {
        indicator_name(self.column())
    }
}

impl FittedTransformer for FittedMissingFlagger {
    fn transform(&self, data: &Table) -> Result<Table, PreprocessingError> {
        flag(data, self.column())
    }

    fn feature_names_in(&self) -> &[String] {
        &self.columns_in
    }
}
