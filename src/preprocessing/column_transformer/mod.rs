//! Routing column subsets to different transformers.
//!
//! Output columns are each step's output in registration order, followed by the
//! remainder columns when [`Remainder::Passthrough`] is set.

#[allow(clippy::module_inception)]
mod column_transformer;

pub use column_transformer::{
    ColumnSelection, ColumnTransformer, FittedColumnTransformer, Remainder,
};
