//! Machine learning models with compile-time state safety.
//!
//! Models carry their training state in the type (`Unfitted` vs `Fitted`):
//! [`TrainableModel`] is implemented for the unfitted form and produces the fitted
//! form, which implements [`InferenceModel`].

pub mod error;
pub mod state;
pub mod tree;

pub use error::ModelError;
pub use state::{Fitted, Unfitted};
pub use tree::{DecisionTree, DecisionTreeClassifier, Node, TreeParams};

use crate::dataset::Table;

/// A model that can be trained on a feature table and one label per row.
pub trait TrainableModel {
    /// The trained model produced by [`fit`](TrainableModel::fit).
    type Fitted;

    fn fit(&self, x: &Table, y: &[String]) -> Result<Self::Fitted, ModelError>;
}

/// A trained model that produces predictions.
pub trait InferenceModel {
    type InputSingle: ?Sized;
    type OutputSingle;
    type InputBatch;
    type OutputBatch;

    fn predict(&self, input: &Self::InputSingle) -> Result<Self::OutputSingle, ModelError>;
    fn predict_batch(&self, input: &Self::InputBatch) -> Result<Self::OutputBatch, ModelError>;
}
