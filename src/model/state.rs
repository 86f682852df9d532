/// A marker type indicating that a model is **not yet trained**.
///
/// This phantom type is used in generic parameters (e.g., `DecisionTree<Unfitted>`)
/// to enforce compile-time guarantees:
/// - Training methods (like `TrainableModel::fit`) require an `Unfitted` model.
/// - Inference methods (`predict`) are **not available** until the model is `Fitted`.
///
/// This prevents accidental use of an untrained model for prediction.
#[derive(Clone, Copy, Debug)]
pub struct Unfitted;

/// A marker type indicating that a model has been **fully trained**.
///
/// A `Fitted` model carries what inference needs (the tree structure,
/// the class list, the expected feature names).
#[derive(Clone, Copy, Debug)]
pub struct Fitted;
