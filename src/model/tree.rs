//! Decision tree classifier (CART with Gini impurity).
//!
//! - [`DecisionTreeClassifier`] = `DecisionTree<Unfitted>`: holds hyperparameters.
//! - `DecisionTree<Fitted>`: holds the grown tree and predicts labels.
//!
//! Splits are axis-aligned: a row goes to the left child when
//! `row[feature] <= threshold`. Thresholds are midpoints between consecutive
//! distinct values seen at a node. Among equally good splits the first one found
//! (lowest feature index, then lowest threshold) wins, so training is deterministic.

use super::{Fitted, InferenceModel, ModelError, TrainableModel, Unfitted};
use crate::dataset::{is_missing, Table};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Impurity decreases at or below this are treated as no improvement.
const MIN_DECREASE: f64 = 1e-12;

/// Growth limits for a decision tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeParams {
    /// Maximum depth; `None` grows until leaves are pure or cannot be split.
    pub max_depth: Option<usize>,
    /// Minimum rows a node needs before a split is attempted.
    pub min_samples_split: usize,
    /// Minimum rows on each side of a split.
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

impl TreeParams {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.max_depth == Some(0) {
            return Err(ModelError::InvalidParameter(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.min_samples_split < 2 {
            return Err(ModelError::InvalidParameter(format!(
                "min_samples_split must be at least 2, got {}",
                self.min_samples_split
            )));
        }
        if self.min_samples_leaf < 1 {
            return Err(ModelError::InvalidParameter(
                "min_samples_leaf must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A node of the fitted tree. Children are indices into the node arena.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Leaf {
        /// Index into the class list.
        class: usize,
        /// Training rows per class that reached this leaf.
        counts: Vec<usize>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A decision tree with its training state encoded in the type.
#[derive(Clone, Debug)]
pub struct DecisionTree<S> {
    params: TreeParams,
    nodes: Vec<Node>,
    classes: Vec<String>,
    feature_names: Vec<String>,
    _state: PhantomData<S>,
}

/// Unfitted decision tree classifier.
pub type DecisionTreeClassifier = DecisionTree<Unfitted>;

impl Default for DecisionTree<Unfitted> {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTree<Unfitted> {
    /// Create an unfitted tree with default limits.
    pub fn new() -> Self {
        Self::with_params(TreeParams::default())
    }

    pub fn with_params(params: TreeParams) -> Self {
        Self {
            params,
            nodes: Vec::new(),
            classes: Vec::new(),
            feature_names: Vec::new(),
            _state: PhantomData,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.params.max_depth = Some(max_depth);
        self
    }

    pub fn with_min_samples_split(mut self, n: usize) -> Self {
        self.params.min_samples_split = n;
        self
    }

    pub fn with_min_samples_leaf(mut self, n: usize) -> Self {
        self.params.min_samples_leaf = n;
        self
    }

    pub fn params(&self) -> &TreeParams {
        &self.params
    }
}

impl TrainableModel for DecisionTree<Unfitted> {
    type Fitted = DecisionTree<Fitted>;

    fn fit(&self, x: &Table, y: &[String]) -> Result<Self::Fitted, ModelError> {
        self.params.validate()?;

        let (n_rows, n_features) = x.shape();
        if n_rows == 0 || n_features == 0 {
            return Err(ModelError::EmptyData(format!(
                "cannot fit a decision tree on a {}x{} table",
                n_rows, n_features
            )));
        }
        if y.len() != n_rows {
            return Err(ModelError::LabelMismatch {
                rows: n_rows,
                labels: y.len(),
            });
        }
        for col in x.columns() {
            for &v in col.values() {
                check_value(v, col.name())?;
            }
        }

        let mut classes: Vec<String> = y.to_vec();
        classes.sort();
        classes.dedup();
        // Every label is in `classes`, so the search cannot fail.
        let encoded: Vec<usize> = y
            .iter()
            .map(|label| classes.binary_search(label).unwrap_or(0))
            .collect();

        let mut builder = Builder {
            columns: x.columns().iter().map(|c| c.values()).collect(),
            y: &encoded,
            n_classes: classes.len(),
            params: &self.params,
            nodes: Vec::new(),
        };
        builder.build((0..n_rows).collect(), 0);

        let fitted = DecisionTree {
            params: self.params.clone(),
            nodes: builder.nodes,
            classes,
            feature_names: x.column_names(),
            _state: PhantomData,
        };

        tracing::info!(
            rows = n_rows,
            features = n_features,
            depth = fitted.depth(),
            leaves = fitted.n_leaves(),
            "decision tree fitted"
        );

        Ok(fitted)
    }
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    decrease: f64,
}

struct Builder<'a> {
    columns: Vec<&'a [f64]>,
    y: &'a [usize],
    n_classes: usize,
    params: &'a TreeParams,
    nodes: Vec<Node>,
}

impl Builder<'_> {
    fn counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0; self.n_classes];
        for &i in indices {
            counts[self.y[i]] += 1;
        }
        counts
    }

    /// Grow the subtree for `indices` and return its root index.
    fn build(&mut self, indices: Vec<usize>, depth: usize) -> usize {
        let counts = self.counts(&indices);
        let n = indices.len();
        let impurity = gini(&counts, n);

        let id = self.nodes.len();
        self.nodes.push(Node::Leaf {
            class: majority(&counts),
            counts,
        });

        let depth_reached = self.params.max_depth.is_some_and(|d| depth >= d);
        if impurity == 0.0 || depth_reached || n < self.params.min_samples_split {
            return id;
        }
        let Some(split) = self.best_split(&indices, impurity) else {
            return id;
        };

        let Some((left_idx, right_idx)) =
            partition_rows(self.columns[split.feature], &indices, split.threshold)
        else {
            return id;
        };

        let left = self.build(left_idx, depth + 1);
        let right = self.build(right_idx, depth + 1);
        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    fn best_split(&self, indices: &[usize], parent_impurity: f64) -> Option<SplitCandidate> {
        let n = indices.len();
        let min_leaf = self.params.min_samples_leaf;
        let totals = self.counts(indices);
        let mut best: Option<SplitCandidate> = None;

        for (feature, column) in self.columns.iter().enumerate() {
            let mut sorted: Vec<(f64, usize)> =
                indices.iter().map(|&i| (column[i], self.y[i])).collect();
            sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left = vec![0usize; self.n_classes];
            let mut right = totals.clone();

            for i in 1..n {
                let (prev, class) = sorted[i - 1];
                left[class] += 1;
                right[class] -= 1;

                let next = sorted[i].0;
                if prev == next || i < min_leaf || n - i < min_leaf {
                    continue;
                }

                let weighted = (i as f64 * gini(&left, i) + (n - i) as f64 * gini(&right, n - i))
                    / n as f64;
                let decrease = parent_impurity - weighted;
                let to_beat = best.as_ref().map_or(MIN_DECREASE, |b| b.decrease);
                if decrease > to_beat {
                    best = Some(SplitCandidate {
                        feature,
                        threshold: midpoint(prev, next),
                        decrease,
                    });
                }
            }
        }

        best
    }
}

/// Rows with `column[i] <= threshold` go left. `None` when either side is empty.
fn partition_rows(
    column: &[f64],
    indices: &[usize],
    threshold: f64,
) -> Option<(Vec<usize>, Vec<usize>)> {
    let (left, right): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| column[i] <= threshold);
    if left.is_empty() || right.is_empty() {
        None
    } else {
        Some((left, right))
    }
}

/// Split thresholds are only meaningful between finite values.
fn check_value(v: f64, column: &str) -> Result<(), ModelError> {
    if is_missing(v) {
        return Err(ModelError::MissingValues {
            column: column.to_string(),
        });
    }
    if v.is_infinite() {
        return Err(ModelError::NonFinite {
            column: column.to_string(),
        });
    }
    Ok(())
}

fn gini(counts: &[usize], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

/// Index of the largest count; ties go to the lowest index.
fn majority(counts: &[usize]) -> usize {
    let mut best = 0;
    for (i, &c) in counts.iter().enumerate() {
        if c > counts[best] {
            best = i;
        }
    }
    best
}

/// Midpoint of `a < b` that still separates them.
fn midpoint(a: f64, b: f64) -> f64 {
    let m = a + (b - a) / 2.0;
    if m >= b {
        a
    } else {
        m
    }
}

impl DecisionTree<Fitted> {
    /// Sorted class labels; leaf class indices point into this list.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Feature columns seen during fit, in order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    /// Longest root-to-leaf path, counted in splits.
    pub fn depth(&self) -> usize {
        self.depth_of(0)
    }

    fn depth_of(&self, id: usize) -> usize {
        match &self.nodes[id] {
            Node::Leaf { .. } => 0,
            Node::Split { left, right, .. } => 1 + self.depth_of(*left).max(self.depth_of(*right)),
        }
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    /// Walk the tree for one complete, validated row.
    fn leaf_class(&self, row: &[f64]) -> usize {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { class, .. } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    fn check_row(&self, row: &[f64]) -> Result<(), ModelError> {
        if row.len() != self.feature_names.len() {
            return Err(ModelError::RowLength {
                expected: self.feature_names.len(),
                got: row.len(),
            });
        }
        for (&v, name) in row.iter().zip(&self.feature_names) {
            check_value(v, name)?;
        }
        Ok(())
    }
}

impl InferenceModel for DecisionTree<Fitted> {
    type InputSingle = [f64];
    type OutputSingle = String;
    type InputBatch = Table;
    type OutputBatch = Vec<String>;

    /// Predict the label of one row given in training column order.
    fn predict(&self, input: &[f64]) -> Result<String, ModelError> {
        self.check_row(input)?;
        Ok(self.classes[self.leaf_class(input)].clone())
    }

    fn predict_batch(&self, input: &Table) -> Result<Vec<String>, ModelError> {
        let got = input.column_names();
        if got != self.feature_names {
            return Err(ModelError::FeatureMismatch {
                expected: self.feature_names.clone(),
                got,
            });
        }
        input.rows().map(|row| self.predict(&row)).collect()
    }
}
