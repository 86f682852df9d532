//! Train/test splitting.

use crate::dataset::error::DatasetError;
use crate::dataset::memory::LabeledDataset;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Options for [`train_test_split`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    /// Fraction of rows assigned to the test set, in `(0, 1)`.
    pub test_size: f64,
    /// Seed for the shuffle.
    pub seed: u64,
    /// Shuffle before splitting. When `false` the last rows form the test set.
    pub shuffle: bool,
    /// Preserve class proportions in both halves.
    pub stratify: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            test_size: 0.25,
            seed: 42,
            shuffle: true,
            stratify: false,
        }
    }
}

/// The two halves of a split.
#[derive(Clone, Debug)]
pub struct TrainTestSplit {
    pub train: LabeledDataset,
    pub test: LabeledDataset,
}

/// Split a dataset into train and test subsets.
///
/// The test set holds `ceil(test_size * n)` rows. Stratified splits take
/// `round(test_size * n_class)` rows of each class instead.
///
/// # Errors
/// Returns [`DatasetError::InvalidSplit`] if `test_size` is outside `(0, 1)` or if
/// either half would be empty.
pub fn train_test_split(
    dataset: &LabeledDataset,
    options: &SplitOptions,
) -> Result<TrainTestSplit, DatasetError> {
    if !(options.test_size > 0.0 && options.test_size < 1.0) {
        return Err(DatasetError::InvalidSplit(format!(
            "test_size must be in (0, 1), got {}",
            options.test_size
        )));
    }

    let n = dataset.len();
    let mut rng = StdRng::seed_from_u64(options.seed);

    let (train_idx, test_idx) = if options.stratify {
        stratified_indices(dataset, options, &mut rng)
    } else {
        let mut indices: Vec<usize> = (0..n).collect();
        if options.shuffle {
            indices.shuffle(&mut rng);
        }
        let n_test = (options.test_size * n as f64).ceil() as usize;
        let n_train = n.saturating_sub(n_test);
        let test = indices.split_off(n_train);
        (indices, test)
    };

    if train_idx.is_empty() || test_idx.is_empty() {
        return Err(DatasetError::InvalidSplit(format!(
            "{} rows with test_size {} leaves an empty half",
            n, options.test_size
        )));
    }

    tracing::debug!(
        train = train_idx.len(),
        test = test_idx.len(),
        stratify = options.stratify,
        "split dataset"
    );

    Ok(TrainTestSplit {
        train: dataset.subset(&train_idx)?,
        test: dataset.subset(&test_idx)?,
    })
}

fn stratified_indices(
    dataset: &LabeledDataset,
    options: &SplitOptions,
    rng: &mut StdRng,
) -> (Vec<usize>, Vec<usize>) {
    let mut train = Vec::new();
    let mut test = Vec::new();

    for class in dataset.classes() {
        let mut members: Vec<usize> = dataset
            .target()
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == class)
            .map(|(i, _)| i)
            .collect();
        if options.shuffle {
            members.shuffle(rng);
        }
        let n_test = (options.test_size * members.len() as f64).round() as usize;
        let n_train = members.len().saturating_sub(n_test);
        test.extend_from_slice(&members[n_train..]);
        members.truncate(n_train);
        train.extend(members);
    }

    (train, test)
}
