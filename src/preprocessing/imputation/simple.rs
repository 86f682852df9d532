//! Simple Imputer.
//!
//! Imputation transformer for completing missing values.
//! Supports mean, median, most_frequent, and constant strategies.
//!
//! Note: This implementation treats NaN as missing values.
//!
//! # Example
//! ```
//! use iris_pipeline::dataset::Table;
//! use iris_pipeline::preprocessing::{FittedTransformer, ImputeStrategy, SimpleImputer, Transformer};
//!
//! let train = Table::from_rows(&["x"], &[vec![1.0], vec![5.0], vec![3.0]]).unwrap();
//! let fitted = SimpleImputer::new(ImputeStrategy::Median).fit(&train).unwrap();
//!
//! let test = Table::from_rows(&["x"], &[vec![f64::NAN]]).unwrap();
//! assert_eq!(fitted.transform(&test).unwrap().column("x").unwrap(), &[3.0]);
//! ```

use crate::dataset::{is_missing, Table};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{check_feature_names, FittedTransformer, Transformer};
use serde::{Deserialize, Serialize};

/// Strategy for imputing missing values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputeStrategy {
    /// Replace missing values with the mean of each column.
    #[default]
    Mean,
    /// Replace missing values with the median of each column.
    Median,
    /// Replace missing values with the most frequent value of each column.
    MostFrequent,
    /// Replace missing values with a constant value.
    Constant(f64),
}

/// SimpleImputer transformer (unfitted).
///
/// Imputes every column of its input. Wrap it in a
/// [`ColumnTransformer`](crate::preprocessing::ColumnTransformer) to restrict it
/// to a subset of columns.
#[derive(Clone, Debug, Default)]
pub struct SimpleImputer {
    strategy: ImputeStrategy,
}

impl SimpleImputer {
    /// Create a new SimpleImputer with the specified strategy.
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &ImputeStrategy {
        &self.strategy
    }
}

/// Compute the fill value for one column, ignoring NaN values.
fn compute_statistic(values: &[f64], strategy: &ImputeStrategy) -> Option<f64> {
    let present: Vec<f64> = values.iter().copied().filter(|&v| !is_missing(v)).collect();

    if let ImputeStrategy::Constant(val) = strategy {
        return Some(*val);
    }
    if present.is_empty() {
        return None;
    }

    let stat = match strategy {
        ImputeStrategy::Mean => present.iter().sum::<f64>() / present.len() as f64,
        ImputeStrategy::Median => {
            let mut sorted = present;
            sorted.sort_by(|a, b| a.total_cmp(b));
            let n = sorted.len();
            if n % 2 == 0 {
                (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
            } else {
                sorted[n / 2]
            }
        }
        ImputeStrategy::MostFrequent => {
            // Ties go to the smallest value.
            let mut counts = std::collections::BTreeMap::new();
            for &v in &present {
                *counts.entry(OrderedBits(v)).or_insert(0usize) += 1;
            }
            let mut best = (f64::NAN, 0usize);
            for (OrderedBits(v), count) in counts {
                if count > best.1 {
                    best = (v, count);
                }
            }
            best.0
        }
        ImputeStrategy::Constant(val) => *val,
    };
    Some(stat)
}

/// Total-order wrapper so floats can key a BTreeMap.
#[derive(Clone, Copy, PartialEq)]
struct OrderedBits(f64);

impl Eq for OrderedBits {}

impl PartialOrd for OrderedBits {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedBits {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Transformer for SimpleImputer {
    type Fitted = FittedSimpleImputer;

    fn fit(&self, data: &Table) -> Result<Self::Fitted, PreprocessingError> {
        if data.is_empty() {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit SimpleImputer on empty data".to_string(),
            ));
        }

        let mut statistics = Vec::with_capacity(data.n_columns());
        for col in data.columns() {
            let stat = compute_statistic(col.values(), &self.strategy).unwrap_or_else(|| {
                tracing::warn!(column = col.name(), "column has no observed values; imputing 0.0");
                0.0
            });
            statistics.push(stat);
        }

        tracing::debug!(
            strategy = ?self.strategy,
            columns = data.n_columns(),
            "fitted SimpleImputer"
        );

        Ok(FittedSimpleImputer {
            strategy: self.strategy.clone(),
            statistics,
            feature_names: data.column_names(),
        })
    }
}

/// Fitted SimpleImputer ready for inference.
#[derive(Clone, Debug)]
pub struct FittedSimpleImputer {
    strategy: ImputeStrategy,
    statistics: Vec<f64>,
    feature_names: Vec<String>,
}

impl FittedSimpleImputer {
    /// Get the imputation statistics (fill values) for each feature.
    pub fn statistics(&self) -> &[f64] {
        &self.statistics
    }

    /// Fill value learned for `column`.
    pub fn statistic(&self, column: &str) -> Option<f64> {
        self.feature_names
            .iter()
            .position(|n| n == column)
            .map(|i| self.statistics[i])
    }

    pub fn strategy(&self) -> &ImputeStrategy {
        &self.strategy
    }
}

impl FittedTransformer for FittedSimpleImputer {
    fn transform(&self, data: &Table) -> Result<Table, PreprocessingError> {
        check_feature_names(&self.feature_names, data)?;

        Ok(data.map_cells(|j, v| {
            if is_missing(v) {
                self.statistics[j]
            } else {
                v
            }
        }))
    }

    fn feature_names_in(&self) -> &[String] {
        &self.feature_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_data_with_missing() -> Table {
        // [[1, NaN], [3, 4], [5, 6]]
        Table::from_rows(
            &["a", "b"],
            &[vec![1.0, f64::NAN], vec![3.0, 4.0], vec![5.0, 6.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_simple_imputer_mean() {
        let data = create_test_data_with_missing();
        let imputer = SimpleImputer::new(ImputeStrategy::Mean);
        let fitted = imputer.fit(&data).unwrap();

        // Column a: mean of [1, 3, 5] = 3
        // Column b: mean of [4, 6] = 5 (NaN excluded)
        assert_eq!(fitted.statistics(), &[3.0, 5.0]);

        let imputed = fitted.transform(&data).unwrap();
        assert_eq!(imputed.column("a").unwrap(), &[1.0, 3.0, 5.0]);
        assert_eq!(imputed.column("b").unwrap(), &[5.0, 4.0, 6.0]);
    }

    #[test]
    fn test_simple_imputer_median() {
        let data = Table::from_rows(
            &["a"],
            &[vec![1.0], vec![f64::NAN], vec![10.0], vec![2.0], vec![4.0]],
        )
        .unwrap();
        let fitted = SimpleImputer::new(ImputeStrategy::Median).fit(&data).unwrap();

        // median of [1, 2, 4, 10] = 3
        assert_eq!(fitted.statistic("a"), Some(3.0));
        let imputed = fitted.transform(&data).unwrap();
        assert_eq!(imputed.get(1, "a").unwrap(), 3.0);
    }

    #[test]
    fn test_simple_imputer_median_odd() {
        let data = create_test_data_with_missing();
        let fitted = SimpleImputer::new(ImputeStrategy::Median).fit(&data).unwrap();
        assert_eq!(fitted.statistic("a"), Some(3.0));
        assert_eq!(fitted.statistic("b"), Some(5.0));
        assert_eq!(fitted.statistic("c"), None);
    }

    #[test]
    fn test_statistics_come_from_fit_data_only() {
        let train = Table::from_rows(&["a"], &[vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        let fitted = SimpleImputer::new(ImputeStrategy::Median).fit(&train).unwrap();

        let test = Table::from_rows(&["a"], &[vec![100.0], vec![f64::NAN], vec![200.0]]).unwrap();
        let imputed = fitted.transform(&test).unwrap();
        assert_eq!(imputed.column("a").unwrap(), &[100.0, 2.0, 200.0]);
    }

    #[test]
    fn test_simple_imputer_constant() {
        let data = create_test_data_with_missing();
        let fitted = SimpleImputer::new(ImputeStrategy::Constant(-1.0))
            .fit(&data)
            .unwrap();

        assert_eq!(fitted.statistics(), &[-1.0, -1.0]);
        let imputed = fitted.transform(&data).unwrap();
        assert_eq!(imputed.get(0, "b").unwrap(), -1.0);
    }

    #[test]
    fn test_simple_imputer_most_frequent() {
        let data = Table::from_rows(
            &["a", "b"],
            &[vec![1.0, f64::NAN], vec![1.0, 2.0], vec![3.0, 2.0], vec![3.0, 7.0]],
        )
        .unwrap();

        let fitted = SimpleImputer::new(ImputeStrategy::MostFrequent)
            .fit(&data)
            .unwrap();
        // Tie between 1 and 3 resolves to the smaller value.
        assert_eq!(fitted.statistic("a"), Some(1.0));
        assert_eq!(fitted.statistic("b"), Some(2.0));
    }

    #[test]
    fn test_simple_imputer_all_missing_column() {
        let data = Table::from_rows(&["a"], &[vec![f64::NAN], vec![f64::NAN]]).unwrap();
        let fitted = SimpleImputer::new(ImputeStrategy::Median).fit(&data).unwrap();
        assert_eq!(fitted.statistics(), &[0.0]);
    }

    #[test]
    fn test_simple_imputer_feature_mismatch() {
        let data = create_test_data_with_missing();
        let fitted = SimpleImputer::new(ImputeStrategy::Mean).fit(&data).unwrap();

        let wrong_data = Table::from_rows(&["a", "b", "c"], &[vec![1.0, 2.0, 3.0]]).unwrap();
        let result = fitted.transform(&wrong_data);

        assert!(matches!(
            result,
            Err(PreprocessingError::FeatureMismatch { .. })
        ));
    }

    #[test]
    fn test_simple_imputer_does_not_mutate_input() {
        let data = create_test_data_with_missing();
        let _ = SimpleImputer::new(ImputeStrategy::Mean)
            .fit_transform(&data)
            .unwrap();
        assert_eq!(data.missing_count("b").unwrap(), 1);
    }

    #[test]
    fn test_simple_imputer_empty_data() {
        let data = Table::from_rows(&["a", "b"], &[]).unwrap();
        let result = SimpleImputer::new(ImputeStrategy::Mean).fit(&data);
        assert!(matches!(result, Err(PreprocessingError::EmptyData(_))));
    }

    #[test]
    fn test_simple_imputer_n_features_in() {
        let data = create_test_data_with_missing();
        let fitted = SimpleImputer::new(ImputeStrategy::Mean).fit(&data).unwrap();
        assert_eq!(fitted.n_features_in(), 2);
    }

    #[test]
    fn test_strategy_deserialize() {
        let s: ImputeStrategy = serde_json::from_str("\"median\"").unwrap();
        assert_eq!(s, ImputeStrategy::Median);
        let c: ImputeStrategy = serde_json::from_str("{\"constant\": 2.5}").unwrap();
        assert_eq!(c, ImputeStrategy::Constant(2.5));
    }

    #[test]
    fn test_zero_columns_keep_rows() {
        let data = Table::from_rows::<&str>(&[], &[vec![], vec![], vec![]]).unwrap();
        let fitted = SimpleImputer::new(ImputeStrategy::Median).fit(&data).unwrap();
        let out = fitted.transform(&data).unwrap();
        assert_eq!(out.shape(), (3, 0));
    }
}
