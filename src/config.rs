//! Experiment configuration.
//!
//! Every field has a default, so `{}` is a valid configuration that reproduces the
//! standard Iris experiment: flag missing sepal measurements, median-impute all
//! features, then fit an unrestricted decision tree on a stratified 75/25 split.

use crate::dataset::{SplitOptions, FEATURE_NAMES};
use crate::model::{DecisionTreeClassifier, TreeParams};
use crate::preprocessing::{
    ColumnSelection, ColumnTransformer, ImputeStrategy, MissingFlagger, Pipeline,
    PreprocessingError, Remainder, SimpleImputer,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Decision tree settings inside an [`ExperimentConfig`].
pub type TreeConfig = TreeParams;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Fraction of rows held out for evaluation.
    pub test_size: f64,
    pub seed: u64,
    pub stratify: bool,
    pub impute_strategy: ImputeStrategy,
    /// Columns that get a `<column>_missing` indicator before imputation.
    pub flag_columns: Vec<String>,
    pub tree: TreeConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            test_size: 0.25,
            seed: 42,
            stratify: true,
            impute_strategy: ImputeStrategy::Median,
            flag_columns: vec!["sepal_length".to_string(), "sepal_width".to_string()],
            tree: TreeConfig::default(),
        }
    }
}

impl ExperimentConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "loaded experiment config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        self.tree
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let mut seen = HashSet::new();
        for column in &self.flag_columns {
            if !seen.insert(column.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "column '{}' is listed twice in flag_columns",
                    column
                )));
            }
        }
        Ok(())
    }

    pub fn split_options(&self) -> SplitOptions {
        SplitOptions {
            test_size: self.test_size,
            seed: self.seed,
            shuffle: true,
            stratify: self.stratify,
        }
    }

    /// Flag each configured column, then impute the four Iris features.
    ///
    /// Output columns are the imputed features followed by the indicators.
    pub fn build_pipeline(&self) -> Result<Pipeline, PreprocessingError> {
        let mut pipeline = Pipeline::new();
        for column in &self.flag_columns {
            let flagger = MissingFlagger::new(column.as_str());
            pipeline = pipeline.add(format!("flag_{}", column), flagger)?;
        }

        let imputer = ColumnTransformer::new()
            .add(
                "impute",
                SimpleImputer::new(self.impute_strategy.clone()),
                ColumnSelection::names(FEATURE_NAMES),
            )?
            .with_remainder(Remainder::Passthrough);

        pipeline.add("impute", imputer)
    }

    pub fn build_model(&self) -> DecisionTreeClassifier {
        DecisionTreeClassifier::with_params(self.tree.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::{FittedColumnTransformer, FittedTransformer, Transformer};
    use std::io::Write;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = ExperimentConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ExperimentConfig::default());
        assert_eq!(config.impute_strategy, ImputeStrategy::Median);
        assert_eq!(config.tree.min_samples_split, 2);
        assert!(config.tree.max_depth.is_none());
    }

    #[test]
    fn test_partial_override() {
        let config = ExperimentConfig::from_json_str(
            r#"{"seed": 7, "impute_strategy": "most_frequent", "tree": {"max_depth": 3}}"#,
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.impute_strategy, ImputeStrategy::MostFrequent);
        assert_eq!(config.tree.max_depth, Some(3));
        assert_eq!(config.tree.min_samples_leaf, 1);
        assert_eq!(config.test_size, 0.25);
    }

    #[test]
    fn test_constant_strategy() {
        let config =
            ExperimentConfig::from_json_str(r#"{"impute_strategy": {"constant": -1.0}}"#).unwrap();
        assert_eq!(config.impute_strategy, ImputeStrategy::Constant(-1.0));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        for json in [
            r#"{"test_size": 0.0}"#,
            r#"{"test_size": 1.5}"#,
            r#"{"tree": {"min_samples_split": 1}}"#,
            r#"{"tree": {"min_samples_leaf": 0}}"#,
            r#"{"flag_columns": ["sepal_width", "sepal_width"]}"#,
        ] {
            assert!(
                matches!(
                    ExperimentConfig::from_json_str(json),
                    Err(ConfigError::Invalid(_))
                ),
                "accepted {}",
                json
            );
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ExperimentConfig::from_json_str("{\"seed\": "),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"stratify": false, "flag_columns": []}}"#).unwrap();
        let config = ExperimentConfig::from_json_file(file.path()).unwrap();
        assert!(!config.stratify);
        assert!(config.flag_columns.is_empty());

        assert!(matches!(
            ExperimentConfig::from_json_file("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_build_pipeline_column_order() {
        let iris = crate::dataset::load_iris().unwrap();
        let pipeline = ExperimentConfig::default().build_pipeline().unwrap();
        assert_eq!(
            pipeline.step_names(),
            vec!["flag_sepal_length", "flag_sepal_width", "impute"]
        );

        let fitted = pipeline.fit(iris.features()).unwrap();
        let out = fitted.transform(iris.features()).unwrap();
        assert_eq!(
            out.column_names(),
            vec![
                "sepal_length",
                "sepal_width",
                "petal_length",
                "petal_width",
                "sepal_length_missing",
                "sepal_width_missing",
            ]
        );
        assert_eq!(out.n_rows(), 150);

        let imputer = fitted.step::<FittedColumnTransformer>("impute").unwrap();
        assert_eq!(
            imputer.remainder_columns(),
            &["sepal_length_missing", "sepal_width_missing"]
        );
    }

    #[test]
    fn test_build_model_uses_tree_config() {
        let mut config = ExperimentConfig::default();
        config.tree.max_depth = Some(2);
        assert_eq!(config.build_model().params().max_depth, Some(2));
    }

    #[test]
    fn test_split_options() {
        let options = ExperimentConfig::default().split_options();
        assert_eq!(options.test_size, 0.25);
        assert_eq!(options.seed, 42);
        assert!(options.shuffle);
        assert!(options.stratify);
    }
}
