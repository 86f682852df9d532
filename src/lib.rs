//! # iris-pipeline
//!
//! Composable preprocessing and a decision tree classifier for tabular data with
//! missing values, demonstrated on the Iris dataset.
//!
//! ## Core Design Principles
//!
//! - **Stateful Type Safety**: Models and transformers carry their training state in
//!   the type system (`Unfitted` vs `Fitted`), so an untrained component cannot be
//!   used for inference.
//! - **Named Columns**: Tables address columns by name; every transformer reports the
//!   columns it was fitted on and rejects tables with a different schema.
//! - **Missing as NaN**: A missing cell is `f64::NAN`. [`MissingFlagger`] records where
//!   values were missing before an imputer fills them in.
//!
//! ## Quick Start
//!
//! ```rust
//! use iris_pipeline::config::ExperimentConfig;
//! use iris_pipeline::dataset::{load_iris, train_test_split};
//! use iris_pipeline::predictive_pipeline::PredictivePipeline;
//!
//! let config = ExperimentConfig::default();
//! let iris = load_iris().unwrap();
//! let split = train_test_split(&iris, &config.split_options()).unwrap();
//!
//! let pipeline = PredictivePipeline::new(config.build_pipeline().unwrap(), config.build_model());
//! let fitted = pipeline.fit(&split.train).unwrap();
//! let accuracy = fitted.score(&split.test).unwrap();
//! assert!(accuracy > 0.8);
//! ```
//!
//! ## Module Structure
//!
//! - `dataset`: Named-column tables, labeled datasets, Iris loading, train/test split
//! - `preprocessing`: Missing-value flagging, imputation, column routing, pipelines
//! - `model`: Decision tree classifier with stateful type parameters
//! - `metrics`: Accuracy and confusion matrix
//! - `predictive_pipeline`: Preprocessing plus a terminal model
//! - `config`: JSON experiment configuration
//!
//! [`MissingFlagger`]: preprocessing::MissingFlagger

/// Experiment configuration loaded from JSON.
pub mod config;

/// Data loading utilities and dataset abstractions.
pub mod dataset;

/// Classification metrics.
pub mod metrics;

/// Machine learning models with compile-time state safety.
pub mod model;

/// Preprocessing followed by a model, fitted and applied as one unit.
pub mod predictive_pipeline;

/// Data preprocessing transformers for ML pipelines.
pub mod preprocessing;

pub use config::ExperimentConfig;
pub use dataset::{LabeledDataset, Table};
pub use model::{DecisionTreeClassifier, InferenceModel, TrainableModel};
pub use predictive_pipeline::{FittedPredictivePipeline, PipelineError, PredictivePipeline};
