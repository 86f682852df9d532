//! Dataset abstractions for tabular machine learning workloads.
//!
//! # Core Concepts
//!
//! - **Table**: Ordered, uniquely named numeric columns of equal length. Missing
//!   cells hold `f64::NAN` (see [`is_missing`]).
//! - **LabeledDataset**: A feature [`Table`] plus one class label per row.
//! - **Split**: A seeded, optionally stratified train/test partition.
//!
//! # Example
//!
//! ```rust
//! use iris_pipeline::dataset::{load_iris, train_test_split, SplitOptions};
//!
//! let iris = load_iris().unwrap();
//! let split = train_test_split(&iris, &SplitOptions::default()).unwrap();
//! assert_eq!(split.train.len() + split.test.len(), 150);
//! ```

pub mod error;
pub mod iris;
pub mod memory;
pub mod split;
pub mod table;

pub use self::error::DatasetError;
pub use self::iris::{load_iris, load_iris_csv, parse_iris_csv, FEATURE_NAMES, TARGET_NAME};
pub use self::memory::LabeledDataset;
pub use self::split::{train_test_split, SplitOptions, TrainTestSplit};
pub use self::table::{is_missing, Column, Table};
