//! Iris classification with missing sepal measurements.
//!
//! Knocks out a few sepal values, then fits a pipeline that flags the missing cells,
//! median-imputes every feature and trains a decision tree on the result.
//!
//! Set `RUST_LOG=debug` to see every pipeline step.

use iris_pipeline::config::ExperimentConfig;
use iris_pipeline::dataset::{load_iris, train_test_split, FEATURE_NAMES};
use iris_pipeline::metrics::confusion_matrix;
use iris_pipeline::predictive_pipeline::PredictivePipeline;
use iris_pipeline::preprocessing::FittedColumnTransformer;
use std::error::Error;
use tracing_subscriber::EnvFilter;

/// Rows whose sepal measurements are blanked out.
const DAMAGED_ROWS: [usize; 6] = [0, 1, 52, 77, 101, 140];

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ExperimentConfig::default();

    println!("=== Iris Pipeline Example ===\n");

    let mut iris = load_iris()?;
    for (i, &row) in DAMAGED_ROWS.iter().enumerate() {
        let column = if i % 2 == 0 { "sepal_length" } else { "sepal_width" };
        iris.features_mut().set(row, column, f64::NAN)?;
    }
    for name in FEATURE_NAMES {
        println!("{:>14}: {} missing", name, iris.features().missing_count(name)?);
    }

    let split = train_test_split(&iris, &config.split_options())?;
    println!(
        "\nSplit: {} train rows, {} test rows (seed {})",
        split.train.len(),
        split.test.len(),
        config.seed
    );

    let preprocessor = config.build_pipeline()?;
    println!("Pipeline steps: {:?}", preprocessor.step_names());

    let pipeline = PredictivePipeline::new(preprocessor, config.build_model());
    let fitted = pipeline.fit(&split.train)?;

    if let Some(impute) = fitted
        .preprocessor()
        .step::<FittedColumnTransformer>("impute")
    {
        println!("Passthrough columns: {:?}", impute.remainder_columns());
    }

    let tree = fitted.model();
    println!(
        "\nTree: depth {}, {} leaves, features {:?}",
        tree.depth(),
        tree.n_leaves(),
        tree.feature_names()
    );

    println!("\n--- Evaluation ---\n");
    let train_accuracy = fitted.score(&split.train)?;
    let test_accuracy = fitted.score(&split.test)?;
    println!("Train accuracy: {:.3}", train_accuracy);
    println!("Test accuracy:  {:.3}", test_accuracy);

    let predictions = fitted.predict(split.test.features())?;
    let classes = tree.classes();
    let matrix = confusion_matrix(split.test.target(), &predictions, classes)?;
    println!("\nConfusion matrix (rows = true, columns = predicted):");
    for (class, row) in classes.iter().zip(&matrix) {
        println!("{:>12} {:?}", class, row);
    }

    Ok(())
}
