//! Iris flower dataset loader.
//!
//! The dataset contains 150 samples of three species with 4 numeric features:
//! - sepal_length: Sepal length in cm
//! - sepal_width: Sepal width in cm
//! - petal_length: Petal length in cm
//! - petal_width: Petal width in cm
//!
//! Target variable: species (setosa, versicolor, virginica)
//!
//! The bundled copy matches the widely distributed corrected version (samples 35
//! and 38 follow Fisher's paper).

use crate::dataset::error::DatasetError;
use crate::dataset::memory::LabeledDataset;
use crate::dataset::table::{Column, Table};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Feature column names, in file order.
pub const FEATURE_NAMES: [&str; 4] = ["sepal_length", "sepal_width", "petal_length", "petal_width"];

/// Name of the label column.
pub const TARGET_NAME: &str = "species";

const IRIS_CSV: &str = include_str!("../../data/iris.csv");

/// Tokens read as the missing-value sentinel.
const MISSING_TOKENS: [&str; 4] = ["", "NA", "NaN", "nan"];

/// Load the bundled Iris dataset.
pub fn load_iris() -> Result<LabeledDataset, DatasetError> {
    parse_iris_csv(IRIS_CSV.as_bytes())
}

/// Load an Iris-shaped CSV file from disk.
pub fn load_iris_csv<P: AsRef<Path>>(path: P) -> Result<LabeledDataset, DatasetError> {
    let file = File::open(path)?;
    parse_iris_csv(BufReader::new(file))
}

/// Parse an Iris-shaped CSV from any reader.
///
/// The header must contain the four feature columns and `species`, in any order.
/// Extra columns are ignored.
pub fn parse_iris_csv<R: Read>(reader: R) -> Result<LabeledDataset, DatasetError> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DatasetError::MissingHeader(name.to_string()))
    };
    let feature_idx = FEATURE_NAMES
        .iter()
        .map(|name| position(*name))
        .collect::<Result<Vec<_>, _>>()?;
    let target_idx = position(TARGET_NAME)?;

    let mut values: Vec<Vec<f64>> = vec![Vec::new(); FEATURE_NAMES.len()];
    let mut target = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        for (j, &idx) in feature_idx.iter().enumerate() {
            let field = record.get(idx).unwrap_or("");
            values[j].push(parse_cell(field, line, FEATURE_NAMES[j])?);
        }
        target.push(record.get(target_idx).unwrap_or("").to_string());
    }

    let columns = FEATURE_NAMES
        .iter()
        .zip(values)
        .map(|(name, v)| Column::new(*name, v))
        .collect();

    tracing::debug!(rows = target.len(), "parsed iris csv");
    LabeledDataset::new(Table::new(columns)?, target)
}

fn parse_cell(field: &str, line: u64, column: &str) -> Result<f64, DatasetError> {
    if MISSING_TOKENS.contains(&field) {
        return Ok(f64::NAN);
    }
    let parse_error = || DatasetError::Parse {
        line,
        column: column.to_string(),
        value: field.to_string(),
    };
    let value = field.parse::<f64>().map_err(|_| parse_error())?;
    // Measurements are finite; "inf" parses but is not one.
    if value.is_infinite() {
        return Err(parse_error());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::table::is_missing;

    #[test]
    fn test_load_iris_shape() {
        let iris = load_iris().unwrap();
        assert_eq!(iris.len(), 150);
        assert_eq!(iris.features().shape(), (150, 4));
        assert_eq!(iris.features().column_names(), FEATURE_NAMES.to_vec());
        assert_eq!(iris.classes(), vec!["setosa", "versicolor", "virginica"]);
    }

    #[test]
    fn test_load_iris_balanced() {
        let iris = load_iris().unwrap();
        for class in iris.classes() {
            let count = iris.target().iter().filter(|t| **t == class).count();
            assert_eq!(count, 50, "class {}", class);
        }
    }

    #[test]
    fn test_load_iris_first_row() {
        let iris = load_iris().unwrap();
        assert_eq!(iris.features().row(0).unwrap(), vec![5.1, 3.5, 1.4, 0.2]);
        assert_eq!(iris.target()[0], "setosa");
        assert_eq!(iris.target()[149], "virginica");
    }

    #[test]
    fn test_parse_missing_tokens() {
        let csv = "species,sepal_length,sepal_width,petal_length,petal_width\n\
                   setosa,,NA,1.4,nan\n\
                   setosa,4.9,3.0,1.4,0.2\n";
        let ds = parse_iris_csv(csv.as_bytes()).unwrap();
        let f = ds.features();
        assert!(is_missing(f.get(0, "sepal_length").unwrap()));
        assert!(is_missing(f.get(0, "sepal_width").unwrap()));
        assert!(is_missing(f.get(0, "petal_width").unwrap()));
        assert_eq!(f.get(0, "petal_length").unwrap(), 1.4);
        assert_eq!(f.get(1, "sepal_length").unwrap(), 4.9);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let csv = "sepal_length,sepal_width,petal_length,petal_width,species\n\
                   abc,3.0,1.4,0.2,setosa\n";
        let result = parse_iris_csv(csv.as_bytes());
        assert!(matches!(result, Err(DatasetError::Parse { .. })));
    }

    #[test]
    fn test_parse_rejects_infinite() {
        for cell in ["-inf", "inf", "infinity"] {
            let csv = format!(
                "sepal_length,sepal_width,petal_length,petal_width,species\n\
                 {},1,1,1,setosa\n2,1,1,1,versicolor\n",
                cell
            );
            let rejected = matches!(
                parse_iris_csv(csv.as_bytes()),
                Err(DatasetError::Parse { ref column, .. }) if column == "sepal_length"
            );
            assert!(rejected, "accepted {}", cell);
        }
    }

    #[test]
    fn test_parse_rejects_missing_header() {
        let csv = "sepal_length,sepal_width,petal_length,species\n1,2,3,setosa\n";
        let result = parse_iris_csv(csv.as_bytes());
        assert!(matches!(result, Err(DatasetError::MissingHeader(ref h)) if h == "petal_width"));
    }

    #[test]
    fn test_load_iris_csv_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"sepal_length,sepal_width,petal_length,petal_width,species\n5.0,3.3,1.4,0.2,setosa\n",
        )
        .unwrap();
        let ds = load_iris_csv(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
    }
}
