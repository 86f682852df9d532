use crate::dataset::error::DatasetError;
use crate::dataset::table::Table;

/// A feature table paired with one class label per row.
#[derive(Clone, Debug)]
pub struct LabeledDataset {
    features: Table,
    target: Vec<String>,
}

impl LabeledDataset {
    pub fn new(features: Table, target: Vec<String>) -> Result<Self, DatasetError> {
        if features.n_rows() != target.len() {
            return Err(DatasetError::LabelMismatch {
                rows: features.n_rows(),
                labels: target.len(),
            });
        }
        Ok(Self { features, target })
    }

    pub fn features(&self) -> &Table {
        &self.features
    }

    /// Mutable access to the features, e.g. to inject missing values.
    /// The row count cannot change through this handle.
    pub fn features_mut(&mut self) -> &mut Table {
        &mut self.features
    }

    pub fn target(&self) -> &[String] {
        &self.target
    }

    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// Sorted distinct labels.
    pub fn classes(&self) -> Vec<String> {
        let mut classes = self.target.clone();
        classes.sort();
        classes.dedup();
        classes
    }

    /// Rows at `indices`, in that order.
    pub fn subset(&self, indices: &[usize]) -> Result<Self, DatasetError> {
        let features = self.features.take_rows(indices)?;
        let target = indices.iter().map(|&i| self.target[i].clone()).collect();
        Ok(Self { features, target })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_rejects_label_mismatch() {
        let table = Table::from_rows(&["a"], &[vec![1.0], vec![2.0]]).unwrap();
        let result = LabeledDataset::new(table, labels(&["x"]));
        assert!(matches!(
            result,
            Err(DatasetError::LabelMismatch { rows: 2, labels: 1 })
        ));
    }

    #[test]
    fn test_classes_sorted_unique() {
        let table = Table::from_rows(&["a"], &[vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        let ds = LabeledDataset::new(table, labels(&["b", "a", "b"])).unwrap();
        assert_eq!(ds.classes(), vec!["a", "b"]);
    }

    #[test]
    fn test_subset() {
        let table = Table::from_rows(&["a"], &[vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        let ds = LabeledDataset::new(table, labels(&["x", "y", "z"])).unwrap();
        let sub = ds.subset(&[2, 0]).unwrap();
        assert_eq!(sub.target(), &["z".to_string(), "x".to_string()]);
        assert_eq!(sub.features().column("a").unwrap(), &[3.0, 1.0]);
    }
}
