//! Classification metrics.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MetricsError {
    #[error("y_true has {y_true} labels but y_pred has {y_pred}")]
    LengthMismatch { y_true: usize, y_pred: usize },

    #[error("cannot compute a metric over zero labels")]
    Empty,

    /// A label is not listed in the classes passed to the metric.
    #[error("unknown class '{0}'")]
    UnknownClass(String),
}

fn check_lengths<T>(y_true: &[T], y_pred: &[T]) -> Result<(), MetricsError> {
    if y_true.len() != y_pred.len() {
        return Err(MetricsError::LengthMismatch {
            y_true: y_true.len(),
            y_pred: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(MetricsError::Empty);
    }
    Ok(())
}

/// Fraction of predictions equal to the true label.
pub fn accuracy<T: PartialEq>(y_true: &[T], y_pred: &[T]) -> Result<f64, MetricsError> {
    check_lengths(y_true, y_pred)?;
    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(t, p)| t == p)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// Confusion matrix with rows indexed by true class and columns by predicted class,
/// both in the order of `classes`.
pub fn confusion_matrix<T>(
    y_true: &[T],
    y_pred: &[T],
    classes: &[T],
) -> Result<Vec<Vec<usize>>, MetricsError>
where
    T: PartialEq + ToString,
{
    check_lengths(y_true, y_pred)?;
    let index_of = |label: &T| {
        classes
            .iter()
            .position(|c| c == label)
            .ok_or_else(|| MetricsError::UnknownClass(label.to_string()))
    };

    let mut matrix = vec![vec![0; classes.len()]; classes.len()];
    for (t, p) in y_true.iter().zip(y_pred) {
        matrix[index_of(t)?][index_of(p)?] += 1;
    }
    Ok(matrix)
}
