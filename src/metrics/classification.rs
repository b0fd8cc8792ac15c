//! Classification metrics for evaluating classifier performance.

use crate::error::{BookmatchError, Result};

/// Compute classification accuracy.
///
/// accuracy = `correct_predictions` / `total_predictions`
///
/// # Errors
///
/// Returns [`BookmatchError::DimensionMismatch`] if the slices differ in
/// length and [`BookmatchError::Untrainable`] if they are empty.
///
/// # Examples
///
/// ```
/// use bookmatch::metrics::accuracy;
///
/// let y_true = vec![0, 1, 2, 0, 1, 2];
/// let y_pred = vec![0, 2, 1, 0, 0, 1];
/// let acc = accuracy(&y_pred, &y_true).expect("same length");
/// assert!((acc - 0.333333).abs() < 0.001);
/// ```
pub fn accuracy(y_pred: &[usize], y_true: &[usize]) -> Result<f32> {
    if y_pred.len() != y_true.len() {
        return Err(BookmatchError::DimensionMismatch {
            expected: y_true.len(),
            actual: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(BookmatchError::untrainable(
            "accuracy is undefined for zero samples",
        ));
    }

    let correct = y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|(p, t)| p == t)
        .count();

    Ok(correct as f32 / y_true.len() as f32)
}
