//! Train/test splitting for held-out evaluation.

use crate::error::{BookmatchError, Result};
use crate::primitives::Matrix;

/// `(x_train, x_test, y_train, y_test)`
pub type SplitData = (Matrix<f32>, Matrix<f32>, Vec<usize>, Vec<usize>);

/// Splits samples into random train and test subsets.
///
/// `n_test = round(n_samples * test_size)`; the shuffle is reproducible when
/// `random_state` is set.
///
/// # Arguments
///
/// * `x` - Feature matrix (n_samples × n_features)
/// * `y` - Class labels
/// * `test_size` - Proportion of samples in the test split (0.0 to 1.0, exclusive)
/// * `random_state` - Optional random seed for reproducibility
///
/// # Errors
///
/// Returns [`BookmatchError::InvalidConfig`] for a `test_size` outside
/// (0, 1), [`BookmatchError::DimensionMismatch`] if `x` and `y` disagree, and
/// [`BookmatchError::Untrainable`] if either split would be empty.
///
/// # Example
///
/// ```rust
/// use bookmatch::model_selection::train_test_split;
/// use bookmatch::primitives::Matrix;
///
/// let x = Matrix::from_vec(10, 2, (0..20).map(|i| i as f32).collect()).expect("10x2 matrix");
/// let y = vec![0, 1, 0, 1, 0, 1, 0, 1, 0, 1];
///
/// let (x_train, x_test, y_train, y_test) = train_test_split(&x, &y, 0.2, Some(42)).expect("valid split");
/// assert_eq!(x_train.shape().0, 8);
/// assert_eq!(x_test.shape().0, 2);
/// assert_eq!(y_train.len() + y_test.len(), 10);
/// ```
pub fn train_test_split(
    x: &Matrix<f32>,
    y: &[usize],
    test_size: f32,
    random_state: Option<u64>,
) -> Result<SplitData> {
    let (n_train, _) = validate_split_inputs(x, y, test_size)?;

    let indices = shuffle_indices(x.n_rows(), random_state);
    let (train_indices, test_indices) = indices.split_at(n_train);

    let labels = |idx: &[usize]| idx.iter().map(|&i| y[i]).collect::<Vec<_>>();

    Ok((
        x.select_rows(train_indices),
        x.select_rows(test_indices),
        labels(train_indices),
        labels(test_indices),
    ))
}

/// Validates inputs for `train_test_split`, returning `(n_train, n_test)`.
fn validate_split_inputs(x: &Matrix<f32>, y: &[usize], test_size: f32) -> Result<(usize, usize)> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(BookmatchError::invalid_config(format!(
            "test_size must be between 0 and 1, got {test_size}"
        )));
    }

    let n_samples = x.n_rows();
    if n_samples != y.len() {
        return Err(BookmatchError::DimensionMismatch {
            expected: n_samples,
            actual: y.len(),
        });
    }

    let n_test = (n_samples as f32 * test_size).round() as usize;
    let n_train = n_samples.saturating_sub(n_test);

    if n_test == 0 || n_train == 0 {
        return Err(BookmatchError::untrainable(format!(
            "split would result in empty train or test set (n_train={n_train}, n_test={n_test})"
        )));
    }

    Ok((n_train, n_test))
}

/// Shuffles indices with optional random seed.
fn shuffle_indices(n_samples: usize, random_state: Option<u64>) -> Vec<usize> {
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    let mut indices: Vec<usize> = (0..n_samples).collect();

    if let Some(seed) = random_state {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);
    } else {
        let mut rng = rand::thread_rng();
        indices.shuffle(&mut rng);
    }

    indices
}
