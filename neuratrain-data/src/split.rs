use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use neuratrain_core::properties::validate_bounded;
use neuratrain_core::{NeuraTrainError, Tensor};

/// Rows of `input` and `target` divided into a training and a test part.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub input_train: Tensor,
    pub input_test: Tensor,
    pub target_train: Tensor,
    pub target_test: Tensor,
}

/// Shuffles the rows and keeps `round(n * train_size)` of them for training.
///
/// `train_size` must lie strictly between 0 and 1, and both parts must end
/// up non-empty. The same row permutation is applied to `input` and `target`.
pub fn train_test_split(
    input: &Tensor,
    target: &Tensor,
    train_size: f64,
    seed: Option<u64>,
) -> Result<TrainTestSplit, NeuraTrainError> {
    validate_bounded("train_size", train_size, Some(0.0), Some(1.0))?;
    if train_size == 0.0 || train_size == 1.0 {
        return Err(NeuraTrainError::InvalidProperty {
            name: "train_size".to_string(),
            value: train_size.to_string(),
            reason: "must lie strictly between 0 and 1".to_string(),
        });
    }

    let n_samples = match input.shape().first() {
        Some(&n) => n,
        None => {
            return Err(NeuraTrainError::RankMismatch {
                expected: 1,
                actual: 0,
            })
        }
    };
    let target_rows = target.shape().first().copied().unwrap_or(0);
    if target.rank() == 0 || target_rows != n_samples {
        return Err(NeuraTrainError::ShapeMismatch {
            expected: vec![n_samples],
            actual: vec![target_rows],
            operation: "train_test_split (target rows)".to_string(),
        });
    }

    let n_train = (n_samples as f64 * train_size).round() as usize;
    if n_train == 0 || n_train >= n_samples {
        return Err(NeuraTrainError::ConfigurationError(format!(
            "train_size {} leaves an empty part for {} samples",
            train_size, n_samples
        )));
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut indices: Vec<usize> = (0..n_samples).collect();
    indices.shuffle(&mut rng);
    let (train, test) = indices.split_at(n_train);
    log::debug!(
        "Split {} samples into {} for training and {} for testing",
        n_samples,
        train.len(),
        test.len()
    );

    Ok(TrainTestSplit {
        input_train: input.select_rows(train)?,
        input_test: input.select_rows(test)?,
        target_train: target.select_rows(train)?,
        target_test: target.select_rows(test)?,
    })
}
