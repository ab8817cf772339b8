//! Mini-batch iteration over a [`Dataset`].
//!
//! ```rust
//! use neuratrain_core::Tensor;
//! use neuratrain_data::{DataLoader, SequentialSampler, TensorDataset};
//!
//! let x = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2]).unwrap();
//! let dataset = TensorDataset::new(vec![x]).unwrap();
//! let loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false).unwrap();
//! let shapes: Vec<Vec<usize>> = loader
//!     .stacked()
//!     .map(|batch| batch.unwrap()[0].shape())
//!     .collect();
//! assert_eq!(shapes, vec![vec![2, 2], vec![1, 2]]);
//! ```

use neuratrain_core::properties::validate_positive_int;
use neuratrain_core::{NeuraTrainError, Tensor};

use crate::datasets::Dataset;
use crate::samplers::Sampler;

/// Groups the indices produced by a sampler into batches and fetches the
/// samples.
///
/// One pass starts at construction; [`reset`](Self::reset) asks the sampler
/// for a new one.
pub struct DataLoader<D: Dataset, S: Sampler> {
    dataset: D,
    batch_size: usize,
    sampler: S,
    drop_last: bool,
    indices_iter: Box<dyn Iterator<Item = usize> + Send + Sync>,
}

impl<D: Dataset, S: Sampler> DataLoader<D, S> {
    /// # Errors
    /// `InvalidProperty` when `batch_size` is 0.
    pub fn new(
        dataset: D,
        batch_size: usize,
        sampler: S,
        drop_last: bool,
    ) -> Result<Self, NeuraTrainError> {
        validate_positive_int("batch_size", batch_size)?;
        let indices_iter = sampler.iter(dataset.len());
        Ok(DataLoader {
            dataset,
            batch_size,
            sampler,
            drop_last,
            indices_iter,
        })
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of batches in a full pass.
    pub fn num_batches(&self) -> usize {
        let n = self.sampler.len(self.dataset.len());
        if self.drop_last {
            n / self.batch_size
        } else {
            (n + self.batch_size - 1) / self.batch_size
        }
    }

    /// Starts a new pass over the dataset.
    pub fn reset(&mut self) {
        self.indices_iter = self.sampler.iter(self.dataset.len());
    }

    fn next_indices(&mut self) -> Option<Vec<usize>> {
        let indices: Vec<usize> = self.indices_iter.by_ref().take(self.batch_size).collect();
        if indices.is_empty() || (self.drop_last && indices.len() < self.batch_size) {
            None
        } else {
            Some(indices)
        }
    }
}

impl<D, S> DataLoader<D, S>
where
    D: Dataset<Item = Vec<Tensor>>,
    S: Sampler,
{
    /// Iterates the remaining batches with every sample field stacked into one
    /// tensor, e.g. `[inputs, targets]` of shapes `[b, n_in]` and `[b, n_out]`.
    pub fn stacked(self) -> impl Iterator<Item = Result<Vec<Tensor>, NeuraTrainError>> {
        self.map(|batch| batch.and_then(stack_samples))
    }
}

impl<D: Dataset, S: Sampler> Iterator for DataLoader<D, S> {
    type Item = Result<Vec<D::Item>, NeuraTrainError>;

    fn next(&mut self) -> Option<Self::Item> {
        let indices = self.next_indices()?;
        Some(indices.into_iter().map(|i| self.dataset.get(i)).collect())
    }
}

/// Stacks samples made of several tensors field by field, adding a leading
/// batch dimension.
///
/// # Errors
/// `ShapeMismatch` when samples differ in field count or field shape.
pub fn stack_samples(samples: Vec<Vec<Tensor>>) -> Result<Vec<Tensor>, NeuraTrainError> {
    let first = match samples.first() {
        Some(first) => first,
        None => return Ok(Vec::new()),
    };
    let shapes: Vec<Vec<usize>> = first.iter().map(|t| t.shape()).collect();
    let mut columns: Vec<Vec<f64>> = shapes
        .iter()
        .map(|s| Vec::with_capacity(samples.len() * s.iter().product::<usize>()))
        .collect();

    for (i, sample) in samples.iter().enumerate() {
        if sample.len() != shapes.len() {
            return Err(NeuraTrainError::ShapeMismatch {
                expected: vec![shapes.len()],
                actual: vec![sample.len()],
                operation: format!("stack_samples (field count of sample {})", i),
            });
        }
        for ((field, shape), column) in sample.iter().zip(&shapes).zip(columns.iter_mut()) {
            let field_shape = field.shape();
            if &field_shape != shape {
                return Err(NeuraTrainError::ShapeMismatch {
                    expected: shape.clone(),
                    actual: field_shape,
                    operation: format!("stack_samples (sample {})", i),
                });
            }
            column.extend(field.to_vec());
        }
    }

    columns
        .into_iter()
        .zip(shapes)
        .map(|(data, shape)| {
            let mut stacked_shape = Vec::with_capacity(shape.len() + 1);
            stacked_shape.push(samples.len());
            stacked_shape.extend(shape);
            Tensor::new(data, stacked_shape)
        })
        .collect()
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
