use neuratrain_core::{NeuraTrainError, Tensor};

use super::traits::Dataset;

/// Tensors sharing their first dimension, e.g. `vec![inputs, targets]`.
///
/// `get(i)` returns row `i` of every tensor with the first dimension dropped,
/// so an input tensor of shape `[n, 13]` yields samples of shape `[13]`.
#[derive(Debug, Clone)]
pub struct TensorDataset {
    tensors: Vec<Tensor>,
    length: usize,
}

impl TensorDataset {
    /// # Errors
    /// * `RankMismatch` if a tensor is a scalar.
    /// * `ShapeMismatch` if the first dimensions differ.
    pub fn new(tensors: Vec<Tensor>) -> Result<Self, NeuraTrainError> {
        let mut length = None;
        for (i, tensor) in tensors.iter().enumerate() {
            let shape = tensor.shape();
            let rows = match shape.first() {
                Some(&rows) => rows,
                None => {
                    return Err(NeuraTrainError::RankMismatch {
                        expected: 1,
                        actual: 0,
                    })
                }
            };
            match length {
                None => length = Some(rows),
                Some(expected) if expected != rows => {
                    return Err(NeuraTrainError::ShapeMismatch {
                        expected: vec![expected],
                        actual: vec![rows],
                        operation: format!("TensorDataset::new (tensor {})", i),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(TensorDataset {
            tensors,
            length: length.unwrap_or(0),
        })
    }

    pub fn tensors(&self) -> &[Tensor] {
        &self.tensors
    }

    /// Gathers the rows at `indices` from every tensor, keeping the first dimension.
    pub fn get_batch(&self, indices: &[usize]) -> Result<Vec<Tensor>, NeuraTrainError> {
        self.tensors.iter().map(|t| t.select_rows(indices)).collect()
    }
}

impl Dataset for TensorDataset {
    type Item = Vec<Tensor>;

    fn get(&self, index: usize) -> Result<Self::Item, NeuraTrainError> {
        if index >= self.length {
            return Err(NeuraTrainError::IndexOutOfBounds {
                index: vec![index],
                shape: vec![self.length],
            });
        }
        self.tensors
            .iter()
            .map(|tensor| {
                let row = tensor.select_rows(&[index])?;
                Tensor::new(row.to_vec(), tensor.shape()[1..].to_vec())
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.length
    }
}

#[cfg(test)]
#[path = "tensor_dataset_test.rs"]
mod tests;
