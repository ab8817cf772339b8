// src/tensor/mod.rs

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::NeuraTrainError;
use crate::tensor_data::TensorData;

mod autograd_methods;
pub mod broadcast_utils;
pub mod create;
mod debug;

// Re-export creation functions to make them public
pub use create::{full, ones, ones_like, zeros, zeros_like};

/// Represents a multi-dimensional array (tensor).
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally to allow for:
/// 1.  **Shared Ownership:** Multiple `Tensor` instances can point to the same
///     underlying data without cloning the data itself (cheap clones).
/// 2.  **Interior Mutability:** the elements, `requires_grad` and `grad` can be
///     modified through a shared `Tensor`. Training relies on this: parameters
///     and training variables are shared tensors rewritten after every update.
pub struct Tensor {
    /// Arc for shared ownership, RwLock for interior mutability of TensorData.
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Clone for Tensor {
    /// Cloning a Tensor is shallow: both handles point to the same `TensorData`.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl Tensor {
    /// Creates a new Tensor with the given data and shape.
    ///
    /// The tensor does not require gradients.
    pub fn new(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, NeuraTrainError> {
        let tensor_data = TensorData::new(data_vec, shape)?;
        Ok(Self::from_tensor_data(tensor_data))
    }

    /// Creates a 0-dimensional tensor holding `value`.
    pub fn scalar(value: f64) -> Self {
        Self::from_tensor_data(TensorData {
            data: vec![value],
            shape: Vec::new(),
            requires_grad: false,
            grad: None,
            grad_fn: None,
        })
    }

    /// Creates a 2-D tensor from a slice of equally sized rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, NeuraTrainError> {
        let n_cols = rows.first().map_or(0, |r| r.len());
        let mut flat = Vec::with_capacity(rows.len() * n_cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(NeuraTrainError::ShapeMismatch {
                    expected: vec![n_cols],
                    actual: vec![row.len()],
                    operation: format!("Tensor::from_rows (row {})", i),
                });
            }
            flat.extend_from_slice(row);
        }
        Tensor::new(flat, vec![rows.len(), n_cols])
    }

    pub(crate) fn from_tensor_data(tensor_data: TensorData) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        }
    }

    /// Acquires a read lock on the tensor's data.
    ///
    /// A poisoned lock is recovered: tensor data has no invariant that a
    /// panicking writer could leave half-established.
    pub fn read_data(&self) -> RwLockReadGuard<'_, TensorData> {
        match self.data.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("RwLock for TensorData was poisoned. Recovering read guard.");
                poisoned.into_inner()
            }
        }
    }

    /// Acquires a write lock on the tensor's data.
    pub fn write_data(&self) -> RwLockWriteGuard<'_, TensorData> {
        match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("RwLock for TensorData was poisoned. Recovering write guard.");
                poisoned.into_inner()
            }
        }
    }

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.read_data().rank()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Copies the elements out as a flat row-major `Vec<f64>`.
    pub fn to_vec(&self) -> Vec<f64> {
        self.read_data().data.clone()
    }

    /// Returns the single value of a one-element tensor.
    pub fn item(&self) -> Result<f64, NeuraTrainError> {
        let guard = self.read_data();
        if guard.data.len() != 1 {
            return Err(NeuraTrainError::ShapeMismatch {
                expected: vec![],
                actual: guard.shape.clone(),
                operation: "item".to_string(),
            });
        }
        Ok(guard.data[0])
    }

    /// Element at `(row, col)` of a 2-D tensor.
    pub fn get2(&self, row: usize, col: usize) -> Result<f64, NeuraTrainError> {
        let guard = self.read_data();
        if guard.shape.len() != 2 {
            return Err(NeuraTrainError::RankMismatch {
                expected: 2,
                actual: guard.shape.len(),
            });
        }
        if row >= guard.shape[0] || col >= guard.shape[1] {
            return Err(NeuraTrainError::IndexOutOfBounds {
                index: vec![row, col],
                shape: guard.shape.clone(),
            });
        }
        Ok(guard.data[row * guard.shape[1] + col])
    }

    /// Overwrites the elements in place, keeping the shape.
    ///
    /// This is how shared variables and parameters receive their new values
    /// between training updates. It does not touch the autograd metadata.
    pub fn set_data(&self, new_data: Vec<f64>) -> Result<(), NeuraTrainError> {
        let mut guard = self.write_data();
        if new_data.len() != guard.data.len() {
            return Err(NeuraTrainError::ShapeMismatch {
                expected: guard.shape.clone(),
                actual: vec![new_data.len()],
                operation: "set_data".to_string(),
            });
        }
        guard.data = new_data;
        Ok(())
    }

    /// Returns a new leaf tensor with a copy of the data and no graph history.
    pub fn detach(&self) -> Tensor {
        let guard = self.read_data();
        Self::from_tensor_data(TensorData {
            data: guard.data.clone(),
            shape: guard.shape.clone(),
            requires_grad: false,
            grad: None,
            grad_fn: None,
        })
    }

    /// Gathers rows (indices along the first dimension) into a new tensor.
    ///
    /// Not differentiable: used to slice datasets into mini-batches.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Tensor, NeuraTrainError> {
        let guard = self.read_data();
        if guard.shape.is_empty() {
            return Err(NeuraTrainError::RankMismatch {
                expected: 1,
                actual: 0,
            });
        }
        let n_rows = guard.shape[0];
        let row_len: usize = guard.shape[1..].iter().product();
        let mut out = Vec::with_capacity(indices.len() * row_len);
        for &index in indices {
            if index >= n_rows {
                return Err(NeuraTrainError::IndexOutOfBounds {
                    index: vec![index],
                    shape: guard.shape.clone(),
                });
            }
            out.extend_from_slice(&guard.data[index * row_len..(index + 1) * row_len]);
        }
        let mut shape = guard.shape.clone();
        shape[0] = indices.len();
        drop(guard);
        Tensor::new(out, shape)
    }

    /// Returns true when both handles share the same `TensorData`.
    pub fn ptr_eq(&self, other: &Tensor) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}
