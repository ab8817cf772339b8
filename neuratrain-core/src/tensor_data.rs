// src/tensor_data.rs
use std::fmt::Debug;
use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::NeuraTrainError;
use crate::tensor::Tensor;

/// Internal storage and metadata for a Tensor.
///
/// This struct holds the actual data buffer, the shape and the autograd
/// bookkeeping. It is wrapped in `Arc<RwLock<TensorData>>` by the `Tensor`
/// struct to allow shared ownership and interior mutability.
///
/// Data is always a contiguous, row-major `Vec<f64>` living on the CPU.
#[derive(Debug)]
pub struct TensorData {
    /// Flattened row-major elements.
    pub(crate) data: Vec<f64>,
    /// The shape (dimensions) of the tensor. An empty shape is a scalar.
    pub(crate) shape: Vec<usize>,

    // --- Autograd Metadata ---
    /// Flag indicating if the tensor requires gradient computation.
    /// If true, operations involving this tensor will be tracked in the computation graph.
    pub(crate) requires_grad: bool,
    /// Gradient accumulated by `backward()` for leaf tensors.
    pub(crate) grad: Option<Tensor>,
    /// The backward node of the operation that produced this tensor.
    /// Leaf tensors (created directly by the user) have `grad_fn = None`.
    pub(crate) grad_fn: Option<Arc<dyn BackwardOp>>,
}

impl TensorData {
    /// Creates a new `TensorData` instance from row-major data and a shape.
    ///
    /// # Errors
    /// Returns `NeuraTrainError::TensorCreationError` if the length of `data` does not match
    /// the number of elements described by `shape`.
    pub fn new(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, NeuraTrainError> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(NeuraTrainError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(TensorData {
            data,
            shape,
            requires_grad: false,
            grad: None,
            grad_fn: None,
        })
    }

    /// Number of elements described by the shape.
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Read-only view of the flattened elements.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// A tensor is a leaf when no operation produced it.
    pub fn is_leaf(&self) -> bool {
        self.grad_fn.is_none()
    }
}
