// src/tensor/create.rs

use crate::error::NeuraTrainError;
use crate::tensor::Tensor;

/// Creates a tensor of the given shape filled with `value`.
pub fn full(shape: &[usize], value: f64) -> Result<Tensor, NeuraTrainError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a tensor of the given shape filled with zeros.
pub fn zeros(shape: &[usize]) -> Result<Tensor, NeuraTrainError> {
    full(shape, 0.0)
}

/// Creates a tensor of the given shape filled with ones.
pub fn ones(shape: &[usize]) -> Result<Tensor, NeuraTrainError> {
    full(shape, 1.0)
}

/// Creates a zero-filled tensor with the same shape as `tensor`.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, NeuraTrainError> {
    zeros(&tensor.shape())
}

/// Creates a one-filled tensor with the same shape as `tensor`.
pub fn ones_like(tensor: &Tensor) -> Result<Tensor, NeuraTrainError> {
    ones(&tensor.shape())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
