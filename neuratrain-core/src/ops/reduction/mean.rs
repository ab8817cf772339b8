use std::sync::Arc;

use crate::error::NeuraTrainError;
use crate::ops::reduction::sum::ReduceAllBackward;
use crate::tensor::Tensor;

/// Arithmetic mean of every element, as a 0-dimensional tensor.
///
/// # Errors
/// `UnsupportedOperation` for an empty tensor.
pub fn mean_op(input: &Tensor) -> Result<Tensor, NeuraTrainError> {
    let n = input.numel();
    if n == 0 {
        return Err(NeuraTrainError::UnsupportedOperation(
            "mean of an empty tensor".to_string(),
        ));
    }
    let total: f64 = input.read_data().data.iter().sum();
    let result = Tensor::scalar(total / n as f64);
    if input.requires_grad() {
        result.attach_grad_fn(Arc::new(ReduceAllBackward {
            input: input.clone(),
            factor: 1.0 / n as f64,
        }));
    }
    Ok(result)
}

impl Tensor {
    pub fn mean(&self) -> Result<Tensor, NeuraTrainError> {
        mean_op(self)
    }
}
