use crate::error::NeuraTrainError;
use crate::ops::unary_op;
use crate::tensor::Tensor;

/// Clamps every element into `[min, max]`.
///
/// The gradient passes through where `min <= x <= max` and is zero elsewhere.
pub fn clamp_op(input: &Tensor, min: f64, max: f64) -> Result<Tensor, NeuraTrainError> {
    if min > max {
        return Err(NeuraTrainError::UnsupportedOperation(format!(
            "clamp bounds are inverted: min {} > max {}",
            min, max
        )));
    }
    unary_op(
        input,
        |x| x.clamp(min, max),
        |x, _| if x >= min && x <= max { 1.0 } else { 0.0 },
    )
}

impl Tensor {
    pub fn clamp(&self, min: f64, max: f64) -> Result<Tensor, NeuraTrainError> {
        clamp_op(self, min, max)
    }
}
