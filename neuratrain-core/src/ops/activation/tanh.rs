use crate::error::NeuraTrainError;
use crate::ops::unary_op;
use crate::tensor::Tensor;

/// Element-wise hyperbolic tangent.
pub fn tanh_op(input: &Tensor) -> Result<Tensor, NeuraTrainError> {
    unary_op(input, f64::tanh, |_, y| 1.0 - y * y)
}

impl Tensor {
    pub fn tanh(&self) -> Result<Tensor, NeuraTrainError> {
        tanh_op(self)
    }
}
