use crate::error::NeuraTrainError;
use crate::ops::unary_op;
use crate::tensor::Tensor;

/// Element-wise rectified linear unit `max(0, x)`.
///
/// The derivative at exactly zero is taken as 0.
pub fn relu_op(input: &Tensor) -> Result<Tensor, NeuraTrainError> {
    unary_op(
        input,
        |x| if x > 0.0 { x } else { 0.0 },
        |x, _| if x > 0.0 { 1.0 } else { 0.0 },
    )
}

impl Tensor {
    pub fn relu(&self) -> Result<Tensor, NeuraTrainError> {
        relu_op(self)
    }
}
