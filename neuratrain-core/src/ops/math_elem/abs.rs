use crate::error::NeuraTrainError;
use crate::ops::unary_op;
use crate::tensor::Tensor;

/// Element-wise absolute value. The subgradient at zero is 0.
pub fn abs_op(input: &Tensor) -> Result<Tensor, NeuraTrainError> {
    unary_op(input, f64::abs, |x, _| {
        if x > 0.0 {
            1.0
        } else if x < 0.0 {
            -1.0
        } else {
            0.0
        }
    })
}

impl Tensor {
    pub fn abs(&self) -> Result<Tensor, NeuraTrainError> {
        abs_op(self)
    }
}
