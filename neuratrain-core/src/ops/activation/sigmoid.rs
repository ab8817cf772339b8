use crate::error::NeuraTrainError;
use crate::ops::unary_op;
use crate::tensor::Tensor;

/// Numerically stable logistic function.
pub(crate) fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Element-wise logistic sigmoid `1 / (1 + e^-x)`.
pub fn sigmoid_op(input: &Tensor) -> Result<Tensor, NeuraTrainError> {
    unary_op(input, sigmoid, |_, y| y * (1.0 - y))
}

impl Tensor {
    pub fn sigmoid(&self) -> Result<Tensor, NeuraTrainError> {
        sigmoid_op(self)
    }
}
