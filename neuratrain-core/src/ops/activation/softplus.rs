use crate::error::NeuraTrainError;
use crate::ops::activation::sigmoid::sigmoid;
use crate::ops::unary_op;
use crate::tensor::Tensor;

/// Element-wise `ln(1 + e^x)`, computed without overflow for large `x`.
pub fn softplus_op(input: &Tensor) -> Result<Tensor, NeuraTrainError> {
    unary_op(
        input,
        |x| x.max(0.0) + (-x.abs()).exp().ln_1p(),
        |x, _| sigmoid(x),
    )
}

impl Tensor {
    pub fn softplus(&self) -> Result<Tensor, NeuraTrainError> {
        softplus_op(self)
    }
}
