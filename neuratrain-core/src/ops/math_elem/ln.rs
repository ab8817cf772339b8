use crate::error::NeuraTrainError;
use crate::ops::unary_op;
use crate::tensor::Tensor;

/// Element-wise natural logarithm.
///
/// Non-positive inputs follow IEEE semantics (`-inf` or `NaN`); callers that
/// need finite values clamp first.
pub fn ln_op(input: &Tensor) -> Result<Tensor, NeuraTrainError> {
    unary_op(input, f64::ln, |x, _| 1.0 / x)
}

impl Tensor {
    pub fn ln(&self) -> Result<Tensor, NeuraTrainError> {
        ln_op(self)
    }
}

#[cfg(test)]
#[path = "ln_test.rs"]
mod tests;
