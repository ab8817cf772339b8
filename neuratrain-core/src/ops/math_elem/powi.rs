use crate::error::NeuraTrainError;
use crate::ops::unary_op;
use crate::tensor::Tensor;

/// Raises every element to an integer power.
pub fn powi_op(input: &Tensor, exponent: i32) -> Result<Tensor, NeuraTrainError> {
    unary_op(
        input,
        |x| x.powi(exponent),
        |x, _| f64::from(exponent) * x.powi(exponent - 1),
    )
}

impl Tensor {
    pub fn powi(&self, exponent: i32) -> Result<Tensor, NeuraTrainError> {
        powi_op(self, exponent)
    }

    /// Shorthand for `powi(2)`.
    pub fn square(&self) -> Result<Tensor, NeuraTrainError> {
        powi_op(self, 2)
    }
}
