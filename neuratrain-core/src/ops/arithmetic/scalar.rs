use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::NeuraTrainError;
use crate::ops::map_unary;
use crate::tensor::Tensor;

/// Shared backward node for `x * c + d` style scalar ops: dL/dx = g * factor.
#[derive(Debug)]
struct ScaleBackward {
    input: Tensor,
    factor: f64,
}

impl BackwardOp for ScaleBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, NeuraTrainError> {
        let factor = self.factor;
        let (data, shape) = map_unary(grad_output, |g| g * factor);
        Ok(vec![Tensor::new(data, shape)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

fn affine(input: &Tensor, scale: f64, shift: f64) -> Result<Tensor, NeuraTrainError> {
    let (data, shape) = map_unary(input, |x| x * scale + shift);
    let result = Tensor::new(data, shape)?;
    if input.requires_grad() {
        result.attach_grad_fn(Arc::new(ScaleBackward {
            input: input.clone(),
            factor: scale,
        }));
    }
    Ok(result)
}

/// Multiplies every element by `scalar`.
pub fn mul_scalar_op(input: &Tensor, scalar: f64) -> Result<Tensor, NeuraTrainError> {
    affine(input, scalar, 0.0)
}

/// Adds `scalar` to every element.
pub fn add_scalar_op(input: &Tensor, scalar: f64) -> Result<Tensor, NeuraTrainError> {
    affine(input, 1.0, scalar)
}

impl Tensor {
    pub fn mul_scalar(&self, scalar: f64) -> Result<Tensor, NeuraTrainError> {
        mul_scalar_op(self, scalar)
    }

    pub fn add_scalar(&self, scalar: f64) -> Result<Tensor, NeuraTrainError> {
        add_scalar_op(self, scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_ops() -> Result<(), NeuraTrainError> {
        let x = Tensor::new(vec![1.0, 2.0, 3.0], vec![3])?;
        x.set_requires_grad(true);
        let y = x.mul_scalar(3.0)?.add_scalar(1.0)?;
        assert_eq!(y.to_vec(), vec![4.0, 7.0, 10.0]);
        y.sum()?.backward(None)?;
        assert_eq!(x.grad().unwrap().to_vec(), vec![3.0, 3.0, 3.0]);
        Ok(())
    }
}
