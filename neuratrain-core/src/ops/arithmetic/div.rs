use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::NeuraTrainError;
use crate::ops::BroadcastOperands;
use crate::tensor::broadcast_utils::reduce_to_shape;
use crate::tensor::Tensor;

#[derive(Debug)]
struct DivBackward {
    a: Tensor,
    b: Tensor,
    operands: BroadcastOperands,
}

impl BackwardOp for DivBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, NeuraTrainError> {
        let grad = grad_output.to_vec();
        let ops = &self.operands;
        let grad_a = ops.map_with_grad(&grad, |g, _, b| g / b);
        let grad_b = ops.map_with_grad(&grad, |g, a, b| -g * a / (b * b));
        Ok(vec![
            Tensor::new(
                reduce_to_shape(&grad_a, &ops.out_shape, &ops.a_shape),
                ops.a_shape.clone(),
            )?,
            Tensor::new(
                reduce_to_shape(&grad_b, &ops.out_shape, &ops.b_shape),
                ops.b_shape.clone(),
            )?,
        ])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Performs element-wise division `a / b` with broadcasting.
///
/// Division by zero follows IEEE semantics (`inf` or `NaN`), like the rest of the
/// float kernels.
pub fn div_op(a: &Tensor, b: &Tensor) -> Result<Tensor, NeuraTrainError> {
    let operands = BroadcastOperands::new(a, b)?;
    let result = Tensor::new(operands.map(|x, y| x / y), operands.out_shape.clone())?;
    if a.requires_grad() || b.requires_grad() {
        result.attach_grad_fn(Arc::new(DivBackward {
            a: a.clone(),
            b: b.clone(),
            operands,
        }));
    }
    Ok(result)
}

impl Tensor {
    /// Element-wise `self / other` with broadcasting.
    pub fn div(&self, other: &Tensor) -> Result<Tensor, NeuraTrainError> {
        div_op(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::check_grad;

    #[test]
    fn test_div_forward() -> Result<(), NeuraTrainError> {
        let a = Tensor::new(vec![1.0, 4.0, 9.0], vec![3])?;
        let b = Tensor::new(vec![2.0, 2.0, 3.0], vec![3])?;
        assert_eq!(div_op(&a, &b)?.to_vec(), vec![0.5, 2.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_div_grad_check() -> Result<(), NeuraTrainError> {
        let a = Tensor::new(vec![1.0, -2.0, 3.0, 0.5], vec![2, 2])?;
        let b = Tensor::new(vec![2.0, 4.0], vec![2])?;
        a.set_requires_grad(true);
        b.set_requires_grad(true);
        check_grad(|t| t[0].div(&t[1]), &[a, b], 1e-6, 1e-5)
    }
}
