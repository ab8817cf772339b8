use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::NeuraTrainError;
use crate::ops::BroadcastOperands;
use crate::tensor::broadcast_utils::reduce_to_shape;
use crate::tensor::Tensor;

/// Backward pass structure for the element-wise multiplication operation.
///
/// Holds the broadcast operands: dL/da = g * b and dL/db = g * a.
#[derive(Debug)]
struct MulBackward {
    a: Tensor,
    b: Tensor,
    operands: BroadcastOperands,
}

impl BackwardOp for MulBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, NeuraTrainError> {
        let grad = grad_output.to_vec();
        let ops = &self.operands;
        let grad_a = ops.map_with_grad(&grad, |g, _, b| g * b);
        let grad_b = ops.map_with_grad(&grad, |g, a, _| g * a);
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

/// Performs element-wise multiplication with broadcasting.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, NeuraTrainError> {
    let operands = BroadcastOperands::new(a, b)?;
    let result = Tensor::new(operands.map(|x, y| x * y), operands.out_shape.clone())?;
    if a.requires_grad() || b.requires_grad() {
        result.attach_grad_fn(Arc::new(MulBackward {
            a: a.clone(),
            b: b.clone(),
            operands,
        }));
    }
    Ok(result)
}

impl Tensor {
    /// Element-wise `self * other` with broadcasting.
    pub fn mul(&self, other: &Tensor) -> Result<Tensor, NeuraTrainError> {
        mul_op(self, other)
    }
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
