use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::NeuraTrainError;
use crate::ops::BroadcastOperands;
use crate::tensor::broadcast_utils::reduce_to_shape;
use crate::tensor::Tensor;

/// Backward pass structure for the element-wise addition operation.
///
/// The gradient flows unchanged to both inputs, summed back over any broadcast axes.
#[derive(Debug)]
struct AddBackward {
    a: Tensor,
    b: Tensor,
    a_shape: Vec<usize>,
    b_shape: Vec<usize>,
    out_shape: Vec<usize>,
}

impl BackwardOp for AddBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, NeuraTrainError> {
        let grad = grad_output.to_vec();
        let grad_a = reduce_to_shape(&grad, &self.out_shape, &self.a_shape);
        let grad_b = reduce_to_shape(&grad, &self.out_shape, &self.b_shape);
        Ok(vec![
            Tensor::new(grad_a, self.a_shape.clone())?,
            Tensor::new(grad_b, self.b_shape.clone())?,
        ])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Performs element-wise addition with broadcasting.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, NeuraTrainError> {
    let operands = BroadcastOperands::new(a, b)?;
    let result = Tensor::new(operands.map(|x, y| x + y), operands.out_shape.clone())?;
    if a.requires_grad() || b.requires_grad() {
        result.attach_grad_fn(Arc::new(AddBackward {
            a: a.clone(),
            b: b.clone(),
            a_shape: operands.a_shape,
            b_shape: operands.b_shape,
            out_shape: operands.out_shape,
        }));
    }
    Ok(result)
}

impl Tensor {
    /// Element-wise `self + other` with broadcasting.
    pub fn add(&self, other: &Tensor) -> Result<Tensor, NeuraTrainError> {
        add_op(self, other)
    }
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
