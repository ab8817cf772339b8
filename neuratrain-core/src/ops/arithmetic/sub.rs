use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::NeuraTrainError;
use crate::ops::BroadcastOperands;
use crate::tensor::broadcast_utils::reduce_to_shape;
use crate::tensor::Tensor;

#[derive(Debug)]
struct SubBackward {
    a: Tensor,
    b: Tensor,
    a_shape: Vec<usize>,
    b_shape: Vec<usize>,
    out_shape: Vec<usize>,
}

impl BackwardOp for SubBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, NeuraTrainError> {
        let grad = grad_output.to_vec();
        let negated: Vec<f64> = grad.iter().map(|g| -g).collect();
        Ok(vec![
            Tensor::new(
                reduce_to_shape(&grad, &self.out_shape, &self.a_shape),
                self.a_shape.clone(),
            )?,
            Tensor::new(
                reduce_to_shape(&negated, &self.out_shape, &self.b_shape),
                self.b_shape.clone(),
            )?,
        ])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Performs element-wise subtraction `a - b` with broadcasting.
pub fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor, NeuraTrainError> {
    let operands = BroadcastOperands::new(a, b)?;
    let result = Tensor::new(operands.map(|x, y| x - y), operands.out_shape.clone())?;
    if a.requires_grad() || b.requires_grad() {
        result.attach_grad_fn(Arc::new(SubBackward {
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
    /// Element-wise `self - other` with broadcasting.
    pub fn sub(&self, other: &Tensor) -> Result<Tensor, NeuraTrainError> {
        sub_op(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::check_grad;

    #[test]
    fn test_sub_forward_broadcast_scalar() -> Result<(), NeuraTrainError> {
        let a = Tensor::new(vec![5.0, 6.0, 7.0], vec![3])?;
        let b = Tensor::scalar(1.5);
        assert_eq!(sub_op(&a, &b)?.to_vec(), vec![3.5, 4.5, 5.5]);
        assert_eq!(sub_op(&b, &a)?.to_vec(), vec![-3.5, -4.5, -5.5]);
        Ok(())
    }

    #[test]
    fn test_sub_backward_negates_rhs() -> Result<(), NeuraTrainError> {
        let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2])?;
        let b = Tensor::new(vec![0.5, 0.5], vec![2])?;
        a.set_requires_grad(true);
        b.set_requires_grad(true);
        sub_op(&a, &b)?.sum()?.backward(None)?;
        assert_eq!(a.grad().unwrap().to_vec(), vec![1.0; 4]);
        assert_eq!(b.grad().unwrap().to_vec(), vec![-2.0, -2.0]);

        check_grad(|t| t[0].sub(&t[1]), &[a, b], 1e-6, 1e-5)
    }
}
