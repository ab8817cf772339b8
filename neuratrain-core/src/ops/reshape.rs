use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::NeuraTrainError;
use crate::tensor::Tensor;

#[derive(Debug)]
struct ReshapeBackward {
    input: Tensor,
    input_shape: Vec<usize>,
}

impl BackwardOp for ReshapeBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, NeuraTrainError> {
        Ok(vec![Tensor::new(
            grad_output.to_vec(),
            self.input_shape.clone(),
        )?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

/// Returns a copy of `input` with a new shape holding the same number of elements.
pub fn reshape_op(input: &Tensor, new_shape: Vec<usize>) -> Result<Tensor, NeuraTrainError> {
    let input_shape = input.shape();
    let numel: usize = new_shape.iter().product();
    if numel != input.numel() {
        return Err(NeuraTrainError::ShapeMismatch {
            expected: input_shape,
            actual: new_shape,
            operation: "reshape".to_string(),
        });
    }
    let result = Tensor::new(input.to_vec(), new_shape)?;
    if input.requires_grad() {
        result.attach_grad_fn(Arc::new(ReshapeBackward {
            input: input.clone(),
            input_shape,
        }));
    }
    Ok(result)
}

impl Tensor {
    pub fn reshape(&self, new_shape: Vec<usize>) -> Result<Tensor, NeuraTrainError> {
        reshape_op(self, new_shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::check_grad;

    #[test]
    fn test_reshape_roundtrip_grad() -> Result<(), NeuraTrainError> {
        let x = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3])?;
        let y = x.reshape(vec![3, 2])?;
        assert_eq!(y.shape(), vec![3, 2]);
        assert_eq!(y.to_vec(), x.to_vec());
        assert!(x.reshape(vec![4]).is_err());

        let w = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![6])?;
        x.set_requires_grad(true);
        check_grad(|t| t[0].reshape(vec![6])?.mul(&t[1]), &[x, w], 1e-6, 1e-6)
    }
}
