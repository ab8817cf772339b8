use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::NeuraTrainError;
use crate::ops::map_unary;
use crate::tensor::Tensor;

#[derive(Debug)]
struct NegBackward {
    input: Tensor,
}

impl BackwardOp for NegBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, NeuraTrainError> {
        let (data, shape) = map_unary(grad_output, |g| -g);
        Ok(vec![Tensor::new(data, shape)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

/// Element-wise negation.
pub fn neg_op(input: &Tensor) -> Result<Tensor, NeuraTrainError> {
    let (data, shape) = map_unary(input, |x| -x);
    let result = Tensor::new(data, shape)?;
    if input.requires_grad() {
        result.attach_grad_fn(Arc::new(NegBackward {
            input: input.clone(),
        }));
    }
    Ok(result)
}

impl Tensor {
    pub fn neg(&self) -> Result<Tensor, NeuraTrainError> {
        neg_op(self)
    }
}
