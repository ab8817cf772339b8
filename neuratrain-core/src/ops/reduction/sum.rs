use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::NeuraTrainError;
use crate::tensor::{create, Tensor};

/// Backward node of a full reduction scaled by `factor`.
///
/// Every input element receives `g * factor`; `sum` uses 1 and `mean` uses `1/n`.
#[derive(Debug)]
pub(crate) struct ReduceAllBackward {
    pub input: Tensor,
    pub factor: f64,
}

impl BackwardOp for ReduceAllBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, NeuraTrainError> {
        let g = grad_output.item()?;
        Ok(vec![create::full(&self.input.shape(), g * self.factor)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

/// Sums every element into a 0-dimensional tensor.
pub fn sum_op(input: &Tensor) -> Result<Tensor, NeuraTrainError> {
    let total: f64 = input.read_data().data.iter().sum();
    let result = Tensor::scalar(total);
    if input.requires_grad() {
        result.attach_grad_fn(Arc::new(ReduceAllBackward {
            input: input.clone(),
            factor: 1.0,
        }));
    }
    Ok(result)
}

impl Tensor {
    pub fn sum(&self) -> Result<Tensor, NeuraTrainError> {
        sum_op(self)
    }
}
