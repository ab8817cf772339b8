use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::NeuraTrainError;
use crate::ops::linalg::transpose_raw;
use crate::tensor::Tensor;

#[derive(Debug)]
struct TransposeBackward {
    input: Tensor,
    rows: usize,
    cols: usize,
}

impl BackwardOp for TransposeBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, NeuraTrainError> {
        let grad = transpose_raw(&grad_output.to_vec(), self.cols, self.rows);
        Ok(vec![Tensor::new(grad, vec![self.rows, self.cols])?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

/// Transposes a 2-D tensor into a new contiguous tensor.
pub fn transpose_op(input: &Tensor) -> Result<Tensor, NeuraTrainError> {
    let shape = input.shape();
    if shape.len() != 2 {
        return Err(NeuraTrainError::RankMismatch {
            expected: 2,
            actual: shape.len(),
        });
    }
    let (rows, cols) = (shape[0], shape[1]);
    let result = Tensor::new(transpose_raw(&input.to_vec(), rows, cols), vec![cols, rows])?;
    if input.requires_grad() {
        result.attach_grad_fn(Arc::new(TransposeBackward {
            input: input.clone(),
            rows,
            cols,
        }));
    }
    Ok(result)
}

impl Tensor {
    pub fn t(&self) -> Result<Tensor, NeuraTrainError> {
        transpose_op(self)
    }
}
