use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::NeuraTrainError;
use crate::tensor::Tensor;

/// Backward node of a row-wise softmax.
///
/// For each row with output `s` and upstream gradient `g`:
/// `dL/dx = s * (g - sum(g * s))`.
#[derive(Debug)]
struct SoftmaxBackward {
    input: Tensor,
    output: Vec<f64>,
    row_len: usize,
}

impl BackwardOp for SoftmaxBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, NeuraTrainError> {
        let grad = grad_output.to_vec();
        let mut grad_input = Vec::with_capacity(grad.len());
        for (g_row, s_row) in grad
            .chunks(self.row_len)
            .zip(self.output.chunks(self.row_len))
        {
            let dot: f64 = g_row.iter().zip(s_row).map(|(g, s)| g * s).sum();
            grad_input.extend(g_row.iter().zip(s_row).map(|(g, s)| s * (g - dot)));
        }
        Ok(vec![Tensor::new(grad_input, self.input.shape())?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

/// Softmax over the last dimension.
///
/// Rows are shifted by their maximum before exponentiation.
pub fn softmax_op(input: &Tensor) -> Result<Tensor, NeuraTrainError> {
    let shape = input.shape();
    let row_len = match shape.last() {
        Some(&n) if n > 0 => n,
        _ => {
            return Err(NeuraTrainError::UnsupportedOperation(format!(
                "softmax needs a non-empty last dimension, got shape {:?}",
                shape
            )))
        }
    };
    let data = input.to_vec();
    let mut output = Vec::with_capacity(data.len());
    for row in data.chunks(row_len) {
        let max = row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = row.iter().map(|x| (x - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        output.extend(exps.iter().map(|e| e / total));
    }
    let result = Tensor::new(output.clone(), shape)?;
    if input.requires_grad() {
        result.attach_grad_fn(Arc::new(SoftmaxBackward {
            input: input.clone(),
            output,
            row_len,
        }));
    }
    Ok(result)
}

impl Tensor {
    pub fn softmax(&self) -> Result<Tensor, NeuraTrainError> {
        softmax_op(self)
    }
}
