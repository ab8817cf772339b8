use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::NeuraTrainError;
use crate::ops::linalg::{matmul_raw, transpose_raw};
use crate::tensor::Tensor;

/// Backward node of a 2-D matrix product `C = A B`.
///
/// `dL/dA = G Bᵀ` and `dL/dB = Aᵀ G`.
#[derive(Debug)]
struct MatmulBackward {
    a: Tensor,
    b: Tensor,
    a_data: Vec<f64>,
    b_data: Vec<f64>,
    m: usize,
    k: usize,
    n: usize,
}

impl BackwardOp for MatmulBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, NeuraTrainError> {
        let (m, k, n) = (self.m, self.k, self.n);
        let grad = grad_output.to_vec();
        let b_t = transpose_raw(&self.b_data, k, n);
        let a_t = transpose_raw(&self.a_data, m, k);
        Ok(vec![
            Tensor::new(matmul_raw(&grad, &b_t, m, n, k), vec![m, k])?,
            Tensor::new(matmul_raw(&a_t, &grad, k, m, n), vec![k, n])?,
        ])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Matrix product of two 2-D tensors.
///
/// # Errors
/// * `RankMismatch` if either input is not 2-D.
/// * `ShapeMismatch` if the inner dimensions differ.
pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, NeuraTrainError> {
    let a_shape = a.shape();
    let b_shape = b.shape();
    for shape in [&a_shape, &b_shape] {
        if shape.len() != 2 {
            return Err(NeuraTrainError::RankMismatch {
                expected: 2,
                actual: shape.len(),
            });
        }
    }
    let (m, k, n) = (a_shape[0], a_shape[1], b_shape[1]);
    if b_shape[0] != k {
        return Err(NeuraTrainError::ShapeMismatch {
            expected: vec![k, n],
            actual: b_shape,
            operation: "matmul".to_string(),
        });
    }

    let a_data = a.to_vec();
    let b_data = b.to_vec();
    let result = Tensor::new(matmul_raw(&a_data, &b_data, m, k, n), vec![m, n])?;
    if a.requires_grad() || b.requires_grad() {
        result.attach_grad_fn(Arc::new(MatmulBackward {
            a: a.clone(),
            b: b.clone(),
            a_data,
            b_data,
            m,
            k,
            n,
        }));
    }
    Ok(result)
}

impl Tensor {
    /// Matrix product `self @ other` for 2-D tensors.
    pub fn matmul(&self, other: &Tensor) -> Result<Tensor, NeuraTrainError> {
        matmul_op(self, other)
    }
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
