//! Differentiable tensor operations.
//!
//! Each operation computes its result eagerly and, when any input requires
//! grad, attaches a backward node holding a snapshot of what the chain rule
//! needs. Operations are exposed both as free `*_op` functions and as
//! `Tensor` methods.

use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::NeuraTrainError;
use crate::tensor::broadcast_utils::{broadcast_index_map, broadcast_shapes};
use crate::tensor::Tensor;

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod math_elem;
pub mod reduction;
pub mod reshape;

/// Operands of an element-wise binary operation after broadcasting.
#[derive(Debug, Clone)]
pub(crate) struct BroadcastOperands {
    pub a_data: Vec<f64>,
    pub b_data: Vec<f64>,
    pub a_shape: Vec<usize>,
    pub b_shape: Vec<usize>,
    pub out_shape: Vec<usize>,
    pub a_map: Vec<usize>,
    pub b_map: Vec<usize>,
}

impl BroadcastOperands {
    pub fn new(a: &Tensor, b: &Tensor) -> Result<Self, NeuraTrainError> {
        let a_shape = a.shape();
        let b_shape = b.shape();
        let out_shape = broadcast_shapes(&a_shape, &b_shape)?;
        let a_map = broadcast_index_map(&out_shape, &a_shape);
        let b_map = broadcast_index_map(&out_shape, &b_shape);
        Ok(BroadcastOperands {
            a_data: a.to_vec(),
            b_data: b.to_vec(),
            a_shape,
            b_shape,
            out_shape,
            a_map,
            b_map,
        })
    }

    /// Applies `f` to every broadcast pair `(a, b)`.
    pub fn map<F: Fn(f64, f64) -> f64>(&self, f: F) -> Vec<f64> {
        self.a_map
            .iter()
            .zip(self.b_map.iter())
            .map(|(&i, &j)| f(self.a_data[i], self.b_data[j]))
            .collect()
    }

    /// Applies `f(grad, a, b)` over the output and returns it in output layout.
    pub fn map_with_grad<F: Fn(f64, f64, f64) -> f64>(&self, grad: &[f64], f: F) -> Vec<f64> {
        grad.iter()
            .zip(self.a_map.iter().zip(self.b_map.iter()))
            .map(|(&g, (&i, &j))| f(g, self.a_data[i], self.b_data[j]))
            .collect()
    }
}

/// Maps every element of `input` through `f`, keeping the shape.
pub(crate) fn map_unary<F: Fn(f64) -> f64>(input: &Tensor, f: F) -> (Vec<f64>, Vec<usize>) {
    let guard = input.read_data();
    (guard.data.iter().map(|&x| f(x)).collect(), guard.shape.clone())
}

/// Backward node for element-wise unary functions.
///
/// The local derivative is evaluated during the forward pass, so the backward
/// pass is a single element-wise product: `dL/dx = g * f'(x)`.
#[derive(Debug)]
pub(crate) struct UnaryBackward {
    pub input: Tensor,
    pub local_grad: Vec<f64>,
}

impl BackwardOp for UnaryBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, NeuraTrainError> {
        let grad: Vec<f64> = grad_output
            .to_vec()
            .iter()
            .zip(self.local_grad.iter())
            .map(|(g, d)| g * d)
            .collect();
        Ok(vec![Tensor::new(grad, self.input.shape())?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

/// Applies `f` element-wise, with `df` giving the local derivative as a
/// function of `(x, f(x))`.
pub(crate) fn unary_op<F, D>(input: &Tensor, f: F, df: D) -> Result<Tensor, NeuraTrainError>
where
    F: Fn(f64) -> f64,
    D: Fn(f64, f64) -> f64,
{
    let (x, shape) = map_unary(input, |v| v);
    let y: Vec<f64> = x.iter().map(|&v| f(v)).collect();
    let local_grad = if input.requires_grad() {
        Some(x.iter().zip(y.iter()).map(|(&xv, &yv)| df(xv, yv)).collect())
    } else {
        None
    };
    let result = Tensor::new(y, shape)?;
    if let Some(local_grad) = local_grad {
        result.attach_grad_fn(Arc::new(UnaryBackward {
            input: input.clone(),
            local_grad,
        }));
    }
    Ok(result)
}
