//! Reverse-mode automatic differentiation.
//!
//! Every differentiable operation attaches a [`BackwardOp`] to its output.
//! [`Tensor::backward`](crate::Tensor::backward) walks those nodes in reverse
//! topological order (see [`graph`]) and accumulates gradients into the leaves.

pub mod backward_op;
pub mod grad_check;
pub mod graph;

pub use backward_op::BackwardOp;
pub use grad_check::check_grad;
