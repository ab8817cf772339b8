use std::fmt::Debug;

use crate::error::NeuraTrainError;
use crate::tensor::Tensor;

/// Defines the interface for the backward pass of a differentiable tensor operation.
///
/// Any operation that creates a non-leaf `Tensor` (a tensor resulting from an operation
/// on inputs that require gradients) must have an associated `BackwardOp` implementation.
/// This implementation is stored in the output tensor's `grad_fn` field and is used
/// during the `backward()` call to propagate gradients according to the chain rule.
///
/// The trait requires `Debug + Send + Sync` because the node is shared through an `Arc`
/// inside `TensorData`, which itself lives behind an `RwLock`.
pub trait BackwardOp: Debug + Send + Sync {
    /// Computes the gradients of the operation's inputs with respect to the loss,
    /// given the gradient of the operation's output with respect to the loss.
    ///
    /// The returned tensors must not track gradients themselves, and their order
    /// **must** match the order of [`BackwardOp::inputs`]. Each gradient has the
    /// shape of its input.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, NeuraTrainError>;

    /// Returns the input tensors that participated in the forward operation.
    ///
    /// These are the edges the graph traversal follows. Holding the tensors keeps
    /// their data alive for as long as the output exists.
    fn inputs(&self) -> Vec<Tensor>;
}
