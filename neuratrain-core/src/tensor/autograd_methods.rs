use std::collections::HashMap;
use std::sync::Arc;

use crate::autograd::graph::{topological_sort, NodeId};
use crate::autograd::BackwardOp;
use crate::error::NeuraTrainError;
use crate::tensor::{create, Tensor};

impl Tensor {
    /// Checks if this tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` flag for this tensor.
    pub fn set_requires_grad(&self, requires_grad: bool) {
        let mut guard = self.write_data();
        if requires_grad && guard.grad_fn.is_some() {
            log::warn!("Setting requires_grad=true on a non-leaf tensor. Gradients will not accumulate here during backward().");
        }
        guard.requires_grad = requires_grad;
    }

    /// Returns a clone of the gradient tensor, if it exists.
    pub fn grad(&self) -> Option<Tensor> {
        self.read_data().grad.clone()
    }

    /// Clears the gradient tensor associated with this tensor.
    pub fn clear_grad(&self) {
        self.write_data().grad = None;
    }

    /// Returns the backward node that produced this tensor.
    pub fn grad_fn(&self) -> Option<Arc<dyn BackwardOp>> {
        self.read_data().grad_fn.clone()
    }

    /// Marks this tensor as the output of a differentiable operation.
    pub(crate) fn attach_grad_fn(&self, grad_fn: Arc<dyn BackwardOp>) {
        let mut guard = self.write_data();
        guard.requires_grad = true;
        guard.grad_fn = Some(grad_fn);
    }

    pub(crate) fn node_id(&self) -> NodeId {
        Arc::as_ptr(&self.data)
    }

    /// Accumulates the given gradient into the tensor's `grad` field.
    pub fn acc_grad(&self, grad_to_add: Tensor) -> Result<(), NeuraTrainError> {
        let mut guard = self.write_data();
        let incoming_shape = grad_to_add.shape();
        if incoming_shape != guard.shape {
            return Err(NeuraTrainError::ShapeMismatch {
                expected: guard.shape.clone(),
                actual: incoming_shape,
                operation: "acc_grad".to_string(),
            });
        }
        let summed = match guard.grad.take() {
            Some(existing) => {
                let data = existing
                    .to_vec()
                    .iter()
                    .zip(grad_to_add.to_vec())
                    .map(|(a, b)| a + b)
                    .collect();
                Tensor::new(data, incoming_shape)?
            }
            None => grad_to_add.detach(),
        };
        guard.grad = Some(summed);
        Ok(())
    }

    /// Performs the backward pass starting from this tensor.
    ///
    /// Gradients flow through the graph in reverse topological order and are
    /// accumulated into every leaf that requires grad.
    ///
    /// # Arguments
    /// * `gradient`: Optional seed gradient. If `None`, this tensor must hold a
    ///   single element and the seed is `1.0`.
    ///
    /// # Errors
    /// * `BackwardNonScalar` when no seed is given for a multi-element tensor.
    /// * `ShapeMismatch` when the seed does not match this tensor's shape.
    /// * `CycleDetected` if the graph is not a DAG.
    pub fn backward(&self, gradient: Option<Tensor>) -> Result<(), NeuraTrainError> {
        if !self.requires_grad() {
            // Nothing in the graph requires gradients.
            return Ok(());
        }

        let seed = match gradient {
            Some(g) => {
                if g.shape() != self.shape() {
                    return Err(NeuraTrainError::ShapeMismatch {
                        expected: self.shape(),
                        actual: g.shape(),
                        operation: "backward seed".to_string(),
                    });
                }
                g.detach()
            }
            None => {
                if self.numel() != 1 {
                    return Err(NeuraTrainError::BackwardNonScalar);
                }
                create::ones(&self.shape())?
            }
        };

        let mut grad_map: HashMap<NodeId, Tensor> = HashMap::new();
        grad_map.insert(self.node_id(), seed);

        for node in topological_sort(self)? {
            let accumulated = match grad_map.remove(&node.node_id()) {
                Some(g) => g,
                None => continue,
            };

            let op = match node.grad_fn() {
                Some(op) => op,
                None => {
                    node.acc_grad(accumulated)?;
                    continue;
                }
            };

            let input_grads = op.backward(&accumulated)?;
            let inputs = op.inputs();
            if input_grads.len() != inputs.len() {
                return Err(NeuraTrainError::BackwardError(format!(
                    "BackwardOp returned {} gradients, but expected {} (for op: {:?})",
                    input_grads.len(),
                    inputs.len(),
                    op
                )));
            }

            for (input, grad) in inputs.iter().zip(input_grads) {
                if !input.requires_grad() {
                    continue;
                }
                let id = input.node_id();
                let merged = match grad_map.remove(&id) {
                    Some(existing) => {
                        let data = existing
                            .to_vec()
                            .iter()
                            .zip(grad.to_vec())
                            .map(|(a, b)| a + b)
                            .collect();
                        Tensor::new(data, existing.shape())?
                    }
                    None => grad,
                };
                grad_map.insert(id, merged);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
