use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::NeuraTrainError;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;

/// Identity of a node in the computation graph: the address of its shared `TensorData`.
pub(crate) type NodeId = *const RwLock<TensorData>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

/// Orders the graph reachable from `root` so that every node comes before the
/// inputs it was computed from. `root` is first.
///
/// The traversal is iterative, so deep networks do not exhaust the stack.
///
/// # Errors
/// Returns `CycleDetected` if a node is reached again while one of its own
/// descendants is being expanded.
pub(crate) fn topological_sort(root: &Tensor) -> Result<Vec<Tensor>, NeuraTrainError> {
    let mut state: HashMap<NodeId, VisitState> = HashMap::new();
    let mut post_order: Vec<Tensor> = Vec::new();
    let mut stack: Vec<(Tensor, bool)> = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        let id = node.node_id();
        if expanded {
            state.insert(id, VisitState::Done);
            post_order.push(node);
            continue;
        }
        match state.get(&id) {
            Some(VisitState::Done) => continue,
            Some(VisitState::InProgress) => return Err(NeuraTrainError::CycleDetected),
            None => {}
        }
        state.insert(id, VisitState::InProgress);
        let inputs = node.grad_fn().map(|op| op.inputs()).unwrap_or_default();
        stack.push((node, true));
        for input in inputs {
            if state.get(&input.node_id()) != Some(&VisitState::Done) {
                stack.push((input, false));
            }
        }
    }

    post_order.reverse();
    Ok(post_order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topological_sort_root_first_and_dedup() -> Result<(), NeuraTrainError> {
        let x = Tensor::new(vec![1.0, 2.0], vec![2])?;
        x.set_requires_grad(true);
        let y = x.mul(&x)?; // x appears twice as an input
        let z = y.sum()?;

        let order = topological_sort(&z)?;
        assert_eq!(order.len(), 3);
        assert!(order[0].ptr_eq(&z));
        assert!(order[1].ptr_eq(&y));
        assert!(order[2].ptr_eq(&x));
        Ok(())
    }

    #[test]
    fn test_topological_sort_leaf_only() -> Result<(), NeuraTrainError> {
        let x = Tensor::scalar(1.0);
        let order = topological_sort(&x)?;
        assert_eq!(order.len(), 1);
        Ok(())
    }
}
