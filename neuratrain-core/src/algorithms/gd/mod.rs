//! The gradient descent family.

pub mod gradient_descent;
pub mod minibatch;
pub mod momentum;

pub use gradient_descent::GradientDescent;
pub use minibatch::MinibatchGradientDescent;
pub use momentum::Momentum;

use crate::algorithms::algorithm_trait::UpdateContext;
use crate::algorithms::update::UpdateList;
use crate::error::NeuraTrainError;

/// `p' = p - step * g` for every parameter.
pub(crate) fn descent_updates(
    ctx: &UpdateContext<'_>,
    step: f64,
) -> Result<UpdateList, NeuraTrainError> {
    let mut updates = UpdateList::new();
    for (param, grad) in ctx.parameters.iter().zip(ctx.gradients) {
        let new_value = param
            .to_vec()
            .iter()
            .zip(grad)
            .map(|(p, g)| p - step * g)
            .collect();
        updates.push(param, new_value)?;
    }
    Ok(updates)
}

#[cfg(test)]
#[path = "gd_test.rs"]
mod tests;
