use crate::algorithms::algorithm_trait::{Algorithm, UpdateContext};
use crate::algorithms::gd::descent_updates;
use crate::algorithms::update::UpdateList;
use crate::algorithms::variables::TrainingVariables;
use crate::error::NeuraTrainError;

/// Full-batch gradient descent: `p' = p - step * g`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GradientDescent;

impl GradientDescent {
    pub fn new() -> Self {
        GradientDescent
    }
}

impl Algorithm for GradientDescent {
    fn name(&self) -> &'static str {
        "GradientDescent"
    }

    fn train_updates(
        &self,
        ctx: &UpdateContext<'_>,
        vars: &TrainingVariables,
    ) -> Result<UpdateList, NeuraTrainError> {
        descent_updates(ctx, vars.step())
    }
}
