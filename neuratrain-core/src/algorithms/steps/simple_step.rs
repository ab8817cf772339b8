use crate::algorithms::algorithm_trait::{StepAddon, UpdateContext};
use crate::algorithms::update::UpdateList;
use crate::algorithms::variables::TrainingVariables;
use crate::error::NeuraTrainError;
use crate::properties::validate_positive_int;

/// Hyperbolic step decay: `step = step0 / (1 + epoch / reduction_freq)`.
///
/// The value computed during an epoch is used from the next update on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleStepMinimization {
    reduction_freq: usize,
}

impl Default for SimpleStepMinimization {
    fn default() -> Self {
        SimpleStepMinimization {
            reduction_freq: 100,
        }
    }
}

impl SimpleStepMinimization {
    pub fn new(reduction_freq: usize) -> Result<Self, NeuraTrainError> {
        Ok(SimpleStepMinimization {
            reduction_freq: validate_positive_int("reduction_freq", reduction_freq)?,
        })
    }

    pub fn reduction_freq(&self) -> usize {
        self.reduction_freq
    }

    pub fn step_at(&self, initial_step: f64, epoch: usize) -> f64 {
        initial_step / (1.0 + epoch as f64 / self.reduction_freq as f64)
    }
}

impl StepAddon for SimpleStepMinimization {
    fn name(&self) -> &'static str {
        "SimpleStepMinimization"
    }

    fn train_updates(
        &self,
        ctx: &UpdateContext<'_>,
        vars: &TrainingVariables,
    ) -> Result<UpdateList, NeuraTrainError> {
        let mut updates = UpdateList::new();
        updates.push(
            vars.step_variable(),
            vec![self.step_at(vars.initial_step(), ctx.epoch)],
        )?;
        Ok(updates)
    }
}
