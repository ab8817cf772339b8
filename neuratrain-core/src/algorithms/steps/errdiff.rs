use crate::algorithms::algorithm_trait::{StepAddon, UpdateContext};
use crate::algorithms::update::UpdateList;
use crate::algorithms::variables::TrainingVariables;
use crate::error::NeuraTrainError;
use crate::properties::{validate_bounded, validate_proper_fraction};

/// Adjusts the step from the last two epoch errors.
///
/// At the start of each epoch, with `last` and `prev` the two most recent
/// training errors: if `last / prev > error_difference` the step is multiplied
/// by `update_for_bigger_error`; otherwise, if `last < prev`, it is multiplied
/// by `update_for_smaller_error`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrDiffStepUpdate {
    update_for_smaller_error: f64,
    update_for_bigger_error: f64,
    error_difference: f64,
}

impl Default for ErrDiffStepUpdate {
    fn default() -> Self {
        ErrDiffStepUpdate {
            update_for_smaller_error: 1.05,
            update_for_bigger_error: 0.7,
            error_difference: 1.04,
        }
    }
}

impl ErrDiffStepUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Growth factor after an improving epoch, `>= 1`.
    pub fn with_update_for_smaller_error(mut self, value: f64) -> Result<Self, NeuraTrainError> {
        self.update_for_smaller_error =
            validate_bounded("update_for_smaller_error", value, Some(1.0), None)?;
        Ok(self)
    }

    /// Shrink factor after a worsening epoch, in `[0, 1]`.
    pub fn with_update_for_bigger_error(mut self, value: f64) -> Result<Self, NeuraTrainError> {
        self.update_for_bigger_error = validate_proper_fraction("update_for_bigger_error", value)?;
        Ok(self)
    }

    /// Error ratio above which the step shrinks, `>= 1`.
    pub fn with_error_difference(mut self, value: f64) -> Result<Self, NeuraTrainError> {
        self.error_difference = validate_bounded("error_difference", value, Some(1.0), None)?;
        Ok(self)
    }

    /// Step after an epoch pair `(prev, last)`; `None` leaves it unchanged.
    pub fn next_step(&self, step: f64, prev: f64, last: f64) -> Option<f64> {
        if last / prev > self.error_difference {
            Some(step * self.update_for_bigger_error)
        } else if last < prev {
            Some(step * self.update_for_smaller_error)
        } else {
            None
        }
    }
}

impl StepAddon for ErrDiffStepUpdate {
    fn name(&self) -> &'static str {
        "ErrDiffStepUpdate"
    }

    fn train_updates(
        &self,
        ctx: &UpdateContext<'_>,
        vars: &TrainingVariables,
    ) -> Result<UpdateList, NeuraTrainError> {
        let mut updates = UpdateList::new();
        if !ctx.is_epoch_start {
            return Ok(updates);
        }
        if let [.., prev, last] = ctx.errors {
            if let Some(step) = self.next_step(vars.step(), *prev, *last) {
                updates.push(vars.step_variable(), vec![step])?;
            }
        }
        Ok(updates)
    }
}
