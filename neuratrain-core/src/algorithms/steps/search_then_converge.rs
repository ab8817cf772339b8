use crate::algorithms::algorithm_trait::{StepAddon, UpdateContext};
use crate::algorithms::update::UpdateList;
use crate::algorithms::variables::TrainingVariables;
use crate::error::NeuraTrainError;
use crate::properties::{validate_bounded, validate_positive_int};

/// Search-then-converge schedule (Darken, Chang & Moody, 1992).
///
/// The step stays near `step0` for early epochs and decays like `1 / epoch`
/// later. With `ev = epoch / reduction_freq` and
/// `rv = rate_coefficient / step0 * ev`:
/// `step = step0 * (1 + rv) / (1 + rv + reduction_freq * ev^2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchThenConverge {
    reduction_freq: usize,
    rate_coefficient: f64,
}

impl Default for SearchThenConverge {
    fn default() -> Self {
        SearchThenConverge {
            reduction_freq: 100,
            rate_coefficient: 0.2,
        }
    }
}

impl SearchThenConverge {
    pub fn new(reduction_freq: usize, rate_coefficient: f64) -> Result<Self, NeuraTrainError> {
        Ok(SearchThenConverge {
            reduction_freq: validate_positive_int("reduction_freq", reduction_freq)?,
            rate_coefficient: validate_bounded(
                "rate_coefficient",
                rate_coefficient,
                Some(0.0),
                None,
            )?,
        })
    }

    pub fn step_at(&self, initial_step: f64, epoch: usize) -> f64 {
        if initial_step == 0.0 {
            return 0.0;
        }
        let freq = self.reduction_freq as f64;
        let epoch_value = epoch as f64 / freq;
        let rate_value = self.rate_coefficient / initial_step * epoch_value;
        initial_step * (1.0 + rate_value) / (1.0 + rate_value + freq * epoch_value * epoch_value)
    }
}

impl StepAddon for SearchThenConverge {
    fn name(&self) -> &'static str {
        "SearchThenConverge"
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
