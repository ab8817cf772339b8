use crate::algorithms::algorithm_trait::{StepAddon, UpdateContext};
use crate::algorithms::update::UpdateList;
use crate::algorithms::variables::TrainingVariables;
use crate::error::NeuraTrainError;
use crate::nn::{Connection, Module};
use crate::properties::{validate_bounded, validate_proper_fraction};
use crate::tensor;

pub(crate) const LEAK_AVERAGE: &str = "leak_average";

/// Leak learning-rate adaptation.
///
/// Keeps an exponentially leaked average of the full gradient and moves the
/// step towards `beta` times its norm:
///
/// ```text
/// leak_average' = (1 - leak_size) * leak_average + leak_size * g
/// step'         = step + alpha * step * (beta * ||leak_average'|| - step)
/// ```
///
/// Both values are applied together with the weight update, which still uses
/// the old step.
///
/// References: Noboru M., "Adaptive on-line learning in changing
/// environments", 1997; LeCun, "Efficient BackProp", 1998.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeakStepAdaptation {
    leak_size: f64,
    alpha: f64,
    beta: f64,
}

impl Default for LeakStepAdaptation {
    fn default() -> Self {
        LeakStepAdaptation {
            leak_size: 0.01,
            alpha: 0.001,
            beta: 20.0,
        }
    }
}

impl LeakStepAdaptation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Proportion of the new gradient mixed into the average, in `[0, 1]`.
    pub fn with_leak_size(mut self, leak_size: f64) -> Result<Self, NeuraTrainError> {
        self.leak_size = validate_proper_fraction("leak_size", leak_size)?;
        Ok(self)
    }

    /// Speed of the step update, `>= 0`.
    pub fn with_alpha(mut self, alpha: f64) -> Result<Self, NeuraTrainError> {
        self.alpha = validate_bounded("alpha", alpha, Some(0.0), None)?;
        Ok(self)
    }

    /// Scale of the gradient norm term, `>= 0`.
    pub fn with_beta(mut self, beta: f64) -> Result<Self, NeuraTrainError> {
        self.beta = validate_bounded("beta", beta, Some(0.0), None)?;
        Ok(self)
    }

    pub fn leak_size(&self) -> f64 {
        self.leak_size
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// New leaked average from the previous one and the full gradient.
    ///
    /// # Errors
    /// `ShapeMismatch` if the two slices differ in length.
    pub fn leak_average_update(
        &self,
        leak_average: &[f64],
        gradient: &[f64],
    ) -> Result<Vec<f64>, NeuraTrainError> {
        if leak_average.len() != gradient.len() {
            return Err(NeuraTrainError::ShapeMismatch {
                expected: vec![leak_average.len()],
                actual: vec![gradient.len()],
                operation: "LeakStepAdaptation::leak_average_update".to_string(),
            });
        }
        Ok(leak_average
            .iter()
            .zip(gradient)
            .map(|(avg, g)| (1.0 - self.leak_size) * avg + self.leak_size * g)
            .collect())
    }

    /// New step from the current step and the updated average.
    pub fn step_update(&self, step: f64, new_leak_average: &[f64]) -> f64 {
        let norm = new_leak_average.iter().map(|v| v * v).sum::<f64>().sqrt();
        step + self.alpha * step * (self.beta * norm - step)
    }
}

impl StepAddon for LeakStepAdaptation {
    fn name(&self) -> &'static str {
        "LeakStepAdaptation"
    }

    fn init_variables(
        &self,
        connection: &Connection,
        vars: &mut TrainingVariables,
    ) -> Result<(), NeuraTrainError> {
        vars.insert(LEAK_AVERAGE, tensor::zeros(&[connection.count_parameters()])?);
        Ok(())
    }

    fn train_updates(
        &self,
        ctx: &UpdateContext<'_>,
        vars: &TrainingVariables,
    ) -> Result<UpdateList, NeuraTrainError> {
        let leak_average = vars.require(LEAK_AVERAGE)?;
        let new_average = self.leak_average_update(&leak_average.to_vec(), ctx.full_gradient)?;
        let new_step = self.step_update(vars.step(), &new_average);

        let mut updates = UpdateList::new();
        updates.push(leak_average, new_average)?;
        updates.push(vars.step_variable(), vec![new_step])?;
        Ok(updates)
    }
}
