use crate::algorithms::algorithm_trait::{Algorithm, UpdateContext};
use crate::algorithms::update::UpdateList;
use crate::algorithms::variables::TrainingVariables;
use crate::error::NeuraTrainError;
use crate::nn::Connection;
use crate::properties::validate_proper_fraction;
use crate::tensor;

/// Gradient descent with a velocity term.
///
/// `v' = momentum * v - step * g`, then `p' = p + v'`, or with Nesterov
/// momentum `p' = p + momentum * v' - step * g`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Momentum {
    momentum: f64,
    nesterov: bool,
}

impl Default for Momentum {
    fn default() -> Self {
        Momentum {
            momentum: 0.9,
            nesterov: false,
        }
    }
}

impl Momentum {
    /// `momentum` must lie in `[0, 1]`.
    pub fn new(momentum: f64) -> Result<Self, NeuraTrainError> {
        Ok(Momentum {
            momentum: validate_proper_fraction("momentum", momentum)?,
            nesterov: false,
        })
    }

    pub fn with_nesterov(mut self, nesterov: bool) -> Self {
        self.nesterov = nesterov;
        self
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    pub fn nesterov(&self) -> bool {
        self.nesterov
    }
}

fn velocity_name(index: usize) -> String {
    format!("velocity.{}", index)
}

impl Algorithm for Momentum {
    fn name(&self) -> &'static str {
        "Momentum"
    }

    fn init_variables(
        &self,
        connection: &Connection,
        vars: &mut TrainingVariables,
    ) -> Result<(), NeuraTrainError> {
        for (i, shape) in connection.parameter_shapes().iter().enumerate() {
            vars.insert(velocity_name(i), tensor::zeros(shape)?);
        }
        Ok(())
    }

    fn train_updates(
        &self,
        ctx: &UpdateContext<'_>,
        vars: &TrainingVariables,
    ) -> Result<UpdateList, NeuraTrainError> {
        let step = vars.step();
        let mut updates = UpdateList::new();
        for (i, (param, grad)) in ctx.parameters.iter().zip(ctx.gradients).enumerate() {
            let velocity = vars.require(&velocity_name(i))?;
            let new_velocity: Vec<f64> = velocity
                .to_vec()
                .iter()
                .zip(grad)
                .map(|(v, g)| self.momentum * v - step * g)
                .collect();
            let new_param: Vec<f64> = param
                .to_vec()
                .iter()
                .zip(new_velocity.iter().zip(grad))
                .map(|(p, (v, g))| {
                    if self.nesterov {
                        p + self.momentum * v - step * g
                    } else {
                        p + v
                    }
                })
                .collect();
            updates.push(param, new_param)?;
            updates.push(velocity, new_velocity)?;
        }
        Ok(updates)
    }
}
