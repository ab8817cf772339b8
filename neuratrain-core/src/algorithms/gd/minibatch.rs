use crate::algorithms::algorithm_trait::{Algorithm, UpdateContext};
use crate::algorithms::gd::descent_updates;
use crate::algorithms::update::UpdateList;
use crate::algorithms::variables::TrainingVariables;
use crate::error::NeuraTrainError;
use crate::properties::validate_positive_int;

/// Gradient descent applied batch by batch.
///
/// Rows are shuffled before every epoch when `shuffle_data` is set in the
/// config. The epoch error is the mean of the batch errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinibatchGradientDescent {
    batch_size: usize,
}

impl MinibatchGradientDescent {
    pub fn new(batch_size: usize) -> Result<Self, NeuraTrainError> {
        Ok(MinibatchGradientDescent {
            batch_size: validate_positive_int("batch_size", batch_size)?,
        })
    }
}

impl Algorithm for MinibatchGradientDescent {
    fn name(&self) -> &'static str {
        "MinibatchGradientDescent"
    }

    fn train_updates(
        &self,
        ctx: &UpdateContext<'_>,
        vars: &TrainingVariables,
    ) -> Result<UpdateList, NeuraTrainError> {
        descent_updates(ctx, vars.step())
    }

    fn batch_size(&self) -> Option<usize> {
        Some(self.batch_size)
    }
}
