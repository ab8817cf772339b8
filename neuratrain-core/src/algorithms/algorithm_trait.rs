use std::fmt::Debug;

use crate::algorithms::update::UpdateList;
use crate::algorithms::variables::TrainingVariables;
use crate::error::NeuraTrainError;
use crate::nn::Connection;
use crate::tensor::Tensor;

/// Everything an algorithm or add-on may read while building one update.
///
/// The values are snapshots taken before the update; gradients are those of
/// the training error on the current batch.
pub struct UpdateContext<'a> {
    /// Parameter tensors in parameter order (shared handles).
    pub parameters: &'a [Tensor],
    /// Gradient of each parameter, flattened.
    pub gradients: &'a [Vec<f64>],
    /// All gradients concatenated in parameter order.
    pub full_gradient: &'a [f64],
    /// Current epoch, starting at 1 and counted across `train` calls.
    pub epoch: usize,
    /// Training errors of the finished epochs.
    pub errors: &'a [f64],
    /// True for the first batch of an epoch.
    pub is_epoch_start: bool,
    /// Error of the current batch with the parameters replaced by a flat vector.
    pub error_at: &'a dyn Fn(&[f64]) -> Result<f64, NeuraTrainError>,
}

impl<'a> UpdateContext<'a> {
    /// Current parameters concatenated in parameter order.
    pub fn flat_parameters(&self) -> Vec<f64> {
        self.parameters.iter().flat_map(|p| p.to_vec()).collect()
    }

    pub fn error_at(&self, flat_parameters: &[f64]) -> Result<f64, NeuraTrainError> {
        (self.error_at)(flat_parameters)
    }

    /// Euclidean norm of the full gradient.
    pub fn gradient_norm(&self) -> f64 {
        self.full_gradient.iter().map(|g| g * g).sum::<f64>().sqrt()
    }
}

/// A rule that turns gradients into parameter updates.
pub trait Algorithm: Debug {
    fn name(&self) -> &'static str;

    /// Registers the algorithm's shared variables. Called when training starts
    /// and whenever the parameter count changed since the last run.
    fn init_variables(
        &self,
        _connection: &Connection,
        _vars: &mut TrainingVariables,
    ) -> Result<(), NeuraTrainError> {
        Ok(())
    }

    /// Builds the parameter updates for one batch.
    fn train_updates(
        &self,
        ctx: &UpdateContext<'_>,
        vars: &TrainingVariables,
    ) -> Result<UpdateList, NeuraTrainError>;

    /// Checked with the context of each update, before it is applied; `true`
    /// stops training after the current epoch.
    fn has_converged(&self, _ctx: &UpdateContext<'_>, _vars: &TrainingVariables) -> bool {
        false
    }

    /// Mini-batch size; `None` trains on the full data set at once.
    fn batch_size(&self) -> Option<usize> {
        None
    }
}

/// An add-on that rewrites training variables (usually the step) next to the
/// algorithm's own updates.
pub trait StepAddon: Debug {
    fn name(&self) -> &'static str;

    /// True when the add-on writes the `step` variable. Only one such add-on
    /// is expected per network.
    fn updates_step(&self) -> bool {
        true
    }

    fn init_variables(
        &self,
        _connection: &Connection,
        _vars: &mut TrainingVariables,
    ) -> Result<(), NeuraTrainError> {
        Ok(())
    }

    fn train_updates(
        &self,
        ctx: &UpdateContext<'_>,
        vars: &TrainingVariables,
    ) -> Result<UpdateList, NeuraTrainError>;
}
