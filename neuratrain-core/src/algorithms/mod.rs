//! Training algorithms, the training loop and step adaptation add-ons.
//!
//! A [`Network`] owns a [`Connection`](crate::nn::Connection), an
//! [`Algorithm`] and any number of [`StepAddon`]s. Every training update, the
//! algorithm and the add-ons read the current parameters, gradients and
//! [`TrainingVariables`] and return an [`UpdateList`]. The lists are merged
//! and applied in one go, so every new value is computed from old values.

pub mod algorithm_trait;
pub mod config;
pub mod gd;
pub mod network;
pub mod quasi_newton;
pub mod steps;
pub mod update;
pub mod variables;

pub use algorithm_trait::{Algorithm, StepAddon, UpdateContext};
pub use config::{ShowEpoch, TrainConfig};
pub use gd::{GradientDescent, MinibatchGradientDescent, Momentum};
pub use network::Network;
pub use quasi_newton::{QuasiNewton, UpdateFunction};
pub use steps::{ErrDiffStepUpdate, LeakStepAdaptation, SearchThenConverge, SimpleStepMinimization};
pub use update::UpdateList;
pub use variables::TrainingVariables;

/// Builds an [`UpdateContext`] over hand-written gradients for unit tests.
/// `error_at` evaluates `sum(p^2)`.
#[cfg(test)]
pub(crate) fn with_test_context<R>(
    parameters: &[crate::tensor::Tensor],
    gradients: &[Vec<f64>],
    epoch: usize,
    errors: &[f64],
    is_epoch_start: bool,
    f: impl FnOnce(&UpdateContext<'_>) -> R,
) -> R {
    let full_gradient: Vec<f64> = gradients.iter().flatten().copied().collect();
    let error_at = |flat: &[f64]| -> Result<f64, crate::error::NeuraTrainError> {
        Ok(flat.iter().map(|p| p * p).sum())
    };
    let ctx = UpdateContext {
        parameters,
        gradients,
        full_gradient: &full_gradient,
        epoch,
        errors,
        is_epoch_start,
        error_at: &error_at,
    };
    f(&ctx)
}
