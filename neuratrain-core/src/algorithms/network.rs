use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::algorithms::algorithm_trait::{Algorithm, StepAddon, UpdateContext};
use crate::algorithms::config::TrainConfig;
use crate::algorithms::update::UpdateList;
use crate::algorithms::variables::TrainingVariables;
use crate::error::NeuraTrainError;
use crate::nn::{Connection, Module};
use crate::properties::validate_positive_int;
use crate::tensor::Tensor;

/// Result of one batch update.
struct BatchOutcome {
    error: f64,
    converged: bool,
}

/// A layer chain trained by an [`Algorithm`], with optional step add-ons.
///
/// Training state ([`TrainingVariables`]) is created by the first `train`
/// call and kept across calls. It is rebuilt when the parameter count no
/// longer matches, e.g. after [`replace_connection`](Self::replace_connection).
#[derive(Debug)]
pub struct Network<A: Algorithm> {
    connection: Connection,
    algorithm: A,
    config: TrainConfig,
    addons: Vec<Box<dyn StepAddon>>,
    variables: Option<TrainingVariables>,
    train_errors: Vec<f64>,
    validation_errors: Vec<f64>,
    last_epoch: usize,
    rng: StdRng,
}

impl<A: Algorithm> Network<A> {
    /// Creates the network. When the config carries a seed, the connection's
    /// weights are redrawn from it so the whole run is reproducible.
    pub fn new(
        mut connection: Connection,
        algorithm: A,
        config: TrainConfig,
    ) -> Result<Self, NeuraTrainError> {
        if let Some(seed) = config.seed() {
            connection.reset_parameters(Some(seed))?;
        }
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Network {
            connection,
            algorithm,
            config,
            addons: Vec::new(),
            variables: None,
            train_errors: Vec::new(),
            validation_errors: Vec::new(),
            last_epoch: 0,
            rng,
        })
    }

    /// Builder form of [`add_addon`](Self::add_addon).
    pub fn with_addon<S: StepAddon + 'static>(mut self, addon: S) -> Result<Self, NeuraTrainError> {
        self.add_addon(Box::new(addon))?;
        Ok(self)
    }

    /// Attaches an add-on.
    ///
    /// Only one add-on should adapt the step. A second one is still attached,
    /// with a warning; when both write the step, the later add-on's value wins.
    pub fn add_addon(&mut self, addon: Box<dyn StepAddon>) -> Result<(), NeuraTrainError> {
        if addon.updates_step() {
            if let Some(existing) = self.addons.iter().find(|a| a.updates_step()) {
                log::warn!(
                    "Only one step adaptation add-on is expected, but {} is added next to {}. \
                     The step computed by {} takes precedence.",
                    addon.name(),
                    existing.name(),
                    addon.name()
                );
            }
        }
        if let Some(vars) = self.variables.as_mut() {
            addon.init_variables(&self.connection, vars)?;
        }
        self.addons.push(addon);
        Ok(())
    }

    /// Swaps the layer chain and drops the training state built for the old one.
    pub fn replace_connection(&mut self, connection: Connection) -> Connection {
        self.variables = None;
        std::mem::replace(&mut self.connection, connection)
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn addons(&self) -> &[Box<dyn StepAddon>] {
        &self.addons
    }

    pub fn variables(&self) -> Option<&TrainingVariables> {
        self.variables.as_ref()
    }

    /// Current step, or the configured one before training starts.
    pub fn step(&self) -> f64 {
        self.variables
            .as_ref()
            .map_or(self.config.step(), |v| v.step())
    }

    pub fn train_errors(&self) -> &[f64] {
        &self.train_errors
    }

    pub fn validation_errors(&self) -> &[f64] {
        &self.validation_errors
    }

    pub fn last_epoch(&self) -> usize {
        self.last_epoch
    }

    /// Forward pass with no gradient tracking.
    pub fn predict(&self, input: &Tensor) -> Result<Tensor, NeuraTrainError> {
        self.connection
            .forward_with_parameters(input, &self.connection.flatten_parameters())
    }

    /// Configured error between the prediction for `input` and `target`.
    pub fn prediction_error(&self, input: &Tensor, target: &Tensor) -> Result<f64, NeuraTrainError> {
        let output = self.predict(input)?;
        self.config.error().compute(&output, target)?.item()
    }

    /// Trains for up to `epochs` epochs.
    ///
    /// The training error recorded for an epoch is measured before that
    /// epoch's updates. Training stops early when two consecutive epoch errors
    /// differ by at most `epsilon`, or when the algorithm reports convergence.
    ///
    /// # Errors
    /// * `ShapeMismatch` when inputs and targets disagree with each other or
    ///   with the layer chain.
    /// * `ConfigurationError` when only one of the test tensors is given.
    /// * `TrainingDiverged` when the error or its gradient becomes NaN or
    ///   infinite. Nothing is applied for the failing batch.
    pub fn train(
        &mut self,
        input: &Tensor,
        target: &Tensor,
        input_test: Option<&Tensor>,
        target_test: Option<&Tensor>,
        epochs: usize,
    ) -> Result<(), NeuraTrainError> {
        validate_positive_int("epochs", epochs)?;
        self.check_data(input, target)?;
        let test_data = match (input_test, target_test) {
            (Some(x), Some(y)) => {
                self.check_data(x, y)?;
                Some((x, y))
            }
            (None, None) => None,
            _ => {
                return Err(NeuraTrainError::ConfigurationError(
                    "input_test and target_test must be given together".to_string(),
                ))
            }
        };
        self.ensure_variables()?;

        let n_samples = input.shape()[0];
        let verbose = self.config.verbose();
        log_progress(
            verbose,
            &format!(
                "Start training {} on {} ({} parameters, {} samples, {} epochs)",
                self.algorithm.name(),
                self.connection,
                self.connection.count_parameters(),
                n_samples,
                epochs
            ),
        );

        for run_epoch in 1..=epochs {
            let epoch = self.last_epoch + 1;
            let batches = self.epoch_batches(n_samples);
            let mut batch_errors = Vec::with_capacity(batches.len());
            let mut converged = false;

            for (i, batch) in batches.iter().enumerate() {
                let outcome = match batch {
                    None => self.train_batch(input, target, epoch, i == 0)?,
                    Some(indices) => {
                        let x = input.select_rows(indices)?;
                        let y = target.select_rows(indices)?;
                        self.train_batch(&x, &y, epoch, i == 0)?
                    }
                };
                batch_errors.push(outcome.error);
                converged = outcome.converged;
            }

            let train_error = batch_errors.iter().sum::<f64>() / batch_errors.len() as f64;
            self.last_epoch = epoch;
            self.train_errors.push(train_error);

            let validation_error = match test_data {
                Some((x, y)) => {
                    let error = self.prediction_error(x, y)?;
                    self.validation_errors.push(error);
                    Some(error)
                }
                None => None,
            };

            if self.config.show_epoch().should_show(run_epoch, epochs) {
                let line = match validation_error {
                    Some(v) => format!(
                        "epoch {}: train error {:.6}, validation error {:.6}, step {:.6}",
                        epoch,
                        train_error,
                        v,
                        self.step()
                    ),
                    None => format!(
                        "epoch {}: train error {:.6}, step {:.6}",
                        epoch,
                        train_error,
                        self.step()
                    ),
                };
                log_progress(verbose, &line);
            }

            if let Some(epsilon) = self.config.epsilon() {
                let n = self.train_errors.len();
                if n >= 2 && (self.train_errors[n - 1] - self.train_errors[n - 2]).abs() <= epsilon {
                    log_progress(
                        verbose,
                        &format!("Error change below epsilon {} at epoch {}, stopping", epsilon, epoch),
                    );
                    break;
                }
            }
            if converged {
                log_progress(
                    verbose,
                    &format!("{} converged at epoch {}", self.algorithm.name(), epoch),
                );
                break;
            }
        }
        Ok(())
    }

    fn check_data(&self, input: &Tensor, target: &Tensor) -> Result<(), NeuraTrainError> {
        let x_shape = input.shape();
        let y_shape = target.shape();
        if x_shape.len() != 2 || x_shape[1] != self.connection.input_size() || x_shape[0] == 0 {
            return Err(NeuraTrainError::ShapeMismatch {
                expected: vec![x_shape.first().copied().unwrap_or(0), self.connection.input_size()],
                actual: x_shape,
                operation: "Network::train (input)".to_string(),
            });
        }
        let expected_target = vec![x_shape[0], self.connection.output_size()];
        if y_shape != expected_target {
            return Err(NeuraTrainError::ShapeMismatch {
                expected: expected_target,
                actual: y_shape,
                operation: "Network::train (target)".to_string(),
            });
        }
        Ok(())
    }

    /// (Re)builds the training variables when missing or sized for another chain.
    fn ensure_variables(&mut self) -> Result<(), NeuraTrainError> {
        let n_parameters = self.connection.count_parameters();
        let valid = self
            .variables
            .as_ref()
            .map_or(false, |v| v.is_valid_for(n_parameters));
        if valid {
            return Ok(());
        }
        if self.variables.is_some() {
            log::debug!(
                "Parameter count changed to {}, rebuilding training variables",
                n_parameters
            );
        }
        let mut vars = TrainingVariables::new(self.config.step(), n_parameters);
        self.algorithm.init_variables(&self.connection, &mut vars)?;
        for addon in &self.addons {
            addon.init_variables(&self.connection, &mut vars)?;
        }
        self.variables = Some(vars);
        Ok(())
    }

    /// Row indices of each batch; `None` stands for the whole data set.
    fn epoch_batches(&mut self, n_samples: usize) -> Vec<Option<Vec<usize>>> {
        let batch_size = match self.algorithm.batch_size() {
            Some(size) if size < n_samples => size,
            _ => return vec![None],
        };
        let mut indices: Vec<usize> = (0..n_samples).collect();
        if self.config.shuffle_data() {
            indices.shuffle(&mut self.rng);
        }
        indices
            .chunks(batch_size)
            .map(|chunk| Some(chunk.to_vec()))
            .collect()
    }

    fn train_batch(
        &self,
        input: &Tensor,
        target: &Tensor,
        epoch: usize,
        is_epoch_start: bool,
    ) -> Result<BatchOutcome, NeuraTrainError> {
        let vars = self.variables.as_ref().ok_or_else(|| {
            NeuraTrainError::InternalError("training variables are not initialized".to_string())
        })?;

        self.connection.zero_grad();
        let output = self.connection.forward(input)?;
        let error = self.config.error().compute(&output, target)?;
        let error_value = error.item()?;
        if !error_value.is_finite() {
            return Err(NeuraTrainError::TrainingDiverged {
                epoch,
                error: error_value,
            });
        }
        error.backward(None)?;

        let parameters = self.connection.parameter_tensors();
        let gradients = self.connection.gradients();
        self.connection.zero_grad();
        let full_gradient: Vec<f64> = gradients.iter().flatten().copied().collect();
        check_finite_gradient(epoch, error_value, &full_gradient)?;

        let connection = &self.connection;
        let error_function = self.config.error();
        let error_at = |flat: &[f64]| -> Result<f64, NeuraTrainError> {
            let output = connection.forward_with_parameters(input, flat)?;
            error_function.compute(&output, target)?.item()
        };
        let ctx = UpdateContext {
            parameters: &parameters,
            gradients: &gradients,
            full_gradient: &full_gradient,
            epoch,
            errors: &self.train_errors,
            is_epoch_start,
            error_at: &error_at,
        };

        let mut updates = self.algorithm.train_updates(&ctx, vars)?;
        let mut addon_updates = UpdateList::new();
        for addon in &self.addons {
            addon_updates.merge_override(addon.train_updates(&ctx, vars)?);
        }
        updates.extend(addon_updates)?;
        let converged = self.algorithm.has_converged(&ctx, vars);
        updates.apply()?;

        Ok(BatchOutcome {
            error: error_value,
            converged,
        })
    }
}

/// Rejects a gradient holding NaN or infinite values before it reaches the parameters.
fn check_finite_gradient(epoch: usize, error: f64, gradient: &[f64]) -> Result<(), NeuraTrainError> {
    if gradient.iter().all(|g| g.is_finite()) {
        return Ok(());
    }
    log::warn!("Non-finite gradient at epoch {} (error {})", epoch, error);
    Err(NeuraTrainError::TrainingDiverged { epoch, error })
}

fn log_progress(verbose: bool, message: &str) {
    if verbose {
        log::info!("{}", message);
    } else {
        log::debug!("{}", message);
    }
}

#[cfg(test)]
#[path = "network_test.rs"]
mod tests;
