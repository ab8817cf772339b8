use std::collections::BTreeMap;

use crate::error::NeuraTrainError;
use crate::tensor::Tensor;

/// Shared state of a training run: the adaptive `step` plus named auxiliary
/// buffers such as `leak_average` or `velocity.0`.
///
/// The state is built for a given parameter count. Vector-valued variables are
/// sized from it, so a network whose layers change must rebuild its variables.
#[derive(Debug)]
pub struct TrainingVariables {
    step: Tensor,
    initial_step: f64,
    variables: BTreeMap<String, Tensor>,
    n_parameters: usize,
}

impl TrainingVariables {
    pub fn new(step: f64, n_parameters: usize) -> Self {
        TrainingVariables {
            step: Tensor::scalar(step),
            initial_step: step,
            variables: BTreeMap::new(),
            n_parameters,
        }
    }

    /// Current value of the step.
    pub fn step(&self) -> f64 {
        self.step.read_data().data[0]
    }

    /// The step as a shared variable, for update lists.
    pub fn step_variable(&self) -> &Tensor {
        &self.step
    }

    /// The step the run started with.
    pub fn initial_step(&self) -> f64 {
        self.initial_step
    }

    /// Number of scalar parameters the state was built for.
    pub fn n_parameters(&self) -> usize {
        self.n_parameters
    }

    pub fn is_valid_for(&self, n_parameters: usize) -> bool {
        self.n_parameters == n_parameters
    }

    pub fn get(&self, name: &str) -> Option<&Tensor> {
        self.variables.get(name)
    }

    /// Like [`get`](Self::get) but a missing variable is an error.
    pub fn require(&self, name: &str) -> Result<&Tensor, NeuraTrainError> {
        self.variables.get(name).ok_or_else(|| {
            NeuraTrainError::InternalError(format!(
                "training variable `{}` was not initialized",
                name
            ))
        })
    }

    /// Registers a variable. Re-registering a name replaces the old buffer.
    pub fn insert(&mut self, name: impl Into<String>, value: Tensor) {
        self.variables.insert(name.into(), value);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(|k| k.as_str())
    }
}
