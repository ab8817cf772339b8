use thiserror::Error;

/// Custom error type for the NeuraTrain framework.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum NeuraTrainError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Rank mismatch: expected {expected}, got {actual}")]
    RankMismatch { expected: usize, actual: usize },

    #[error("Index out of bounds: index {index:?} for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Backward called on non-scalar tensor without explicit gradient.")]
    BackwardNonScalar,

    #[error("Backward error: {0}")]
    BackwardError(String),

    #[error("Cycle detected in the computation graph during backward pass.")]
    CycleDetected,

    #[error("Gradient check failed for input {input_index} element {element_index}: analytical {analytical}, numerical {numerical}")]
    GradientCheckError {
        input_index: usize,
        element_index: usize,
        analytical: f64,
        numerical: f64,
    },

    #[error("Invalid value {value} for property `{name}`: {reason}")]
    InvalidProperty {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Invalid connection: {0}")]
    InvalidConnection(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Training diverged at epoch {epoch}: error is {error}")]
    TrainingDiverged { epoch: usize, error: f64 },

    #[error("Failed to acquire {lock_type} lock: {reason}")]
    LockError { lock_type: String, reason: String },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
