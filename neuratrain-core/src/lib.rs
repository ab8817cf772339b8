// Core modules of the crate
pub mod autograd;
pub mod ops;
pub mod tensor;
pub mod tensor_data;

// Network definition and training
pub mod algorithms;
pub mod nn;
pub mod properties;
pub mod utils;

pub mod error;

// Re-export the main types so they are reachable as `neuratrain_core::Tensor`, etc.
pub use error::NeuraTrainError;
pub use tensor::Tensor;

pub use algorithms::{Network, TrainConfig};
pub use nn::{Connection, ErrorFunction, Layer, LayerKind};
