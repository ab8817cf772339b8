// src/nn/mod.rs
// Layers, the layer chain (`Connection`), initializers and error functions.

pub mod connection;
pub mod errors;
pub mod init;
pub mod layers;
pub mod module; // Trait Module
pub mod parameter; // struct Parameter

// Re-export common items
pub use connection::{Connection, DenseLayer};
pub use errors::ErrorFunction;
pub use init::InitMethod;
pub use layers::{Layer, LayerKind};
pub use module::Module;
pub use parameter::Parameter;
