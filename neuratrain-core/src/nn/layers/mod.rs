pub mod layer;

pub use layer::{Layer, LayerKind};

#[cfg(test)]
#[path = "layer_test.rs"]
mod tests;
