use std::fmt;

use crate::error::NeuraTrainError;
use crate::nn::init::InitMethod;
use crate::tensor::Tensor;

/// The activation a layer applies to its weighted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Sigmoid,
    Tanh,
    Relu,
    Softplus,
    Softmax,
    /// Identity activation.
    Linear,
    /// Terminal layer: declares the network's output width and holds no weights.
    Output,
}

impl LayerKind {
    /// Applies the activation to `x`.
    pub fn activate(&self, x: &Tensor) -> Result<Tensor, NeuraTrainError> {
        match self {
            LayerKind::Sigmoid => x.sigmoid(),
            LayerKind::Tanh => x.tanh(),
            LayerKind::Relu => x.relu(),
            LayerKind::Softplus => x.softplus(),
            LayerKind::Softmax => x.softmax(),
            LayerKind::Linear | LayerKind::Output => Ok(x.clone()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Sigmoid => "Sigmoid",
            LayerKind::Tanh => "Tanh",
            LayerKind::Relu => "Relu",
            LayerKind::Softplus => "Softplus",
            LayerKind::Softmax => "Softmax",
            LayerKind::Linear => "Linear",
            LayerKind::Output => "Output",
        }
    }
}

/// A typed unit of a network: an activation kind and an input width.
///
/// A layer is a plain description. Its weights live in the
/// [`Connection`](crate::nn::Connection) it is attached to, which sizes them
/// from this layer's width and the next layer's width.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    kind: LayerKind,
    size: usize,
    init_method: InitMethod,
}

impl Layer {
    pub fn new(kind: LayerKind, size: usize) -> Self {
        Layer {
            kind,
            size,
            init_method: InitMethod::default(),
        }
    }

    pub fn sigmoid(size: usize) -> Self {
        Self::new(LayerKind::Sigmoid, size)
    }

    pub fn tanh(size: usize) -> Self {
        Self::new(LayerKind::Tanh, size)
    }

    pub fn relu(size: usize) -> Self {
        Self::new(LayerKind::Relu, size)
    }

    pub fn softplus(size: usize) -> Self {
        Self::new(LayerKind::Softplus, size)
    }

    pub fn softmax(size: usize) -> Self {
        Self::new(LayerKind::Softmax, size)
    }

    pub fn linear(size: usize) -> Self {
        Self::new(LayerKind::Linear, size)
    }

    pub fn output(size: usize) -> Self {
        Self::new(LayerKind::Output, size)
    }

    /// Replaces the weight initializer. Biases always start at zero.
    pub fn with_init_method(mut self, init_method: InitMethod) -> Self {
        self.init_method = init_method;
        self
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn init_method(&self) -> InitMethod {
        self.init_method
    }

    pub fn is_output(&self) -> bool {
        self.kind == LayerKind::Output
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind.name(), self.size)
    }
}
