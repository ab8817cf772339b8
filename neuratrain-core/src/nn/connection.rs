use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::NeuraTrainError;
use crate::nn::layers::{Layer, LayerKind};
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;

/// A weighted layer: `activation(x · W + b)` with `W: [n, m]` and `b: [m]`.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    kind: LayerKind,
    weight: Parameter,
    bias: Parameter,
}

impl DenseLayer {
    fn build(
        index: usize,
        layer: &Layer,
        next_size: usize,
        rng: &mut StdRng,
    ) -> Result<Self, NeuraTrainError> {
        let weight_data = layer.init_method().sample(layer.size(), next_size, rng)?;
        let weight = Tensor::new(weight_data, vec![layer.size(), next_size])?;
        let bias = Tensor::new(vec![0.0; next_size], vec![next_size])?;
        Ok(DenseLayer {
            kind: layer.kind(),
            weight: Parameter::new(weight, format!("layer{}.weight", index)),
            bias: Parameter::new(bias, format!("layer{}.bias", index)),
        })
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn weight(&self) -> &Parameter {
        &self.weight
    }

    pub fn bias(&self) -> &Parameter {
        &self.bias
    }
}

fn dense_forward(
    kind: LayerKind,
    input: &Tensor,
    weight: &Tensor,
    bias: &Tensor,
) -> Result<Tensor, NeuraTrainError> {
    kind.activate(&input.matmul(weight)?.add(bias)?)
}

impl Module for DenseLayer {
    fn forward(&self, input: &Tensor) -> Result<Tensor, NeuraTrainError> {
        dense_forward(self.kind, input, &self.weight, &self.bias)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        vec![&self.weight, &self.bias]
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        self.parameters()
            .into_iter()
            .map(|p| (p.name().unwrap_or("param").to_string(), p))
            .collect()
    }
}

/// A directed chain of layers together with the weights joining them.
///
/// The chain must hold at least two layers, every size must be positive,
/// `Output` may only appear last and `Softmax` may not be the input layer.
/// Every layer but the last owns a [`DenseLayer`] sized from its own width and
/// the next layer's width.
///
/// Cloning is shallow: the clone shares the parameter tensors.
#[derive(Debug, Clone)]
pub struct Connection {
    layers: Vec<Layer>,
    dense: Vec<DenseLayer>,
}

impl Connection {
    /// Builds the chain with freshly initialized weights from an entropy seed.
    pub fn new(layers: Vec<Layer>) -> Result<Self, NeuraTrainError> {
        Self::with_seed(layers, None)
    }

    /// Builds the chain, drawing weights from a `StdRng` seeded with `seed`
    /// (or from entropy when `None`).
    pub fn with_seed(layers: Vec<Layer>, seed: Option<u64>) -> Result<Self, NeuraTrainError> {
        validate_layers(&layers)?;
        let dense = build_dense(&layers, seed)?;
        Ok(Connection { layers, dense })
    }

    /// Shorthand: sigmoid layers for every size but the last, which becomes `Output`.
    ///
    /// `from_sizes(&[2, 4, 1])` is `Sigmoid(2) > Sigmoid(4) > Output(1)`.
    pub fn from_sizes(sizes: &[usize]) -> Result<Self, NeuraTrainError> {
        let layers = sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| {
                if i + 1 == sizes.len() {
                    Layer::output(size)
                } else {
                    Layer::sigmoid(size)
                }
            })
            .collect();
        Self::new(layers)
    }

    /// Draws new weights for every layer and resets the biases to zero.
    pub fn reset_parameters(&mut self, seed: Option<u64>) -> Result<(), NeuraTrainError> {
        self.dense = build_dense(&self.layers, seed)?;
        Ok(())
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn dense_layers(&self) -> &[DenseLayer] {
        &self.dense
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, |l| l.size())
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |l| l.size())
    }

    /// Shapes of the parameters in parameter order.
    pub fn parameter_shapes(&self) -> Vec<Vec<usize>> {
        self.parameters().iter().map(|p| p.shape()).collect()
    }

    /// Parameter tensors (shared handles) in parameter order.
    pub fn parameter_tensors(&self) -> Vec<Tensor> {
        self.parameters().iter().map(|p| p.tensor().clone()).collect()
    }

    /// All parameter values concatenated in parameter order.
    pub fn flatten_parameters(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(self.count_parameters());
        for param in self.parameters() {
            flat.extend(param.to_vec());
        }
        flat
    }

    /// Writes a flat vector produced by [`flatten_parameters`](Self::flatten_parameters) back.
    pub fn assign_flat_parameters(&self, flat: &[f64]) -> Result<(), NeuraTrainError> {
        let expected = self.count_parameters();
        if flat.len() != expected {
            return Err(NeuraTrainError::ShapeMismatch {
                expected: vec![expected],
                actual: vec![flat.len()],
                operation: "assign_flat_parameters".to_string(),
            });
        }
        let mut offset = 0;
        for param in self.parameters() {
            let n = param.numel();
            param.set_data(flat[offset..offset + n].to_vec())?;
            offset += n;
        }
        Ok(())
    }

    /// Per-parameter gradients as flat vectors; zeros where no gradient exists.
    pub fn gradients(&self) -> Vec<Vec<f64>> {
        self.parameters()
            .iter()
            .map(|p| match p.grad() {
                Some(g) => g.to_vec(),
                None => vec![0.0; p.numel()],
            })
            .collect()
    }

    /// All gradients concatenated in parameter order.
    pub fn flatten_gradients(&self) -> Vec<f64> {
        self.gradients().into_iter().flatten().collect()
    }

    /// Forward pass with the parameters taken from `flat` instead of the
    /// stored ones. Nothing is tracked and the stored parameters are untouched.
    pub fn forward_with_parameters(
        &self,
        input: &Tensor,
        flat: &[f64],
    ) -> Result<Tensor, NeuraTrainError> {
        self.check_input(input)?;
        let expected = self.count_parameters();
        if flat.len() != expected {
            return Err(NeuraTrainError::ShapeMismatch {
                expected: vec![expected],
                actual: vec![flat.len()],
                operation: "forward_with_parameters".to_string(),
            });
        }
        let mut x = input.detach();
        let mut offset = 0;
        for dense in &self.dense {
            let w_shape = dense.weight.shape();
            let w_len = dense.weight.numel();
            let b_len = dense.bias.numel();
            let weight = Tensor::new(flat[offset..offset + w_len].to_vec(), w_shape)?;
            offset += w_len;
            let bias = Tensor::new(flat[offset..offset + b_len].to_vec(), vec![b_len])?;
            offset += b_len;
            x = dense_forward(dense.kind, &x, &weight, &bias)?;
        }
        Ok(x)
    }

    fn check_input(&self, input: &Tensor) -> Result<(), NeuraTrainError> {
        let shape = input.shape();
        if shape.len() != 2 || shape[1] != self.input_size() {
            return Err(NeuraTrainError::ShapeMismatch {
                expected: vec![shape.first().copied().unwrap_or(0), self.input_size()],
                actual: shape,
                operation: "Connection::forward".to_string(),
            });
        }
        Ok(())
    }
}

impl Module for Connection {
    /// Runs `input` (`[n_samples, input_size]`) through every weighted layer.
    fn forward(&self, input: &Tensor) -> Result<Tensor, NeuraTrainError> {
        self.check_input(input)?;
        let mut x = input.clone();
        for dense in &self.dense {
            x = dense.forward(&x)?;
        }
        Ok(x)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        self.dense.iter().flat_map(|d| d.parameters()).collect()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        self.dense.iter().flat_map(|d| d.named_parameters()).collect()
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.layers.iter().map(|l| l.to_string()).collect();
        write!(f, "{}", names.join(" > "))
    }
}

fn validate_layers(layers: &[Layer]) -> Result<(), NeuraTrainError> {
    if layers.len() < 2 {
        return Err(NeuraTrainError::InvalidConnection(format!(
            "a network needs at least 2 layers, got {}",
            layers.len()
        )));
    }
    for (i, layer) in layers.iter().enumerate() {
        if layer.size() == 0 {
            return Err(NeuraTrainError::InvalidConnection(format!(
                "layer {} ({}) has size 0",
                i, layer
            )));
        }
        layer.init_method().validate()?;
        if layer.is_output() && i + 1 != layers.len() {
            return Err(NeuraTrainError::InvalidConnection(format!(
                "output layer {} must be the last layer",
                i
            )));
        }
    }
    if layers[0].kind() == LayerKind::Softmax {
        return Err(NeuraTrainError::InvalidConnection(
            "Softmax cannot be the input layer".to_string(),
        ));
    }
    Ok(())
}

fn build_dense(layers: &[Layer], seed: Option<u64>) -> Result<Vec<DenseLayer>, NeuraTrainError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    layers
        .windows(2)
        .enumerate()
        .map(|(i, pair)| DenseLayer::build(i, &pair[0], pair[1].size(), &mut rng))
        .collect()
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
