use crate::error::NeuraTrainError;
use crate::nn::Parameter;
use crate::tensor::Tensor;

/// The base trait for everything in a network that holds learnable parameters.
pub trait Module: std::fmt::Debug + Send + Sync {
    /// Performs a forward pass of the module.
    fn forward(&self, input: &Tensor) -> Result<Tensor, NeuraTrainError>;

    /// Returns all learnable parameters of the module, in a stable order.
    fn parameters(&self) -> Vec<&Parameter>;

    /// Returns the parameters along with hierarchical names such as
    /// `"layer1.weight"`. Names are unique within the module.
    fn named_parameters(&self) -> Vec<(String, &Parameter)>;

    /// Total number of scalar parameters.
    fn count_parameters(&self) -> usize {
        self.parameters().iter().map(|p| p.numel()).sum()
    }

    /// Drops the accumulated gradient of every parameter.
    fn zero_grad(&self) {
        for param in self.parameters() {
            param.clear_grad();
        }
    }
}
