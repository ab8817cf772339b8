use neuratrain_core::NeuraTrainError;

/// Indexed access to a collection of samples.
pub trait Dataset {
    /// A single sample, e.g. one row of every tensor in a [`TensorDataset`](super::TensorDataset).
    type Item: Send + 'static;

    /// Returns the sample at `index`.
    ///
    /// # Errors
    /// `IndexOutOfBounds` when `index >= len()`.
    fn get(&self, index: usize) -> Result<Self::Item, NeuraTrainError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
