use std::fmt::Debug;

/// Produces the order in which a [`DataLoader`](crate::DataLoader) visits a dataset.
pub trait Sampler: Debug + Send + Sync {
    /// Indices for one pass over a dataset of `dataset_len` samples.
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Number of indices [`iter`](Self::iter) yields.
    fn len(&self, dataset_len: usize) -> usize;
}
