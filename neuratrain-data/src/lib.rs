//! In-memory datasets, samplers and mini-batch loading for `neuratrain-core`
//! networks.

pub mod dataloader;
pub mod datasets;
pub mod samplers;
pub mod split;

pub use dataloader::{stack_samples, DataLoader};
pub use datasets::{Dataset, TensorDataset};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
pub use split::{train_test_split, TrainTestSplit};
