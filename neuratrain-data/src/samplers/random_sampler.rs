use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::traits::Sampler;

/// Visits a dataset in random order.
///
/// Without replacement every index appears at most once per pass. With a
/// seed, the sequence of passes is reproducible; each call to `iter` draws a
/// fresh permutation from the same generator.
#[derive(Debug)]
pub struct RandomSampler {
    replacement: bool,
    num_samples: Option<usize>,
    rng: Mutex<StdRng>,
}

impl RandomSampler {
    /// A full permutation per pass, seeded from entropy.
    pub fn new() -> Self {
        Self::with_options(false, None, None)
    }

    /// A full permutation per pass from a seeded generator.
    pub fn seeded(seed: u64) -> Self {
        Self::with_options(false, None, Some(seed))
    }

    /// * `replacement`: an index may be drawn more than once.
    /// * `num_samples`: indices per pass, the dataset size when `None`. Without
    ///   replacement it is capped at the dataset size.
    /// * `seed`: generator seed, entropy when `None`.
    pub fn with_options(replacement: bool, num_samples: Option<usize>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        RandomSampler {
            replacement,
            num_samples,
            rng: Mutex::new(rng),
        }
    }

    pub fn replacement(&self) -> bool {
        self.replacement
    }

    fn draw(&self, dataset_len: usize) -> Vec<usize> {
        let count = self.len(dataset_len);
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("RandomSampler generator lock was poisoned. Recovering.");
                poisoned.into_inner()
            }
        };
        if self.replacement {
            (0..count).map(|_| rng.gen_range(0..dataset_len)).collect()
        } else {
            let mut indices: Vec<usize> = (0..dataset_len).collect();
            indices.shuffle(&mut *rng);
            indices.truncate(count);
            indices
        }
    }
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for RandomSampler {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        if dataset_len == 0 {
            return Box::new(std::iter::empty());
        }
        Box::new(self.draw(dataset_len).into_iter())
    }

    fn len(&self, dataset_len: usize) -> usize {
        if dataset_len == 0 {
            return 0;
        }
        let requested = self.num_samples.unwrap_or(dataset_len);
        if self.replacement {
            requested
        } else {
            if requested > dataset_len {
                log::warn!(
                    "RandomSampler: num_samples ({}) exceeds dataset_len ({}) without replacement, using {}",
                    requested,
                    dataset_len,
                    dataset_len
                );
            }
            requested.min(dataset_len)
        }
    }
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
