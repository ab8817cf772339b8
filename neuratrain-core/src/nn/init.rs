//! Weight initialization methods.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;

use crate::error::NeuraTrainError;

/// How the weights of a layer are drawn.
///
/// Fans are taken from a weight of shape `[fan_in, fan_out]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitMethod {
    /// Gaussian with the given mean and standard deviation.
    Normal { mean: f64, std: f64 },
    /// Uniform on `[low, high]`.
    Uniform { low: f64, high: f64 },
    /// Gaussian with `std = sqrt(2 / (fan_in + fan_out))`.
    XavierNormal,
    /// Uniform on `±sqrt(6 / (fan_in + fan_out))`.
    XavierUniform,
    /// Gaussian with `std = sqrt(2 / fan_in)`.
    HeNormal,
    /// Uniform on `±sqrt(6 / fan_in)`.
    HeUniform,
    /// Every element set to the same value.
    Constant(f64),
}

impl Default for InitMethod {
    fn default() -> Self {
        InitMethod::XavierNormal
    }
}

impl InitMethod {
    /// Checks the method's own hyper-parameters.
    pub fn validate(&self) -> Result<(), NeuraTrainError> {
        match *self {
            InitMethod::Normal { mean, std } => {
                if !mean.is_finite() || !std.is_finite() || std < 0.0 {
                    return Err(NeuraTrainError::InvalidProperty {
                        name: "init_method".to_string(),
                        value: format!("Normal {{ mean: {}, std: {} }}", mean, std),
                        reason: "mean must be finite and std a finite value >= 0".to_string(),
                    });
                }
            }
            InitMethod::Uniform { low, high } => {
                if !low.is_finite() || !high.is_finite() || low > high {
                    return Err(NeuraTrainError::InvalidProperty {
                        name: "init_method".to_string(),
                        value: format!("Uniform {{ low: {}, high: {} }}", low, high),
                        reason: "bounds must be finite with low <= high".to_string(),
                    });
                }
            }
            InitMethod::Constant(value) if !value.is_finite() => {
                return Err(NeuraTrainError::InvalidProperty {
                    name: "init_method".to_string(),
                    value: format!("Constant({})", value),
                    reason: "value must be finite".to_string(),
                });
            }
            _ => {}
        }
        Ok(())
    }

    /// Draws `fan_in * fan_out` values for a `[fan_in, fan_out]` weight.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        fan_in: usize,
        fan_out: usize,
        rng: &mut R,
    ) -> Result<Vec<f64>, NeuraTrainError> {
        self.validate()?;
        let n = fan_in * fan_out;
        let fan_sum = (fan_in + fan_out).max(1) as f64;
        let fan_in_f = fan_in.max(1) as f64;
        match *self {
            InitMethod::Normal { mean, std } => sample_normal(mean, std, n, rng),
            InitMethod::XavierNormal => sample_normal(0.0, (2.0 / fan_sum).sqrt(), n, rng),
            InitMethod::HeNormal => sample_normal(0.0, (2.0 / fan_in_f).sqrt(), n, rng),
            InitMethod::Uniform { low, high } => Ok(sample_uniform(low, high, n, rng)),
            InitMethod::XavierUniform => {
                let limit = (6.0 / fan_sum).sqrt();
                Ok(sample_uniform(-limit, limit, n, rng))
            }
            InitMethod::HeUniform => {
                let limit = (6.0 / fan_in_f).sqrt();
                Ok(sample_uniform(-limit, limit, n, rng))
            }
            InitMethod::Constant(value) => Ok(vec![value; n]),
        }
    }
}

fn sample_normal<R: Rng + ?Sized>(
    mean: f64,
    std: f64,
    n: usize,
    rng: &mut R,
) -> Result<Vec<f64>, NeuraTrainError> {
    let dist = Normal::new(mean, std).map_err(|e| NeuraTrainError::InvalidProperty {
        name: "init_method".to_string(),
        value: format!("Normal({}, {})", mean, std),
        reason: e.to_string(),
    })?;
    Ok((0..n).map(|_| dist.sample(rng)).collect())
}

fn sample_uniform<R: Rng + ?Sized>(low: f64, high: f64, n: usize, rng: &mut R) -> Vec<f64> {
    let dist = Uniform::new_inclusive(low, high);
    (0..n).map(|_| dist.sample(rng)).collect()
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
