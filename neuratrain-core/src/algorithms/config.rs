use std::fmt;
use std::str::FromStr;

use crate::error::NeuraTrainError;
use crate::nn::ErrorFunction;
use crate::properties::{validate_bounded, validate_positive_int};

/// How often the training loop logs a progress line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowEpoch {
    /// Every `n` epochs.
    Every(usize),
    /// `n` times over the whole run.
    Times(usize),
}

impl Default for ShowEpoch {
    fn default() -> Self {
        ShowEpoch::Every(1)
    }
}

impl ShowEpoch {
    /// Epoch interval between progress lines for a run of `epochs` epochs.
    pub fn interval(&self, epochs: usize) -> usize {
        match *self {
            ShowEpoch::Every(n) => n.max(1),
            ShowEpoch::Times(n) => (epochs / n.max(1)).max(1),
        }
    }

    /// The first and last epochs are always shown.
    pub fn should_show(&self, epoch: usize, epochs: usize) -> bool {
        epoch == 1 || epoch == epochs || epoch % self.interval(epochs) == 0
    }
}

impl FromStr for ShowEpoch {
    type Err = NeuraTrainError;

    /// Parses `"5"` as `Every(5)` and `"100 times"` as `Times(100)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| NeuraTrainError::InvalidProperty {
            name: "show_epoch".to_string(),
            value: s.to_string(),
            reason: reason.to_string(),
        };
        let mut parts = s.split_whitespace();
        let count: usize = parts
            .next()
            .ok_or_else(|| invalid("value is empty"))?
            .parse()
            .map_err(|_| invalid("expected a positive integer"))?;
        validate_positive_int("show_epoch", count)?;
        match (parts.next(), parts.next()) {
            (None, _) => Ok(ShowEpoch::Every(count)),
            (Some("times"), None) | (Some("time"), None) => Ok(ShowEpoch::Times(count)),
            _ => Err(invalid("expected `<n>` or `<n> times`")),
        }
    }
}

impl fmt::Display for ShowEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShowEpoch::Every(n) => write!(f, "{}", n),
            ShowEpoch::Times(n) => write!(f, "{} times", n),
        }
    }
}

/// Options shared by every algorithm.
///
/// Built with `TrainConfig::default()` and the validating `with_*` setters.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub(crate) step: f64,
    pub(crate) error: ErrorFunction,
    pub(crate) show_epoch: ShowEpoch,
    pub(crate) shuffle_data: bool,
    pub(crate) epsilon: Option<f64>,
    pub(crate) verbose: bool,
    pub(crate) seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            step: 0.1,
            error: ErrorFunction::Mse,
            show_epoch: ShowEpoch::default(),
            shuffle_data: false,
            epsilon: None,
            verbose: false,
            seed: None,
        }
    }
}

impl TrainConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learning rate, `>= 0`.
    pub fn with_step(mut self, step: f64) -> Result<Self, NeuraTrainError> {
        self.step = validate_bounded("step", step, Some(0.0), None)?;
        Ok(self)
    }

    pub fn with_error(mut self, error: ErrorFunction) -> Self {
        self.error = error;
        self
    }

    pub fn with_show_epoch(mut self, show_epoch: ShowEpoch) -> Result<Self, NeuraTrainError> {
        let n = match show_epoch {
            ShowEpoch::Every(n) | ShowEpoch::Times(n) => n,
        };
        validate_positive_int("show_epoch", n)?;
        self.show_epoch = show_epoch;
        Ok(self)
    }

    pub fn with_shuffle_data(mut self, shuffle_data: bool) -> Self {
        self.shuffle_data = shuffle_data;
        self
    }

    /// Stops training once two consecutive epoch errors differ by at most `epsilon`.
    pub fn with_epsilon(mut self, epsilon: Option<f64>) -> Result<Self, NeuraTrainError> {
        self.epsilon = match epsilon {
            Some(eps) => Some(validate_bounded("epsilon", eps, Some(0.0), None)?),
            None => None,
        };
        Ok(self)
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Seeds weight initialization and data shuffling.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn error(&self) -> ErrorFunction {
        self.error
    }

    pub fn show_epoch(&self) -> ShowEpoch {
        self.show_epoch
    }

    pub fn shuffle_data(&self) -> bool {
        self.shuffle_data
    }

    pub fn epsilon(&self) -> Option<f64> {
        self.epsilon
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_epoch_parsing() -> Result<(), NeuraTrainError> {
        assert_eq!("5".parse::<ShowEpoch>()?, ShowEpoch::Every(5));
        assert_eq!("100 times".parse::<ShowEpoch>()?, ShowEpoch::Times(100));
        assert_eq!(" 3  times ".parse::<ShowEpoch>()?, ShowEpoch::Times(3));
        assert!("0".parse::<ShowEpoch>().is_err());
        assert!("ten times".parse::<ShowEpoch>().is_err());
        assert!("3 epochs".parse::<ShowEpoch>().is_err());
        assert!("".parse::<ShowEpoch>().is_err());
        assert_eq!(ShowEpoch::Times(4).to_string(), "4 times");
        Ok(())
    }

    #[test]
    fn test_show_epoch_schedule() {
        let every = ShowEpoch::Every(10);
        assert!(every.should_show(1, 25));
        assert!(!every.should_show(5, 25));
        assert!(every.should_show(20, 25));
        assert!(every.should_show(25, 25));

        let times = ShowEpoch::Times(4);
        assert_eq!(times.interval(100), 25);
        assert_eq!(times.interval(2), 1);
        let shown = (1..=100).filter(|&e| times.should_show(e, 100)).count();
        assert_eq!(shown, 5, "epoch 1 plus 25, 50, 75 and 100");
    }

    #[test]
    fn test_config_setters_validate() -> Result<(), NeuraTrainError> {
        let config = TrainConfig::new()
            .with_step(0.5)?
            .with_epsilon(Some(1e-4))?
            .with_show_epoch(ShowEpoch::Times(10))?
            .with_error(ErrorFunction::Rmsle)
            .with_seed(Some(3));
        assert_eq!(config.step(), 0.5);
        assert_eq!(config.epsilon(), Some(1e-4));
        assert_eq!(config.error(), ErrorFunction::Rmsle);
        assert_eq!(config.seed(), Some(3));

        assert!(TrainConfig::new().with_step(-0.1).is_err());
        assert!(TrainConfig::new().with_epsilon(Some(-1.0)).is_err());
        assert!(TrainConfig::new().with_show_epoch(ShowEpoch::Every(0)).is_err());
        Ok(())
    }
}
