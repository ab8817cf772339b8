//! Validation of hyper-parameters at configuration time.
//!
//! Every check returns the value unchanged on success, so setters can write
//! `self.alpha = validate_bounded("alpha", alpha, Some(0.0), None)?;`.

use std::fmt::Display;

use num_traits::Float;

use crate::error::NeuraTrainError;

fn invalid<T: Display>(name: &str, value: T, reason: String) -> NeuraTrainError {
    NeuraTrainError::InvalidProperty {
        name: name.to_string(),
        value: value.to_string(),
        reason,
    }
}

/// Accepts values in `[min, max]`; either bound may be omitted. NaN is rejected.
pub fn validate_bounded<T>(
    name: &str,
    value: T,
    min: Option<T>,
    max: Option<T>,
) -> Result<T, NeuraTrainError>
where
    T: Float + Display,
{
    if value.is_nan() {
        return Err(invalid(name, value, "value is NaN".to_string()));
    }
    if let Some(min) = min {
        if value < min {
            return Err(invalid(name, value, format!("must be >= {}", min)));
        }
    }
    if let Some(max) = max {
        if value > max {
            return Err(invalid(name, value, format!("must be <= {}", max)));
        }
    }
    Ok(value)
}

/// Accepts a proportion in `[0, 1]`.
pub fn validate_proper_fraction<T>(name: &str, value: T) -> Result<T, NeuraTrainError>
where
    T: Float + Display,
{
    validate_bounded(name, value, Some(T::zero()), Some(T::one()))
}

/// Accepts integers `>= 1`.
pub fn validate_positive_int(name: &str, value: usize) -> Result<usize, NeuraTrainError> {
    if value == 0 {
        return Err(invalid(name, value, "must be >= 1".to_string()));
    }
    Ok(value)
}
