//! Error (loss) functions.
//!
//! Every function maps `(actual, expected)` of equal shape to a 0-dimensional,
//! differentiable tensor.

use std::fmt;
use std::str::FromStr;

use crate::error::NeuraTrainError;
use crate::tensor::Tensor;

/// Probabilities are clipped into `[EPSILON, 1 - EPSILON]` before taking logs.
const EPSILON: f64 = 1e-7;

/// The error a network minimizes and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorFunction {
    #[default]
    Mse,
    Rmse,
    Mae,
    Msle,
    Rmsle,
    BinaryCrossentropy,
}

impl ErrorFunction {
    pub fn compute(&self, actual: &Tensor, expected: &Tensor) -> Result<Tensor, NeuraTrainError> {
        match self {
            ErrorFunction::Mse => mse(actual, expected),
            ErrorFunction::Rmse => rmse(actual, expected),
            ErrorFunction::Mae => mae(actual, expected),
            ErrorFunction::Msle => msle(actual, expected),
            ErrorFunction::Rmsle => rmsle(actual, expected),
            ErrorFunction::BinaryCrossentropy => binary_crossentropy(actual, expected),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorFunction::Mse => "mse",
            ErrorFunction::Rmse => "rmse",
            ErrorFunction::Mae => "mae",
            ErrorFunction::Msle => "msle",
            ErrorFunction::Rmsle => "rmsle",
            ErrorFunction::BinaryCrossentropy => "binary_crossentropy",
        }
    }
}

impl fmt::Display for ErrorFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ErrorFunction {
    type Err = NeuraTrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mse" => Ok(ErrorFunction::Mse),
            "rmse" => Ok(ErrorFunction::Rmse),
            "mae" => Ok(ErrorFunction::Mae),
            "msle" => Ok(ErrorFunction::Msle),
            "rmsle" => Ok(ErrorFunction::Rmsle),
            "binary_crossentropy" => Ok(ErrorFunction::BinaryCrossentropy),
            _ => Err(NeuraTrainError::InvalidProperty {
                name: "error".to_string(),
                value: s.to_string(),
                reason: "expected one of mse, rmse, mae, msle, rmsle, binary_crossentropy"
                    .to_string(),
            }),
        }
    }
}

fn check_shapes(actual: &Tensor, expected: &Tensor, operation: &str) -> Result<(), NeuraTrainError> {
    if actual.shape() != expected.shape() {
        return Err(NeuraTrainError::ShapeMismatch {
            expected: expected.shape(),
            actual: actual.shape(),
            operation: operation.to_string(),
        });
    }
    Ok(())
}

/// Mean squared error.
pub fn mse(actual: &Tensor, expected: &Tensor) -> Result<Tensor, NeuraTrainError> {
    check_shapes(actual, expected, "mse")?;
    actual.sub(expected)?.square()?.mean()
}

/// Root mean squared error.
pub fn rmse(actual: &Tensor, expected: &Tensor) -> Result<Tensor, NeuraTrainError> {
    mse(actual, expected)?.sqrt()
}

/// Mean absolute error.
pub fn mae(actual: &Tensor, expected: &Tensor) -> Result<Tensor, NeuraTrainError> {
    check_shapes(actual, expected, "mae")?;
    actual.sub(expected)?.abs()?.mean()
}

/// Mean squared logarithmic error: `mean((ln(1 + a) - ln(1 + e))^2)`.
pub fn msle(actual: &Tensor, expected: &Tensor) -> Result<Tensor, NeuraTrainError> {
    check_shapes(actual, expected, "msle")?;
    let log_actual = actual.add_scalar(1.0)?.ln()?;
    let log_expected = expected.add_scalar(1.0)?.ln()?;
    log_actual.sub(&log_expected)?.square()?.mean()
}

/// Root mean squared logarithmic error.
pub fn rmsle(actual: &Tensor, expected: &Tensor) -> Result<Tensor, NeuraTrainError> {
    msle(actual, expected)?.sqrt()
}

/// Binary cross-entropy, with predictions clipped away from 0 and 1.
pub fn binary_crossentropy(actual: &Tensor, expected: &Tensor) -> Result<Tensor, NeuraTrainError> {
    check_shapes(actual, expected, "binary_crossentropy")?;
    let p = actual.clamp(EPSILON, 1.0 - EPSILON)?;
    let positive = expected.mul(&p.ln()?)?;
    let negative = expected
        .neg()?
        .add_scalar(1.0)?
        .mul(&p.neg()?.add_scalar(1.0)?.ln()?)?;
    positive.add(&negative)?.mean()?.neg()
}

#[cfg(test)]
#[path = "errors_test.rs"]
mod tests;
