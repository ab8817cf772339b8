use std::fmt;
use std::ops::Deref;

use crate::tensor::Tensor;

/// A wrapper around a Tensor indicating it is a learnable parameter of a Module.
/// Parameters automatically have `requires_grad` set to `true`.
pub struct Parameter {
    tensor: Tensor,
    name: Option<String>,
}

impl Parameter {
    /// Creates a new named Parameter from a Tensor.
    pub fn new(tensor: Tensor, name: impl Into<String>) -> Self {
        tensor.set_requires_grad(true);
        Parameter {
            tensor,
            name: Some(name.into()),
        }
    }

    pub fn new_unnamed(tensor: Tensor) -> Self {
        tensor.set_requires_grad(true);
        Parameter { tensor, name: None }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The underlying tensor handle (shares data with the parameter).
    pub fn tensor(&self) -> &Tensor {
        &self.tensor
    }

    /// Consumes the Parameter and returns the underlying Tensor.
    pub fn into_inner(self) -> Tensor {
        self.tensor
    }
}

impl Deref for Parameter {
    type Target = Tensor;

    fn deref(&self) -> &Self::Target {
        &self.tensor
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("shape", &self.tensor.shape())
            .finish()
    }
}

impl Clone for Parameter {
    /// Cloning a Parameter clones the underlying Tensor handle (shallow).
    fn clone(&self) -> Self {
        Parameter {
            tensor: self.tensor.clone(),
            name: self.name.clone(),
        }
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
