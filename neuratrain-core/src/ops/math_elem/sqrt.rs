use crate::error::NeuraTrainError;
use crate::ops::unary_op;
use crate::tensor::Tensor;

/// Element-wise square root. The subgradient at zero is 0.
pub fn sqrt_op(input: &Tensor) -> Result<Tensor, NeuraTrainError> {
    unary_op(input, f64::sqrt, |_, y| if y == 0.0 { 0.0 } else { 0.5 / y })
}

impl Tensor {
    pub fn sqrt(&self) -> Result<Tensor, NeuraTrainError> {
        sqrt_op(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::check_grad;

    #[test]
    fn test_sqrt_forward_and_grad() -> Result<(), NeuraTrainError> {
        let x = Tensor::new(vec![4.0, 9.0, 0.25], vec![3])?;
        assert_eq!(sqrt_op(&x)?.to_vec(), vec![2.0, 3.0, 0.5]);
        x.set_requires_grad(true);
        check_grad(|t| t[0].sqrt(), &[x], 1e-6, 1e-6)
    }

    #[test]
    fn test_sqrt_grad_at_zero_is_zero() -> Result<(), NeuraTrainError> {
        let x = Tensor::new(vec![0.0, 4.0], vec![2])?;
        x.set_requires_grad(true);
        x.sqrt()?.sum()?.backward(None)?;
        assert_eq!(x.grad().unwrap().to_vec(), vec![0.0, 0.25]);
        Ok(())
    }
}
