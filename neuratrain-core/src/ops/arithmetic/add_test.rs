use super::*;
use crate::autograd::check_grad;
use crate::error::NeuraTrainError;

#[test]
fn test_add_same_shape() -> Result<(), NeuraTrainError> {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2])?;
    let b = Tensor::new(vec![10.0, 20.0, 30.0, 40.0], vec![2, 2])?;
    let c = add_op(&a, &b)?;
    assert_eq!(c.shape(), vec![2, 2]);
    assert_eq!(c.to_vec(), vec![11.0, 22.0, 33.0, 44.0]);
    assert!(!c.requires_grad());
    assert!(c.grad_fn().is_none());
    Ok(())
}

#[test]
fn test_add_bias_broadcast() -> Result<(), NeuraTrainError> {
    let x = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3])?;
    let bias = Tensor::new(vec![0.1, 0.2, 0.3], vec![3])?;
    let y = x.add(&bias)?;
    let expected = [1.1, 2.2, 3.3, 4.1, 5.2, 6.3];
    for (actual, expected) in y.to_vec().iter().zip(expected.iter()) {
        approx::assert_relative_eq!(actual, expected, epsilon = 1e-12);
    }
    Ok(())
}

#[test]
fn test_add_incompatible_shapes() -> Result<(), NeuraTrainError> {
    let a = Tensor::new(vec![1.0, 2.0, 3.0], vec![3])?;
    let b = Tensor::new(vec![1.0, 2.0], vec![2])?;
    assert!(matches!(
        add_op(&a, &b),
        Err(NeuraTrainError::BroadcastError { .. })
    ));
    Ok(())
}

#[test]
fn test_add_backward_reduces_bias_grad() -> Result<(), NeuraTrainError> {
    let x = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3])?;
    let bias = Tensor::new(vec![0.0, 0.0, 0.0], vec![3])?;
    x.set_requires_grad(true);
    bias.set_requires_grad(true);

    let y = x.add(&bias)?;
    assert!(y.requires_grad());
    y.sum()?.backward(None)?;

    assert_eq!(x.grad().unwrap().to_vec(), vec![1.0; 6]);
    assert_eq!(bias.grad().unwrap().to_vec(), vec![2.0, 2.0, 2.0]);
    Ok(())
}

#[test]
fn test_add_grad_check() -> Result<(), NeuraTrainError> {
    let a = Tensor::new(vec![0.3, -1.2, 2.0, 0.7], vec![2, 2])?;
    let b = Tensor::new(vec![1.5, -0.5], vec![2])?;
    a.set_requires_grad(true);
    b.set_requires_grad(true);
    check_grad(|t| t[0].add(&t[1])?.mul(&t[0]), &[a, b], 1e-6, 1e-5)
}
