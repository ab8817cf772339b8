use approx::assert_relative_eq;

use super::*;
use crate::autograd::check_grad;
use crate::error::NeuraTrainError;
use crate::tensor::Tensor;

fn sample() -> Result<Tensor, NeuraTrainError> {
    let t = Tensor::new(vec![-2.0, -0.5, 0.3, 1.7, 4.0, -3.1], vec![2, 3])?;
    t.set_requires_grad(true);
    Ok(t)
}

#[test]
fn test_sigmoid_values() -> Result<(), NeuraTrainError> {
    let x = Tensor::new(vec![0.0, 800.0, -800.0], vec![3])?;
    let y = sigmoid_op(&x)?.to_vec();
    assert_relative_eq!(y[0], 0.5);
    assert_relative_eq!(y[1], 1.0);
    assert_relative_eq!(y[2], 0.0);
    assert!(y.iter().all(|v| v.is_finite()));
    Ok(())
}

#[test]
fn test_sigmoid_grad_check() -> Result<(), NeuraTrainError> {
    check_grad(|t| t[0].sigmoid(), &[sample()?], 1e-6, 1e-6)
}

#[test]
fn test_tanh_grad_check() -> Result<(), NeuraTrainError> {
    check_grad(|t| t[0].tanh(), &[sample()?], 1e-6, 1e-6)
}

#[test]
fn test_relu_forward_backward() -> Result<(), NeuraTrainError> {
    let x = Tensor::new(vec![-1.0, 0.0, 2.0], vec![3])?;
    x.set_requires_grad(true);
    let y = x.relu()?;
    assert_eq!(y.to_vec(), vec![0.0, 0.0, 2.0]);
    y.sum()?.backward(None)?;
    assert_eq!(x.grad().unwrap().to_vec(), vec![0.0, 0.0, 1.0]);
    Ok(())
}

#[test]
fn test_softplus_is_stable_and_correct() -> Result<(), NeuraTrainError> {
    let x = Tensor::new(vec![0.0, 1000.0, -1000.0], vec![3])?;
    let y = softplus_op(&x)?.to_vec();
    assert_relative_eq!(y[0], 2f64.ln(), epsilon = 1e-12);
    assert_relative_eq!(y[1], 1000.0);
    assert_relative_eq!(y[2], 0.0);
    check_grad(|t| t[0].softplus(), &[sample()?], 1e-6, 1e-6)
}

#[test]
fn test_softmax_rows_sum_to_one() -> Result<(), NeuraTrainError> {
    let x = Tensor::new(vec![1.0, 2.0, 3.0, 1000.0, 1000.0, 1000.0], vec![2, 3])?;
    let y = softmax_op(&x)?.to_vec();
    assert_relative_eq!(y[0..3].iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    for v in &y[3..6] {
        assert_relative_eq!(*v, 1.0 / 3.0, epsilon = 1e-12);
    }
    assert!(y[2] > y[1] && y[1] > y[0]);
    Ok(())
}

#[test]
fn test_softmax_grad_check() -> Result<(), NeuraTrainError> {
    // Weight the outputs so the summed loss is not constant.
    let w = Tensor::new(vec![1.0, -2.0, 0.5, 3.0, 0.1, -1.0], vec![2, 3])?;
    check_grad(|t| t[0].softmax()?.mul(&t[1]), &[sample()?, w], 1e-6, 1e-6)
}
