use super::*;
use crate::error::NeuraTrainError;
use crate::tensor::Tensor;

#[test]
fn test_sum_and_mean_values() -> Result<(), NeuraTrainError> {
    let x = Tensor::new(vec![1.0, 2.0, 3.0, 6.0], vec![2, 2])?;
    let s = sum_op(&x)?;
    assert_eq!(s.shape(), Vec::<usize>::new());
    assert_eq!(s.item()?, 12.0);
    assert_eq!(mean_op(&x)?.item()?, 3.0);
    Ok(())
}

#[test]
fn test_mean_backward_spreads_evenly() -> Result<(), NeuraTrainError> {
    let x = Tensor::new(vec![1.0, 2.0, 3.0, 6.0], vec![4])?;
    x.set_requires_grad(true);
    x.mean()?.backward(None)?;
    assert_eq!(x.grad().unwrap().to_vec(), vec![0.25; 4]);
    Ok(())
}

#[test]
fn test_mean_of_empty_tensor_fails() -> Result<(), NeuraTrainError> {
    let x = Tensor::new(vec![], vec![0, 3])?;
    assert!(x.mean().is_err());
    assert_eq!(x.sum()?.item()?, 0.0);
    Ok(())
}
