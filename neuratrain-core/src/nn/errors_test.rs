use approx::assert_relative_eq;

use super::*;
use crate::autograd::check_grad;

fn pair() -> Result<(Tensor, Tensor), NeuraTrainError> {
    let actual = Tensor::new(vec![0.2, 0.8, 0.5, 0.9], vec![4, 1])?;
    let expected = Tensor::new(vec![0.0, 1.0, 0.7, 0.6], vec![4, 1])?;
    Ok((actual, expected))
}

#[test]
fn test_mse_family_values() -> Result<(), NeuraTrainError> {
    let (a, e) = pair()?;
    // squared diffs: 0.04, 0.04, 0.04, 0.09
    assert_relative_eq!(mse(&a, &e)?.item()?, 0.0525, epsilon = 1e-12);
    assert_relative_eq!(rmse(&a, &e)?.item()?, 0.0525f64.sqrt(), epsilon = 1e-12);
    assert_relative_eq!(mae(&a, &e)?.item()?, 0.225, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_msle_and_rmsle_values() -> Result<(), NeuraTrainError> {
    let (a, e) = pair()?;
    let expected_msle = [(0.2, 0.0), (0.8, 1.0), (0.5, 0.7), (0.9, 0.6)]
        .iter()
        .map(|(x, y): &(f64, f64)| (x.ln_1p() - y.ln_1p()).powi(2))
        .sum::<f64>()
        / 4.0;
    assert_relative_eq!(msle(&a, &e)?.item()?, expected_msle, epsilon = 1e-12);
    assert_relative_eq!(rmsle(&a, &e)?.item()?, expected_msle.sqrt(), epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_binary_crossentropy_value_and_clipping() -> Result<(), NeuraTrainError> {
    let (a, e) = pair()?;
    let expected_bce = -[(0.2, 0.0), (0.8, 1.0), (0.5, 0.7), (0.9, 0.6)]
        .iter()
        .map(|(p, y): &(f64, f64)| y * p.ln() + (1.0 - y) * (1.0 - p).ln())
        .sum::<f64>()
        / 4.0;
    assert_relative_eq!(
        binary_crossentropy(&a, &e)?.item()?,
        expected_bce,
        epsilon = 1e-12
    );

    let certain = Tensor::new(vec![0.0, 1.0], vec![2, 1])?;
    let wrong = Tensor::new(vec![1.0, 0.0], vec![2, 1])?;
    assert!(binary_crossentropy(&certain, &wrong)?.item()?.is_finite());
    Ok(())
}

#[test]
fn test_shape_mismatch() -> Result<(), NeuraTrainError> {
    let a = Tensor::new(vec![1.0, 2.0], vec![2, 1])?;
    let e = Tensor::new(vec![1.0, 2.0], vec![1, 2])?;
    assert!(matches!(mse(&a, &e), Err(NeuraTrainError::ShapeMismatch { .. })));
    Ok(())
}

#[test]
fn test_from_str_and_display() -> Result<(), NeuraTrainError> {
    assert_eq!("RMSLE".parse::<ErrorFunction>()?, ErrorFunction::Rmsle);
    assert_eq!(
        "binary_crossentropy".parse::<ErrorFunction>()?,
        ErrorFunction::BinaryCrossentropy
    );
    assert!("hinge".parse::<ErrorFunction>().is_err());
    assert_eq!(ErrorFunction::default(), ErrorFunction::Mse);
    assert_eq!(ErrorFunction::Mae.to_string(), "mae");
    Ok(())
}

#[test]
fn test_error_gradients_match_numerical() -> Result<(), NeuraTrainError> {
    let (a, e) = pair()?;
    a.set_requires_grad(true);
    for function in [
        ErrorFunction::Mse,
        ErrorFunction::Rmse,
        ErrorFunction::Mae,
        ErrorFunction::Msle,
        ErrorFunction::Rmsle,
        ErrorFunction::BinaryCrossentropy,
    ] {
        check_grad(|t| function.compute(&t[0], &t[1]), &[a.clone(), e.clone()], 1e-7, 1e-5)?;
    }
    Ok(())
}
