use super::*;
use crate::algorithms::with_test_context;
use crate::utils::testing::check_vec_near;

/// A single `[2]` "parameter" whose error (from the test context) is `sum(p^2)`.
fn setup(
    algorithm: &QuasiNewton,
) -> Result<(Connection, Vec<Tensor>, TrainingVariables), NeuraTrainError> {
    let connection = Connection::from_sizes(&[1, 1])?;
    let params = connection.parameter_tensors();
    let mut vars = TrainingVariables::new(0.1, connection.count_parameters());
    algorithm.init_variables(&connection, &mut vars)?;
    Ok((connection, params, vars))
}

#[test]
fn test_init_variables_shapes() -> Result<(), NeuraTrainError> {
    let qn = QuasiNewton::new().with_h0_scale(2.0)?;
    let (_, _, vars) = setup(&qn)?;
    let h = vars.require(INV_HESSIAN)?;
    assert_eq!(h.shape(), vec![2, 2]);
    assert_eq!(h.to_vec(), vec![2.0, 0.0, 0.0, 2.0]);
    assert_eq!(vars.require(PREV_PARAMS)?.shape(), vec![2]);
    assert_eq!(vars.require(PREV_FULL_GRADIENT)?.shape(), vec![2]);
    assert_eq!(vars.require(N_UPDATES)?.item()?, 0.0);
    Ok(())
}

#[test]
fn test_first_update_minimizes_quadratic_along_gradient() -> Result<(), NeuraTrainError> {
    let qn = QuasiNewton::new();
    let (connection, params, vars) = setup(&qn)?;
    connection.assign_flat_parameters(&[1.0, -2.0])?;
    // gradient of sum(p^2) is 2p, the line minimum is at t = 0.5
    let grads = vec![vec![2.0], vec![-4.0]];
    let updates = with_test_context(&params, &grads, 1, &[], true, |ctx| qn.train_updates(ctx, &vars))?;
    updates.apply()?;

    check_vec_near(&connection.flatten_parameters(), &[0.0, 0.0], 1e-4);
    assert_eq!(vars.require(PREV_PARAMS)?.to_vec(), vec![1.0, -2.0]);
    assert_eq!(vars.require(PREV_FULL_GRADIENT)?.to_vec(), vec![2.0, -4.0]);
    assert_eq!(vars.require(N_UPDATES)?.item()?, 1.0);
    Ok(())
}

#[test]
fn test_non_descent_direction_resets_hessian() -> Result<(), NeuraTrainError> {
    let qn = QuasiNewton::new();
    let (connection, params, vars) = setup(&qn)?;
    connection.assign_flat_parameters(&[1.0, 1.0])?;
    vars.require(INV_HESSIAN)?.set_data(vec![-1.0, 0.0, 0.0, -1.0])?;

    let grads = vec![vec![2.0], vec![2.0]];
    let updates = with_test_context(&params, &grads, 1, &[], true, |ctx| qn.train_updates(ctx, &vars))?;
    updates.apply()?;

    assert_eq!(vars.require(INV_HESSIAN)?.to_vec(), vec![1.0, 0.0, 0.0, 1.0]);
    let p = connection.flatten_parameters();
    assert!(p.iter().map(|v| v * v).sum::<f64>() < 1e-6);
    Ok(())
}

#[test]
fn test_convergence_on_small_gradient() -> Result<(), NeuraTrainError> {
    let qn = QuasiNewton::new().with_gradient_tol(1e-3)?;
    let (_, params, vars) = setup(&qn)?;
    let tiny = vec![vec![1e-4], vec![0.0]];
    let large = vec![vec![1.0], vec![0.0]];
    assert!(with_test_context(&params, &tiny, 1, &[], true, |ctx| qn.has_converged(ctx, &vars)));
    assert!(!with_test_context(&params, &large, 1, &[], true, |ctx| qn.has_converged(ctx, &vars)));
    Ok(())
}

#[test]
fn test_hyper_parameter_validation() {
    assert!(QuasiNewton::new().with_h0_scale(0.0).is_err());
    assert!(QuasiNewton::new().with_h0_scale(-1.0).is_err());
    assert!(QuasiNewton::new().with_gradient_tol(-1e-3).is_err());
    let qn = QuasiNewton::new().with_update_function(UpdateFunction::Sr1);
    assert_eq!(qn.update_function(), UpdateFunction::Sr1);
    assert_eq!(qn.h0_scale(), 1.0);
}
