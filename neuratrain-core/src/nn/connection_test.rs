use super::*;
use crate::autograd::check_grad;
use crate::nn::init::InitMethod;

fn xor_connection() -> Result<Connection, NeuraTrainError> {
    Connection::with_seed(
        vec![Layer::sigmoid(2), Layer::sigmoid(3), Layer::output(1)],
        Some(7),
    )
}

#[test]
fn test_from_sizes_builds_sigmoid_chain() -> Result<(), NeuraTrainError> {
    let conn = Connection::from_sizes(&[2, 4, 1])?;
    assert_eq!(conn.to_string(), "Sigmoid(2) > Sigmoid(4) > Output(1)");
    assert_eq!(conn.input_size(), 2);
    assert_eq!(conn.output_size(), 1);
    assert_eq!(conn.parameter_shapes(), vec![vec![2, 4], vec![4], vec![4, 1], vec![1]]);
    assert_eq!(conn.count_parameters(), 8 + 4 + 4 + 1);
    Ok(())
}

#[test]
fn test_invalid_chains_are_rejected() {
    let too_short = Connection::new(vec![Layer::output(1)]);
    assert!(matches!(too_short, Err(NeuraTrainError::InvalidConnection(_))));

    let zero = Connection::new(vec![Layer::sigmoid(0), Layer::output(1)]);
    assert!(matches!(zero, Err(NeuraTrainError::InvalidConnection(_))));

    let output_first = Connection::new(vec![Layer::output(2), Layer::sigmoid(1)]);
    assert!(matches!(output_first, Err(NeuraTrainError::InvalidConnection(_))));

    let softmax_input = Connection::new(vec![Layer::softmax(2), Layer::output(2)]);
    assert!(matches!(softmax_input, Err(NeuraTrainError::InvalidConnection(_))));

    let bad_init = Connection::new(vec![
        Layer::sigmoid(2).with_init_method(InitMethod::Uniform { low: 1.0, high: -1.0 }),
        Layer::output(1),
    ]);
    assert!(matches!(bad_init, Err(NeuraTrainError::InvalidProperty { .. })));
}

#[test]
fn test_named_parameters_order() -> Result<(), NeuraTrainError> {
    let conn = xor_connection()?;
    let names: Vec<String> = conn.named_parameters().into_iter().map(|(n, _)| n).collect();
    assert_eq!(
        names,
        vec!["layer0.weight", "layer0.bias", "layer1.weight", "layer1.bias"]
    );
    assert!(conn.parameters().iter().all(|p| p.requires_grad()));
    Ok(())
}

#[test]
fn test_forward_shapes_and_input_check() -> Result<(), NeuraTrainError> {
    let conn = xor_connection()?;
    let x = Tensor::from_rows(&[vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0]])?;
    let y = conn.forward(&x)?;
    assert_eq!(y.shape(), vec![3, 1]);

    let wrong = Tensor::new(vec![1.0, 2.0, 3.0], vec![1, 3])?;
    assert!(matches!(
        conn.forward(&wrong),
        Err(NeuraTrainError::ShapeMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_seeded_construction_is_reproducible() -> Result<(), NeuraTrainError> {
    let a = xor_connection()?;
    let b = xor_connection()?;
    assert_eq!(a.flatten_parameters(), b.flatten_parameters());
    Ok(())
}

#[test]
fn test_flatten_and_assign_parameters() -> Result<(), NeuraTrainError> {
    let conn = xor_connection()?;
    let n = conn.count_parameters();
    let flat: Vec<f64> = (0..n).map(|i| i as f64 * 0.1).collect();
    conn.assign_flat_parameters(&flat)?;
    assert_eq!(conn.flatten_parameters(), flat);
    assert_eq!(conn.dense_layers()[0].bias().to_vec(), vec![0.6, 0.7, 0.8]);
    assert!(conn.assign_flat_parameters(&flat[1..]).is_err());
    Ok(())
}

#[test]
fn test_forward_with_parameters_matches_forward() -> Result<(), NeuraTrainError> {
    let conn = xor_connection()?;
    let x = Tensor::from_rows(&[vec![0.5, -1.0], vec![1.0, 1.0]])?;
    let flat = conn.flatten_parameters();
    let direct = conn.forward(&x)?.to_vec();
    let via_flat = conn.forward_with_parameters(&x, &flat)?;
    assert_eq!(direct, via_flat.to_vec());
    assert!(!via_flat.requires_grad());

    let shifted: Vec<f64> = flat.iter().map(|v| v + 1.0).collect();
    conn.forward_with_parameters(&x, &shifted)?;
    assert_eq!(conn.flatten_parameters(), flat, "stored parameters untouched");
    Ok(())
}

#[test]
fn test_gradients_flatten_in_parameter_order() -> Result<(), NeuraTrainError> {
    let conn = xor_connection()?;
    assert_eq!(conn.flatten_gradients(), vec![0.0; conn.count_parameters()]);

    let x = Tensor::from_rows(&[vec![1.0, 2.0]])?;
    conn.forward(&x)?.sum()?.backward(None)?;
    let grads = conn.gradients();
    assert_eq!(grads.len(), 4);
    // The last weighted layer is Sigmoid(3), so d(out)/d(bias) = s(z)(1 - s(z)).
    assert_eq!(grads[3].len(), 1);
    assert!(grads[3][0] > 0.0 && grads[3][0] <= 0.25);
    assert_eq!(conn.flatten_gradients().len(), conn.count_parameters());

    conn.zero_grad();
    assert!(conn.parameters().iter().all(|p| p.grad().is_none()));
    Ok(())
}

#[test]
fn test_network_output_grad_check() -> Result<(), NeuraTrainError> {
    let conn = Connection::with_seed(
        vec![Layer::tanh(3), Layer::softplus(4), Layer::sigmoid(2), Layer::output(2)],
        Some(11),
    )?;
    let x = Tensor::from_rows(&[vec![0.1, -0.4, 0.9], vec![1.2, 0.3, -0.5]])?;
    let params = conn.parameter_tensors();
    check_grad(
        |_| conn.forward(&x)?.square(),
        &params,
        1e-6,
        1e-5,
    )
}
