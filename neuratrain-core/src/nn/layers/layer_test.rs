use super::*;
use crate::error::NeuraTrainError;
use crate::nn::init::InitMethod;
use crate::tensor::Tensor;

#[test]
fn test_layer_constructors_and_display() {
    let layer = Layer::sigmoid(13);
    assert_eq!(layer.kind(), LayerKind::Sigmoid);
    assert_eq!(layer.size(), 13);
    assert_eq!(layer.init_method(), InitMethod::XavierNormal);
    assert_eq!(layer.to_string(), "Sigmoid(13)");
    assert_eq!(Layer::output(1).to_string(), "Output(1)");
    assert!(Layer::output(1).is_output());
    assert!(!Layer::linear(3).is_output());
}

#[test]
fn test_with_init_method() {
    let layer = Layer::tanh(4).with_init_method(InitMethod::Constant(0.1));
    assert_eq!(layer.init_method(), InitMethod::Constant(0.1));
}

#[test]
fn test_activate_linear_and_output_are_identity() -> Result<(), NeuraTrainError> {
    let x = Tensor::new(vec![-1.0, 2.0], vec![1, 2])?;
    assert_eq!(LayerKind::Linear.activate(&x)?.to_vec(), vec![-1.0, 2.0]);
    assert_eq!(LayerKind::Output.activate(&x)?.to_vec(), vec![-1.0, 2.0]);
    assert_eq!(LayerKind::Relu.activate(&x)?.to_vec(), vec![0.0, 2.0]);
    Ok(())
}
