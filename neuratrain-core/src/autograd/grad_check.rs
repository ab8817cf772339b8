use approx::relative_eq;

use crate::error::NeuraTrainError;
use crate::tensor::Tensor;

/// Compares analytical gradients against central finite differences.
///
/// `func` maps the inputs to an output; a multi-element output is summed
/// before differentiation. Every input that requires grad is checked element by
/// element, perturbing it by `±epsilon` in place and restoring it afterwards.
///
/// # Errors
/// Returns `GradientCheckError` for the first element whose analytical and
/// numerical gradients differ by more than `tolerance` (absolute or relative).
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), NeuraTrainError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, NeuraTrainError>,
{
    for input in inputs {
        input.clear_grad();
    }

    let output = scalar_output(func(inputs)?)?;
    output.backward(None)?;

    for (input_index, input) in inputs.iter().enumerate() {
        if !input.requires_grad() {
            continue;
        }
        let original = input.to_vec();
        let analytical = match input.grad() {
            Some(g) => g.to_vec(),
            None => vec![0.0; original.len()],
        };

        for element_index in 0..original.len() {
            let mut perturbed = original.clone();

            perturbed[element_index] = original[element_index] + epsilon;
            input.set_data(perturbed.clone())?;
            let plus = scalar_output(func(inputs)?)?.item()?;

            perturbed[element_index] = original[element_index] - epsilon;
            input.set_data(perturbed)?;
            let minus = scalar_output(func(inputs)?)?.item()?;

            input.set_data(original.clone())?;

            let numerical = (plus - minus) / (2.0 * epsilon);
            let analytical_value = analytical[element_index];
            if !relative_eq!(
                analytical_value,
                numerical,
                epsilon = tolerance,
                max_relative = tolerance
            ) {
                return Err(NeuraTrainError::GradientCheckError {
                    input_index,
                    element_index,
                    analytical: analytical_value,
                    numerical,
                });
            }
        }
    }
    Ok(())
}

fn scalar_output(output: Tensor) -> Result<Tensor, NeuraTrainError> {
    if output.numel() == 1 {
        Ok(output)
    } else {
        output.sum()
    }
}
