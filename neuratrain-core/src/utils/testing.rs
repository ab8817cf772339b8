use approx::relative_eq;

use crate::tensor::Tensor;

/// Checks that a tensor has the expected shape and approximately the expected data.
///
/// Panics on the first mismatch, so it is meant for tests.
pub fn check_tensor_near(
    actual: &Tensor,
    expected_shape: &[usize],
    expected_data: &[f64],
    tolerance: f64,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    let actual_data = actual.to_vec();
    assert_eq!(
        actual_data.len(),
        expected_data.len(),
        "Data length mismatch"
    );
    for (i, (a, e)) in actual_data.iter().zip(expected_data.iter()).enumerate() {
        if !relative_eq!(*a, *e, epsilon = tolerance, max_relative = tolerance) {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, tolerance={:?}",
                i, a, e, tolerance
            );
        }
    }
}

/// Checks two flat vectors element-wise with the same rule as [`check_tensor_near`].
pub fn check_vec_near(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "Length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        if !relative_eq!(*a, *e, epsilon = tolerance, max_relative = tolerance) {
            panic!(
                "Value mismatch at index {}: actual={:?}, expected={:?}, tolerance={:?}",
                i, a, e, tolerance
            );
        }
    }
}
