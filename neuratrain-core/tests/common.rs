use neuratrain_core::Tensor;

/// Routes `log` output to the test harness; safe to call from every test.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The four XOR rows and their targets.
#[allow(dead_code)]
pub fn xor_data() -> (Tensor, Tensor) {
    let x = Tensor::from_rows(&[
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ])
    .expect("xor inputs");
    let y = Tensor::from_rows(&[vec![0.0], vec![1.0], vec![1.0], vec![0.0]]).expect("xor targets");
    (x, y)
}

/// A smooth target in (0, 1) over a 3-feature grid.
#[allow(dead_code)]
pub fn smooth_regression(n: usize) -> (Tensor, Tensor) {
    let mut rows = Vec::with_capacity(n);
    let mut targets = Vec::with_capacity(n);
    for i in 0..n {
        let t = i as f64 / n as f64;
        let features = vec![t, (3.0 * t).sin(), 1.0 - t * t];
        let value = 0.2 + 0.6 * (0.5 * features[0] + 0.3 * features[1] + 0.2 * features[2]);
        rows.push(features);
        targets.push(vec![value]);
    }
    (
        Tensor::from_rows(&rows).expect("regression inputs"),
        Tensor::from_rows(&targets).expect("regression targets"),
    )
}
