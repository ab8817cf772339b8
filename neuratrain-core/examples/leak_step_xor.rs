//! # XOR with leak step adaptation
//!
//! Trains `Sigmoid(2) > Sigmoid(4) > Output(1)` on the XOR table with plain
//! gradient descent while `LeakStepAdaptation` tunes the step, then prints the
//! predictions.
//!
//! Run with `RUST_LOG=info cargo run -p neuratrain-core --example leak_step_xor`.

use neuratrain_core::algorithms::{GradientDescent, LeakStepAdaptation, ShowEpoch};
use neuratrain_core::{Connection, Network, NeuraTrainError, Tensor, TrainConfig};

fn main() -> Result<(), NeuraTrainError> {
    env_logger::init();

    let input = Tensor::from_rows(&[
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ])?;
    let target = Tensor::from_rows(&[vec![0.0], vec![1.0], vec![1.0], vec![0.0]])?;

    let config = TrainConfig::new()
        .with_step(2.0)?
        .with_verbose(true)
        .with_show_epoch(ShowEpoch::Every(500))?
        .with_seed(Some(0));
    let addon = LeakStepAdaptation::new()
        .with_leak_size(0.05)?
        .with_alpha(0.05)?
        .with_beta(20.0)?;
    let mut network = Network::new(Connection::from_sizes(&[2, 4, 1])?, GradientDescent::new(), config)?
        .with_addon(addon)?;

    network.train(&input, &target, None, None, 5000)?;

    println!("network: {}", network.connection());
    println!("final step: {:.6}", network.step());
    let prediction = network.predict(&input)?;
    for row in 0..4 {
        println!(
            "{:?} -> {:.4} (expected {})",
            input.select_rows(&[row])?.to_vec(),
            prediction.get2(row, 0)?,
            target.get2(row, 0)?
        );
    }
    Ok(())
}
